//! Patient endpoints, mirroring the doctor ones (no specialty filter).

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{Appointment, Patient, PatientId};

pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Patient>>, ApiError> {
    Ok(Json(ctx.core.patients.find_all()?))
}

pub async fn detail(
    State(ctx): State<ApiContext>,
    id: Result<Path<PatientId>, PathRejection>,
) -> Result<Json<Patient>, ApiError> {
    let Path(id) = id?;
    Ok(Json(ctx.core.patients.find_by_id(id)?))
}

pub async fn appointments(
    State(ctx): State<ApiContext>,
    id: Result<Path<PatientId>, PathRejection>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    let Path(id) = id?;
    Ok(Json(ctx.core.appointments.find_by_patient(id)?))
}

pub async fn create(
    State(ctx): State<ApiContext>,
    payload: Result<Json<Patient>, JsonRejection>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    let Json(patient) = payload?;
    let created = ctx.core.patients.add(patient)?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(ctx): State<ApiContext>,
    id: Result<Path<PatientId>, PathRejection>,
    payload: Result<Json<Patient>, JsonRejection>,
) -> Result<Json<Patient>, ApiError> {
    let Path(id) = id?;
    let Json(patient) = payload?;
    Ok(Json(ctx.core.patients.modify(id, patient)?))
}

pub async fn remove(
    State(ctx): State<ApiContext>,
    id: Result<Path<PatientId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    ctx.core.patients.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
