//! Doctor endpoints.
//!
//! - `GET    /api/doctors`
//! - `GET    /api/doctors/:id`
//! - `GET    /api/doctors/specialty/:specialty`
//! - `GET    /api/doctors/:id/appointments`
//! - `POST   /api/doctors`
//! - `PUT    /api/doctors/:id`
//! - `DELETE /api/doctors/:id`

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{Appointment, Doctor, DoctorId, Specialty};

pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Doctor>>, ApiError> {
    Ok(Json(ctx.core.doctors.find_all()?))
}

pub async fn detail(
    State(ctx): State<ApiContext>,
    id: Result<Path<DoctorId>, PathRejection>,
) -> Result<Json<Doctor>, ApiError> {
    let Path(id) = id?;
    Ok(Json(ctx.core.doctors.find_by_id(id)?))
}

pub async fn by_specialty(
    State(ctx): State<ApiContext>,
    specialty: Result<Path<Specialty>, PathRejection>,
) -> Result<Json<Vec<Doctor>>, ApiError> {
    let Path(specialty) = specialty?;
    Ok(Json(ctx.core.doctors.find_all_by_specialty(specialty)?))
}

pub async fn appointments(
    State(ctx): State<ApiContext>,
    id: Result<Path<DoctorId>, PathRejection>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    let Path(id) = id?;
    Ok(Json(ctx.core.appointments.find_by_doctor(id)?))
}

pub async fn create(
    State(ctx): State<ApiContext>,
    payload: Result<Json<Doctor>, JsonRejection>,
) -> Result<(StatusCode, Json<Doctor>), ApiError> {
    let Json(doctor) = payload?;
    let created = ctx.core.doctors.add(doctor)?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(ctx): State<ApiContext>,
    id: Result<Path<DoctorId>, PathRejection>,
    payload: Result<Json<Doctor>, JsonRejection>,
) -> Result<Json<Doctor>, ApiError> {
    let Path(id) = id?;
    let Json(doctor) = payload?;
    Ok(Json(ctx.core.doctors.modify(id, doctor)?))
}

pub async fn remove(
    State(ctx): State<ApiContext>,
    id: Result<Path<DoctorId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    ctx.core.doctors.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
