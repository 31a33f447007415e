//! Appointment endpoints.
//!
//! Appointments are addressed by their composite key: as query
//! parameters for lookup and for the key being replaced, or as a JSON
//! `{doctor_id, patient_id, timestamp}` body for create/modify/delete.
//!
//! - `GET    /api/appointments`
//! - `GET    /api/appointments/one?doctor_id=&patient_id=&timestamp=`
//! - `POST   /api/appointments` (body: key), responds 201 with the key
//! - `PUT    /api/appointments?<old key>` (body: new key)
//! - `DELETE /api/appointments` (body: key)

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, KeyQuery};
use crate::models::{Appointment, AppointmentKey};

pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Appointment>>, ApiError> {
    Ok(Json(ctx.core.appointments.find_all()?))
}

pub async fn one(
    State(ctx): State<ApiContext>,
    query: Result<Query<KeyQuery>, QueryRejection>,
) -> Result<Json<Appointment>, ApiError> {
    let Query(query) = query?;
    let key = AppointmentKey::from(query);
    Ok(Json(ctx.core.appointments.find_by_id(&key)?))
}

pub async fn create(
    State(ctx): State<ApiContext>,
    payload: Result<Json<AppointmentKey>, JsonRejection>,
) -> Result<(StatusCode, Json<AppointmentKey>), ApiError> {
    let Json(key) = payload?;
    let created = ctx.core.appointments.add(&key)?;
    Ok((StatusCode::CREATED, Json(created.key())))
}

pub async fn update(
    State(ctx): State<ApiContext>,
    old: Result<Query<KeyQuery>, QueryRejection>,
    payload: Result<Json<AppointmentKey>, JsonRejection>,
) -> Result<Json<Appointment>, ApiError> {
    let Query(old) = old?;
    let Json(new_key) = payload?;
    let old_key = AppointmentKey::from(old);
    Ok(Json(ctx.core.appointments.modify(&old_key, &new_key)?))
}

pub async fn remove(
    State(ctx): State<ApiContext>,
    payload: Result<Json<AppointmentKey>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(key) = payload?;
    ctx.core.appointments.delete(&key)?;
    Ok(StatusCode::NO_CONTENT)
}
