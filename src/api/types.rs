//! Shared types for the API layer.

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::core_state::CoreState;
use crate::models::{timestamp, AppointmentKey, DoctorId, PatientId};

/// Shared context for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self { core }
    }
}

/// Composite key passed as query parameters
/// (`?doctor_id=1&patient_id=100&timestamp=2024-01-10T09:00`).
#[derive(Debug, Clone, Deserialize)]
pub struct KeyQuery {
    pub doctor_id: DoctorId,
    pub patient_id: PatientId,
    #[serde(with = "timestamp")]
    pub timestamp: NaiveDateTime,
}

impl From<KeyQuery> for AppointmentKey {
    fn from(q: KeyQuery) -> Self {
        AppointmentKey::new(q.doctor_id, q.patient_id, q.timestamp)
    }
}
