use serde::{Deserialize, Serialize};

use super::enums::Specialty;

/// Professional identifier, assigned by the caller.
pub type DoctorId = i64;

/// A doctor as stored and exposed over the API.
///
/// Appointments held by a doctor are reached through
/// `AppointmentService::find_by_doctor`, never embedded here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: DoctorId,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub specialty: Specialty,
}
