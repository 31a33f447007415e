//! Appointment identity.
//!
//! An appointment has no surrogate id: the triple
//! `(doctor_id, patient_id, timestamp)` is its primary key. `Appointment`
//! derives its key from the doctor and patient it holds, so the ids in the
//! key can never drift from the referenced entities.

use std::fmt;

use chrono::NaiveDateTime;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::doctor::{Doctor, DoctorId};
use super::patient::{Patient, PatientId};
use super::timestamp;

/// Composite primary key of an appointment. Compared and hashed field-wise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AppointmentKey {
    pub doctor_id: DoctorId,
    pub patient_id: PatientId,
    #[serde(with = "timestamp")]
    pub timestamp: NaiveDateTime,
}

impl AppointmentKey {
    pub fn new(doctor_id: DoctorId, patient_id: PatientId, timestamp: NaiveDateTime) -> Self {
        Self {
            doctor_id,
            patient_id,
            timestamp,
        }
    }
}

impl fmt::Display for AppointmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "doctor {}, patient {}, {}",
            self.doctor_id,
            self.patient_id,
            timestamp::format(&self.timestamp)
        )
    }
}

/// A booked appointment bound to its doctor and patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    doctor: Doctor,
    patient: Patient,
    timestamp: NaiveDateTime,
}

impl Appointment {
    pub fn new(doctor: Doctor, patient: Patient, timestamp: NaiveDateTime) -> Self {
        Self {
            doctor,
            patient,
            timestamp,
        }
    }

    pub fn key(&self) -> AppointmentKey {
        AppointmentKey::new(self.doctor.id, self.patient.id, self.timestamp)
    }

    pub fn doctor(&self) -> &Doctor {
        &self.doctor
    }

    pub fn patient(&self) -> &Patient {
        &self.patient
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}

// Serialized as `{ "id": <key>, "doctor": ..., "patient": ... }`.
impl Serialize for Appointment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Appointment", 3)?;
        state.serialize_field("id", &self.key())?;
        state.serialize_field("doctor", &self.doctor)?;
        state.serialize_field("patient", &self.patient)?;
        state.end()
    }
}
