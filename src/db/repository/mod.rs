//! Repository layer: entity-scoped database operations.
//!
//! The domain services only see the traits below; `Sqlite*Repository`
//! types implement them over a [`SharedConnection`]. Tests substitute
//! in-memory fakes where a failing or racing gateway is needed.

mod appointment;
mod doctor;
mod patient;

use crate::models::{
    Appointment, AppointmentKey, Doctor, DoctorId, Patient, PatientId, Specialty,
};

use super::DatabaseError;

pub use appointment::SqliteAppointmentRepository;
pub use doctor::SqliteDoctorRepository;
pub use patient::SqlitePatientRepository;

/// Base repository operations for any entity keyed by `K`.
///
/// `save` is an upsert unless an implementation says otherwise. Every
/// call may fail with [`DatabaseError::ConstraintViolation`].
pub trait Repository<T, K>: Send + Sync {
    fn get(&self, id: &K) -> Result<Option<T>, DatabaseError>;
    fn list(&self) -> Result<Vec<T>, DatabaseError>;
    fn save(&self, entity: &T) -> Result<T, DatabaseError>;
    fn delete(&self, id: &K) -> Result<(), DatabaseError>;
}

pub trait DoctorRepository: Repository<Doctor, DoctorId> {
    fn list_by_specialty(&self, specialty: Specialty) -> Result<Vec<Doctor>, DatabaseError>;
}

pub trait PatientRepository: Repository<Patient, PatientId> {}

/// Appointment rows carry nothing but their key, so `save` is a plain
/// insert: saving an existing key is a constraint violation.
pub trait AppointmentRepository: Repository<Appointment, AppointmentKey> {
    fn list_by_doctor(&self, doctor_id: DoctorId) -> Result<Vec<Appointment>, DatabaseError>;
    fn list_by_patient(&self, patient_id: PatientId) -> Result<Vec<Appointment>, DatabaseError>;

    /// Delete the row at `old` and insert `new`.
    ///
    /// The default runs the two steps independently: if the insert fails
    /// the old row is already gone. Implementations with transactions
    /// should override it.
    fn replace(&self, old: &AppointmentKey, new: &Appointment) -> Result<Appointment, DatabaseError> {
        self.delete(old)?;
        self.save(new)
    }
}
