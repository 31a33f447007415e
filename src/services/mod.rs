//! Domain services.
//!
//! Each service receives its repository (and, for appointments, its
//! sibling services) at construction. Services hold no state between
//! calls; every failure is returned to the caller unchanged.

mod appointment;
mod doctor;
mod patient;

pub use appointment::AppointmentService;
pub use doctor::DoctorService;
pub use patient::PatientService;

use std::fmt::Display;

use thiserror::Error;

use crate::db::DatabaseError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The id or composite key is not in storage.
    #[error("{entity} not found with id: {id}")]
    NotFound { entity: &'static str, id: String },

    /// An explicit pre-check found the key before any write.
    #[error("Primary key already exists: {entity} with id {id}")]
    AlreadyExists { entity: &'static str, id: String },

    /// The storage layer rejected a write the pre-checks did not catch.
    #[error("Data integrity violation: {0}")]
    DataIntegrity(String),

    #[error(transparent)]
    Database(DatabaseError),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: impl Display) -> Self {
        ServiceError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn already_exists(entity: &'static str, id: impl Display) -> Self {
        ServiceError::AlreadyExists {
            entity,
            id: id.to_string(),
        }
    }
}

impl From<DatabaseError> for ServiceError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::ConstraintViolation(detail) => ServiceError::DataIntegrity(detail),
            other => ServiceError::Database(other),
        }
    }
}
