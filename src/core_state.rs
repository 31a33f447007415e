//! Shared application state: the three domain services wired over one
//! database connection.

use std::path::Path;
use std::sync::Arc;

use rusqlite::Connection;

use crate::config::DatabaseLocation;
use crate::db::{
    self, DatabaseError, SharedConnection, SqliteAppointmentRepository, SqliteDoctorRepository,
    SqlitePatientRepository,
};
use crate::services::{AppointmentService, DoctorService, PatientService};

pub struct CoreState {
    pub doctors: DoctorService,
    pub patients: PatientService,
    pub appointments: AppointmentService,
}

impl CoreState {
    /// Wire the services over an already-migrated connection.
    pub fn new(conn: SharedConnection) -> Self {
        let doctors = DoctorService::new(Arc::new(SqliteDoctorRepository::new(conn.clone())));
        let patients = PatientService::new(Arc::new(SqlitePatientRepository::new(conn.clone())));
        let appointments = AppointmentService::new(
            Arc::new(SqliteAppointmentRepository::new(conn)),
            doctors.clone(),
            patients.clone(),
        );
        Self {
            doctors,
            patients,
            appointments,
        }
    }

    pub fn open(location: &DatabaseLocation) -> Result<Self, DatabaseError> {
        let conn = match location {
            DatabaseLocation::File(path) => open_file(path)?,
            DatabaseLocation::Memory => db::open_memory_database()?,
        };
        Ok(Self::new(db::shared(conn)))
    }

    /// In-memory state (for testing)
    pub fn in_memory() -> Result<Self, DatabaseError> {
        Self::open(&DatabaseLocation::Memory)
    }
}

fn open_file(path: &Path) -> Result<Connection, DatabaseError> {
    tracing::info!(path = %path.display(), "Opening database");
    db::open_database(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Doctor, Specialty};

    #[test]
    fn services_share_one_database() {
        let core = CoreState::in_memory().unwrap();
        core.doctors
            .add(Doctor {
                id: 1,
                name: "Ana".into(),
                surname: "Ruiz".into(),
                email: "ana@clinic.test".into(),
                specialty: Specialty::InternalMedicine,
            })
            .unwrap();
        // The appointment service resolves parents through the same store.
        assert!(core.appointments.find_by_doctor(1).unwrap().is_empty());
    }

    #[test]
    fn open_file_location() {
        let dir = tempfile::tempdir().unwrap();
        let location = DatabaseLocation::File(dir.path().join("state.db"));
        let core = CoreState::open(&location).unwrap();
        assert!(core.patients.find_all().unwrap().is_empty());
    }
}
