use rusqlite::{params, Connection, OptionalExtension, Params};

use crate::db::{lock, DatabaseError, SharedConnection};
use crate::models::{timestamp, Appointment, AppointmentKey, DoctorId, PatientId};

use super::doctor::{doctor_from_row, doctor_row_at, DoctorRow};
use super::patient::{patient_from_row, patient_row_at, PatientRow};
use super::{AppointmentRepository, Repository};

/// Appointment rows joined with their doctor (columns 1..=5) and
/// patient (columns 6..=10).
const APPOINTMENT_SELECT: &str = "SELECT a.timestamp,
        d.id, d.name, d.surname, d.email, d.specialty,
        p.id, p.name, p.surname, p.phone, p.birth_date
     FROM appointments a
     JOIN doctors d ON d.id = a.doctor_id
     JOIN patients p ON p.id = a.patient_id";

pub struct SqliteAppointmentRepository {
    conn: SharedConnection,
}

impl SqliteAppointmentRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    fn query_many<P: Params>(&self, filter: &str, params: P) -> Result<Vec<Appointment>, DatabaseError> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare(&format!("{APPOINTMENT_SELECT} {filter}"))?;
        let rows = stmt.query_map(params, |row| Ok(appointment_row_from_rusqlite(row)))?;

        let mut appointments = Vec::new();
        for row in rows {
            appointments.push(appointment_from_row(row??)?);
        }
        Ok(appointments)
    }
}

impl Repository<Appointment, AppointmentKey> for SqliteAppointmentRepository {
    fn get(&self, key: &AppointmentKey) -> Result<Option<Appointment>, DatabaseError> {
        let conn = lock(&self.conn)?;
        let row = conn
            .query_row(
                &format!(
                    "{APPOINTMENT_SELECT}
                     WHERE a.doctor_id = ?1 AND a.patient_id = ?2 AND a.timestamp = ?3"
                ),
                params![key.doctor_id, key.patient_id, timestamp::format(&key.timestamp)],
                appointment_row_from_rusqlite,
            )
            .optional()?;
        row.map(appointment_from_row).transpose()
    }

    fn list(&self) -> Result<Vec<Appointment>, DatabaseError> {
        self.query_many("", params![])
    }

    fn save(&self, appointment: &Appointment) -> Result<Appointment, DatabaseError> {
        let conn = lock(&self.conn)?;
        insert_appointment(&conn, appointment)?;
        Ok(appointment.clone())
    }

    fn delete(&self, key: &AppointmentKey) -> Result<(), DatabaseError> {
        let conn = lock(&self.conn)?;
        delete_appointment(&conn, key)?;
        Ok(())
    }
}

impl AppointmentRepository for SqliteAppointmentRepository {
    fn list_by_doctor(&self, doctor_id: DoctorId) -> Result<Vec<Appointment>, DatabaseError> {
        self.query_many("WHERE a.doctor_id = ?1", params![doctor_id])
    }

    fn list_by_patient(&self, patient_id: PatientId) -> Result<Vec<Appointment>, DatabaseError> {
        self.query_many("WHERE a.patient_id = ?1", params![patient_id])
    }

    /// Delete and insert inside one transaction; a failed insert rolls the
    /// delete back and the old row survives.
    fn replace(&self, old: &AppointmentKey, new: &Appointment) -> Result<Appointment, DatabaseError> {
        let mut conn = lock(&self.conn)?;
        let tx = conn.transaction()?;
        delete_appointment(&tx, old)?;
        insert_appointment(&tx, new)?;
        tx.commit()?;
        Ok(new.clone())
    }
}

fn insert_appointment(conn: &Connection, appointment: &Appointment) -> Result<(), DatabaseError> {
    let key = appointment.key();
    conn.execute(
        "INSERT INTO appointments (doctor_id, patient_id, timestamp) VALUES (?1, ?2, ?3)",
        params![key.doctor_id, key.patient_id, timestamp::format(&key.timestamp)],
    )?;
    Ok(())
}

fn delete_appointment(conn: &Connection, key: &AppointmentKey) -> Result<(), DatabaseError> {
    conn.execute(
        "DELETE FROM appointments WHERE doctor_id = ?1 AND patient_id = ?2 AND timestamp = ?3",
        params![key.doctor_id, key.patient_id, timestamp::format(&key.timestamp)],
    )?;
    Ok(())
}

struct AppointmentRow {
    timestamp: String,
    doctor: DoctorRow,
    patient: PatientRow,
}

fn appointment_row_from_rusqlite(row: &rusqlite::Row<'_>) -> Result<AppointmentRow, rusqlite::Error> {
    Ok(AppointmentRow {
        timestamp: row.get(0)?,
        doctor: doctor_row_at(row, 1)?,
        patient: patient_row_at(row, 6)?,
    })
}

fn appointment_from_row(row: AppointmentRow) -> Result<Appointment, DatabaseError> {
    let ts = timestamp::parse(&row.timestamp).ok_or_else(|| DatabaseError::InvalidValue {
        field: "appointments.timestamp".into(),
        value: row.timestamp.clone(),
    })?;
    Ok(Appointment::new(
        doctor_from_row(row.doctor)?,
        patient_from_row(row.patient)?,
        ts,
    ))
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;
    use crate::db::repository::{SqliteDoctorRepository, SqlitePatientRepository};
    use crate::db::{open_memory_database, shared};
    use crate::models::{Doctor, Patient, Specialty};

    struct Fixture {
        appointments: SqliteAppointmentRepository,
        doctors: SqliteDoctorRepository,
        patients: SqlitePatientRepository,
    }

    fn fixture() -> Fixture {
        let conn = shared(open_memory_database().unwrap());
        let fixture = Fixture {
            appointments: SqliteAppointmentRepository::new(conn.clone()),
            doctors: SqliteDoctorRepository::new(conn.clone()),
            patients: SqlitePatientRepository::new(conn),
        };
        for id in [1, 2] {
            fixture.doctors.save(&doctor(id)).unwrap();
        }
        for id in [100, 101] {
            fixture.patients.save(&patient(id)).unwrap();
        }
        fixture
    }

    fn doctor(id: DoctorId) -> Doctor {
        Doctor {
            id,
            name: "Ana".into(),
            surname: "Ruiz".into(),
            email: format!("doctor{id}@clinic.test"),
            specialty: Specialty::GeneralMedicine,
        }
    }

    fn patient(id: PatientId) -> Patient {
        Patient {
            id,
            name: "Luis".into(),
            surname: "Mora".into(),
            phone: "555-0100".into(),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
        }
    }

    fn ts(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn appt(doctor_id: DoctorId, patient_id: PatientId, day: u32) -> Appointment {
        Appointment::new(doctor(doctor_id), patient(patient_id), ts(day))
    }

    #[test]
    fn save_and_get_by_full_key() {
        let f = fixture();
        f.appointments.save(&appt(1, 100, 10)).unwrap();

        let found = f
            .appointments
            .get(&AppointmentKey::new(1, 100, ts(10)))
            .unwrap()
            .unwrap();
        assert_eq!(found, appt(1, 100, 10));
    }

    #[test]
    fn partial_key_does_not_match() {
        let f = fixture();
        f.appointments.save(&appt(1, 100, 10)).unwrap();
        assert!(f
            .appointments
            .get(&AppointmentKey::new(1, 100, ts(11)))
            .unwrap()
            .is_none());
        assert!(f
            .appointments
            .get(&AppointmentKey::new(1, 101, ts(10)))
            .unwrap()
            .is_none());
    }

    #[test]
    fn duplicate_key_is_constraint_violation() {
        let f = fixture();
        f.appointments.save(&appt(1, 100, 10)).unwrap();
        let err = f.appointments.save(&appt(1, 100, 10)).unwrap_err();
        assert!(matches!(err, DatabaseError::ConstraintViolation(_)));
    }

    #[test]
    fn orphan_reference_is_constraint_violation() {
        let f = fixture();
        let err = f.appointments.save(&appt(3, 100, 10)).unwrap_err();
        assert!(matches!(err, DatabaseError::ConstraintViolation(_)));
    }

    #[test]
    fn deleting_referenced_doctor_is_constraint_violation() {
        let f = fixture();
        f.appointments.save(&appt(1, 100, 10)).unwrap();
        let err = f.doctors.delete(&1).unwrap_err();
        assert!(matches!(err, DatabaseError::ConstraintViolation(_)));
        assert!(f.doctors.get(&1).unwrap().is_some());
    }

    #[test]
    fn list_by_doctor_and_patient() {
        let f = fixture();
        f.appointments.save(&appt(1, 100, 10)).unwrap();
        f.appointments.save(&appt(1, 101, 11)).unwrap();
        f.appointments.save(&appt(2, 100, 12)).unwrap();

        assert_eq!(f.appointments.list().unwrap().len(), 3);
        assert_eq!(f.appointments.list_by_doctor(1).unwrap().len(), 2);
        assert_eq!(f.appointments.list_by_patient(100).unwrap().len(), 2);
        assert!(f.appointments.list_by_patient(999).unwrap().is_empty());
    }

    #[test]
    fn replace_moves_row() {
        let f = fixture();
        f.appointments.save(&appt(1, 100, 10)).unwrap();
        f.appointments
            .replace(&AppointmentKey::new(1, 100, ts(10)), &appt(2, 101, 11))
            .unwrap();

        assert!(f
            .appointments
            .get(&AppointmentKey::new(1, 100, ts(10)))
            .unwrap()
            .is_none());
        assert!(f
            .appointments
            .get(&AppointmentKey::new(2, 101, ts(11)))
            .unwrap()
            .is_some());
    }

    #[test]
    fn replace_onto_existing_key_rolls_back() {
        let f = fixture();
        f.appointments.save(&appt(1, 100, 10)).unwrap();
        f.appointments.save(&appt(1, 100, 11)).unwrap();

        let err = f
            .appointments
            .replace(&AppointmentKey::new(1, 100, ts(10)), &appt(1, 100, 11))
            .unwrap_err();
        assert!(matches!(err, DatabaseError::ConstraintViolation(_)));

        // The old row survives the failed insert.
        assert!(f
            .appointments
            .get(&AppointmentKey::new(1, 100, ts(10)))
            .unwrap()
            .is_some());
        assert_eq!(f.appointments.list().unwrap().len(), 2);
    }
}
