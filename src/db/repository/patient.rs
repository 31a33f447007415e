use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};

use crate::db::{lock, DatabaseError, SharedConnection};
use crate::models::{Patient, PatientId};

use super::{PatientRepository, Repository};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct SqlitePatientRepository {
    conn: SharedConnection,
}

impl SqlitePatientRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

impl Repository<Patient, PatientId> for SqlitePatientRepository {
    fn get(&self, id: &PatientId) -> Result<Option<Patient>, DatabaseError> {
        let conn = lock(&self.conn)?;
        let row = conn
            .query_row(
                "SELECT id, name, surname, phone, birth_date FROM patients WHERE id = ?1",
                params![id],
                |row| patient_row_at(row, 0),
            )
            .optional()?;
        row.map(patient_from_row).transpose()
    }

    fn list(&self) -> Result<Vec<Patient>, DatabaseError> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare("SELECT id, name, surname, phone, birth_date FROM patients")?;
        let rows = stmt.query_map([], |row| Ok(patient_row_at(row, 0)))?;

        let mut patients = Vec::new();
        for row in rows {
            patients.push(patient_from_row(row??)?);
        }
        Ok(patients)
    }

    fn save(&self, patient: &Patient) -> Result<Patient, DatabaseError> {
        let conn = lock(&self.conn)?;
        conn.execute(
            "INSERT INTO patients (id, name, surname, phone, birth_date)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                surname = excluded.surname,
                phone = excluded.phone,
                birth_date = excluded.birth_date",
            params![
                patient.id,
                patient.name,
                patient.surname,
                patient.phone,
                patient.birth_date.format(DATE_FORMAT).to_string(),
            ],
        )?;
        Ok(patient.clone())
    }

    fn delete(&self, id: &PatientId) -> Result<(), DatabaseError> {
        let conn = lock(&self.conn)?;
        conn.execute("DELETE FROM patients WHERE id = ?1", params![id])?;
        Ok(())
    }
}

impl PatientRepository for SqlitePatientRepository {}

pub(super) struct PatientRow {
    id: PatientId,
    name: String,
    surname: String,
    phone: String,
    birth_date: String,
}

/// Read the five patient columns starting at `base`.
pub(super) fn patient_row_at(row: &rusqlite::Row<'_>, base: usize) -> Result<PatientRow, rusqlite::Error> {
    Ok(PatientRow {
        id: row.get(base)?,
        name: row.get(base + 1)?,
        surname: row.get(base + 2)?,
        phone: row.get(base + 3)?,
        birth_date: row.get(base + 4)?,
    })
}

pub(super) fn patient_from_row(row: PatientRow) -> Result<Patient, DatabaseError> {
    let birth_date = NaiveDate::parse_from_str(&row.birth_date, DATE_FORMAT).map_err(|_| {
        DatabaseError::InvalidValue {
            field: "patients.birth_date".into(),
            value: row.birth_date.clone(),
        }
    })?;

    Ok(Patient {
        id: row.id,
        name: row.name,
        surname: row.surname,
        phone: row.phone,
        birth_date,
    })
}
