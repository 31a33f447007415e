use std::str::FromStr;

use rusqlite::{params, OptionalExtension};

use crate::db::{lock, DatabaseError, SharedConnection};
use crate::models::{Doctor, DoctorId, Specialty};

use super::{DoctorRepository, Repository};

pub struct SqliteDoctorRepository {
    conn: SharedConnection,
}

impl SqliteDoctorRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

impl Repository<Doctor, DoctorId> for SqliteDoctorRepository {
    fn get(&self, id: &DoctorId) -> Result<Option<Doctor>, DatabaseError> {
        let conn = lock(&self.conn)?;
        let row = conn
            .query_row(
                "SELECT id, name, surname, email, specialty FROM doctors WHERE id = ?1",
                params![id],
                |row| doctor_row_at(row, 0),
            )
            .optional()?;
        row.map(doctor_from_row).transpose()
    }

    fn list(&self) -> Result<Vec<Doctor>, DatabaseError> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare("SELECT id, name, surname, email, specialty FROM doctors")?;
        let rows = stmt.query_map([], |row| Ok(doctor_row_at(row, 0)))?;

        let mut doctors = Vec::new();
        for row in rows {
            doctors.push(doctor_from_row(row??)?);
        }
        Ok(doctors)
    }

    fn save(&self, doctor: &Doctor) -> Result<Doctor, DatabaseError> {
        let conn = lock(&self.conn)?;
        conn.execute(
            "INSERT INTO doctors (id, name, surname, email, specialty)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                surname = excluded.surname,
                email = excluded.email,
                specialty = excluded.specialty",
            params![
                doctor.id,
                doctor.name,
                doctor.surname,
                doctor.email,
                doctor.specialty.as_str(),
            ],
        )?;
        Ok(doctor.clone())
    }

    fn delete(&self, id: &DoctorId) -> Result<(), DatabaseError> {
        let conn = lock(&self.conn)?;
        conn.execute("DELETE FROM doctors WHERE id = ?1", params![id])?;
        Ok(())
    }
}

impl DoctorRepository for SqliteDoctorRepository {
    fn list_by_specialty(&self, specialty: Specialty) -> Result<Vec<Doctor>, DatabaseError> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare(
            "SELECT id, name, surname, email, specialty FROM doctors WHERE specialty = ?1",
        )?;
        let rows = stmt.query_map(params![specialty.as_str()], |row| Ok(doctor_row_at(row, 0)))?;

        let mut doctors = Vec::new();
        for row in rows {
            doctors.push(doctor_from_row(row??)?);
        }
        Ok(doctors)
    }
}

pub(super) struct DoctorRow {
    id: DoctorId,
    name: String,
    surname: String,
    email: String,
    specialty: String,
}

/// Read the five doctor columns starting at `base`.
pub(super) fn doctor_row_at(row: &rusqlite::Row<'_>, base: usize) -> Result<DoctorRow, rusqlite::Error> {
    Ok(DoctorRow {
        id: row.get(base)?,
        name: row.get(base + 1)?,
        surname: row.get(base + 2)?,
        email: row.get(base + 3)?,
        specialty: row.get(base + 4)?,
    })
}

pub(super) fn doctor_from_row(row: DoctorRow) -> Result<Doctor, DatabaseError> {
    Ok(Doctor {
        id: row.id,
        name: row.name,
        surname: row.surname,
        email: row.email,
        specialty: Specialty::from_str(&row.specialty)?,
    })
}
