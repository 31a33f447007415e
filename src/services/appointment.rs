//! Appointment service.
//!
//! The composite key is the primary key, so there is no in-place rekey:
//! `modify` builds a new appointment under the new key and swaps it in
//! for the old row through `AppointmentRepository::replace`.

use std::sync::Arc;

use crate::db::AppointmentRepository;
use crate::models::{Appointment, AppointmentKey, DoctorId, PatientId};

use super::{DoctorService, PatientService, ServiceError};

const ENTITY: &str = "Appointment";

#[derive(Clone)]
pub struct AppointmentService {
    repo: Arc<dyn AppointmentRepository>,
    doctors: DoctorService,
    patients: PatientService,
}

impl AppointmentService {
    pub fn new(
        repo: Arc<dyn AppointmentRepository>,
        doctors: DoctorService,
        patients: PatientService,
    ) -> Self {
        Self {
            repo,
            doctors,
            patients,
        }
    }

    pub fn find_all(&self) -> Result<Vec<Appointment>, ServiceError> {
        Ok(self.repo.list()?)
    }

    /// Exact match on all three key fields.
    pub fn find_by_id(&self, key: &AppointmentKey) -> Result<Appointment, ServiceError> {
        self.repo
            .get(key)?
            .ok_or_else(|| ServiceError::not_found(ENTITY, key))
    }

    /// Appointments held by doctor `id`; NotFound if the doctor is absent.
    pub fn find_by_doctor(&self, id: DoctorId) -> Result<Vec<Appointment>, ServiceError> {
        self.doctors.find_by_id(id)?;
        Ok(self.repo.list_by_doctor(id)?)
    }

    /// Appointments held by patient `id`; NotFound if the patient is absent.
    pub fn find_by_patient(&self, id: PatientId) -> Result<Vec<Appointment>, ServiceError> {
        self.patients.find_by_id(id)?;
        Ok(self.repo.list_by_patient(id)?)
    }

    /// Book the appointment named by `key`.
    ///
    /// Missing parents fail with NotFound before the duplicate check, so a
    /// novel key with an unknown doctor is still NotFound.
    pub fn add(&self, key: &AppointmentKey) -> Result<Appointment, ServiceError> {
        let appointment = self.bind(key)?;

        if self.repo.get(key)?.is_some() {
            tracing::warn!(%key, "Appointment key already taken");
            return Err(ServiceError::already_exists(ENTITY, key));
        }

        let saved = self.repo.save(&appointment)?;
        tracing::info!(%key, "Appointment added");
        Ok(saved)
    }

    /// Move the appointment at `old_key` to `new_key`.
    ///
    /// `new_key` is not checked for availability: if it is taken, the
    /// repository's insert fails and the error comes back as DataIntegrity.
    pub fn modify(
        &self,
        old_key: &AppointmentKey,
        new_key: &AppointmentKey,
    ) -> Result<Appointment, ServiceError> {
        self.find_by_id(old_key)?;
        let replacement = self.bind(new_key)?;

        let saved = self.repo.replace(old_key, &replacement)?;
        tracing::info!(old = %old_key, new = %new_key, "Appointment rescheduled");
        Ok(saved)
    }

    pub fn delete(&self, key: &AppointmentKey) -> Result<(), ServiceError> {
        self.find_by_id(key)?;
        self.repo.delete(key)?;
        tracing::info!(%key, "Appointment deleted");
        Ok(())
    }

    /// Resolve both parents named by `key` and bind them.
    fn bind(&self, key: &AppointmentKey) -> Result<Appointment, ServiceError> {
        let doctor = self.doctors.find_by_id(key.doctor_id)?;
        let patient = self.patients.find_by_id(key.patient_id)?;
        Ok(Appointment::new(doctor, patient, key.timestamp))
    }
}
