use std::sync::Arc;

use crate::db::PatientRepository;
use crate::models::{Patient, PatientId};

use super::ServiceError;

const ENTITY: &str = "Patient";

#[derive(Clone)]
pub struct PatientService {
    repo: Arc<dyn PatientRepository>,
}

impl PatientService {
    pub fn new(repo: Arc<dyn PatientRepository>) -> Self {
        Self { repo }
    }

    pub fn find_all(&self) -> Result<Vec<Patient>, ServiceError> {
        Ok(self.repo.list()?)
    }

    pub fn find_by_id(&self, id: PatientId) -> Result<Patient, ServiceError> {
        self.repo
            .get(&id)?
            .ok_or_else(|| ServiceError::not_found(ENTITY, id))
    }

    pub fn add(&self, patient: Patient) -> Result<Patient, ServiceError> {
        if self.repo.get(&patient.id)?.is_some() {
            tracing::warn!(patient_id = patient.id, "Patient id already taken");
            return Err(ServiceError::already_exists(ENTITY, patient.id));
        }
        let saved = self.repo.save(&patient)?;
        tracing::info!(patient_id = saved.id, "Patient added");
        Ok(saved)
    }

    /// The payload's own id is ignored; the row keeps `id`.
    pub fn modify(&self, id: PatientId, mut patient: Patient) -> Result<Patient, ServiceError> {
        let existing = self.find_by_id(id)?;
        patient.id = existing.id;
        let saved = self.repo.save(&patient)?;
        tracing::info!(patient_id = id, "Patient modified");
        Ok(saved)
    }

    pub fn delete(&self, id: PatientId) -> Result<(), ServiceError> {
        self.find_by_id(id)?;
        self.repo.delete(&id)?;
        tracing::info!(patient_id = id, "Patient deleted");
        Ok(())
    }
}
