use std::sync::Arc;

use crate::db::DoctorRepository;
use crate::models::{Doctor, DoctorId, Specialty};

use super::ServiceError;

const ENTITY: &str = "Doctor";

#[derive(Clone)]
pub struct DoctorService {
    repo: Arc<dyn DoctorRepository>,
}

impl DoctorService {
    pub fn new(repo: Arc<dyn DoctorRepository>) -> Self {
        Self { repo }
    }

    pub fn find_all(&self) -> Result<Vec<Doctor>, ServiceError> {
        Ok(self.repo.list()?)
    }

    pub fn find_by_id(&self, id: DoctorId) -> Result<Doctor, ServiceError> {
        self.repo
            .get(&id)?
            .ok_or_else(|| ServiceError::not_found(ENTITY, id))
    }

    pub fn find_all_by_specialty(&self, specialty: Specialty) -> Result<Vec<Doctor>, ServiceError> {
        Ok(self.repo.list_by_specialty(specialty)?)
    }

    /// Persist a new doctor. The id is the caller's; it must be unused.
    pub fn add(&self, doctor: Doctor) -> Result<Doctor, ServiceError> {
        if self.repo.get(&doctor.id)?.is_some() {
            tracing::warn!(doctor_id = doctor.id, "Doctor id already taken");
            return Err(ServiceError::already_exists(ENTITY, doctor.id));
        }
        let saved = self.repo.save(&doctor)?;
        tracing::info!(doctor_id = saved.id, "Doctor added");
        Ok(saved)
    }

    /// Overwrite every field of doctor `id` with `doctor`'s, keeping `id`.
    pub fn modify(&self, id: DoctorId, mut doctor: Doctor) -> Result<Doctor, ServiceError> {
        let existing = self.find_by_id(id)?;
        doctor.id = existing.id;
        let saved = self.repo.save(&doctor)?;
        tracing::info!(doctor_id = id, "Doctor modified");
        Ok(saved)
    }

    /// Remove doctor `id`. Existing appointments make storage reject this.
    pub fn delete(&self, id: DoctorId) -> Result<(), ServiceError> {
        self.find_by_id(id)?;
        self.repo.delete(&id)?;
        tracing::info!(doctor_id = id, "Doctor deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{open_memory_database, shared, SqliteDoctorRepository};

    fn service() -> DoctorService {
        let conn = shared(open_memory_database().unwrap());
        DoctorService::new(Arc::new(SqliteDoctorRepository::new(conn)))
    }

    fn doctor(id: DoctorId, specialty: Specialty) -> Doctor {
        Doctor {
            id,
            name: "Ana".into(),
            surname: "Ruiz".into(),
            email: "ana@clinic.test".into(),
            specialty,
        }
    }

    #[test]
    fn add_then_find_returns_equal_doctor() {
        let svc = service();
        let added = svc.add(doctor(1, Specialty::GeneralMedicine)).unwrap();
        assert_eq!(added, doctor(1, Specialty::GeneralMedicine));
        assert_eq!(svc.find_by_id(1).unwrap(), added);
    }

    #[test]
    fn add_duplicate_fails_and_keeps_original() {
        let svc = service();
        svc.add(doctor(1, Specialty::GeneralMedicine)).unwrap();

        let mut imposter = doctor(1, Specialty::InternalMedicine);
        imposter.name = "Other".into();
        let err = svc.add(imposter).unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyExists { .. }));

        let stored = svc.find_by_id(1).unwrap();
        assert_eq!(stored, doctor(1, Specialty::GeneralMedicine));
    }

    #[test]
    fn missing_id_is_not_found_everywhere() {
        let svc = service();
        assert!(matches!(svc.find_by_id(9), Err(ServiceError::NotFound { .. })));
        assert!(matches!(
            svc.modify(9, doctor(9, Specialty::GeneralMedicine)),
            Err(ServiceError::NotFound { .. })
        ));
        assert!(matches!(svc.delete(9), Err(ServiceError::NotFound { .. })));
    }

    #[test]
    fn modify_keeps_original_id() {
        let svc = service();
        svc.add(doctor(1, Specialty::GeneralMedicine)).unwrap();

        let mut payload = doctor(55, Specialty::InternalMedicine);
        payload.email = "new@clinic.test".into();
        let modified = svc.modify(1, payload).unwrap();

        assert_eq!(modified.id, 1);
        assert_eq!(modified.email, "new@clinic.test");
        assert_eq!(modified.specialty, Specialty::InternalMedicine);
        assert!(matches!(svc.find_by_id(55), Err(ServiceError::NotFound { .. })));
        assert_eq!(svc.find_all().unwrap().len(), 1);
    }

    #[test]
    fn find_all_by_specialty_includes_matching() {
        let svc = service();
        svc.add(doctor(1, Specialty::GeneralMedicine)).unwrap();
        svc.add(doctor(2, Specialty::InternalMedicine)).unwrap();

        let general = svc.find_all_by_specialty(Specialty::GeneralMedicine).unwrap();
        assert_eq!(general.len(), 1);
        assert_eq!(general[0].id, 1);
    }

    #[test]
    fn delete_removes_doctor() {
        let svc = service();
        svc.add(doctor(1, Specialty::GeneralMedicine)).unwrap();
        svc.delete(1).unwrap();
        assert!(matches!(svc.find_by_id(1), Err(ServiceError::NotFound { .. })));
    }
}
