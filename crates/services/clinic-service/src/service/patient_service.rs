//! Patient service - registration and maintenance of patient records.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;
use validator::Validate;

use super::lookup::{self, duplicate_identification};
use crate::infra::UnitOfWork;
use common::AppResult;
use domain::{CreatePatient, Patient, Role, UpdatePatient};

#[async_trait]
pub trait PatientService: Send + Sync {
    async fn get(&self, id: Uuid) -> AppResult<Patient>;

    async fn list(&self) -> AppResult<Vec<Patient>>;

    /// Create a patient. Fails if the identification number is taken.
    async fn create(&self, dto: CreatePatient) -> AppResult<Patient>;

    /// Partial update; a new identification number must be free.
    async fn update(&self, id: Uuid, dto: UpdatePatient) -> AppResult<Patient>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct PatientManager {
    uow: Arc<dyn UnitOfWork>,
}

impl PatientManager {
    pub fn new(uow: Arc<dyn UnitOfWork>) -> Self {
        Self { uow }
    }

    async fn ensure_identification_free(&self, identification: &str) -> AppResult<()> {
        if self
            .uow
            .patients()
            .find_by_identification(identification)
            .await?
            .is_some()
        {
            return Err(duplicate_identification(Role::Patient, identification));
        }
        Ok(())
    }
}

#[async_trait]
impl PatientService for PatientManager {
    async fn get(&self, id: Uuid) -> AppResult<Patient> {
        lookup::patient(self.uow.as_ref(), id).await
    }

    async fn list(&self) -> AppResult<Vec<Patient>> {
        self.uow.patients().list().await
    }

    async fn create(&self, dto: CreatePatient) -> AppResult<Patient> {
        dto.validate()?;
        self.ensure_identification_free(&dto.identification).await?;

        let patient = self.uow.patients().create(Patient::new(dto)).await?;
        tracing::info!(patient_id = %patient.id, "Patient created");
        Ok(patient)
    }

    async fn update(&self, id: Uuid, dto: UpdatePatient) -> AppResult<Patient> {
        dto.validate()?;
        let mut patient = lookup::patient(self.uow.as_ref(), id).await?;

        if let Some(identification) = dto.identification.as_deref() {
            if identification != patient.identification {
                self.ensure_identification_free(identification).await?;
            }
        }

        patient.apply(dto);
        self.uow.patients().update(patient).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.uow.patients().delete(id).await?;
        tracing::info!(patient_id = %id, "Patient deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockPatientRepository;
    use crate::testing::MockUnitOfWork;
    use common::AppError;

    fn create_dto(identification: &str) -> CreatePatient {
        CreatePatient {
            identification: identification.to_string(),
            name: "María López".to_string(),
            age: 34,
            contact: "555-0101".to_string(),
            address: "Calle 8 #12".to_string(),
        }
    }

    fn service(repo: MockPatientRepository) -> PatientManager {
        PatientManager::new(Arc::new(MockUnitOfWork::new().with_patients(repo)))
    }

    #[tokio::test]
    async fn test_create_patient_success() {
        let mut repo = MockPatientRepository::new();
        repo.expect_find_by_identification().returning(|_| Ok(None));
        repo.expect_create().times(1).returning(Ok);

        let patient = service(repo).create(create_dto("123")).await.unwrap();

        assert_eq!(patient.identification, "123");
        assert!(patient.user_id.is_none());
    }

    #[tokio::test]
    async fn test_create_patient_duplicate_identification() {
        let mut repo = MockPatientRepository::new();
        repo.expect_find_by_identification()
            .returning(|_| Ok(Some(Patient::new(create_dto("123")))));
        repo.expect_create().never();

        let result = service(repo).create(create_dto("123")).await;

        match result {
            Err(AppError::Conflict(msg)) => {
                assert_eq!(msg, "El paciente con identificación 123 ya existe")
            }
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_patient_rejects_invalid_age() {
        let mut dto = create_dto("123");
        dto.age = 200;

        let result = service(MockPatientRepository::new()).create(dto).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_to_taken_identification_fails() {
        let existing = Patient::new(create_dto("123"));
        let id = existing.id;

        let mut repo = MockPatientRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_find_by_identification()
            .returning(|_| Ok(Some(Patient::new(create_dto("456")))));
        repo.expect_update().never();

        let dto = UpdatePatient {
            identification: Some("456".to_string()),
            ..Default::default()
        };
        let result = service(repo).update(id, dto).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_get_missing_patient() {
        let mut repo = MockPatientRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let result = service(repo).get(Uuid::new_v4()).await;

        assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == "Paciente no encontrado"));
    }
}
