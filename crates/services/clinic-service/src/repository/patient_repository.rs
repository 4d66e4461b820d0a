//! Patient repository.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::base::{self, DbHandle};
use super::entities::patient::{self, Entity as PatientEntity};
use common::AppResult;
use domain::Patient;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PatientRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Patient>>;

    async fn find_by_identification(&self, identification: &str) -> AppResult<Option<Patient>>;

    /// All patients ordered by name
    async fn list(&self) -> AppResult<Vec<Patient>>;

    async fn create(&self, patient: Patient) -> AppResult<Patient>;

    async fn update(&self, patient: Patient) -> AppResult<Patient>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct PatientStore<C = DatabaseConnection> {
    db: C,
}

impl<C: DbHandle> PatientStore<C> {
    pub fn new(db: C) -> Self {
        Self { db }
    }

    pub(crate) fn handle(&self) -> &C {
        &self.db
    }
}

#[async_trait]
impl<C: DbHandle> PatientRepository for PatientStore<C> {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Patient>> {
        base::find_by_id::<PatientEntity, Patient, _>(self.db.conn(), id).await
    }

    async fn find_by_identification(&self, identification: &str) -> AppResult<Option<Patient>> {
        let result = PatientEntity::find()
            .filter(patient::Column::Identification.eq(identification))
            .one(self.db.conn())
            .await?;

        Ok(result.map(Patient::from))
    }

    async fn list(&self) -> AppResult<Vec<Patient>> {
        let models = PatientEntity::find()
            .order_by_asc(patient::Column::Name)
            .all(self.db.conn())
            .await?;

        Ok(models.into_iter().map(Patient::from).collect())
    }

    async fn create(&self, patient: Patient) -> AppResult<Patient> {
        base::insert(self.db.conn(), patient::ActiveModel::from(patient)).await
    }

    async fn update(&self, patient: Patient) -> AppResult<Patient> {
        base::update(self.db.conn(), patient::ActiveModel::from(patient)).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        base::delete_by_id::<PatientEntity, _>(self.db.conn(), id, "Paciente no encontrado").await
    }
}
