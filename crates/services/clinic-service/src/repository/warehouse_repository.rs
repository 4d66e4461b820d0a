//! Warehouse requests and their medication lines.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::base::{self, DbHandle};
use super::entities::{medication_request, warehouse_request};
use common::AppResult;
use domain::{MedicationRequest, WarehouseRequest};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait WarehouseRequestRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<WarehouseRequest>>;

    /// All requests, newest first
    async fn list(&self) -> AppResult<Vec<WarehouseRequest>>;

    async fn create(&self, request: WarehouseRequest) -> AppResult<WarehouseRequest>;

    async fn update(&self, request: WarehouseRequest) -> AppResult<WarehouseRequest>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct WarehouseRequestStore<C = DatabaseConnection> {
    db: C,
}

impl<C: DbHandle> WarehouseRequestStore<C> {
    pub fn new(db: C) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<C: DbHandle> WarehouseRequestRepository for WarehouseRequestStore<C> {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<WarehouseRequest>> {
        base::find_by_id::<warehouse_request::Entity, WarehouseRequest, _>(self.db.conn(), id)
            .await
    }

    async fn list(&self) -> AppResult<Vec<WarehouseRequest>> {
        let models = warehouse_request::Entity::find()
            .order_by_desc(warehouse_request::Column::RequestDate)
            .all(self.db.conn())
            .await?;

        Ok(models.into_iter().map(WarehouseRequest::from).collect())
    }

    async fn create(&self, request: WarehouseRequest) -> AppResult<WarehouseRequest> {
        base::insert(self.db.conn(), warehouse_request::ActiveModel::from(request)).await
    }

    async fn update(&self, request: WarehouseRequest) -> AppResult<WarehouseRequest> {
        base::update(self.db.conn(), warehouse_request::ActiveModel::from(request)).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        base::delete_by_id::<warehouse_request::Entity, _>(
            self.db.conn(),
            id,
            "Solicitud de almacén no encontrada",
        )
        .await
    }
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MedicationRequestRepository: Send + Sync {
    async fn list_by_request(&self, warehouse_request_id: Uuid)
        -> AppResult<Vec<MedicationRequest>>;

    async fn create(&self, line: MedicationRequest) -> AppResult<MedicationRequest>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct MedicationRequestStore<C = DatabaseConnection> {
    db: C,
}

impl<C: DbHandle> MedicationRequestStore<C> {
    pub fn new(db: C) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<C: DbHandle> MedicationRequestRepository for MedicationRequestStore<C> {
    async fn list_by_request(
        &self,
        warehouse_request_id: Uuid,
    ) -> AppResult<Vec<MedicationRequest>> {
        let models = medication_request::Entity::find()
            .filter(medication_request::Column::WarehouseRequestId.eq(warehouse_request_id))
            .all(self.db.conn())
            .await?;

        Ok(models.into_iter().map(MedicationRequest::from).collect())
    }

    async fn create(&self, line: MedicationRequest) -> AppResult<MedicationRequest> {
        base::insert(self.db.conn(), medication_request::ActiveModel::from(line)).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        base::delete_by_id::<medication_request::Entity, _>(
            self.db.conn(),
            id,
            "Línea de solicitud no encontrada",
        )
        .await
    }
}
