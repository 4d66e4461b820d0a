//! Staff repositories: doctors, nurses, department heads and warehouse managers.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::base::{self, DbHandle};
use super::entities::{department_head, doctor, nurse, warehouse_manager};
use common::AppResult;
use domain::{DepartmentHead, Doctor, Nurse, WarehouseManager};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

// =============================================================================
// Doctor
// =============================================================================

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DoctorRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Doctor>>;

    async fn find_by_identification(&self, identification: &str) -> AppResult<Option<Doctor>>;

    async fn list(&self) -> AppResult<Vec<Doctor>>;

    /// Members of a department
    async fn list_by_department(&self, department_id: Uuid) -> AppResult<Vec<Doctor>>;

    async fn create(&self, record: Doctor) -> AppResult<Doctor>;

    async fn update(&self, record: Doctor) -> AppResult<Doctor>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct DoctorStore<C = DatabaseConnection> {
    db: C,
}

impl<C: DbHandle> DoctorStore<C> {
    pub fn new(db: C) -> Self {
        Self { db }
    }

    pub(crate) fn handle(&self) -> &C {
        &self.db
    }
}

#[async_trait]
impl<C: DbHandle> DoctorRepository for DoctorStore<C> {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Doctor>> {
        base::find_by_id::<doctor::Entity, Doctor, _>(self.db.conn(), id).await
    }

    async fn find_by_identification(&self, identification: &str) -> AppResult<Option<Doctor>> {
        let result = doctor::Entity::find()
            .filter(doctor::Column::Identification.eq(identification))
            .one(self.db.conn())
            .await?;

        Ok(result.map(Doctor::from))
    }

    async fn list(&self) -> AppResult<Vec<Doctor>> {
        let models = doctor::Entity::find()
            .order_by_asc(doctor::Column::Name)
            .all(self.db.conn())
            .await?;

        Ok(models.into_iter().map(Doctor::from).collect())
    }

    async fn list_by_department(&self, department_id: Uuid) -> AppResult<Vec<Doctor>> {
        let models = doctor::Entity::find()
            .filter(doctor::Column::DepartmentId.eq(department_id))
            .order_by_asc(doctor::Column::Name)
            .all(self.db.conn())
            .await?;

        Ok(models.into_iter().map(Doctor::from).collect())
    }

    async fn create(&self, record: Doctor) -> AppResult<Doctor> {
        base::insert(self.db.conn(), doctor::ActiveModel::from(record)).await
    }

    async fn update(&self, record: Doctor) -> AppResult<Doctor> {
        base::update(self.db.conn(), doctor::ActiveModel::from(record)).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        base::delete_by_id::<doctor::Entity, _>(self.db.conn(), id, "Doctor no encontrado").await
    }
}

// =============================================================================
// Nurse
// =============================================================================

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait NurseRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Nurse>>;

    async fn find_by_identification(&self, identification: &str) -> AppResult<Option<Nurse>>;

    async fn list(&self) -> AppResult<Vec<Nurse>>;

    /// Members of a department
    async fn list_by_department(&self, department_id: Uuid) -> AppResult<Vec<Nurse>>;

    async fn create(&self, record: Nurse) -> AppResult<Nurse>;

    async fn update(&self, record: Nurse) -> AppResult<Nurse>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct NurseStore<C = DatabaseConnection> {
    db: C,
}

impl<C: DbHandle> NurseStore<C> {
    pub fn new(db: C) -> Self {
        Self { db }
    }

    pub(crate) fn handle(&self) -> &C {
        &self.db
    }
}

#[async_trait]
impl<C: DbHandle> NurseRepository for NurseStore<C> {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Nurse>> {
        base::find_by_id::<nurse::Entity, Nurse, _>(self.db.conn(), id).await
    }

    async fn find_by_identification(&self, identification: &str) -> AppResult<Option<Nurse>> {
        let result = nurse::Entity::find()
            .filter(nurse::Column::Identification.eq(identification))
            .one(self.db.conn())
            .await?;

        Ok(result.map(Nurse::from))
    }

    async fn list(&self) -> AppResult<Vec<Nurse>> {
        let models = nurse::Entity::find()
            .order_by_asc(nurse::Column::Name)
            .all(self.db.conn())
            .await?;

        Ok(models.into_iter().map(Nurse::from).collect())
    }

    async fn list_by_department(&self, department_id: Uuid) -> AppResult<Vec<Nurse>> {
        let models = nurse::Entity::find()
            .filter(nurse::Column::DepartmentId.eq(department_id))
            .order_by_asc(nurse::Column::Name)
            .all(self.db.conn())
            .await?;

        Ok(models.into_iter().map(Nurse::from).collect())
    }

    async fn create(&self, record: Nurse) -> AppResult<Nurse> {
        base::insert(self.db.conn(), nurse::ActiveModel::from(record)).await
    }

    async fn update(&self, record: Nurse) -> AppResult<Nurse> {
        base::update(self.db.conn(), nurse::ActiveModel::from(record)).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        base::delete_by_id::<nurse::Entity, _>(self.db.conn(), id, "Enfermero no encontrado").await
    }
}

// =============================================================================
// Department head
// =============================================================================

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DepartmentHeadRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<DepartmentHead>>;

    async fn find_by_identification(&self, identification: &str) -> AppResult<Option<DepartmentHead>>;

    async fn list(&self) -> AppResult<Vec<DepartmentHead>>;

    /// Members of a department
    async fn list_by_department(&self, department_id: Uuid) -> AppResult<Vec<DepartmentHead>>;

    async fn create(&self, record: DepartmentHead) -> AppResult<DepartmentHead>;

    async fn update(&self, record: DepartmentHead) -> AppResult<DepartmentHead>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct DepartmentHeadStore<C = DatabaseConnection> {
    db: C,
}

impl<C: DbHandle> DepartmentHeadStore<C> {
    pub fn new(db: C) -> Self {
        Self { db }
    }

    pub(crate) fn handle(&self) -> &C {
        &self.db
    }
}

#[async_trait]
impl<C: DbHandle> DepartmentHeadRepository for DepartmentHeadStore<C> {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<DepartmentHead>> {
        base::find_by_id::<department_head::Entity, DepartmentHead, _>(self.db.conn(), id).await
    }

    async fn find_by_identification(&self, identification: &str) -> AppResult<Option<DepartmentHead>> {
        let result = department_head::Entity::find()
            .filter(department_head::Column::Identification.eq(identification))
            .one(self.db.conn())
            .await?;

        Ok(result.map(DepartmentHead::from))
    }

    async fn list(&self) -> AppResult<Vec<DepartmentHead>> {
        let models = department_head::Entity::find()
            .order_by_asc(department_head::Column::Name)
            .all(self.db.conn())
            .await?;

        Ok(models.into_iter().map(DepartmentHead::from).collect())
    }

    async fn list_by_department(&self, department_id: Uuid) -> AppResult<Vec<DepartmentHead>> {
        let models = department_head::Entity::find()
            .filter(department_head::Column::DepartmentId.eq(department_id))
            .order_by_asc(department_head::Column::Name)
            .all(self.db.conn())
            .await?;

        Ok(models.into_iter().map(DepartmentHead::from).collect())
    }

    async fn create(&self, record: DepartmentHead) -> AppResult<DepartmentHead> {
        base::insert(self.db.conn(), department_head::ActiveModel::from(record)).await
    }

    async fn update(&self, record: DepartmentHead) -> AppResult<DepartmentHead> {
        base::update(self.db.conn(), department_head::ActiveModel::from(record)).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        base::delete_by_id::<department_head::Entity, _>(self.db.conn(), id, "Jefe de departamento no encontrado").await
    }
}

// =============================================================================
// Warehouse manager
// =============================================================================

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait WarehouseManagerRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<WarehouseManager>>;

    async fn find_by_identification(&self, identification: &str) -> AppResult<Option<WarehouseManager>>;

    async fn list(&self) -> AppResult<Vec<WarehouseManager>>;

    async fn create(&self, record: WarehouseManager) -> AppResult<WarehouseManager>;

    async fn update(&self, record: WarehouseManager) -> AppResult<WarehouseManager>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct WarehouseManagerStore<C = DatabaseConnection> {
    db: C,
}

impl<C: DbHandle> WarehouseManagerStore<C> {
    pub fn new(db: C) -> Self {
        Self { db }
    }

    pub(crate) fn handle(&self) -> &C {
        &self.db
    }
}

#[async_trait]
impl<C: DbHandle> WarehouseManagerRepository for WarehouseManagerStore<C> {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<WarehouseManager>> {
        base::find_by_id::<warehouse_manager::Entity, WarehouseManager, _>(self.db.conn(), id).await
    }

    async fn find_by_identification(&self, identification: &str) -> AppResult<Option<WarehouseManager>> {
        let result = warehouse_manager::Entity::find()
            .filter(warehouse_manager::Column::Identification.eq(identification))
            .one(self.db.conn())
            .await?;

        Ok(result.map(WarehouseManager::from))
    }

    async fn list(&self) -> AppResult<Vec<WarehouseManager>> {
        let models = warehouse_manager::Entity::find()
            .order_by_asc(warehouse_manager::Column::Name)
            .all(self.db.conn())
            .await?;

        Ok(models.into_iter().map(WarehouseManager::from).collect())
    }

    async fn create(&self, record: WarehouseManager) -> AppResult<WarehouseManager> {
        base::insert(self.db.conn(), warehouse_manager::ActiveModel::from(record)).await
    }

    async fn update(&self, record: WarehouseManager) -> AppResult<WarehouseManager> {
        base::update(self.db.conn(), warehouse_manager::ActiveModel::from(record)).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        base::delete_by_id::<warehouse_manager::Entity, _>(self.db.conn(), id, "Jefe de almacén no encontrado").await
    }
}
