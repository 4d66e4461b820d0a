//! Medication catalogue, per-department stock and consumption records.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::base::{self, DbHandle};
use super::entities::{
    medication, medication_derivation, medication_emergency, medication_referral,
    stock_department,
};
use common::AppResult;
use domain::{Medication, MedicationUsage, StockDepartment, UsageKind};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

// =============================================================================
// Medication
// =============================================================================

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MedicationRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Medication>>;

    async fn list(&self) -> AppResult<Vec<Medication>>;

    async fn create(&self, medication: Medication) -> AppResult<Medication>;

    async fn update(&self, medication: Medication) -> AppResult<Medication>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct MedicationStore<C = DatabaseConnection> {
    db: C,
}

impl<C: DbHandle> MedicationStore<C> {
    pub fn new(db: C) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<C: DbHandle> MedicationRepository for MedicationStore<C> {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Medication>> {
        base::find_by_id::<medication::Entity, Medication, _>(self.db.conn(), id).await
    }

    async fn list(&self) -> AppResult<Vec<Medication>> {
        let models = medication::Entity::find()
            .order_by_asc(medication::Column::Name)
            .all(self.db.conn())
            .await?;

        Ok(models.into_iter().map(Medication::from).collect())
    }

    async fn create(&self, medication: Medication) -> AppResult<Medication> {
        base::insert(self.db.conn(), medication::ActiveModel::from(medication)).await
    }

    async fn update(&self, medication: Medication) -> AppResult<Medication> {
        base::update(self.db.conn(), medication::ActiveModel::from(medication)).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        base::delete_by_id::<medication::Entity, _>(self.db.conn(), id, "Medicamento no encontrado")
            .await
    }
}

// =============================================================================
// Department stock
// =============================================================================

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait StockDepartmentRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<StockDepartment>>;

    async fn find_by_department_and_medication(
        &self,
        department_id: Uuid,
        medication_id: Uuid,
    ) -> AppResult<Option<StockDepartment>>;

    async fn list(&self) -> AppResult<Vec<StockDepartment>>;

    async fn list_by_department(&self, department_id: Uuid) -> AppResult<Vec<StockDepartment>>;

    async fn create(&self, stock: StockDepartment) -> AppResult<StockDepartment>;

    async fn update(&self, stock: StockDepartment) -> AppResult<StockDepartment>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct StockDepartmentStore<C = DatabaseConnection> {
    db: C,
}

impl<C: DbHandle> StockDepartmentStore<C> {
    pub fn new(db: C) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<C: DbHandle> StockDepartmentRepository for StockDepartmentStore<C> {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<StockDepartment>> {
        base::find_by_id::<stock_department::Entity, StockDepartment, _>(self.db.conn(), id).await
    }

    async fn find_by_department_and_medication(
        &self,
        department_id: Uuid,
        medication_id: Uuid,
    ) -> AppResult<Option<StockDepartment>> {
        let result = stock_department::Entity::find()
            .filter(stock_department::Column::DepartmentId.eq(department_id))
            .filter(stock_department::Column::MedicationId.eq(medication_id))
            .one(self.db.conn())
            .await?;

        Ok(result.map(StockDepartment::from))
    }

    async fn list(&self) -> AppResult<Vec<StockDepartment>> {
        base::find_all::<stock_department::Entity, StockDepartment, _>(self.db.conn()).await
    }

    async fn list_by_department(&self, department_id: Uuid) -> AppResult<Vec<StockDepartment>> {
        let models = stock_department::Entity::find()
            .filter(stock_department::Column::DepartmentId.eq(department_id))
            .all(self.db.conn())
            .await?;

        Ok(models.into_iter().map(StockDepartment::from).collect())
    }

    async fn create(&self, stock: StockDepartment) -> AppResult<StockDepartment> {
        base::insert(self.db.conn(), stock_department::ActiveModel::from(stock)).await
    }

    async fn update(&self, stock: StockDepartment) -> AppResult<StockDepartment> {
        base::update(self.db.conn(), stock_department::ActiveModel::from(stock)).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        base::delete_by_id::<stock_department::Entity, _>(
            self.db.conn(),
            id,
            "Existencia de departamento no encontrada",
        )
        .await
    }
}

// =============================================================================
// Medication usage
// =============================================================================

/// Consumption records. One store serves one [`UsageKind`], each kind lives in
/// its own table.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MedicationUsageRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MedicationUsage>>;

    /// Usages recorded against one consultation or emergency care
    async fn list_by_record(&self, record_id: Uuid) -> AppResult<Vec<MedicationUsage>>;

    async fn create(&self, usage: MedicationUsage) -> AppResult<MedicationUsage>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct MedicationUsageStore<C = DatabaseConnection> {
    db: C,
    kind: UsageKind,
}

impl<C: DbHandle> MedicationUsageStore<C> {
    pub fn new(db: C, kind: UsageKind) -> Self {
        Self { db, kind }
    }
}

const USAGE_NOT_FOUND: &str = "Registro de uso de medicamento no encontrado";

#[async_trait]
impl<C: DbHandle> MedicationUsageRepository for MedicationUsageStore<C> {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MedicationUsage>> {
        let conn = self.db.conn();
        match self.kind {
            UsageKind::Derivation => {
                base::find_by_id::<medication_derivation::Entity, MedicationUsage, _>(conn, id)
                    .await
            }
            UsageKind::Referral => {
                base::find_by_id::<medication_referral::Entity, MedicationUsage, _>(conn, id).await
            }
            UsageKind::Emergency => {
                base::find_by_id::<medication_emergency::Entity, MedicationUsage, _>(conn, id)
                    .await
            }
        }
    }

    async fn list_by_record(&self, record_id: Uuid) -> AppResult<Vec<MedicationUsage>> {
        let conn = self.db.conn();
        let usages = match self.kind {
            UsageKind::Derivation => medication_derivation::Entity::find()
                .filter(medication_derivation::Column::ConsultationDerivationId.eq(record_id))
                .all(conn)
                .await?
                .into_iter()
                .map(MedicationUsage::from)
                .collect(),
            UsageKind::Referral => medication_referral::Entity::find()
                .filter(medication_referral::Column::ConsultationReferralId.eq(record_id))
                .all(conn)
                .await?
                .into_iter()
                .map(MedicationUsage::from)
                .collect(),
            UsageKind::Emergency => medication_emergency::Entity::find()
                .filter(medication_emergency::Column::EmergencyRoomCareId.eq(record_id))
                .all(conn)
                .await?
                .into_iter()
                .map(MedicationUsage::from)
                .collect(),
        };

        Ok(usages)
    }

    async fn create(&self, usage: MedicationUsage) -> AppResult<MedicationUsage> {
        let conn = self.db.conn();
        match self.kind {
            UsageKind::Derivation => {
                base::insert(conn, medication_derivation::ActiveModel::from(usage)).await
            }
            UsageKind::Referral => {
                base::insert(conn, medication_referral::ActiveModel::from(usage)).await
            }
            UsageKind::Emergency => {
                base::insert(conn, medication_emergency::ActiveModel::from(usage)).await
            }
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let conn = self.db.conn();
        match self.kind {
            UsageKind::Derivation => {
                base::delete_by_id::<medication_derivation::Entity, _>(conn, id, USAGE_NOT_FOUND)
                    .await
            }
            UsageKind::Referral => {
                base::delete_by_id::<medication_referral::Entity, _>(conn, id, USAGE_NOT_FOUND)
                    .await
            }
            UsageKind::Emergency => {
                base::delete_by_id::<medication_emergency::Entity, _>(conn, id, USAGE_NOT_FOUND)
                    .await
            }
        }
    }
}
