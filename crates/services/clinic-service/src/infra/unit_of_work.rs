//! Unit of Work.
//!
//! Centralizes access to every repository and hands out transaction scopes.
//! Services depend on `Arc<dyn UnitOfWork>` so tests can swap in
//! [`MockUnitOfWork`](crate::testing::MockUnitOfWork).

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{AccessMode, DatabaseConnection, DatabaseTransaction, IsolationLevel, TransactionTrait};

use super::db;
use crate::repository::{
    linkable_store, ConsultationDerivationRepository, ConsultationDerivationStore,
    ConsultationReferralRepository, ConsultationReferralStore, DepartmentHeadRepository,
    DepartmentHeadStore, DepartmentRepository, DepartmentStore, DerivationRepository,
    DerivationStore, DoctorRepository, DoctorStore, EmergencyRoomCareRepository,
    EmergencyRoomCareStore, EmergencyRoomRepository, EmergencyRoomStore, ExternalPostRepository,
    ExternalPostStore, LinkableRepository, MedicationRepository, MedicationRequestRepository,
    MedicationRequestStore, MedicationStore, MedicationUsageRepository, MedicationUsageStore,
    NurseRepository, NurseStore, PatientRepository, PatientStore, ReferralRepository,
    ReferralStore, StockDepartmentRepository, StockDepartmentStore, UserRepository, UserStore,
    WarehouseManagerRepository, WarehouseManagerStore, WarehouseRequestRepository,
    WarehouseRequestStore,
};
use common::{AppError, AppResult};
use domain::{Role, UsageKind};

/// Repository access plus transaction management.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn patients(&self) -> Arc<dyn PatientRepository>;

    fn doctors(&self) -> Arc<dyn DoctorRepository>;

    fn nurses(&self) -> Arc<dyn NurseRepository>;

    fn department_heads(&self) -> Arc<dyn DepartmentHeadRepository>;

    fn warehouse_managers(&self) -> Arc<dyn WarehouseManagerRepository>;

    fn departments(&self) -> Arc<dyn DepartmentRepository>;

    fn external_posts(&self) -> Arc<dyn ExternalPostRepository>;

    fn derivations(&self) -> Arc<dyn DerivationRepository>;

    fn referrals(&self) -> Arc<dyn ReferralRepository>;

    fn consultation_derivations(&self) -> Arc<dyn ConsultationDerivationRepository>;

    fn consultation_referrals(&self) -> Arc<dyn ConsultationReferralRepository>;

    fn emergency_rooms(&self) -> Arc<dyn EmergencyRoomRepository>;

    fn emergency_room_cares(&self) -> Arc<dyn EmergencyRoomCareRepository>;

    fn medications(&self) -> Arc<dyn MedicationRepository>;

    fn stock(&self) -> Arc<dyn StockDepartmentRepository>;

    /// Usage records of one kind
    fn medication_usages(&self, kind: UsageKind) -> Arc<dyn MedicationUsageRepository>;

    fn warehouse_requests(&self) -> Arc<dyn WarehouseRequestRepository>;

    fn medication_requests(&self) -> Arc<dyn MedicationRequestRepository>;

    /// Store holding the records a role links to. `None` for `Admin`.
    fn linkable(&self, role: Role) -> Option<Arc<dyn LinkableRepository>>;

    /// Open a `ReadCommitted` read-write transaction.
    async fn begin(&self) -> AppResult<Box<dyn TransactionScope>>;

    /// Check database connectivity.
    async fn ping(&self) -> AppResult<()>;
}

/// Repositories bound to one open transaction.
///
/// Dropping a scope without committing rolls the transaction back. Every
/// repository handed out by the scope must be dropped before `commit`.
#[async_trait]
pub trait TransactionScope: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn linkable(&self, role: Role) -> Option<Arc<dyn LinkableRepository>>;

    async fn commit(self: Box<Self>) -> AppResult<()>;

    async fn rollback(self: Box<Self>) -> AppResult<()>;
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        Arc::new(UserStore::new(self.db.clone()))
    }

    fn patients(&self) -> Arc<dyn PatientRepository> {
        Arc::new(PatientStore::new(self.db.clone()))
    }

    fn doctors(&self) -> Arc<dyn DoctorRepository> {
        Arc::new(DoctorStore::new(self.db.clone()))
    }

    fn nurses(&self) -> Arc<dyn NurseRepository> {
        Arc::new(NurseStore::new(self.db.clone()))
    }

    fn department_heads(&self) -> Arc<dyn DepartmentHeadRepository> {
        Arc::new(DepartmentHeadStore::new(self.db.clone()))
    }

    fn warehouse_managers(&self) -> Arc<dyn WarehouseManagerRepository> {
        Arc::new(WarehouseManagerStore::new(self.db.clone()))
    }

    fn departments(&self) -> Arc<dyn DepartmentRepository> {
        Arc::new(DepartmentStore::new(self.db.clone()))
    }

    fn external_posts(&self) -> Arc<dyn ExternalPostRepository> {
        Arc::new(ExternalPostStore::new(self.db.clone()))
    }

    fn derivations(&self) -> Arc<dyn DerivationRepository> {
        Arc::new(DerivationStore::new(self.db.clone()))
    }

    fn referrals(&self) -> Arc<dyn ReferralRepository> {
        Arc::new(ReferralStore::new(self.db.clone()))
    }

    fn consultation_derivations(&self) -> Arc<dyn ConsultationDerivationRepository> {
        Arc::new(ConsultationDerivationStore::new(self.db.clone()))
    }

    fn consultation_referrals(&self) -> Arc<dyn ConsultationReferralRepository> {
        Arc::new(ConsultationReferralStore::new(self.db.clone()))
    }

    fn emergency_rooms(&self) -> Arc<dyn EmergencyRoomRepository> {
        Arc::new(EmergencyRoomStore::new(self.db.clone()))
    }

    fn emergency_room_cares(&self) -> Arc<dyn EmergencyRoomCareRepository> {
        Arc::new(EmergencyRoomCareStore::new(self.db.clone()))
    }

    fn medications(&self) -> Arc<dyn MedicationRepository> {
        Arc::new(MedicationStore::new(self.db.clone()))
    }

    fn stock(&self) -> Arc<dyn StockDepartmentRepository> {
        Arc::new(StockDepartmentStore::new(self.db.clone()))
    }

    fn medication_usages(&self, kind: UsageKind) -> Arc<dyn MedicationUsageRepository> {
        Arc::new(MedicationUsageStore::new(self.db.clone(), kind))
    }

    fn warehouse_requests(&self) -> Arc<dyn WarehouseRequestRepository> {
        Arc::new(WarehouseRequestStore::new(self.db.clone()))
    }

    fn medication_requests(&self) -> Arc<dyn MedicationRequestRepository> {
        Arc::new(MedicationRequestStore::new(self.db.clone()))
    }

    fn linkable(&self, role: Role) -> Option<Arc<dyn LinkableRepository>> {
        linkable_store(self.db.clone(), role)
    }

    async fn begin(&self) -> AppResult<Box<dyn TransactionScope>> {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await?;

        Ok(Box::new(TxScope {
            txn: Arc::new(txn),
        }))
    }

    async fn ping(&self) -> AppResult<()> {
        db::ping(&self.db).await?;
        Ok(())
    }
}

/// Transaction scope over a SeaORM transaction.
struct TxScope {
    txn: Arc<DatabaseTransaction>,
}

impl TxScope {
    fn into_transaction(self) -> AppResult<DatabaseTransaction> {
        Arc::try_unwrap(self.txn)
            .map_err(|_| AppError::internal("Transaction still referenced by a repository"))
    }
}

#[async_trait]
impl TransactionScope for TxScope {
    fn users(&self) -> Arc<dyn UserRepository> {
        Arc::new(UserStore::new(self.txn.clone()))
    }

    fn linkable(&self, role: Role) -> Option<Arc<dyn LinkableRepository>> {
        linkable_store(self.txn.clone(), role)
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        (*self).into_transaction()?.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        (*self).into_transaction()?.rollback().await?;
        Ok(())
    }
}
