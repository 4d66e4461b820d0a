//! In-memory unit of work for service tests.
//!
//! Every repository defaults to a bare mockall mock, so any call a test did
//! not set up fails loudly. Transaction scopes share the same repositories and
//! count how often they were committed or rolled back.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::infra::{TransactionScope, UnitOfWork};
use crate::repository::*;
use common::AppResult;
use domain::{Role, UsageKind};

pub struct MockUnitOfWork {
    users: Arc<dyn UserRepository>,
    patients: Arc<dyn PatientRepository>,
    doctors: Arc<dyn DoctorRepository>,
    nurses: Arc<dyn NurseRepository>,
    department_heads: Arc<dyn DepartmentHeadRepository>,
    warehouse_managers: Arc<dyn WarehouseManagerRepository>,
    departments: Arc<dyn DepartmentRepository>,
    external_posts: Arc<dyn ExternalPostRepository>,
    derivations: Arc<dyn DerivationRepository>,
    referrals: Arc<dyn ReferralRepository>,
    consultation_derivations: Arc<dyn ConsultationDerivationRepository>,
    consultation_referrals: Arc<dyn ConsultationReferralRepository>,
    emergency_rooms: Arc<dyn EmergencyRoomRepository>,
    emergency_room_cares: Arc<dyn EmergencyRoomCareRepository>,
    medications: Arc<dyn MedicationRepository>,
    stock: Arc<dyn StockDepartmentRepository>,
    medication_usages: Arc<dyn MedicationUsageRepository>,
    warehouse_requests: Arc<dyn WarehouseRequestRepository>,
    medication_requests: Arc<dyn MedicationRequestRepository>,
    linkables: HashMap<Role, Arc<dyn LinkableRepository>>,
    commits: Arc<AtomicUsize>,
    rollbacks: Arc<AtomicUsize>,
}

impl Default for MockUnitOfWork {
    fn default() -> Self {
        Self {
            users: Arc::new(MockUserRepository::new()),
            patients: Arc::new(MockPatientRepository::new()),
            doctors: Arc::new(MockDoctorRepository::new()),
            nurses: Arc::new(MockNurseRepository::new()),
            department_heads: Arc::new(MockDepartmentHeadRepository::new()),
            warehouse_managers: Arc::new(MockWarehouseManagerRepository::new()),
            departments: Arc::new(MockDepartmentRepository::new()),
            external_posts: Arc::new(MockExternalPostRepository::new()),
            derivations: Arc::new(MockDerivationRepository::new()),
            referrals: Arc::new(MockReferralRepository::new()),
            consultation_derivations: Arc::new(MockConsultationDerivationRepository::new()),
            consultation_referrals: Arc::new(MockConsultationReferralRepository::new()),
            emergency_rooms: Arc::new(MockEmergencyRoomRepository::new()),
            emergency_room_cares: Arc::new(MockEmergencyRoomCareRepository::new()),
            medications: Arc::new(MockMedicationRepository::new()),
            stock: Arc::new(MockStockDepartmentRepository::new()),
            medication_usages: Arc::new(MockMedicationUsageRepository::new()),
            warehouse_requests: Arc::new(MockWarehouseRequestRepository::new()),
            medication_requests: Arc::new(MockMedicationRequestRepository::new()),
            linkables: HashMap::new(),
            commits: Arc::new(AtomicUsize::new(0)),
            rollbacks: Arc::new(AtomicUsize::new(0)),
        }
    }
}

macro_rules! with_repo {
    ($method:ident, $field:ident, $mock:ty) => {
        pub fn $method(mut self, repo: $mock) -> Self {
            self.$field = Arc::new(repo);
            self
        }
    };
}

impl MockUnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }

    with_repo!(with_users, users, MockUserRepository);
    with_repo!(with_patients, patients, MockPatientRepository);
    with_repo!(with_doctors, doctors, MockDoctorRepository);
    with_repo!(with_nurses, nurses, MockNurseRepository);
    with_repo!(with_department_heads, department_heads, MockDepartmentHeadRepository);
    with_repo!(with_warehouse_managers, warehouse_managers, MockWarehouseManagerRepository);
    with_repo!(with_departments, departments, MockDepartmentRepository);
    with_repo!(with_external_posts, external_posts, MockExternalPostRepository);
    with_repo!(with_derivations, derivations, MockDerivationRepository);
    with_repo!(with_referrals, referrals, MockReferralRepository);
    with_repo!(
        with_consultation_derivations,
        consultation_derivations,
        MockConsultationDerivationRepository
    );
    with_repo!(
        with_consultation_referrals,
        consultation_referrals,
        MockConsultationReferralRepository
    );
    with_repo!(with_emergency_rooms, emergency_rooms, MockEmergencyRoomRepository);
    with_repo!(with_emergency_room_cares, emergency_room_cares, MockEmergencyRoomCareRepository);
    with_repo!(with_medications, medications, MockMedicationRepository);
    with_repo!(with_stock, stock, MockStockDepartmentRepository);
    with_repo!(with_medication_usages, medication_usages, MockMedicationUsageRepository);
    with_repo!(with_warehouse_requests, warehouse_requests, MockWarehouseRequestRepository);
    with_repo!(with_medication_requests, medication_requests, MockMedicationRequestRepository);

    /// Register the linkable store returned for `role`.
    pub fn with_linkable(mut self, role: Role, repo: MockLinkableRepository) -> Self {
        self.linkables.insert(role, Arc::new(repo));
        self
    }

    /// Number of committed transaction scopes.
    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    /// Number of rolled back transaction scopes.
    pub fn rollbacks(&self) -> usize {
        self.rollbacks.load(Ordering::SeqCst)
    }

    /// Shared view of the counters, usable after the unit of work is moved.
    pub fn tracker(&self) -> TransactionTracker {
        TransactionTracker {
            commits: self.commits.clone(),
            rollbacks: self.rollbacks.clone(),
        }
    }
}

/// Commit / rollback counters detached from the unit of work.
#[derive(Clone)]
pub struct TransactionTracker {
    commits: Arc<AtomicUsize>,
    rollbacks: Arc<AtomicUsize>,
}

impl TransactionTracker {
    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    pub fn rollbacks(&self) -> usize {
        self.rollbacks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UnitOfWork for MockUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn patients(&self) -> Arc<dyn PatientRepository> {
        self.patients.clone()
    }

    fn doctors(&self) -> Arc<dyn DoctorRepository> {
        self.doctors.clone()
    }

    fn nurses(&self) -> Arc<dyn NurseRepository> {
        self.nurses.clone()
    }

    fn department_heads(&self) -> Arc<dyn DepartmentHeadRepository> {
        self.department_heads.clone()
    }

    fn warehouse_managers(&self) -> Arc<dyn WarehouseManagerRepository> {
        self.warehouse_managers.clone()
    }

    fn departments(&self) -> Arc<dyn DepartmentRepository> {
        self.departments.clone()
    }

    fn external_posts(&self) -> Arc<dyn ExternalPostRepository> {
        self.external_posts.clone()
    }

    fn derivations(&self) -> Arc<dyn DerivationRepository> {
        self.derivations.clone()
    }

    fn referrals(&self) -> Arc<dyn ReferralRepository> {
        self.referrals.clone()
    }

    fn consultation_derivations(&self) -> Arc<dyn ConsultationDerivationRepository> {
        self.consultation_derivations.clone()
    }

    fn consultation_referrals(&self) -> Arc<dyn ConsultationReferralRepository> {
        self.consultation_referrals.clone()
    }

    fn emergency_rooms(&self) -> Arc<dyn EmergencyRoomRepository> {
        self.emergency_rooms.clone()
    }

    fn emergency_room_cares(&self) -> Arc<dyn EmergencyRoomCareRepository> {
        self.emergency_room_cares.clone()
    }

    fn medications(&self) -> Arc<dyn MedicationRepository> {
        self.medications.clone()
    }

    fn stock(&self) -> Arc<dyn StockDepartmentRepository> {
        self.stock.clone()
    }

    fn medication_usages(&self, _kind: UsageKind) -> Arc<dyn MedicationUsageRepository> {
        self.medication_usages.clone()
    }

    fn warehouse_requests(&self) -> Arc<dyn WarehouseRequestRepository> {
        self.warehouse_requests.clone()
    }

    fn medication_requests(&self) -> Arc<dyn MedicationRequestRepository> {
        self.medication_requests.clone()
    }

    fn linkable(&self, role: Role) -> Option<Arc<dyn LinkableRepository>> {
        self.linkables.get(&role).cloned()
    }

    async fn begin(&self) -> AppResult<Box<dyn TransactionScope>> {
        Ok(Box::new(MockScope {
            users: self.users.clone(),
            linkables: self.linkables.clone(),
            tracker: self.tracker(),
        }))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

struct MockScope {
    users: Arc<dyn UserRepository>,
    linkables: HashMap<Role, Arc<dyn LinkableRepository>>,
    tracker: TransactionTracker,
}

#[async_trait]
impl TransactionScope for MockScope {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn linkable(&self, role: Role) -> Option<Arc<dyn LinkableRepository>> {
        self.linkables.get(&role).cloned()
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.tracker.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        self.tracker.rollbacks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
