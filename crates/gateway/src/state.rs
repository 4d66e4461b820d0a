//! Application state for dependency injection.

use std::sync::Arc;

use auth_service_lib::AuthService;
use clinic_service_lib::infra::UnitOfWork;
use clinic_service_lib::service::*;

use crate::config::GatewayConfig;

/// Every service the handlers call, built over one unit of work.
pub struct Services {
    pub uow: Arc<dyn UnitOfWork>,
    pub auth: Arc<dyn AuthService>,
    pub patients: Arc<dyn PatientService>,
    pub doctors: Arc<dyn DoctorService>,
    pub nurses: Arc<dyn NurseService>,
    pub department_heads: Arc<dyn DepartmentHeadService>,
    pub warehouse_managers: Arc<dyn WarehouseManagerService>,
    pub departments: Arc<dyn DepartmentService>,
    pub external_posts: Arc<dyn ExternalPostService>,
    pub derivations: Arc<dyn DerivationService>,
    pub referrals: Arc<dyn ReferralService>,
    pub consultation_derivations: Arc<dyn ConsultationDerivationService>,
    pub consultation_referrals: Arc<dyn ConsultationReferralService>,
    pub emergency_rooms: Arc<dyn EmergencyRoomService>,
    pub emergency_cares: Arc<dyn EmergencyCareService>,
    pub medications: Arc<dyn MedicationService>,
    pub stock: Arc<dyn StockService>,
    pub medication_usages: Arc<dyn MedicationUsageService>,
    pub warehouse_requests: Arc<dyn WarehouseRequestService>,
}

impl Services {
    pub fn new(uow: Arc<dyn UnitOfWork>, auth: Arc<dyn AuthService>) -> Self {
        Self {
            auth,
            patients: Arc::new(PatientManager::new(uow.clone())),
            doctors: Arc::new(DoctorManager::new(uow.clone())),
            nurses: Arc::new(NurseManager::new(uow.clone())),
            department_heads: Arc::new(DepartmentHeadManager::new(uow.clone())),
            warehouse_managers: Arc::new(WarehouseStaffManager::new(uow.clone())),
            departments: Arc::new(DepartmentManager::new(uow.clone())),
            external_posts: Arc::new(ExternalPostManager::new(uow.clone())),
            derivations: Arc::new(DerivationManager::new(uow.clone())),
            referrals: Arc::new(ReferralManager::new(uow.clone())),
            consultation_derivations: Arc::new(ConsultationDerivationManager::new(uow.clone())),
            consultation_referrals: Arc::new(ConsultationReferralManager::new(uow.clone())),
            emergency_rooms: Arc::new(EmergencyRoomManager::new(uow.clone())),
            emergency_cares: Arc::new(EmergencyCareManager::new(uow.clone())),
            medications: Arc::new(MedicationManager::new(uow.clone())),
            stock: Arc::new(StockManager::new(uow.clone())),
            medication_usages: Arc::new(MedicationUsageManager::new(uow.clone())),
            warehouse_requests: Arc::new(WarehouseRequestManager::new(uow.clone())),
            uow,
        }
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<Services>,
    pub config: Arc<GatewayConfig>,
}

impl AppState {
    /// Create new app state.
    pub fn new(services: Services, config: GatewayConfig) -> Self {
        Self {
            services: Arc::new(services),
            config: Arc::new(config),
        }
    }
}
