//! Domain layer - Core clinical entities, DTOs and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Request DTOs carry `validator` rules; entities expose named update methods
//! so services never assign fields directly.

pub mod consultation;
pub mod constants;
pub mod department;
pub mod emergency;
pub mod employee;
pub mod error;
pub mod medication;
pub mod password;
pub mod patient;
pub mod role;
pub mod staff;
pub mod user;
pub mod warehouse;

pub use consultation::{
    ConsultationDerivation, ConsultationReferral, CreateConsultationDerivation,
    CreateConsultationReferral, CreateDerivation, CreateReferral, Derivation, Referral,
    UpdateConsultation, UpdateDerivation, UpdateReferral,
};
pub use constants::*;
pub use department::{
    CreateDepartment, CreateExternalMedicalPost, Department, ExternalMedicalPost,
    UpdateDepartment, UpdateExternalMedicalPost,
};
pub use emergency::{
    CreateEmergencyRoom, CreateEmergencyRoomCare, EmergencyRoom, EmergencyRoomCare,
    UpdateEmergencyRoom, UpdateEmergencyRoomCare,
};
pub use employee::{Employee, EmploymentStatus};
pub use error::{DomainError, DomainResult};
pub use medication::{
    CreateMedication, CreateMedicationUsage, CreateStockDepartment, Medication, MedicationUsage,
    StockDepartment, UpdateMedication, UpdateStockDepartment, UsageKind,
};
pub use password::Password;
pub use patient::{CreatePatient, Patient, UpdatePatient};
pub use role::{EntityLink, LinkableEntity, Role, ValidationData};
pub use staff::{
    CreateDepartmentHead, CreateDoctor, CreateNurse, CreateWarehouseManager, DepartmentHead,
    Doctor, Nurse, UpdateDepartmentHead, UpdateDoctor, UpdateNurse, UpdateWarehouseManager,
    WarehouseManager,
};
pub use user::{AssignRole, AuthResponse, LoginUser, RegisterUser, User, UserInfo};
pub use warehouse::{
    ChangeRequestStatus, CreateMedicationRequest, CreateWarehouseRequest, MedicationRequest,
    UpdateWarehouseRequest, WarehouseRequest, DEFAULT_REQUEST_STATUS,
};
