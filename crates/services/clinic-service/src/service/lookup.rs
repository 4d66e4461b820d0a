//! Existence checks shared by the services.
//!
//! Each helper loads a record through the unit of work and turns a miss into
//! a not-found error carrying the user-facing message.

use uuid::Uuid;

use crate::infra::UnitOfWork;
use common::{AppError, AppResult, OptionExt};
use domain::{
    ConsultationDerivation, ConsultationReferral, Department, DepartmentHead, Derivation, Doctor,
    EmergencyRoom, EmergencyRoomCare, ExternalMedicalPost, Medication, Patient, Referral, Role,
    StockDepartment, WarehouseRequest,
};

pub(crate) const PATIENT_NOT_FOUND: &str = "Paciente no encontrado";
pub(crate) const DOCTOR_NOT_FOUND: &str = "Doctor no encontrado";
pub(crate) const NURSE_NOT_FOUND: &str = "Enfermero no encontrado";
pub(crate) const DEPARTMENT_HEAD_NOT_FOUND: &str = "Jefe de departamento no encontrado";
pub(crate) const WAREHOUSE_MANAGER_NOT_FOUND: &str = "Jefe de almacén no encontrado";
pub(crate) const DEPARTMENT_NOT_FOUND: &str = "Departamento no encontrado";
pub(crate) const EXTERNAL_POST_NOT_FOUND: &str = "Puesto médico externo no encontrado";
pub(crate) const DERIVATION_NOT_FOUND: &str = "Derivación no encontrada";
pub(crate) const REFERRAL_NOT_FOUND: &str = "Remisión no encontrada";
pub(crate) const CONSULTATION_DERIVATION_NOT_FOUND: &str = "Consulta de derivación no encontrada";
pub(crate) const CONSULTATION_REFERRAL_NOT_FOUND: &str = "Consulta de remisión no encontrada";
pub(crate) const GUARD_NOT_FOUND: &str = "Guardia no encontrada";
pub(crate) const CARE_NOT_FOUND: &str = "Atención de urgencia no encontrada";
pub(crate) const MEDICATION_NOT_FOUND: &str = "Medicamento no encontrado";
pub(crate) const STOCK_NOT_FOUND: &str = "Existencia de departamento no encontrada";
pub(crate) const WAREHOUSE_REQUEST_NOT_FOUND: &str = "Solicitud de almacén no encontrada";

/// Conflict raised when an identification number is already taken.
pub(crate) fn duplicate_identification(role: Role, identification: &str) -> AppError {
    AppError::conflict(format!(
        "{} con identificación {} ya existe",
        role.entity_label(),
        identification
    ))
}

pub(crate) async fn patient(uow: &dyn UnitOfWork, id: Uuid) -> AppResult<Patient> {
    uow.patients()
        .find_by_id(id)
        .await?
        .ok_or_not_found(PATIENT_NOT_FOUND)
}

pub(crate) async fn doctor(uow: &dyn UnitOfWork, id: Uuid) -> AppResult<Doctor> {
    uow.doctors()
        .find_by_id(id)
        .await?
        .ok_or_not_found(DOCTOR_NOT_FOUND)
}

pub(crate) async fn department_head(uow: &dyn UnitOfWork, id: Uuid) -> AppResult<DepartmentHead> {
    uow.department_heads()
        .find_by_id(id)
        .await?
        .ok_or_not_found(DEPARTMENT_HEAD_NOT_FOUND)
}

pub(crate) async fn department(uow: &dyn UnitOfWork, id: Uuid) -> AppResult<Department> {
    uow.departments()
        .find_by_id(id)
        .await?
        .ok_or_not_found(DEPARTMENT_NOT_FOUND)
}

pub(crate) async fn external_post(
    uow: &dyn UnitOfWork,
    id: Uuid,
) -> AppResult<ExternalMedicalPost> {
    uow.external_posts()
        .find_by_id(id)
        .await?
        .ok_or_not_found(EXTERNAL_POST_NOT_FOUND)
}

pub(crate) async fn derivation(uow: &dyn UnitOfWork, id: Uuid) -> AppResult<Derivation> {
    uow.derivations()
        .find_by_id(id)
        .await?
        .ok_or_not_found(DERIVATION_NOT_FOUND)
}

pub(crate) async fn referral(uow: &dyn UnitOfWork, id: Uuid) -> AppResult<Referral> {
    uow.referrals()
        .find_by_id(id)
        .await?
        .ok_or_not_found(REFERRAL_NOT_FOUND)
}

pub(crate) async fn consultation_derivation(
    uow: &dyn UnitOfWork,
    id: Uuid,
) -> AppResult<ConsultationDerivation> {
    uow.consultation_derivations()
        .find_by_id(id)
        .await?
        .ok_or_not_found(CONSULTATION_DERIVATION_NOT_FOUND)
}

pub(crate) async fn consultation_referral(
    uow: &dyn UnitOfWork,
    id: Uuid,
) -> AppResult<ConsultationReferral> {
    uow.consultation_referrals()
        .find_by_id(id)
        .await?
        .ok_or_not_found(CONSULTATION_REFERRAL_NOT_FOUND)
}

pub(crate) async fn emergency_room(uow: &dyn UnitOfWork, id: Uuid) -> AppResult<EmergencyRoom> {
    uow.emergency_rooms()
        .find_by_id(id)
        .await?
        .ok_or_not_found(GUARD_NOT_FOUND)
}

pub(crate) async fn emergency_care(uow: &dyn UnitOfWork, id: Uuid) -> AppResult<EmergencyRoomCare> {
    uow.emergency_room_cares()
        .find_by_id(id)
        .await?
        .ok_or_not_found(CARE_NOT_FOUND)
}

pub(crate) async fn medication(uow: &dyn UnitOfWork, id: Uuid) -> AppResult<Medication> {
    uow.medications()
        .find_by_id(id)
        .await?
        .ok_or_not_found(MEDICATION_NOT_FOUND)
}

pub(crate) async fn stock(uow: &dyn UnitOfWork, id: Uuid) -> AppResult<StockDepartment> {
    uow.stock()
        .find_by_id(id)
        .await?
        .ok_or_not_found(STOCK_NOT_FOUND)
}

pub(crate) async fn warehouse_request(
    uow: &dyn UnitOfWork,
    id: Uuid,
) -> AppResult<WarehouseRequest> {
    uow.warehouse_requests()
        .find_by_id(id)
        .await?
        .ok_or_not_found(WAREHOUSE_REQUEST_NOT_FOUND)
}
