//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::handlers::emergency_handler::OnGuardResponse;
use crate::handlers::health_handler::{HealthResponse, ServiceHealth};
use domain::*;

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::auth_handler::register,
        crate::handlers::auth_handler::login,
        crate::handlers::auth_handler::me,
        crate::handlers::auth_handler::assign_role,
        crate::handlers::health_handler::health_check,
        crate::handlers::patient_handler::list_patients,
        crate::handlers::patient_handler::get_patient,
        crate::handlers::patient_handler::create_patient,
        crate::handlers::patient_handler::update_patient,
        crate::handlers::patient_handler::delete_patient,
        crate::handlers::staff_handler::list_doctors,
        crate::handlers::staff_handler::get_doctor,
        crate::handlers::staff_handler::create_doctor,
        crate::handlers::staff_handler::update_doctor,
        crate::handlers::staff_handler::delete_doctor,
        crate::handlers::staff_handler::list_nurses,
        crate::handlers::staff_handler::get_nurse,
        crate::handlers::staff_handler::create_nurse,
        crate::handlers::staff_handler::update_nurse,
        crate::handlers::staff_handler::delete_nurse,
        crate::handlers::staff_handler::list_department_heads,
        crate::handlers::staff_handler::get_department_head,
        crate::handlers::staff_handler::create_department_head,
        crate::handlers::staff_handler::update_department_head,
        crate::handlers::staff_handler::delete_department_head,
        crate::handlers::staff_handler::list_warehouse_managers,
        crate::handlers::staff_handler::get_warehouse_manager,
        crate::handlers::staff_handler::create_warehouse_manager,
        crate::handlers::staff_handler::update_warehouse_manager,
        crate::handlers::staff_handler::delete_warehouse_manager,
        crate::handlers::department_handler::list_departments,
        crate::handlers::department_handler::get_department,
        crate::handlers::department_handler::create_department,
        crate::handlers::department_handler::update_department,
        crate::handlers::department_handler::delete_department,
        crate::handlers::department_handler::list_external_posts,
        crate::handlers::department_handler::get_external_post,
        crate::handlers::department_handler::create_external_post,
        crate::handlers::department_handler::update_external_post,
        crate::handlers::department_handler::delete_external_post,
        crate::handlers::consultation_handler::list_derivations,
        crate::handlers::consultation_handler::get_derivation,
        crate::handlers::consultation_handler::create_derivation,
        crate::handlers::consultation_handler::update_derivation,
        crate::handlers::consultation_handler::delete_derivation,
        crate::handlers::consultation_handler::list_referrals,
        crate::handlers::consultation_handler::get_referral,
        crate::handlers::consultation_handler::create_referral,
        crate::handlers::consultation_handler::update_referral,
        crate::handlers::consultation_handler::delete_referral,
        crate::handlers::consultation_handler::list_consultation_derivations,
        crate::handlers::consultation_handler::get_consultation_derivation,
        crate::handlers::consultation_handler::create_consultation_derivation,
        crate::handlers::consultation_handler::update_consultation_derivation,
        crate::handlers::consultation_handler::delete_consultation_derivation,
        crate::handlers::consultation_handler::list_consultation_referrals,
        crate::handlers::consultation_handler::get_consultation_referral,
        crate::handlers::consultation_handler::create_consultation_referral,
        crate::handlers::consultation_handler::update_consultation_referral,
        crate::handlers::consultation_handler::delete_consultation_referral,
        crate::handlers::emergency_handler::list_emergency_rooms,
        crate::handlers::emergency_handler::doctor_on_guard,
        crate::handlers::emergency_handler::get_emergency_room,
        crate::handlers::emergency_handler::create_emergency_room,
        crate::handlers::emergency_handler::update_emergency_room,
        crate::handlers::emergency_handler::delete_emergency_room,
        crate::handlers::emergency_handler::list_emergency_cares,
        crate::handlers::emergency_handler::get_emergency_care,
        crate::handlers::emergency_handler::create_emergency_care,
        crate::handlers::emergency_handler::update_emergency_care,
        crate::handlers::emergency_handler::delete_emergency_care,
        crate::handlers::medication_handler::list_medications,
        crate::handlers::medication_handler::get_medication,
        crate::handlers::medication_handler::create_medication,
        crate::handlers::medication_handler::update_medication,
        crate::handlers::medication_handler::delete_medication,
        crate::handlers::medication_handler::list_stock,
        crate::handlers::medication_handler::get_stock,
        crate::handlers::medication_handler::create_stock,
        crate::handlers::medication_handler::update_stock,
        crate::handlers::medication_handler::delete_stock,
        crate::handlers::usage_handler::record_usage,
        crate::handlers::usage_handler::list_usages,
        crate::handlers::usage_handler::delete_usage,
        crate::handlers::warehouse_handler::list_warehouse_requests,
        crate::handlers::warehouse_handler::get_warehouse_request,
        crate::handlers::warehouse_handler::create_warehouse_request,
        crate::handlers::warehouse_handler::update_warehouse_request,
        crate::handlers::warehouse_handler::delete_warehouse_request,
        crate::handlers::warehouse_handler::change_request_status,
        crate::handlers::warehouse_handler::list_request_lines,
        crate::handlers::warehouse_handler::add_request_line,
        crate::handlers::warehouse_handler::remove_request_line,
    ),
    components(
        schemas(
            HealthResponse,
            ServiceHealth,
            Role,
            ValidationData,
            RegisterUser,
            LoginUser,
            AssignRole,
            UserInfo,
            AuthResponse,
            Patient,
            CreatePatient,
            UpdatePatient,
            Employee,
            EmploymentStatus,
            Doctor,
            CreateDoctor,
            UpdateDoctor,
            Nurse,
            CreateNurse,
            UpdateNurse,
            DepartmentHead,
            CreateDepartmentHead,
            UpdateDepartmentHead,
            WarehouseManager,
            CreateWarehouseManager,
            UpdateWarehouseManager,
            Department,
            CreateDepartment,
            UpdateDepartment,
            ExternalMedicalPost,
            CreateExternalMedicalPost,
            UpdateExternalMedicalPost,
            Derivation,
            CreateDerivation,
            UpdateDerivation,
            Referral,
            CreateReferral,
            UpdateReferral,
            ConsultationDerivation,
            CreateConsultationDerivation,
            ConsultationReferral,
            CreateConsultationReferral,
            UpdateConsultation,
            EmergencyRoom,
            CreateEmergencyRoom,
            UpdateEmergencyRoom,
            EmergencyRoomCare,
            CreateEmergencyRoomCare,
            UpdateEmergencyRoomCare,
            OnGuardResponse,
            Medication,
            CreateMedication,
            UpdateMedication,
            StockDepartment,
            CreateStockDepartment,
            UpdateStockDepartment,
            UsageKind,
            MedicationUsage,
            CreateMedicationUsage,
            WarehouseRequest,
            CreateWarehouseRequest,
            UpdateWarehouseRequest,
            ChangeRequestStatus,
            MedicationRequest,
            CreateMedicationRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Authentication", description = "Registration, login and role assignment"),
        (name = "Patients", description = "Patient records"),
        (name = "Staff", description = "Doctors, nurses, department heads and warehouse managers"),
        (name = "Departments", description = "Departments and external medical posts"),
        (name = "Consultations", description = "Derivations, referrals and their consultations"),
        (name = "Emergency", description = "Guard slots and emergency cares"),
        (name = "Medications", description = "Medication catalogue, stock and usage"),
        (name = "Warehouse", description = "Warehouse requests"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_clinical_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/auth/register"));
        assert!(paths.contains_key("/emergency-cares"));
        assert!(paths.contains_key("/medication-usages/{kind}"));
        assert!(paths.contains_key("/warehouse-requests/{id}/status"));
    }
}
