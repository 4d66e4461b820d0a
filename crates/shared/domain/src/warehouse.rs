//! Department requests to the central warehouse.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Status given to a request when none is supplied.
pub const DEFAULT_REQUEST_STATUS: &str = "Pendiente";

/// A department's request for medications. `status` is free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct WarehouseRequest {
    pub id: Uuid,
    pub department_id: Uuid,
    pub request_date: NaiveDate,
    pub status: String,
}

impl WarehouseRequest {
    pub fn new(dto: CreateWarehouseRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            department_id: dto.department_id,
            request_date: dto.request_date,
            status: dto
                .status
                .unwrap_or_else(|| DEFAULT_REQUEST_STATUS.to_string()),
        }
    }

    pub fn change_status(&mut self, status: String) {
        self.status = status;
    }

    pub fn apply(&mut self, changes: UpdateWarehouseRequest) {
        if let Some(department_id) = changes.department_id {
            self.department_id = department_id;
        }
        if let Some(request_date) = changes.request_date {
            self.request_date = request_date;
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateWarehouseRequest {
    pub department_id: Uuid,
    pub request_date: NaiveDate,
    #[validate(length(min = 1, max = 50, message = "El estado no puede estar vacío"))]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateWarehouseRequest {
    pub department_id: Option<Uuid>,
    pub request_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChangeRequestStatus {
    #[validate(length(min = 1, max = 50, message = "El estado no puede estar vacío"))]
    #[cfg_attr(feature = "openapi", schema(example = "Aprobada"))]
    pub status: String,
}

/// One medication line of a warehouse request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MedicationRequest {
    pub id: Uuid,
    pub warehouse_request_id: Uuid,
    pub medication_id: Uuid,
    pub quantity: i32,
}

impl MedicationRequest {
    pub fn new(warehouse_request_id: Uuid, dto: CreateMedicationRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            warehouse_request_id,
            medication_id: dto.medication_id,
            quantity: dto.quantity,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateMedicationRequest {
    pub medication_id: Uuid,
    #[validate(range(min = 1, message = "La cantidad debe ser mayor que cero"))]
    pub quantity: i32,
}
