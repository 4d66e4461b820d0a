//! Medication catalog, department stock and recorded usage.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{DomainError, DomainResult};

// =============================================================================
// Medication
// =============================================================================

/// Medication batch held in the central warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Medication {
    pub id: Uuid,
    pub name: String,
    pub batch: String,
    pub expiration_date: NaiveDate,
    /// Units available in the warehouse
    pub quantity: i32,
}

impl Medication {
    pub fn new(dto: CreateMedication) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: dto.name,
            batch: dto.batch,
            expiration_date: dto.expiration_date,
            quantity: dto.quantity,
        }
    }

    pub fn is_expired(&self, on: NaiveDate) -> bool {
        self.expiration_date < on
    }

    pub fn update_details(
        &mut self,
        name: Option<String>,
        batch: Option<String>,
        expiration_date: Option<NaiveDate>,
    ) {
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(batch) = batch {
            self.batch = batch;
        }
        if let Some(expiration_date) = expiration_date {
            self.expiration_date = expiration_date;
        }
    }

    pub fn change_quantity(&mut self, quantity: i32) {
        self.quantity = quantity;
    }

    pub fn apply(&mut self, changes: UpdateMedication) {
        self.update_details(changes.name, changes.batch, changes.expiration_date);
        if let Some(quantity) = changes.quantity {
            self.change_quantity(quantity);
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateMedication {
    #[validate(length(min = 1, max = 100, message = "El nombre del medicamento es obligatorio"))]
    #[cfg_attr(feature = "openapi", schema(example = "Amoxicilina 500mg"))]
    pub name: String,
    #[validate(length(min = 1, max = 50, message = "El lote es obligatorio"))]
    pub batch: String,
    pub expiration_date: NaiveDate,
    #[validate(range(min = 0, message = "La cantidad no puede ser negativa"))]
    pub quantity: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateMedication {
    #[validate(length(min = 1, max = 100, message = "El nombre del medicamento es obligatorio"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50, message = "El lote es obligatorio"))]
    pub batch: Option<String>,
    pub expiration_date: Option<NaiveDate>,
    #[validate(range(min = 0, message = "La cantidad no puede ser negativa"))]
    pub quantity: Option<i32>,
}

// =============================================================================
// Department stock
// =============================================================================

/// Units of one medication kept by one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StockDepartment {
    pub id: Uuid,
    pub department_id: Uuid,
    pub medication_id: Uuid,
    pub quantity: i32,
    /// Threshold under which the department should request more
    pub min_quantity: i32,
}

impl StockDepartment {
    pub fn new(dto: CreateStockDepartment) -> Self {
        Self {
            id: Uuid::new_v4(),
            department_id: dto.department_id,
            medication_id: dto.medication_id,
            quantity: dto.quantity,
            min_quantity: dto.min_quantity,
        }
    }

    pub fn is_below_minimum(&self) -> bool {
        self.quantity < self.min_quantity
    }

    pub fn update_quantities(&mut self, quantity: Option<i32>, min_quantity: Option<i32>) {
        if let Some(quantity) = quantity {
            self.quantity = quantity;
        }
        if let Some(min_quantity) = min_quantity {
            self.min_quantity = min_quantity;
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateStockDepartment {
    pub department_id: Uuid,
    pub medication_id: Uuid,
    #[validate(range(min = 0, message = "La cantidad no puede ser negativa"))]
    pub quantity: i32,
    #[validate(range(min = 0, message = "La cantidad mínima no puede ser negativa"))]
    pub min_quantity: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateStockDepartment {
    #[validate(range(min = 0, message = "La cantidad no puede ser negativa"))]
    pub quantity: Option<i32>,
    #[validate(range(min = 0, message = "La cantidad mínima no puede ser negativa"))]
    pub min_quantity: Option<i32>,
}

// =============================================================================
// Usage
// =============================================================================

/// Clinical record a medication usage is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum UsageKind {
    /// A consultation derivation (MedicationDerivation)
    Derivation,
    /// A consultation referral (MedicationReferral)
    Referral,
    /// An emergency-room care (MedicationEmergency)
    Emergency,
}

impl fmt::Display for UsageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UsageKind::Derivation => "consulta de derivación",
            UsageKind::Referral => "consulta de remisión",
            UsageKind::Emergency => "atención de urgencias",
        };
        f.write_str(label)
    }
}

/// Units of a medication consumed by a consultation or emergency care.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MedicationUsage {
    pub id: Uuid,
    pub kind: UsageKind,
    /// Consultation or care the usage belongs to
    pub record_id: Uuid,
    pub medication_id: Uuid,
    pub quantity: i32,
}

impl MedicationUsage {
    pub fn new(kind: UsageKind, dto: CreateMedicationUsage) -> DomainResult<Self> {
        if dto.quantity <= 0 {
            return Err(DomainError::validation("La cantidad debe ser mayor que cero"));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            kind,
            record_id: dto.record_id,
            medication_id: dto.medication_id,
            quantity: dto.quantity,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateMedicationUsage {
    pub record_id: Uuid,
    pub medication_id: Uuid,
    #[validate(range(min = 1, message = "La cantidad debe ser mayor que cero"))]
    pub quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_below_minimum() {
        let mut stock = StockDepartment::new(CreateStockDepartment {
            department_id: Uuid::new_v4(),
            medication_id: Uuid::new_v4(),
            quantity: 10,
            min_quantity: 5,
        });
        assert!(!stock.is_below_minimum());

        stock.update_quantities(Some(4), None);
        assert!(stock.is_below_minimum());
    }

    #[test]
    fn test_usage_requires_positive_quantity() {
        let result = MedicationUsage::new(
            UsageKind::Emergency,
            CreateMedicationUsage {
                record_id: Uuid::new_v4(),
                medication_id: Uuid::new_v4(),
                quantity: 0,
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_medication_expiry() {
        let medication = Medication::new(CreateMedication {
            name: "Ibuprofeno".into(),
            batch: "L-22".into(),
            expiration_date: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            quantity: 100,
        });
        assert!(!medication.is_expired(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()));
        assert!(medication.is_expired(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()));
    }
}
