//! Staff members: doctors, nurses, department heads and warehouse managers.
//!
//! Each staff type composes an [`Employee`] and adds its own attributes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::constants::IDENTIFICATION_REGEX;
use crate::employee::{Employee, EmploymentStatus};

// =============================================================================
// Doctor
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Doctor {
    pub id: Uuid,
    #[serde(flatten)]
    pub employee: Employee,
    pub department_id: Uuid,
    pub specialty: String,
}

impl Doctor {
    pub fn new(employee: Employee, department_id: Uuid, specialty: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee,
            department_id,
            specialty,
        }
    }

    pub fn change_department(&mut self, department_id: Uuid) {
        self.department_id = department_id;
    }

    pub fn update_specialty(&mut self, specialty: String) {
        self.specialty = specialty;
    }

    pub fn apply(&mut self, changes: UpdateDoctor) {
        self.employee
            .apply_changes(changes.identification, changes.name, changes.status);
        if let Some(department_id) = changes.department_id {
            self.change_department(department_id);
        }
        if let Some(specialty) = changes.specialty {
            self.update_specialty(specialty);
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateDoctor {
    #[validate(regex(path = *IDENTIFICATION_REGEX, message = "El número de identificación no es válido"))]
    pub identification: String,
    #[validate(length(min = 1, max = 100, message = "El nombre debe tener entre 1 y 100 caracteres"))]
    pub name: String,
    pub status: Option<EmploymentStatus>,
    pub department_id: Uuid,
    #[validate(length(min = 1, max = 100, message = "La especialidad es obligatoria"))]
    pub specialty: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateDoctor {
    #[validate(regex(path = *IDENTIFICATION_REGEX, message = "El número de identificación no es válido"))]
    pub identification: Option<String>,
    #[validate(length(min = 1, max = 100, message = "El nombre debe tener entre 1 y 100 caracteres"))]
    pub name: Option<String>,
    pub status: Option<EmploymentStatus>,
    pub department_id: Option<Uuid>,
    #[validate(length(min = 1, max = 100, message = "La especialidad es obligatoria"))]
    pub specialty: Option<String>,
}

// =============================================================================
// Nurse
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Nurse {
    pub id: Uuid,
    #[serde(flatten)]
    pub employee: Employee,
    pub department_id: Uuid,
}

impl Nurse {
    pub fn new(employee: Employee, department_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee,
            department_id,
        }
    }

    pub fn change_department(&mut self, department_id: Uuid) {
        self.department_id = department_id;
    }

    pub fn apply(&mut self, changes: UpdateNurse) {
        self.employee
            .apply_changes(changes.identification, changes.name, changes.status);
        if let Some(department_id) = changes.department_id {
            self.change_department(department_id);
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateNurse {
    #[validate(regex(path = *IDENTIFICATION_REGEX, message = "El número de identificación no es válido"))]
    pub identification: String,
    #[validate(length(min = 1, max = 100, message = "El nombre debe tener entre 1 y 100 caracteres"))]
    pub name: String,
    pub status: Option<EmploymentStatus>,
    pub department_id: Uuid,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateNurse {
    #[validate(regex(path = *IDENTIFICATION_REGEX, message = "El número de identificación no es válido"))]
    pub identification: Option<String>,
    #[validate(length(min = 1, max = 100, message = "El nombre debe tener entre 1 y 100 caracteres"))]
    pub name: Option<String>,
    pub status: Option<EmploymentStatus>,
    pub department_id: Option<Uuid>,
}

// =============================================================================
// Department head
// =============================================================================

/// Employee who approves consultations for a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DepartmentHead {
    pub id: Uuid,
    #[serde(flatten)]
    pub employee: Employee,
    pub department_id: Uuid,
    pub appointed_on: NaiveDate,
}

impl DepartmentHead {
    pub fn new(employee: Employee, department_id: Uuid, appointed_on: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee,
            department_id,
            appointed_on,
        }
    }

    /// Move the head to another department, starting a new appointment.
    pub fn reassign(&mut self, department_id: Uuid, appointed_on: NaiveDate) {
        self.department_id = department_id;
        self.appointed_on = appointed_on;
    }

    pub fn apply(&mut self, changes: UpdateDepartmentHead) {
        self.employee
            .apply_changes(changes.identification, changes.name, changes.status);
        match (changes.department_id, changes.appointed_on) {
            (Some(department_id), appointed_on) => {
                let appointed_on = appointed_on.unwrap_or(self.appointed_on);
                self.reassign(department_id, appointed_on);
            }
            (None, Some(appointed_on)) => self.appointed_on = appointed_on,
            (None, None) => {}
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateDepartmentHead {
    #[validate(regex(path = *IDENTIFICATION_REGEX, message = "El número de identificación no es válido"))]
    pub identification: String,
    #[validate(length(min = 1, max = 100, message = "El nombre debe tener entre 1 y 100 caracteres"))]
    pub name: String,
    pub status: Option<EmploymentStatus>,
    pub department_id: Uuid,
    pub appointed_on: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateDepartmentHead {
    #[validate(regex(path = *IDENTIFICATION_REGEX, message = "El número de identificación no es válido"))]
    pub identification: Option<String>,
    #[validate(length(min = 1, max = 100, message = "El nombre debe tener entre 1 y 100 caracteres"))]
    pub name: Option<String>,
    pub status: Option<EmploymentStatus>,
    pub department_id: Option<Uuid>,
    pub appointed_on: Option<NaiveDate>,
}

// =============================================================================
// Warehouse manager
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct WarehouseManager {
    pub id: Uuid,
    #[serde(flatten)]
    pub employee: Employee,
    /// Name of the managed warehouse
    pub warehouse: String,
}

impl WarehouseManager {
    pub fn new(employee: Employee, warehouse: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee,
            warehouse,
        }
    }

    pub fn change_warehouse(&mut self, warehouse: String) {
        self.warehouse = warehouse;
    }

    pub fn apply(&mut self, changes: UpdateWarehouseManager) {
        self.employee
            .apply_changes(changes.identification, changes.name, changes.status);
        if let Some(warehouse) = changes.warehouse {
            self.change_warehouse(warehouse);
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateWarehouseManager {
    #[validate(regex(path = *IDENTIFICATION_REGEX, message = "El número de identificación no es válido"))]
    pub identification: String,
    #[validate(length(min = 1, max = 100, message = "El nombre debe tener entre 1 y 100 caracteres"))]
    pub name: String,
    pub status: Option<EmploymentStatus>,
    #[validate(length(min = 1, max = 100, message = "El almacén es obligatorio"))]
    pub warehouse: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateWarehouseManager {
    #[validate(regex(path = *IDENTIFICATION_REGEX, message = "El número de identificación no es válido"))]
    pub identification: Option<String>,
    #[validate(length(min = 1, max = 100, message = "El nombre debe tener entre 1 y 100 caracteres"))]
    pub name: Option<String>,
    pub status: Option<EmploymentStatus>,
    #[validate(length(min = 1, max = 100, message = "El almacén es obligatorio"))]
    pub warehouse: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee() -> Employee {
        Employee::new("D-100".into(), "Luis Gómez".into(), None)
    }

    #[test]
    fn test_doctor_partial_update_keeps_untouched_fields() {
        let department = Uuid::new_v4();
        let mut doctor = Doctor::new(employee(), department, "Cardiología".into());

        doctor.apply(UpdateDoctor {
            specialty: Some("Neumología".into()),
            ..Default::default()
        });

        assert_eq!(doctor.department_id, department);
        assert_eq!(doctor.specialty, "Neumología");
        assert_eq!(doctor.employee.identification, "D-100");
    }

    #[test]
    fn test_department_head_reassign_keeps_date_when_not_given() {
        let appointed = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
        let mut head = DepartmentHead::new(employee(), Uuid::new_v4(), appointed);
        let new_department = Uuid::new_v4();

        head.apply(UpdateDepartmentHead {
            department_id: Some(new_department),
            ..Default::default()
        });

        assert_eq!(head.department_id, new_department);
        assert_eq!(head.appointed_on, appointed);
    }

    #[test]
    fn test_create_doctor_rejects_blank_specialty() {
        let dto = CreateDoctor {
            identification: "D-1".into(),
            name: "Luis".into(),
            status: None,
            department_id: Uuid::new_v4(),
            specialty: String::new(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_staff_serializes_employee_fields_inline() {
        let manager = WarehouseManager::new(employee(), "Central".into());
        let json = serde_json::to_value(&manager).unwrap();

        assert_eq!(json["identification"], "D-100");
        assert_eq!(json["warehouse"], "Central");
        assert!(json.get("employee").is_none());
    }
}
