//! Roles and the data used to link a role to a clinical record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::constants::{
    IDENTIFICATION_REGEX, ROLE_ADMIN, ROLE_DEPARTMENT_HEAD, ROLE_DOCTOR, ROLE_NURSE,
    ROLE_PATIENT, ROLE_WAREHOUSE_MANAGER,
};
use crate::error::DomainError;

/// Roles a user account can hold.
///
/// Every role except `Admin` corresponds to exactly one kind of clinical
/// record (patient or staff member) that the account gets linked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Role {
    Admin,
    Doctor,
    Nurse,
    Patient,
    WarehouseManager,
    DepartmentHead,
}

impl Role {
    /// Roles that are backed by a clinical record.
    pub const LINKABLE: [Role; 5] = [
        Role::Doctor,
        Role::Nurse,
        Role::Patient,
        Role::WarehouseManager,
        Role::DepartmentHead,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Doctor => ROLE_DOCTOR,
            Role::Nurse => ROLE_NURSE,
            Role::Patient => ROLE_PATIENT,
            Role::WarehouseManager => ROLE_WAREHOUSE_MANAGER,
            Role::DepartmentHead => ROLE_DEPARTMENT_HEAD,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn is_linkable(&self) -> bool {
        !self.is_admin()
    }

    /// Human-readable subject used in user-facing messages.
    pub fn entity_label(&self) -> &'static str {
        match self {
            Role::Admin => "El administrador",
            Role::Doctor => "El doctor",
            Role::Nurse => "El enfermero",
            Role::Patient => "El paciente",
            Role::WarehouseManager => "El jefe de almacén",
            Role::DepartmentHead => "El jefe de departamento",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_DOCTOR => Ok(Role::Doctor),
            ROLE_NURSE => Ok(Role::Nurse),
            ROLE_PATIENT => Ok(Role::Patient),
            ROLE_WAREHOUSE_MANAGER => Ok(Role::WarehouseManager),
            ROLE_DEPARTMENT_HEAD => Ok(Role::DepartmentHead),
            other => Err(DomainError::validation(format!(
                "El rol '{}' no es válido",
                other
            ))),
        }
    }
}

/// Supplementary data identifying the clinical record behind a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ValidationData {
    /// Identification number of the patient or staff member
    #[serde(alias = "IdentificationNumber", alias = "identificationNumber")]
    #[validate(regex(
        path = *IDENTIFICATION_REGEX,
        message = "El número de identificación no es válido"
    ))]
    #[cfg_attr(feature = "openapi", schema(example = "123"))]
    pub identification_number: String,
}

impl ValidationData {
    pub fn new(identification_number: impl Into<String>) -> Self {
        Self {
            identification_number: identification_number.into(),
        }
    }
}

/// The linking-relevant slice of any record a role can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkableEntity {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
}

impl LinkableEntity {
    pub fn is_linked(&self) -> bool {
        self.user_id.is_some()
    }
}

/// A record that will be stamped with a new user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityLink {
    pub role: Role,
    pub entity_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parses_exact_names() {
        for role in Role::LINKABLE {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
    }

    #[test]
    fn test_role_rejects_unknown_name() {
        let result = "Surgeon".parse::<Role>();
        assert!(matches!(result, Err(DomainError::Validation(msg)) if msg.contains("Surgeon")));
    }

    #[test]
    fn test_only_admin_is_not_linkable() {
        assert!(!Role::Admin.is_linkable());
        assert!(Role::LINKABLE.iter().all(Role::is_linkable));
    }

    #[test]
    fn test_validation_data_accepts_pascal_case_key() {
        let data: ValidationData =
            serde_json::from_str(r#"{"IdentificationNumber":"123"}"#).unwrap();
        assert_eq!(data.identification_number, "123");
        assert!(data.validate().is_ok());
    }

    #[test]
    fn test_validation_data_rejects_malformed_identification() {
        let data = ValidationData::new("12 3");
        assert!(data.validate().is_err());
    }
}
