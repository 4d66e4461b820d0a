//! Employee data shared by every staff member.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Employment status of a staff member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum EmploymentStatus {
    #[default]
    Active,
    OnLeave,
    Inactive,
}

impl EmploymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentStatus::Active => "active",
            EmploymentStatus::OnLeave => "on_leave",
            EmploymentStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmploymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(EmploymentStatus::Active),
            "on_leave" => Ok(EmploymentStatus::OnLeave),
            "inactive" => Ok(EmploymentStatus::Inactive),
            other => Err(DomainError::validation(format!(
                "Estado laboral desconocido: {}",
                other
            ))),
        }
    }
}

/// Fields every staff member carries, composed into each staff type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Employee {
    pub identification: String,
    pub name: String,
    pub status: EmploymentStatus,
    /// Linked user account, if any
    pub user_id: Option<Uuid>,
}

impl Employee {
    pub fn new(identification: String, name: String, status: Option<EmploymentStatus>) -> Self {
        Self {
            identification,
            name,
            status: status.unwrap_or_default(),
            user_id: None,
        }
    }

    pub fn is_linked(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn update_identification(&mut self, identification: String) {
        self.identification = identification;
    }

    pub fn update_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn change_status(&mut self, status: EmploymentStatus) {
        self.status = status;
    }

    /// Apply the optional employee fields of an update request.
    pub fn apply_changes(
        &mut self,
        identification: Option<String>,
        name: Option<String>,
        status: Option<EmploymentStatus>,
    ) {
        if let Some(identification) = identification {
            self.update_identification(identification);
        }
        if let Some(name) = name {
            self.update_name(name);
        }
        if let Some(status) = status {
            self.change_status(status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_employee_defaults_to_active_and_unlinked() {
        let employee = Employee::new("E-1".into(), "Ana Ruiz".into(), None);
        assert_eq!(employee.status, EmploymentStatus::Active);
        assert!(!employee.is_linked());
    }

    #[test]
    fn test_apply_changes_is_partial() {
        let mut employee = Employee::new("E-1".into(), "Ana Ruiz".into(), None);
        employee.apply_changes(None, Some("Ana Ruiz Soto".into()), Some(EmploymentStatus::OnLeave));

        assert_eq!(employee.identification, "E-1");
        assert_eq!(employee.name, "Ana Ruiz Soto");
        assert_eq!(employee.status, EmploymentStatus::OnLeave);
    }

    #[test]
    fn test_status_round_trips_through_storage_string() {
        assert_eq!(
            "on_leave".parse::<EmploymentStatus>().unwrap(),
            EmploymentStatus::OnLeave
        );
        assert!("retired".parse::<EmploymentStatus>().is_err());
    }
}
