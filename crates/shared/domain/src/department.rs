//! Departments and external medical posts.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Department {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

impl Department {
    pub fn new(name: String, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
        }
    }

    pub fn rename(&mut self, name: String) {
        self.name = name;
    }

    pub fn update_description(&mut self, description: String) {
        self.description = Some(description);
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateDepartment {
    #[validate(length(min = 1, max = 100, message = "El nombre del departamento es obligatorio"))]
    #[cfg_attr(feature = "openapi", schema(example = "Cardiología"))]
    pub name: String,
    #[validate(length(max = 500, message = "La descripción no puede superar 500 caracteres"))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateDepartment {
    #[validate(length(min = 1, max = 100, message = "El nombre del departamento es obligatorio"))]
    pub name: Option<String>,
    #[validate(length(max = 500, message = "La descripción no puede superar 500 caracteres"))]
    pub description: Option<String>,
}

/// Medical post outside the polyclinic that refers patients in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ExternalMedicalPost {
    pub id: Uuid,
    pub name: String,
    pub address: String,
}

impl ExternalMedicalPost {
    pub fn new(name: String, address: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            address,
        }
    }

    pub fn apply(&mut self, changes: UpdateExternalMedicalPost) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(address) = changes.address {
            self.address = address;
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateExternalMedicalPost {
    #[validate(length(min = 1, max = 100, message = "El nombre del puesto médico es obligatorio"))]
    pub name: String,
    #[validate(length(min = 1, max = 200, message = "La dirección es obligatoria"))]
    pub address: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateExternalMedicalPost {
    #[validate(length(min = 1, max = 100, message = "El nombre del puesto médico es obligatorio"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 200, message = "La dirección es obligatoria"))]
    pub address: Option<String>,
}
