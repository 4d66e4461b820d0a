//! Patient entity and DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::constants::IDENTIFICATION_REGEX;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Patient {
    pub id: Uuid,
    pub identification: String,
    pub name: String,
    pub age: i32,
    pub contact: String,
    pub address: String,
    /// Linked user account, if any
    pub user_id: Option<Uuid>,
}

impl Patient {
    pub fn new(dto: CreatePatient) -> Self {
        Self {
            id: Uuid::new_v4(),
            identification: dto.identification,
            name: dto.name,
            age: dto.age,
            contact: dto.contact,
            address: dto.address,
            user_id: None,
        }
    }

    pub fn is_linked(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn update_identification(&mut self, identification: String) {
        self.identification = identification;
    }

    pub fn update_personal_data(&mut self, name: Option<String>, age: Option<i32>) {
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(age) = age {
            self.age = age;
        }
    }

    pub fn update_contact_info(&mut self, contact: Option<String>, address: Option<String>) {
        if let Some(contact) = contact {
            self.contact = contact;
        }
        if let Some(address) = address {
            self.address = address;
        }
    }

    pub fn apply(&mut self, changes: UpdatePatient) {
        if let Some(identification) = changes.identification {
            self.update_identification(identification);
        }
        self.update_personal_data(changes.name, changes.age);
        self.update_contact_info(changes.contact, changes.address);
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreatePatient {
    #[validate(regex(path = *IDENTIFICATION_REGEX, message = "El número de identificación no es válido"))]
    #[cfg_attr(feature = "openapi", schema(example = "123"))]
    pub identification: String,
    #[validate(length(min = 1, max = 100, message = "El nombre debe tener entre 1 y 100 caracteres"))]
    pub name: String,
    #[validate(range(min = 0, max = 150, message = "La edad debe estar entre 0 y 150"))]
    pub age: i32,
    #[validate(length(min = 1, max = 100, message = "El contacto es obligatorio"))]
    pub contact: String,
    #[validate(length(min = 1, max = 200, message = "La dirección es obligatoria"))]
    pub address: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdatePatient {
    #[validate(regex(path = *IDENTIFICATION_REGEX, message = "El número de identificación no es válido"))]
    pub identification: Option<String>,
    #[validate(length(min = 1, max = 100, message = "El nombre debe tener entre 1 y 100 caracteres"))]
    pub name: Option<String>,
    #[validate(range(min = 0, max = 150, message = "La edad debe estar entre 0 y 150"))]
    pub age: Option<i32>,
    #[validate(length(min = 1, max = 100, message = "El contacto es obligatorio"))]
    pub contact: Option<String>,
    #[validate(length(min = 1, max = 200, message = "La dirección es obligatoria"))]
    pub address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_dto() -> CreatePatient {
        CreatePatient {
            identification: "123".into(),
            name: "María López".into(),
            age: 34,
            contact: "555-0101".into(),
            address: "Calle 8 #12".into(),
        }
    }

    #[test]
    fn test_new_patient_is_unlinked() {
        let patient = Patient::new(create_dto());
        assert!(!patient.is_linked());
        assert_eq!(patient.identification, "123");
    }

    #[test]
    fn test_update_only_touches_given_fields() {
        let mut patient = Patient::new(create_dto());
        patient.apply(UpdatePatient {
            age: Some(35),
            address: Some("Avenida 3".into()),
            ..Default::default()
        });

        assert_eq!(patient.age, 35);
        assert_eq!(patient.address, "Avenida 3");
        assert_eq!(patient.name, "María López");
        assert_eq!(patient.contact, "555-0101");
    }

    #[test]
    fn test_age_out_of_range_is_rejected() {
        let mut dto = create_dto();
        dto.age = 151;
        assert!(dto.validate().is_err());
    }
}
