//! User account entity and authentication DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::role::{Role, ValidationData};

/// User account entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh id
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Registration request
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RegisterUser {
    #[validate(length(
        min = 3,
        max = 50,
        message = "El nombre de usuario debe tener entre 3 y 50 caracteres"
    ))]
    #[cfg_attr(feature = "openapi", schema(example = "mperez"))]
    pub username: String,
    #[validate(email(message = "El correo electrónico no es válido"))]
    #[cfg_attr(feature = "openapi", schema(example = "mperez@example.com"))]
    pub email: String,
    /// Password (minimum 8 characters)
    #[validate(length(min = 8, message = "La contraseña debe tener al menos 8 caracteres"))]
    pub password: String,
    /// Requested role names, e.g. `["Patient"]`
    pub roles: Vec<String>,
    /// Identification of the record behind the requested roles
    #[validate(nested)]
    pub validation_data: Option<ValidationData>,
}

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LoginUser {
    #[validate(email(message = "El correo electrónico no es válido"))]
    pub email: String,
    #[validate(length(min = 1, message = "La contraseña es obligatoria"))]
    pub password: String,
}

/// Request to attach one more role to an existing account
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AssignRole {
    #[cfg_attr(feature = "openapi", schema(example = "DepartmentHead"))]
    pub role: String,
    #[validate(nested)]
    pub validation_data: Option<ValidationData>,
}

/// User information safe to return to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserInfo {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub roles: Vec<Role>,
}

impl UserInfo {
    pub fn new(user: &User, roles: Vec<Role>) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            roles,
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Token issued after registration or login
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AuthResponse {
    pub access_token: String,
    /// Always "Bearer"
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub user: UserInfo,
}
