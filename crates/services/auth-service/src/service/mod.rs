//! Authentication service business logic.

mod auth_service;
mod entity_linking;
mod role_validation;
mod token_service;

pub use auth_service::{AuthService, Authenticator};
pub use entity_linking::{EntityLinker, EntityLinkingService};
pub use role_validation::{
    RoleValidationService, RoleValidator, ADMIN_NOT_ALLOWED, DOCTOR_NURSE_CONFLICT,
    IDENTIFICATION_REQUIRED, NO_ROLES,
};
pub use token_service::{Claims, JwtTokenService, TokenService};
