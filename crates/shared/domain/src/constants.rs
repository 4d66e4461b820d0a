//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

use once_cell::sync::Lazy;
use regex::Regex;

// =============================================================================
// Roles
// =============================================================================

pub const ROLE_ADMIN: &str = "Admin";
pub const ROLE_DOCTOR: &str = "Doctor";
pub const ROLE_NURSE: &str = "Nurse";
pub const ROLE_PATIENT: &str = "Patient";
pub const ROLE_WAREHOUSE_MANAGER: &str = "WarehouseManager";
pub const ROLE_DEPARTMENT_HEAD: &str = "DepartmentHead";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Identification numbers: letters, digits and dashes.
pub static IDENTIFICATION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9-]{1,20}$").expect("identification pattern compiles"));

// =============================================================================
// Authentication
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";
