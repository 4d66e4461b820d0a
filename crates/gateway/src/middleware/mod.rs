//! Middleware for authentication and role checks.

mod auth;

pub use auth::{auth_middleware, require_admin, require_any_role, CurrentUser};
