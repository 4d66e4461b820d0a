//! Auth Service Library
//!
//! Account registration and login for the polyclinic. Accounts are bound to
//! the patient or staff records behind their roles; the clinical data lives
//! in `clinic-service` and is reached through its unit of work.

pub mod service;

use std::sync::Arc;

use clinic_service_lib::infra::UnitOfWork;
use common::JwtConfig;

pub use service::{AuthService, Authenticator, Claims, JwtTokenService, TokenService};

/// Wire the authenticator with JWT tokens signed per `jwt`.
pub fn authenticator(uow: Arc<dyn UnitOfWork>, jwt: &JwtConfig) -> Arc<dyn AuthService> {
    let tokens = Arc::new(JwtTokenService::new(jwt));
    Arc::new(Authenticator::new(uow, tokens))
}
