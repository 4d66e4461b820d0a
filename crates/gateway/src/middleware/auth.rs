//! Authentication middleware.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use uuid::Uuid;

use auth_service_lib::Claims;
use common::{AppError, AppResult};
use domain::Role;

use crate::state::AppState;

/// Current authenticated user extracted from JWT.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
    pub roles: Vec<Role>,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Admin)
    }

    pub fn has_any(&self, roles: &[Role]) -> bool {
        self.roles.iter().any(|held| roles.contains(held))
    }
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            username: claims.username,
            roles: claims.roles,
        }
    }
}

/// Check if user has admin privileges.
pub fn require_admin(user: &CurrentUser) -> AppResult<()> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Admins pass; anyone else needs one of `roles`.
pub fn require_any_role(user: &CurrentUser, roles: &[Role]) -> AppResult<()> {
    if user.is_admin() || user.has_any(roles) {
        Ok(())
    } else {
        tracing::debug!(user_id = %user.id, required = ?roles, "Role check failed");
        Err(AppError::Forbidden)
    }
}

/// Authentication middleware that validates JWT tokens.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let bearer = extract_token(&request)?;

    let claims = state
        .services
        .auth
        .verify_token(bearer.token())
        .map_err(|_| AppError::Unauthorized)?;

    request.extensions_mut().insert(CurrentUser::from(claims));

    Ok(next.run(request).await)
}

/// Extract bearer token from Authorization header.
fn extract_token(request: &Request<Body>) -> AppResult<Authorization<Bearer>> {
    request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or(AppError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::AUTHORIZATION;

    fn user(roles: Vec<Role>) -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            username: "tester".to_string(),
            roles,
        }
    }

    #[test]
    fn test_admin_passes_every_role_check() {
        let admin = user(vec![Role::Admin]);
        assert!(require_any_role(&admin, &[Role::WarehouseManager]).is_ok());
        assert!(require_admin(&admin).is_ok());
    }

    #[test]
    fn test_role_check() {
        let nurse = user(vec![Role::Nurse]);
        assert!(require_any_role(&nurse, &[Role::Doctor, Role::Nurse]).is_ok());
        assert!(matches!(
            require_any_role(&nurse, &[Role::DepartmentHead]),
            Err(AppError::Forbidden)
        ));
        assert!(require_admin(&nurse).is_err());
    }

    #[test]
    fn test_extract_token() {
        let request = Request::builder()
            .header(AUTHORIZATION, "Bearer abc.def")
            .body(Body::empty())
            .unwrap();
        assert_eq!(extract_token(&request).unwrap().token(), "abc.def");

        let request = Request::builder()
            .header(AUTHORIZATION, "Basic abc")
            .body(Body::empty())
            .unwrap();
        assert!(extract_token(&request).is_err());
    }
}
