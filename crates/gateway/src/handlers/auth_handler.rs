//! Authentication handlers.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use uuid::Uuid;

use common::AppResult;
use domain::{AssignRole, AuthResponse, LoginUser, RegisterUser, UserInfo};

use crate::extractors::ValidatedJson;
use crate::middleware::{require_admin, CurrentUser};
use crate::state::AppState;

/// Routes reachable without a token.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Routes behind the auth middleware.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route("/users/:id/roles", post(assign_role))
}

/// Register an account linked to existing clinical records
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid roles or missing records"),
        (status = 409, description = "Record already linked or account taken")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterUser>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let response = state.services.auth.register(payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginUser,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginUser>,
) -> AppResult<Json<AuthResponse>> {
    let response = state.services.auth.login(payload).await?;
    Ok(Json(response))
}

/// Get current authenticated user
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user profile", body = UserInfo),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn me(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<UserInfo>> {
    let user = state.services.auth.current_user(current_user.id).await?;
    Ok(Json(user))
}

/// Grant one more role to an account (admin only)
#[utoipa::path(
    post,
    path = "/auth/users/{id}/roles",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = AssignRole,
    responses(
        (status = 200, description = "Role granted", body = UserInfo),
        (status = 400, description = "Invalid role or combination"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Role already held or record already linked")
    )
)]
pub async fn assign_role(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<AssignRole>,
) -> AppResult<Json<UserInfo>> {
    require_admin(&current_user)?;
    let user = state.services.auth.assign_role(id, payload).await?;
    Ok(Json(user))
}
