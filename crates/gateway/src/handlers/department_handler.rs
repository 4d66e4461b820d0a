//! Department and external medical post handlers.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use uuid::Uuid;

use common::AppResult;
use domain::{
    CreateDepartment, CreateExternalMedicalPost, Department, ExternalMedicalPost,
    UpdateDepartment, UpdateExternalMedicalPost,
};

use crate::extractors::ValidatedJson;
use crate::middleware::{require_admin, CurrentUser};
use crate::state::AppState;

pub fn department_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_departments).post(create_department))
        .route(
            "/:id",
            get(get_department)
                .put(update_department)
                .delete(delete_department),
        )
}

pub fn external_post_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_external_posts).post(create_external_post))
        .route(
            "/:id",
            get(get_external_post)
                .put(update_external_post)
                .delete(delete_external_post),
        )
}

/// List departments
#[utoipa::path(
    get,
    path = "/departments",
    tag = "Departments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of departments", body = Vec<Department>)
    )
)]
pub async fn list_departments(State(state): State<AppState>) -> AppResult<Json<Vec<Department>>> {
    Ok(Json(state.services.departments.list().await?))
}

/// Get department by ID
#[utoipa::path(
    get,
    path = "/departments/{id}",
    tag = "Departments",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department", body = Department),
        (status = 404, description = "Department not found")
    )
)]
pub async fn get_department(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Department>> {
    Ok(Json(state.services.departments.get(id).await?))
}

/// Create a department
#[utoipa::path(
    post,
    path = "/departments",
    tag = "Departments",
    security(("bearer_auth" = [])),
    request_body = CreateDepartment,
    responses(
        (status = 201, description = "Department created", body = Department),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Referenced record not found"),
        (status = 409, description = "Department name already in use")
    )
)]
pub async fn create_department(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateDepartment>,
) -> AppResult<(StatusCode, Json<Department>)> {
    require_admin(&current_user)?;
    let created = state.services.departments.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a department
#[utoipa::path(
    put,
    path = "/departments/{id}",
    tag = "Departments",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Department ID")),
    request_body = UpdateDepartment,
    responses(
        (status = 200, description = "Department updated", body = Department),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Department not found"),
        (status = 409, description = "Department name already in use")
    )
)]
pub async fn update_department(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateDepartment>,
) -> AppResult<Json<Department>> {
    require_admin(&current_user)?;
    Ok(Json(state.services.departments.update(id, payload).await?))
}

/// Delete a department
#[utoipa::path(
    delete,
    path = "/departments/{id}",
    tag = "Departments",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Department ID")),
    responses(
        (status = 204, description = "Department deleted"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Department not found")
    )
)]
pub async fn delete_department(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_admin(&current_user)?;
    state.services.departments.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List external medical posts
#[utoipa::path(
    get,
    path = "/external-posts",
    tag = "Departments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of external medical posts", body = Vec<ExternalMedicalPost>)
    )
)]
pub async fn list_external_posts(State(state): State<AppState>) -> AppResult<Json<Vec<ExternalMedicalPost>>> {
    Ok(Json(state.services.external_posts.list().await?))
}

/// Get external medical post by ID
#[utoipa::path(
    get,
    path = "/external-posts/{id}",
    tag = "Departments",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "ExternalMedicalPost ID")),
    responses(
        (status = 200, description = "ExternalMedicalPost", body = ExternalMedicalPost),
        (status = 404, description = "ExternalMedicalPost not found")
    )
)]
pub async fn get_external_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ExternalMedicalPost>> {
    Ok(Json(state.services.external_posts.get(id).await?))
}

/// Create a external medical post
#[utoipa::path(
    post,
    path = "/external-posts",
    tag = "Departments",
    security(("bearer_auth" = [])),
    request_body = CreateExternalMedicalPost,
    responses(
        (status = 201, description = "ExternalMedicalPost created", body = ExternalMedicalPost),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Referenced record not found")
    )
)]
pub async fn create_external_post(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateExternalMedicalPost>,
) -> AppResult<(StatusCode, Json<ExternalMedicalPost>)> {
    require_admin(&current_user)?;
    let created = state.services.external_posts.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a external medical post
#[utoipa::path(
    put,
    path = "/external-posts/{id}",
    tag = "Departments",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "ExternalMedicalPost ID")),
    request_body = UpdateExternalMedicalPost,
    responses(
        (status = 200, description = "ExternalMedicalPost updated", body = ExternalMedicalPost),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "ExternalMedicalPost not found")
    )
)]
pub async fn update_external_post(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateExternalMedicalPost>,
) -> AppResult<Json<ExternalMedicalPost>> {
    require_admin(&current_user)?;
    Ok(Json(state.services.external_posts.update(id, payload).await?))
}

/// Delete a external medical post
#[utoipa::path(
    delete,
    path = "/external-posts/{id}",
    tag = "Departments",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "ExternalMedicalPost ID")),
    responses(
        (status = 204, description = "ExternalMedicalPost deleted"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "ExternalMedicalPost not found")
    )
)]
pub async fn delete_external_post(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_admin(&current_user)?;
    state.services.external_posts.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
