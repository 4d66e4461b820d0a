//! Staff handlers: doctors, nurses, department heads and warehouse managers.
//!
//! Reads are open to any authenticated user; writes are admin only.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use common::AppResult;
use domain::{
    CreateDepartmentHead, CreateDoctor, CreateNurse, CreateWarehouseManager, DepartmentHead,
    Doctor, Nurse, UpdateDepartmentHead, UpdateDoctor, UpdateNurse, UpdateWarehouseManager,
    WarehouseManager,
};

use crate::extractors::ValidatedJson;
use crate::middleware::{require_admin, CurrentUser};
use crate::state::AppState;

/// Optional department filter for staff listings.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DepartmentFilter {
    /// Only staff assigned to this department
    pub department_id: Option<Uuid>,
}

pub fn doctor_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_doctors).post(create_doctor))
        .route(
            "/:id",
            get(get_doctor).put(update_doctor).delete(delete_doctor),
        )
}

pub fn nurse_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_nurses).post(create_nurse))
        .route("/:id", get(get_nurse).put(update_nurse).delete(delete_nurse))
}

pub fn department_head_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_department_heads).post(create_department_head))
        .route(
            "/:id",
            get(get_department_head)
                .put(update_department_head)
                .delete(delete_department_head),
        )
}

pub fn warehouse_manager_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_warehouse_managers).post(create_warehouse_manager))
        .route(
            "/:id",
            get(get_warehouse_manager)
                .put(update_warehouse_manager)
                .delete(delete_warehouse_manager),
        )
}

/// List doctors, optionally by department
#[utoipa::path(
    get,
    path = "/doctors",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(DepartmentFilter),
    responses(
        (status = 200, description = "List of doctors", body = Vec<Doctor>),
        (status = 404, description = "Department not found")
    )
)]
pub async fn list_doctors(
    State(state): State<AppState>,
    Query(filter): Query<DepartmentFilter>,
) -> AppResult<Json<Vec<Doctor>>> {
    let doctors = match filter.department_id {
        Some(department_id) => state.services.doctors.list_by_department(department_id).await?,
        None => state.services.doctors.list().await?,
    };
    Ok(Json(doctors))
}

/// Get doctor by ID
#[utoipa::path(
    get,
    path = "/doctors/{id}",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Doctor ID")),
    responses(
        (status = 200, description = "Doctor", body = Doctor),
        (status = 404, description = "Doctor not found")
    )
)]
pub async fn get_doctor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Doctor>> {
    Ok(Json(state.services.doctors.get(id).await?))
}

/// Create a doctor (admin only)
#[utoipa::path(
    post,
    path = "/doctors",
    tag = "Staff",
    security(("bearer_auth" = [])),
    request_body = CreateDoctor,
    responses(
        (status = 201, description = "Doctor created", body = Doctor),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 409, description = "Identification number already registered")
    )
)]
pub async fn create_doctor(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateDoctor>,
) -> AppResult<(StatusCode, Json<Doctor>)> {
    require_admin(&current_user)?;
    let created = state.services.doctors.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a doctor (admin only)
#[utoipa::path(
    put,
    path = "/doctors/{id}",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Doctor ID")),
    request_body = UpdateDoctor,
    responses(
        (status = 200, description = "Doctor updated", body = Doctor),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Doctor not found")
    )
)]
pub async fn update_doctor(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateDoctor>,
) -> AppResult<Json<Doctor>> {
    require_admin(&current_user)?;
    Ok(Json(state.services.doctors.update(id, payload).await?))
}

/// Delete a doctor (admin only)
#[utoipa::path(
    delete,
    path = "/doctors/{id}",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Doctor ID")),
    responses(
        (status = 204, description = "Doctor deleted"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Doctor not found")
    )
)]
pub async fn delete_doctor(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_admin(&current_user)?;
    state.services.doctors.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List nurses, optionally by department
#[utoipa::path(
    get,
    path = "/nurses",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(DepartmentFilter),
    responses(
        (status = 200, description = "List of nurses", body = Vec<Nurse>),
        (status = 404, description = "Department not found")
    )
)]
pub async fn list_nurses(
    State(state): State<AppState>,
    Query(filter): Query<DepartmentFilter>,
) -> AppResult<Json<Vec<Nurse>>> {
    let nurses = match filter.department_id {
        Some(department_id) => state.services.nurses.list_by_department(department_id).await?,
        None => state.services.nurses.list().await?,
    };
    Ok(Json(nurses))
}

/// Get nurse by ID
#[utoipa::path(
    get,
    path = "/nurses/{id}",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Nurse ID")),
    responses(
        (status = 200, description = "Nurse", body = Nurse),
        (status = 404, description = "Nurse not found")
    )
)]
pub async fn get_nurse(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Nurse>> {
    Ok(Json(state.services.nurses.get(id).await?))
}

/// Create a nurse (admin only)
#[utoipa::path(
    post,
    path = "/nurses",
    tag = "Staff",
    security(("bearer_auth" = [])),
    request_body = CreateNurse,
    responses(
        (status = 201, description = "Nurse created", body = Nurse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 409, description = "Identification number already registered")
    )
)]
pub async fn create_nurse(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateNurse>,
) -> AppResult<(StatusCode, Json<Nurse>)> {
    require_admin(&current_user)?;
    let created = state.services.nurses.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a nurse (admin only)
#[utoipa::path(
    put,
    path = "/nurses/{id}",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Nurse ID")),
    request_body = UpdateNurse,
    responses(
        (status = 200, description = "Nurse updated", body = Nurse),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Nurse not found")
    )
)]
pub async fn update_nurse(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateNurse>,
) -> AppResult<Json<Nurse>> {
    require_admin(&current_user)?;
    Ok(Json(state.services.nurses.update(id, payload).await?))
}

/// Delete a nurse (admin only)
#[utoipa::path(
    delete,
    path = "/nurses/{id}",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Nurse ID")),
    responses(
        (status = 204, description = "Nurse deleted"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Nurse not found")
    )
)]
pub async fn delete_nurse(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_admin(&current_user)?;
    state.services.nurses.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List department heads, optionally by department
#[utoipa::path(
    get,
    path = "/department-heads",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(DepartmentFilter),
    responses(
        (status = 200, description = "List of department heads", body = Vec<DepartmentHead>),
        (status = 404, description = "Department not found")
    )
)]
pub async fn list_department_heads(
    State(state): State<AppState>,
    Query(filter): Query<DepartmentFilter>,
) -> AppResult<Json<Vec<DepartmentHead>>> {
    let department_heads = match filter.department_id {
        Some(department_id) => {
            state
                .services
                .department_heads
                .list_by_department(department_id)
                .await?
        }
        None => state.services.department_heads.list().await?,
    };
    Ok(Json(department_heads))
}

/// Get department head by ID
#[utoipa::path(
    get,
    path = "/department-heads/{id}",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "DepartmentHead ID")),
    responses(
        (status = 200, description = "DepartmentHead", body = DepartmentHead),
        (status = 404, description = "DepartmentHead not found")
    )
)]
pub async fn get_department_head(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DepartmentHead>> {
    Ok(Json(state.services.department_heads.get(id).await?))
}

/// Create a department head (admin only)
#[utoipa::path(
    post,
    path = "/department-heads",
    tag = "Staff",
    security(("bearer_auth" = [])),
    request_body = CreateDepartmentHead,
    responses(
        (status = 201, description = "DepartmentHead created", body = DepartmentHead),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 409, description = "Identification number already registered")
    )
)]
pub async fn create_department_head(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateDepartmentHead>,
) -> AppResult<(StatusCode, Json<DepartmentHead>)> {
    require_admin(&current_user)?;
    let created = state.services.department_heads.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a department head (admin only)
#[utoipa::path(
    put,
    path = "/department-heads/{id}",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "DepartmentHead ID")),
    request_body = UpdateDepartmentHead,
    responses(
        (status = 200, description = "DepartmentHead updated", body = DepartmentHead),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "DepartmentHead not found")
    )
)]
pub async fn update_department_head(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateDepartmentHead>,
) -> AppResult<Json<DepartmentHead>> {
    require_admin(&current_user)?;
    Ok(Json(state.services.department_heads.update(id, payload).await?))
}

/// Delete a department head (admin only)
#[utoipa::path(
    delete,
    path = "/department-heads/{id}",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "DepartmentHead ID")),
    responses(
        (status = 204, description = "DepartmentHead deleted"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "DepartmentHead not found")
    )
)]
pub async fn delete_department_head(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_admin(&current_user)?;
    state.services.department_heads.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List warehouse managers
#[utoipa::path(
    get,
    path = "/warehouse-managers",
    tag = "Staff",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of warehouse managers", body = Vec<WarehouseManager>)
    )
)]
pub async fn list_warehouse_managers(State(state): State<AppState>) -> AppResult<Json<Vec<WarehouseManager>>> {
    Ok(Json(state.services.warehouse_managers.list().await?))
}

/// Get warehouse manager by ID
#[utoipa::path(
    get,
    path = "/warehouse-managers/{id}",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "WarehouseManager ID")),
    responses(
        (status = 200, description = "WarehouseManager", body = WarehouseManager),
        (status = 404, description = "WarehouseManager not found")
    )
)]
pub async fn get_warehouse_manager(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<WarehouseManager>> {
    Ok(Json(state.services.warehouse_managers.get(id).await?))
}

/// Create a warehouse manager (admin only)
#[utoipa::path(
    post,
    path = "/warehouse-managers",
    tag = "Staff",
    security(("bearer_auth" = [])),
    request_body = CreateWarehouseManager,
    responses(
        (status = 201, description = "WarehouseManager created", body = WarehouseManager),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 409, description = "Identification number already registered")
    )
)]
pub async fn create_warehouse_manager(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateWarehouseManager>,
) -> AppResult<(StatusCode, Json<WarehouseManager>)> {
    require_admin(&current_user)?;
    let created = state.services.warehouse_managers.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a warehouse manager (admin only)
#[utoipa::path(
    put,
    path = "/warehouse-managers/{id}",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "WarehouseManager ID")),
    request_body = UpdateWarehouseManager,
    responses(
        (status = 200, description = "WarehouseManager updated", body = WarehouseManager),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "WarehouseManager not found")
    )
)]
pub async fn update_warehouse_manager(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateWarehouseManager>,
) -> AppResult<Json<WarehouseManager>> {
    require_admin(&current_user)?;
    Ok(Json(state.services.warehouse_managers.update(id, payload).await?))
}

/// Delete a warehouse manager (admin only)
#[utoipa::path(
    delete,
    path = "/warehouse-managers/{id}",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "WarehouseManager ID")),
    responses(
        (status = 204, description = "WarehouseManager deleted"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "WarehouseManager not found")
    )
)]
pub async fn delete_warehouse_manager(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_admin(&current_user)?;
    state.services.warehouse_managers.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
