//! Warehouse request handlers.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, put},
    Router,
};
use uuid::Uuid;

use common::AppResult;
use domain::{
    ChangeRequestStatus, CreateMedicationRequest, CreateWarehouseRequest, MedicationRequest,
    Role, UpdateWarehouseRequest, WarehouseRequest,
};

use crate::extractors::ValidatedJson;
use crate::middleware::{require_any_role, CurrentUser};
use crate::state::AppState;

const REQUEST_WRITERS: &[Role] = &[Role::DepartmentHead, Role::WarehouseManager];
const STATUS_WRITERS: &[Role] = &[Role::WarehouseManager];

pub fn warehouse_request_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_warehouse_requests).post(create_warehouse_request))
        .route(
            "/:id",
            get(get_warehouse_request)
                .put(update_warehouse_request)
                .delete(delete_warehouse_request),
        )
        .route("/:id/status", put(change_request_status))
        .route(
            "/:id/medications",
            get(list_request_lines).post(add_request_line),
        )
        .route("/lines/:line_id", delete(remove_request_line))
}

/// List warehouse requests
#[utoipa::path(
    get,
    path = "/warehouse-requests",
    tag = "Warehouse",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of warehouse requests", body = Vec<WarehouseRequest>)
    )
)]
pub async fn list_warehouse_requests(State(state): State<AppState>) -> AppResult<Json<Vec<WarehouseRequest>>> {
    Ok(Json(state.services.warehouse_requests.list().await?))
}

/// Get warehouse request by ID
#[utoipa::path(
    get,
    path = "/warehouse-requests/{id}",
    tag = "Warehouse",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "WarehouseRequest ID")),
    responses(
        (status = 200, description = "WarehouseRequest", body = WarehouseRequest),
        (status = 404, description = "WarehouseRequest not found")
    )
)]
pub async fn get_warehouse_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<WarehouseRequest>> {
    Ok(Json(state.services.warehouse_requests.get(id).await?))
}

/// Create a warehouse request
#[utoipa::path(
    post,
    path = "/warehouse-requests",
    tag = "Warehouse",
    security(("bearer_auth" = [])),
    request_body = CreateWarehouseRequest,
    responses(
        (status = 201, description = "WarehouseRequest created", body = WarehouseRequest),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - DepartmentHead or WarehouseManager only"),
        (status = 404, description = "Referenced record not found")
    )
)]
pub async fn create_warehouse_request(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateWarehouseRequest>,
) -> AppResult<(StatusCode, Json<WarehouseRequest>)> {
    require_any_role(&current_user, REQUEST_WRITERS)?;
    let created = state.services.warehouse_requests.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a warehouse request
#[utoipa::path(
    put,
    path = "/warehouse-requests/{id}",
    tag = "Warehouse",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "WarehouseRequest ID")),
    request_body = UpdateWarehouseRequest,
    responses(
        (status = 200, description = "WarehouseRequest updated", body = WarehouseRequest),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - DepartmentHead or WarehouseManager only"),
        (status = 404, description = "WarehouseRequest not found")
    )
)]
pub async fn update_warehouse_request(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateWarehouseRequest>,
) -> AppResult<Json<WarehouseRequest>> {
    require_any_role(&current_user, REQUEST_WRITERS)?;
    Ok(Json(state.services.warehouse_requests.update(id, payload).await?))
}

/// Delete a warehouse request
#[utoipa::path(
    delete,
    path = "/warehouse-requests/{id}",
    tag = "Warehouse",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "WarehouseRequest ID")),
    responses(
        (status = 204, description = "WarehouseRequest deleted"),
        (status = 403, description = "Forbidden - DepartmentHead or WarehouseManager only"),
        (status = 404, description = "WarehouseRequest not found")
    )
)]
pub async fn delete_warehouse_request(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_any_role(&current_user, REQUEST_WRITERS)?;
    state.services.warehouse_requests.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Change the status of a request
#[utoipa::path(
    put,
    path = "/warehouse-requests/{id}/status",
    tag = "Warehouse",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "WarehouseRequest ID")),
    request_body = ChangeRequestStatus,
    responses(
        (status = 200, description = "Status changed", body = WarehouseRequest),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - WarehouseManager only"),
        (status = 404, description = "WarehouseRequest not found")
    )
)]
pub async fn change_request_status(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<ChangeRequestStatus>,
) -> AppResult<Json<WarehouseRequest>> {
    require_any_role(&current_user, STATUS_WRITERS)?;
    let request = state
        .services
        .warehouse_requests
        .change_status(id, payload)
        .await?;
    Ok(Json(request))
}

/// List the medication lines of a request
#[utoipa::path(
    get,
    path = "/warehouse-requests/{id}/medications",
    tag = "Warehouse",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "WarehouseRequest ID")),
    responses(
        (status = 200, description = "Request lines", body = Vec<MedicationRequest>),
        (status = 404, description = "WarehouseRequest not found")
    )
)]
pub async fn list_request_lines(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<MedicationRequest>>> {
    Ok(Json(state.services.warehouse_requests.list_lines(id).await?))
}

/// Add a medication line to a request
#[utoipa::path(
    post,
    path = "/warehouse-requests/{id}/medications",
    tag = "Warehouse",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "WarehouseRequest ID")),
    request_body = CreateMedicationRequest,
    responses(
        (status = 201, description = "Line added", body = MedicationRequest),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - DepartmentHead or WarehouseManager only"),
        (status = 404, description = "Request or medication not found")
    )
)]
pub async fn add_request_line(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<CreateMedicationRequest>,
) -> AppResult<(StatusCode, Json<MedicationRequest>)> {
    require_any_role(&current_user, REQUEST_WRITERS)?;
    let line = state
        .services
        .warehouse_requests
        .add_medication(id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(line)))
}

/// Remove a medication line
#[utoipa::path(
    delete,
    path = "/warehouse-requests/lines/{line_id}",
    tag = "Warehouse",
    security(("bearer_auth" = [])),
    params(("line_id" = Uuid, Path, description = "MedicationRequest ID")),
    responses(
        (status = 204, description = "Line removed"),
        (status = 403, description = "Forbidden - DepartmentHead or WarehouseManager only"),
        (status = 404, description = "Line not found")
    )
)]
pub async fn remove_request_line(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(line_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_any_role(&current_user, REQUEST_WRITERS)?;
    state.services.warehouse_requests.remove_line(line_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
