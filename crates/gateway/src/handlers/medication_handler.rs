//! Medication catalogue and department stock handlers.

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
    CreateMedication, CreateStockDepartment, Medication, Role, StockDepartment, UpdateMedication,
    UpdateStockDepartment,
};

use crate::extractors::ValidatedJson;
use crate::middleware::{require_any_role, CurrentUser};
use crate::state::AppState;

const CATALOGUE_WRITERS: &[Role] = &[Role::WarehouseManager];
const STOCK_WRITERS: &[Role] = &[Role::WarehouseManager, Role::DepartmentHead];

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StockFilter {
    /// Only stock held by this department
    pub department_id: Option<Uuid>,
}

pub fn medication_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_medications).post(create_medication))
        .route(
            "/:id",
            get(get_medication)
                .put(update_medication)
                .delete(delete_medication),
        )
}

pub fn stock_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stock).post(create_stock))
        .route(
            "/:id",
            get(get_stock).put(update_stock).delete(delete_stock),
        )
}

/// List medications
#[utoipa::path(
    get,
    path = "/medications",
    tag = "Medications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of medications", body = Vec<Medication>)
    )
)]
pub async fn list_medications(State(state): State<AppState>) -> AppResult<Json<Vec<Medication>>> {
    Ok(Json(state.services.medications.list().await?))
}

/// Get medication by ID
#[utoipa::path(
    get,
    path = "/medications/{id}",
    tag = "Medications",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Medication ID")),
    responses(
        (status = 200, description = "Medication", body = Medication),
        (status = 404, description = "Medication not found")
    )
)]
pub async fn get_medication(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Medication>> {
    Ok(Json(state.services.medications.get(id).await?))
}

/// Create a medication
#[utoipa::path(
    post,
    path = "/medications",
    tag = "Medications",
    security(("bearer_auth" = [])),
    request_body = CreateMedication,
    responses(
        (status = 201, description = "Medication created", body = Medication),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - WarehouseManager only"),
        (status = 404, description = "Referenced record not found")
    )
)]
pub async fn create_medication(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateMedication>,
) -> AppResult<(StatusCode, Json<Medication>)> {
    require_any_role(&current_user, CATALOGUE_WRITERS)?;
    let created = state.services.medications.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a medication
#[utoipa::path(
    put,
    path = "/medications/{id}",
    tag = "Medications",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Medication ID")),
    request_body = UpdateMedication,
    responses(
        (status = 200, description = "Medication updated", body = Medication),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - WarehouseManager only"),
        (status = 404, description = "Medication not found")
    )
)]
pub async fn update_medication(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateMedication>,
) -> AppResult<Json<Medication>> {
    require_any_role(&current_user, CATALOGUE_WRITERS)?;
    Ok(Json(state.services.medications.update(id, payload).await?))
}

/// Delete a medication
#[utoipa::path(
    delete,
    path = "/medications/{id}",
    tag = "Medications",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Medication ID")),
    responses(
        (status = 204, description = "Medication deleted"),
        (status = 403, description = "Forbidden - WarehouseManager only"),
        (status = 404, description = "Medication not found")
    )
)]
pub async fn delete_medication(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_any_role(&current_user, CATALOGUE_WRITERS)?;
    state.services.medications.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List stock rows, optionally for one department
#[utoipa::path(
    get,
    path = "/stock",
    tag = "Medications",
    security(("bearer_auth" = [])),
    params(StockFilter),
    responses(
        (status = 200, description = "List of stock rows", body = Vec<StockDepartment>),
        (status = 404, description = "Department not found")
    )
)]
pub async fn list_stock(
    State(state): State<AppState>,
    Query(filter): Query<StockFilter>,
) -> AppResult<Json<Vec<StockDepartment>>> {
    let stock = match filter.department_id {
        Some(department_id) => state.services.stock.list_by_department(department_id).await?,
        None => state.services.stock.list().await?,
    };
    Ok(Json(stock))
}

/// Get stock row by ID
#[utoipa::path(
    get,
    path = "/stock/{id}",
    tag = "Medications",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "StockDepartment ID")),
    responses(
        (status = 200, description = "StockDepartment", body = StockDepartment),
        (status = 404, description = "StockDepartment not found")
    )
)]
pub async fn get_stock(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<StockDepartment>> {
    Ok(Json(state.services.stock.get(id).await?))
}

/// Create a stock row
#[utoipa::path(
    post,
    path = "/stock",
    tag = "Medications",
    security(("bearer_auth" = [])),
    request_body = CreateStockDepartment,
    responses(
        (status = 201, description = "StockDepartment created", body = StockDepartment),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - WarehouseManager or DepartmentHead only"),
        (status = 404, description = "Referenced record not found"),
        (status = 409, description = "Department already stocks this medication")
    )
)]
pub async fn create_stock(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateStockDepartment>,
) -> AppResult<(StatusCode, Json<StockDepartment>)> {
    require_any_role(&current_user, STOCK_WRITERS)?;
    let created = state.services.stock.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a stock row
#[utoipa::path(
    put,
    path = "/stock/{id}",
    tag = "Medications",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "StockDepartment ID")),
    request_body = UpdateStockDepartment,
    responses(
        (status = 200, description = "StockDepartment updated", body = StockDepartment),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - WarehouseManager or DepartmentHead only"),
        (status = 404, description = "StockDepartment not found"),
        (status = 409, description = "Department already stocks this medication")
    )
)]
pub async fn update_stock(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateStockDepartment>,
) -> AppResult<Json<StockDepartment>> {
    require_any_role(&current_user, STOCK_WRITERS)?;
    Ok(Json(state.services.stock.update(id, payload).await?))
}

/// Delete a stock row
#[utoipa::path(
    delete,
    path = "/stock/{id}",
    tag = "Medications",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "StockDepartment ID")),
    responses(
        (status = 204, description = "StockDepartment deleted"),
        (status = 403, description = "Forbidden - WarehouseManager or DepartmentHead only"),
        (status = 404, description = "StockDepartment not found")
    )
)]
pub async fn delete_stock(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_any_role(&current_user, STOCK_WRITERS)?;
    state.services.stock.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
