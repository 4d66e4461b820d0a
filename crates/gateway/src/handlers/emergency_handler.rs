//! Emergency room guard and care handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use common::AppResult;
use domain::{
    CreateEmergencyRoom, CreateEmergencyRoomCare, EmergencyRoom, EmergencyRoomCare, Role,
    UpdateEmergencyRoom, UpdateEmergencyRoomCare,
};

use crate::extractors::ValidatedJson;
use crate::middleware::{require_any_role, CurrentUser};
use crate::state::AppState;

const GUARD_PLANNERS: &[Role] = &[Role::DepartmentHead];
const CARE_WRITERS: &[Role] = &[Role::Doctor];

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GuardDateFilter {
    /// Only guards scheduled on this date
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OnGuardQuery {
    pub doctor_id: Uuid,
    pub date: NaiveDate,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OnGuardResponse {
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub on_guard: bool,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CarePatientFilter {
    pub patient_id: Option<Uuid>,
}

pub fn emergency_room_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_emergency_rooms).post(create_emergency_room))
        .route("/on-guard", get(doctor_on_guard))
        .route(
            "/:id",
            get(get_emergency_room)
                .put(update_emergency_room)
                .delete(delete_emergency_room),
        )
}

pub fn emergency_care_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_emergency_cares).post(create_emergency_care))
        .route(
            "/:id",
            get(get_emergency_care)
                .put(update_emergency_care)
                .delete(delete_emergency_care),
        )
}

/// List guard slots, optionally for one date
#[utoipa::path(
    get,
    path = "/emergency-rooms",
    tag = "Emergency",
    security(("bearer_auth" = [])),
    params(GuardDateFilter),
    responses(
        (status = 200, description = "List of guard slots", body = Vec<EmergencyRoom>)
    )
)]
pub async fn list_emergency_rooms(
    State(state): State<AppState>,
    Query(filter): Query<GuardDateFilter>,
) -> AppResult<Json<Vec<EmergencyRoom>>> {
    let guards = match filter.date {
        Some(date) => state.services.emergency_rooms.list_by_date(date).await?,
        None => state.services.emergency_rooms.list().await?,
    };
    Ok(Json(guards))
}

/// Check whether a doctor is on guard on a date
#[utoipa::path(
    get,
    path = "/emergency-rooms/on-guard",
    tag = "Emergency",
    security(("bearer_auth" = [])),
    params(OnGuardQuery),
    responses(
        (status = 200, description = "Guard status", body = OnGuardResponse)
    )
)]
pub async fn doctor_on_guard(
    State(state): State<AppState>,
    Query(query): Query<OnGuardQuery>,
) -> AppResult<Json<OnGuardResponse>> {
    let on_guard = state
        .services
        .emergency_rooms
        .is_doctor_on_guard(query.doctor_id, query.date)
        .await?;
    Ok(Json(OnGuardResponse {
        doctor_id: query.doctor_id,
        date: query.date,
        on_guard,
    }))
}

/// Get guard slot by ID
#[utoipa::path(
    get,
    path = "/emergency-rooms/{id}",
    tag = "Emergency",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "EmergencyRoom ID")),
    responses(
        (status = 200, description = "EmergencyRoom", body = EmergencyRoom),
        (status = 404, description = "EmergencyRoom not found")
    )
)]
pub async fn get_emergency_room(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<EmergencyRoom>> {
    Ok(Json(state.services.emergency_rooms.get(id).await?))
}

/// Create a guard slot
#[utoipa::path(
    post,
    path = "/emergency-rooms",
    tag = "Emergency",
    security(("bearer_auth" = [])),
    request_body = CreateEmergencyRoom,
    responses(
        (status = 201, description = "EmergencyRoom created", body = EmergencyRoom),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - DepartmentHead only"),
        (status = 404, description = "Referenced record not found"),
        (status = 409, description = "Doctor already on guard that date")
    )
)]
pub async fn create_emergency_room(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateEmergencyRoom>,
) -> AppResult<(StatusCode, Json<EmergencyRoom>)> {
    require_any_role(&current_user, GUARD_PLANNERS)?;
    let created = state.services.emergency_rooms.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a guard slot
#[utoipa::path(
    put,
    path = "/emergency-rooms/{id}",
    tag = "Emergency",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "EmergencyRoom ID")),
    request_body = UpdateEmergencyRoom,
    responses(
        (status = 200, description = "EmergencyRoom updated", body = EmergencyRoom),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - DepartmentHead only"),
        (status = 404, description = "EmergencyRoom not found"),
        (status = 409, description = "Doctor already on guard that date")
    )
)]
pub async fn update_emergency_room(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateEmergencyRoom>,
) -> AppResult<Json<EmergencyRoom>> {
    require_any_role(&current_user, GUARD_PLANNERS)?;
    Ok(Json(state.services.emergency_rooms.update(id, payload).await?))
}

/// Delete a guard slot
#[utoipa::path(
    delete,
    path = "/emergency-rooms/{id}",
    tag = "Emergency",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "EmergencyRoom ID")),
    responses(
        (status = 204, description = "EmergencyRoom deleted"),
        (status = 403, description = "Forbidden - DepartmentHead only"),
        (status = 404, description = "EmergencyRoom not found")
    )
)]
pub async fn delete_emergency_room(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_any_role(&current_user, GUARD_PLANNERS)?;
    state.services.emergency_rooms.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List emergency cares, optionally by patient
#[utoipa::path(
    get,
    path = "/emergency-cares",
    tag = "Emergency",
    security(("bearer_auth" = [])),
    params(CarePatientFilter),
    responses(
        (status = 200, description = "List of emergency cares", body = Vec<EmergencyRoomCare>),
        (status = 404, description = "Patient not found")
    )
)]
pub async fn list_emergency_cares(
    State(state): State<AppState>,
    Query(filter): Query<CarePatientFilter>,
) -> AppResult<Json<Vec<EmergencyRoomCare>>> {
    let cares = match filter.patient_id {
        Some(patient_id) => {
            state
                .services
                .emergency_cares
                .list_by_patient(patient_id)
                .await?
        }
        None => state.services.emergency_cares.list().await?,
    };
    Ok(Json(cares))
}

/// Get emergency care by ID
#[utoipa::path(
    get,
    path = "/emergency-cares/{id}",
    tag = "Emergency",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "EmergencyRoomCare ID")),
    responses(
        (status = 200, description = "EmergencyRoomCare", body = EmergencyRoomCare),
        (status = 404, description = "EmergencyRoomCare not found")
    )
)]
pub async fn get_emergency_care(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<EmergencyRoomCare>> {
    Ok(Json(state.services.emergency_cares.get(id).await?))
}

/// Create a emergency care
#[utoipa::path(
    post,
    path = "/emergency-cares",
    tag = "Emergency",
    security(("bearer_auth" = [])),
    request_body = CreateEmergencyRoomCare,
    responses(
        (status = 201, description = "EmergencyRoomCare created", body = EmergencyRoomCare),
        (status = 400, description = "Doctor not on guard on the care date"),
        (status = 403, description = "Forbidden - Doctor only"),
        (status = 404, description = "Referenced record not found")
    )
)]
pub async fn create_emergency_care(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateEmergencyRoomCare>,
) -> AppResult<(StatusCode, Json<EmergencyRoomCare>)> {
    require_any_role(&current_user, CARE_WRITERS)?;
    let created = state.services.emergency_cares.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a emergency care
#[utoipa::path(
    put,
    path = "/emergency-cares/{id}",
    tag = "Emergency",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "EmergencyRoomCare ID")),
    request_body = UpdateEmergencyRoomCare,
    responses(
        (status = 200, description = "EmergencyRoomCare updated", body = EmergencyRoomCare),
        (status = 400, description = "Doctor not on guard on the care date"),
        (status = 403, description = "Forbidden - Doctor only"),
        (status = 404, description = "EmergencyRoomCare not found")
    )
)]
pub async fn update_emergency_care(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateEmergencyRoomCare>,
) -> AppResult<Json<EmergencyRoomCare>> {
    require_any_role(&current_user, CARE_WRITERS)?;
    Ok(Json(state.services.emergency_cares.update(id, payload).await?))
}

/// Delete a emergency care
#[utoipa::path(
    delete,
    path = "/emergency-cares/{id}",
    tag = "Emergency",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "EmergencyRoomCare ID")),
    responses(
        (status = 204, description = "EmergencyRoomCare deleted"),
        (status = 403, description = "Forbidden - Doctor only"),
        (status = 404, description = "EmergencyRoomCare not found")
    )
)]
pub async fn delete_emergency_care(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_any_role(&current_user, CARE_WRITERS)?;
    state.services.emergency_cares.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
