//! Medication usage handlers for consultations and emergency cares.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use uuid::Uuid;

use common::AppResult;
use domain::{CreateMedicationUsage, MedicationUsage, Role, UsageKind};

use crate::extractors::ValidatedJson;
use crate::middleware::{require_any_role, CurrentUser};
use crate::state::AppState;

const USAGE_WRITERS: &[Role] = &[Role::Doctor, Role::Nurse];

pub fn medication_usage_routes() -> Router<AppState> {
    Router::new()
        .route("/:kind", post(record_usage))
        .route("/:kind/records/:record_id", get(list_usages))
        .route("/:kind/:id", delete(delete_usage))
}

/// Record a medication usage against a consultation or care
#[utoipa::path(
    post,
    path = "/medication-usages/{kind}",
    tag = "Medications",
    security(("bearer_auth" = [])),
    params(("kind" = UsageKind, Path, description = "derivation, referral or emergency")),
    request_body = CreateMedicationUsage,
    responses(
        (status = 201, description = "Usage recorded", body = MedicationUsage),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Doctor or Nurse only"),
        (status = 404, description = "Record or medication not found")
    )
)]
pub async fn record_usage(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(kind): Path<UsageKind>,
    ValidatedJson(payload): ValidatedJson<CreateMedicationUsage>,
) -> AppResult<(StatusCode, Json<MedicationUsage>)> {
    require_any_role(&current_user, USAGE_WRITERS)?;
    let usage = state
        .services
        .medication_usages
        .record_usage(kind, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(usage)))
}

/// List the medications used by one consultation or care
#[utoipa::path(
    get,
    path = "/medication-usages/{kind}/records/{record_id}",
    tag = "Medications",
    security(("bearer_auth" = [])),
    params(
        ("kind" = UsageKind, Path, description = "derivation, referral or emergency"),
        ("record_id" = Uuid, Path, description = "Consultation or care ID")
    ),
    responses(
        (status = 200, description = "Usages of the record", body = Vec<MedicationUsage>),
        (status = 404, description = "Record not found")
    )
)]
pub async fn list_usages(
    State(state): State<AppState>,
    Path((kind, record_id)): Path<(UsageKind, Uuid)>,
) -> AppResult<Json<Vec<MedicationUsage>>> {
    let usages = state
        .services
        .medication_usages
        .list_by_record(kind, record_id)
        .await?;
    Ok(Json(usages))
}

/// Delete a medication usage
#[utoipa::path(
    delete,
    path = "/medication-usages/{kind}/{id}",
    tag = "Medications",
    security(("bearer_auth" = [])),
    params(
        ("kind" = UsageKind, Path, description = "derivation, referral or emergency"),
        ("id" = Uuid, Path, description = "Usage ID")
    ),
    responses(
        (status = 204, description = "Usage deleted"),
        (status = 403, description = "Forbidden - Doctor or Nurse only"),
        (status = 404, description = "Usage not found")
    )
)]
pub async fn delete_usage(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path((kind, id)): Path<(UsageKind, Uuid)>,
) -> AppResult<StatusCode> {
    require_any_role(&current_user, USAGE_WRITERS)?;
    state.services.medication_usages.delete(kind, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
