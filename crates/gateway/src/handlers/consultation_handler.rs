//! Derivation, referral and consultation handlers.
//!
//! Consultations check that the attending doctor and department head belong
//! to the destination department; those rules live in the services.

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
    ConsultationDerivation, ConsultationReferral, CreateConsultationDerivation,
    CreateConsultationReferral, CreateDerivation, CreateReferral, Derivation, Referral, Role,
    UpdateConsultation, UpdateDerivation, UpdateReferral,
};

use crate::extractors::ValidatedJson;
use crate::middleware::{require_any_role, CurrentUser};
use crate::state::AppState;

const CLINICAL_WRITERS: &[Role] = &[Role::Doctor, Role::DepartmentHead];

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PatientFilter {
    pub patient_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DerivationFilter {
    pub derivation_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReferralFilter {
    pub referral_id: Option<Uuid>,
}

pub fn derivation_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_derivations).post(create_derivation))
        .route(
            "/:id",
            get(get_derivation)
                .put(update_derivation)
                .delete(delete_derivation),
        )
}

pub fn referral_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_referrals).post(create_referral))
        .route(
            "/:id",
            get(get_referral).put(update_referral).delete(delete_referral),
        )
}

pub fn consultation_derivation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_consultation_derivations).post(create_consultation_derivation),
        )
        .route(
            "/:id",
            get(get_consultation_derivation)
                .put(update_consultation_derivation)
                .delete(delete_consultation_derivation),
        )
}

pub fn consultation_referral_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_consultation_referrals).post(create_consultation_referral),
        )
        .route(
            "/:id",
            get(get_consultation_referral)
                .put(update_consultation_referral)
                .delete(delete_consultation_referral),
        )
}

/// List derivations, optionally by patient
#[utoipa::path(
    get,
    path = "/derivations",
    tag = "Consultations",
    security(("bearer_auth" = [])),
    params(PatientFilter),
    responses(
        (status = 200, description = "List of derivations", body = Vec<Derivation>),
        (status = 404, description = "Patient not found")
    )
)]
pub async fn list_derivations(
    State(state): State<AppState>,
    Query(filter): Query<PatientFilter>,
) -> AppResult<Json<Vec<Derivation>>> {
    let derivations = match filter.patient_id {
        Some(id) => state.services.derivations.list_by_patient(id).await?,
        None => state.services.derivations.list().await?,
    };
    Ok(Json(derivations))
}

/// Get derivation by ID
#[utoipa::path(
    get,
    path = "/derivations/{id}",
    tag = "Consultations",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Derivation ID")),
    responses(
        (status = 200, description = "Derivation", body = Derivation),
        (status = 404, description = "Derivation not found")
    )
)]
pub async fn get_derivation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Derivation>> {
    Ok(Json(state.services.derivations.get(id).await?))
}

/// Create a derivation
#[utoipa::path(
    post,
    path = "/derivations",
    tag = "Consultations",
    security(("bearer_auth" = [])),
    request_body = CreateDerivation,
    responses(
        (status = 201, description = "Derivation created", body = Derivation),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Doctor or DepartmentHead only"),
        (status = 404, description = "Referenced record not found")
    )
)]
pub async fn create_derivation(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateDerivation>,
) -> AppResult<(StatusCode, Json<Derivation>)> {
    require_any_role(&current_user, CLINICAL_WRITERS)?;
    let created = state.services.derivations.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a derivation
#[utoipa::path(
    put,
    path = "/derivations/{id}",
    tag = "Consultations",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Derivation ID")),
    request_body = UpdateDerivation,
    responses(
        (status = 200, description = "Derivation updated", body = Derivation),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Doctor or DepartmentHead only"),
        (status = 404, description = "Derivation not found")
    )
)]
pub async fn update_derivation(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateDerivation>,
) -> AppResult<Json<Derivation>> {
    require_any_role(&current_user, CLINICAL_WRITERS)?;
    Ok(Json(state.services.derivations.update(id, payload).await?))
}

/// Delete a derivation
#[utoipa::path(
    delete,
    path = "/derivations/{id}",
    tag = "Consultations",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Derivation ID")),
    responses(
        (status = 204, description = "Derivation deleted"),
        (status = 403, description = "Forbidden - Doctor or DepartmentHead only"),
        (status = 404, description = "Derivation not found")
    )
)]
pub async fn delete_derivation(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_any_role(&current_user, CLINICAL_WRITERS)?;
    state.services.derivations.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List referrals, optionally by patient
#[utoipa::path(
    get,
    path = "/referrals",
    tag = "Consultations",
    security(("bearer_auth" = [])),
    params(PatientFilter),
    responses(
        (status = 200, description = "List of referrals", body = Vec<Referral>),
        (status = 404, description = "Patient not found")
    )
)]
pub async fn list_referrals(
    State(state): State<AppState>,
    Query(filter): Query<PatientFilter>,
) -> AppResult<Json<Vec<Referral>>> {
    let referrals = match filter.patient_id {
        Some(id) => state.services.referrals.list_by_patient(id).await?,
        None => state.services.referrals.list().await?,
    };
    Ok(Json(referrals))
}

/// Get referral by ID
#[utoipa::path(
    get,
    path = "/referrals/{id}",
    tag = "Consultations",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Referral ID")),
    responses(
        (status = 200, description = "Referral", body = Referral),
        (status = 404, description = "Referral not found")
    )
)]
pub async fn get_referral(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Referral>> {
    Ok(Json(state.services.referrals.get(id).await?))
}

/// Create a referral
#[utoipa::path(
    post,
    path = "/referrals",
    tag = "Consultations",
    security(("bearer_auth" = [])),
    request_body = CreateReferral,
    responses(
        (status = 201, description = "Referral created", body = Referral),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Doctor or DepartmentHead only"),
        (status = 404, description = "Referenced record not found")
    )
)]
pub async fn create_referral(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateReferral>,
) -> AppResult<(StatusCode, Json<Referral>)> {
    require_any_role(&current_user, CLINICAL_WRITERS)?;
    let created = state.services.referrals.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a referral
#[utoipa::path(
    put,
    path = "/referrals/{id}",
    tag = "Consultations",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Referral ID")),
    request_body = UpdateReferral,
    responses(
        (status = 200, description = "Referral updated", body = Referral),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Doctor or DepartmentHead only"),
        (status = 404, description = "Referral not found")
    )
)]
pub async fn update_referral(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateReferral>,
) -> AppResult<Json<Referral>> {
    require_any_role(&current_user, CLINICAL_WRITERS)?;
    Ok(Json(state.services.referrals.update(id, payload).await?))
}

/// Delete a referral
#[utoipa::path(
    delete,
    path = "/referrals/{id}",
    tag = "Consultations",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Referral ID")),
    responses(
        (status = 204, description = "Referral deleted"),
        (status = 403, description = "Forbidden - Doctor or DepartmentHead only"),
        (status = 404, description = "Referral not found")
    )
)]
pub async fn delete_referral(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_any_role(&current_user, CLINICAL_WRITERS)?;
    state.services.referrals.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List consultation derivations, optionally by derivation
#[utoipa::path(
    get,
    path = "/consultation-derivations",
    tag = "Consultations",
    security(("bearer_auth" = [])),
    params(DerivationFilter),
    responses(
        (status = 200, description = "List of consultation derivations", body = Vec<ConsultationDerivation>),
        (status = 404, description = "Derivation not found")
    )
)]
pub async fn list_consultation_derivations(
    State(state): State<AppState>,
    Query(filter): Query<DerivationFilter>,
) -> AppResult<Json<Vec<ConsultationDerivation>>> {
    let consultation_derivations = match filter.derivation_id {
        Some(id) => state.services.consultation_derivations.list_by_derivation(id).await?,
        None => state.services.consultation_derivations.list().await?,
    };
    Ok(Json(consultation_derivations))
}

/// Get consultation derivation by ID
#[utoipa::path(
    get,
    path = "/consultation-derivations/{id}",
    tag = "Consultations",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "ConsultationDerivation ID")),
    responses(
        (status = 200, description = "ConsultationDerivation", body = ConsultationDerivation),
        (status = 404, description = "ConsultationDerivation not found")
    )
)]
pub async fn get_consultation_derivation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ConsultationDerivation>> {
    Ok(Json(state.services.consultation_derivations.get(id).await?))
}

/// Create a consultation derivation
#[utoipa::path(
    post,
    path = "/consultation-derivations",
    tag = "Consultations",
    security(("bearer_auth" = [])),
    request_body = CreateConsultationDerivation,
    responses(
        (status = 201, description = "ConsultationDerivation created", body = ConsultationDerivation),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Doctor or DepartmentHead only"),
        (status = 404, description = "Referenced record not found")
    )
)]
pub async fn create_consultation_derivation(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateConsultationDerivation>,
) -> AppResult<(StatusCode, Json<ConsultationDerivation>)> {
    require_any_role(&current_user, CLINICAL_WRITERS)?;
    let created = state.services.consultation_derivations.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a consultation derivation
#[utoipa::path(
    put,
    path = "/consultation-derivations/{id}",
    tag = "Consultations",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "ConsultationDerivation ID")),
    request_body = UpdateConsultation,
    responses(
        (status = 200, description = "ConsultationDerivation updated", body = ConsultationDerivation),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Doctor or DepartmentHead only"),
        (status = 404, description = "ConsultationDerivation not found")
    )
)]
pub async fn update_consultation_derivation(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateConsultation>,
) -> AppResult<Json<ConsultationDerivation>> {
    require_any_role(&current_user, CLINICAL_WRITERS)?;
    Ok(Json(state.services.consultation_derivations.update(id, payload).await?))
}

/// Delete a consultation derivation
#[utoipa::path(
    delete,
    path = "/consultation-derivations/{id}",
    tag = "Consultations",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "ConsultationDerivation ID")),
    responses(
        (status = 204, description = "ConsultationDerivation deleted"),
        (status = 403, description = "Forbidden - Doctor or DepartmentHead only"),
        (status = 404, description = "ConsultationDerivation not found")
    )
)]
pub async fn delete_consultation_derivation(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_any_role(&current_user, CLINICAL_WRITERS)?;
    state.services.consultation_derivations.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List consultation referrals, optionally by referral
#[utoipa::path(
    get,
    path = "/consultation-referrals",
    tag = "Consultations",
    security(("bearer_auth" = [])),
    params(ReferralFilter),
    responses(
        (status = 200, description = "List of consultation referrals", body = Vec<ConsultationReferral>),
        (status = 404, description = "Referral not found")
    )
)]
pub async fn list_consultation_referrals(
    State(state): State<AppState>,
    Query(filter): Query<ReferralFilter>,
) -> AppResult<Json<Vec<ConsultationReferral>>> {
    let consultation_referrals = match filter.referral_id {
        Some(id) => state.services.consultation_referrals.list_by_referral(id).await?,
        None => state.services.consultation_referrals.list().await?,
    };
    Ok(Json(consultation_referrals))
}

/// Get consultation referral by ID
#[utoipa::path(
    get,
    path = "/consultation-referrals/{id}",
    tag = "Consultations",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "ConsultationReferral ID")),
    responses(
        (status = 200, description = "ConsultationReferral", body = ConsultationReferral),
        (status = 404, description = "ConsultationReferral not found")
    )
)]
pub async fn get_consultation_referral(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ConsultationReferral>> {
    Ok(Json(state.services.consultation_referrals.get(id).await?))
}

/// Create a consultation referral
#[utoipa::path(
    post,
    path = "/consultation-referrals",
    tag = "Consultations",
    security(("bearer_auth" = [])),
    request_body = CreateConsultationReferral,
    responses(
        (status = 201, description = "ConsultationReferral created", body = ConsultationReferral),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Doctor or DepartmentHead only"),
        (status = 404, description = "Referenced record not found")
    )
)]
pub async fn create_consultation_referral(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateConsultationReferral>,
) -> AppResult<(StatusCode, Json<ConsultationReferral>)> {
    require_any_role(&current_user, CLINICAL_WRITERS)?;
    let created = state.services.consultation_referrals.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a consultation referral
#[utoipa::path(
    put,
    path = "/consultation-referrals/{id}",
    tag = "Consultations",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "ConsultationReferral ID")),
    request_body = UpdateConsultation,
    responses(
        (status = 200, description = "ConsultationReferral updated", body = ConsultationReferral),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Doctor or DepartmentHead only"),
        (status = 404, description = "ConsultationReferral not found")
    )
)]
pub async fn update_consultation_referral(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateConsultation>,
) -> AppResult<Json<ConsultationReferral>> {
    require_any_role(&current_user, CLINICAL_WRITERS)?;
    Ok(Json(state.services.consultation_referrals.update(id, payload).await?))
}

/// Delete a consultation referral
#[utoipa::path(
    delete,
    path = "/consultation-referrals/{id}",
    tag = "Consultations",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "ConsultationReferral ID")),
    responses(
        (status = 204, description = "ConsultationReferral deleted"),
        (status = 403, description = "Forbidden - Doctor or DepartmentHead only"),
        (status = 404, description = "ConsultationReferral not found")
    )
)]
pub async fn delete_consultation_referral(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_any_role(&current_user, CLINICAL_WRITERS)?;
    state.services.consultation_referrals.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
