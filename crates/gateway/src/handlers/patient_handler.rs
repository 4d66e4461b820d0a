//! Patient handlers.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use uuid::Uuid;

use common::AppResult;
use domain::{CreatePatient, Patient, Role, UpdatePatient};

use crate::extractors::ValidatedJson;
use crate::middleware::{require_any_role, CurrentUser};
use crate::state::AppState;

const PATIENT_WRITERS: &[Role] = &[Role::Doctor, Role::Nurse];

pub fn patient_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_patients).post(create_patient))
        .route(
            "/:id",
            get(get_patient).put(update_patient).delete(delete_patient),
        )
}

/// List all patients
#[utoipa::path(
    get,
    path = "/patients",
    tag = "Patients",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of patients", body = Vec<Patient>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_patients(State(state): State<AppState>) -> AppResult<Json<Vec<Patient>>> {
    Ok(Json(state.services.patients.list().await?))
}

/// Get patient by ID
#[utoipa::path(
    get,
    path = "/patients/{id}",
    tag = "Patients",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Patient ID")),
    responses(
        (status = 200, description = "Patient", body = Patient),
        (status = 404, description = "Patient not found")
    )
)]
pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Patient>> {
    Ok(Json(state.services.patients.get(id).await?))
}

/// Create a patient
#[utoipa::path(
    post,
    path = "/patients",
    tag = "Patients",
    security(("bearer_auth" = [])),
    request_body = CreatePatient,
    responses(
        (status = 201, description = "Patient created", body = Patient),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Identification number already registered")
    )
)]
pub async fn create_patient(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreatePatient>,
) -> AppResult<(StatusCode, Json<Patient>)> {
    require_any_role(&current_user, PATIENT_WRITERS)?;
    let patient = state.services.patients.create(payload).await?;
    Ok((StatusCode::CREATED, Json(patient)))
}

/// Update a patient
#[utoipa::path(
    put,
    path = "/patients/{id}",
    tag = "Patients",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Patient ID")),
    request_body = UpdatePatient,
    responses(
        (status = 200, description = "Patient updated", body = Patient),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Patient not found"),
        (status = 409, description = "Identification number already registered")
    )
)]
pub async fn update_patient(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdatePatient>,
) -> AppResult<Json<Patient>> {
    require_any_role(&current_user, PATIENT_WRITERS)?;
    Ok(Json(state.services.patients.update(id, payload).await?))
}

/// Delete a patient
#[utoipa::path(
    delete,
    path = "/patients/{id}",
    tag = "Patients",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Patient ID")),
    responses(
        (status = 204, description = "Patient deleted"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Patient not found")
    )
)]
pub async fn delete_patient(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_any_role(&current_user, PATIENT_WRITERS)?;
    state.services.patients.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
