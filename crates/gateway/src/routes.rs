//! Route configuration.

use axum::{middleware, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::*;
use crate::middleware::auth_middleware;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Routes that require a bearer token.
fn protected_routes() -> Router<AppState> {
    Router::new()
        .nest("/patients", patient_routes())
        .nest("/doctors", doctor_routes())
        .nest("/nurses", nurse_routes())
        .nest("/department-heads", department_head_routes())
        .nest("/warehouse-managers", warehouse_manager_routes())
        .nest("/departments", department_routes())
        .nest("/external-posts", external_post_routes())
        .nest("/derivations", derivation_routes())
        .nest("/referrals", referral_routes())
        .nest("/consultation-derivations", consultation_derivation_routes())
        .nest("/consultation-referrals", consultation_referral_routes())
        .nest("/emergency-rooms", emergency_room_routes())
        .nest("/emergency-cares", emergency_care_routes())
        .nest("/medications", medication_routes())
        .nest("/stock", stock_routes())
        .nest("/medication-usages", medication_usage_routes())
        .nest("/warehouse-requests", warehouse_request_routes())
}

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check (no auth)
        .nest("/health", health_routes())
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Register and login are public; the rest of /auth is not
        .nest(
            "/auth",
            auth_routes().merge(account_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            ))),
        )
        .merge(protected_routes().route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        )))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
