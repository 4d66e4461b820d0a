//! Router behaviour over mocked persistence.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use tower::ServiceExt;
use uuid::Uuid;

use auth_service_lib::{authenticator, JwtTokenService, TokenService};
use clinic_service_lib::repository::MockPatientRepository;
use clinic_service_lib::testing::MockUnitOfWork;
use common::{DatabaseConfig, JwtConfig};
use domain::{Role, UserInfo};
use gateway_lib::config::GatewayConfig;
use gateway_lib::routes::create_router;
use gateway_lib::state::{AppState, Services};

fn jwt() -> JwtConfig {
    JwtConfig {
        secret: "router-test-secret-with-enough-length".to_string(),
        expiration_hours: 1,
    }
}

fn app(uow: MockUnitOfWork) -> Router {
    let config = GatewayConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database: DatabaseConfig::default(),
        jwt: jwt(),
    };
    let uow = Arc::new(uow);
    let services = Services::new(uow.clone(), authenticator(uow, &config.jwt));
    create_router(AppState::new(services, config))
}

fn token(roles: Vec<Role>) -> String {
    JwtTokenService::new(&jwt())
        .issue(UserInfo {
            id: Uuid::new_v4(),
            username: "tester".to_string(),
            email: "tester@example.com".to_string(),
            roles,
        })
        .unwrap()
        .access_token
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_reports_database() {
    let response = app(MockUnitOfWork::new())
        .oneshot(get("/health", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["database"]["status"], "healthy");
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let response = app(MockUnitOfWork::new())
        .oneshot(get("/patients", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_forged_token_is_rejected() {
    let response = app(MockUnitOfWork::new())
        .oneshot(get("/patients", Some("not.a.token")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_authenticated_user_lists_patients() {
    let mut patients = MockPatientRepository::new();
    patients.expect_list().times(1).returning(|| Ok(vec![]));

    let token = token(vec![Role::Patient]);
    let response = app(MockUnitOfWork::new().with_patients(patients))
        .oneshot(get("/patients", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn test_department_writes_are_admin_only() {
    let token = token(vec![Role::Nurse]);
    let request = Request::builder()
        .method("POST")
        .uri("/departments")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"name":"Cardiología"}"#))
        .unwrap();

    let response = app(MockUnitOfWork::new()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_invalid_body_is_rejected_before_the_service() {
    let token = token(vec![Role::Admin]);
    let request = Request::builder()
        .method("POST")
        .uri("/departments")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"name":""}"#))
        .unwrap();

    let response = app(MockUnitOfWork::new()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "El nombre del departamento es obligatorio");
}
