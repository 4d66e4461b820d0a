//! Registration, login and role assignment against mocked persistence.

use std::sync::{Arc, Mutex};

use mockall::predicate::eq;
use uuid::Uuid;

use auth_service_lib::service::{
    AuthService, Authenticator, JwtTokenService, ADMIN_NOT_ALLOWED, DOCTOR_NURSE_CONFLICT,
};
use clinic_service_lib::repository::{MockLinkableRepository, MockUserRepository};
use clinic_service_lib::testing::MockUnitOfWork;
use common::{AppError, JwtConfig};
use domain::{
    AssignRole, LinkableEntity, LoginUser, Password, RegisterUser, Role, User, ValidationData,
};

const SECRET: &str = "integration-test-secret-at-least-32-chars";

fn tokens() -> Arc<JwtTokenService> {
    Arc::new(JwtTokenService::new(&JwtConfig {
        secret: SECRET.to_string(),
        expiration_hours: 1,
    }))
}

fn register_dto(roles: &[&str]) -> RegisterUser {
    RegisterUser {
        username: "mlopez".to_string(),
        email: "mlopez@example.com".to_string(),
        password: "s3gura-clave".to_string(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
        validation_data: Some(ValidationData::new("123")),
    }
}

/// Users repository accepting any new account.
fn open_users() -> MockUserRepository {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().returning(|_| Ok(None));
    users.expect_find_by_email().returning(|_| Ok(None));
    users.expect_create().returning(Ok);
    users.expect_assign_role().returning(|_, _| Ok(()));
    users
}

/// Patient store whose `user_id` is updated by `link_user`, like the table.
fn patient_store(patient_id: Uuid, linked: Arc<Mutex<Option<Uuid>>>) -> MockLinkableRepository {
    let mut store = MockLinkableRepository::new();
    let seen = linked.clone();
    store.expect_find_linkable().returning(move |_| {
        Ok(Some(LinkableEntity {
            id: patient_id,
            user_id: *seen.lock().unwrap(),
        }))
    });
    store
        .expect_link_user()
        .returning(move |entity_id, user_id| {
            assert_eq!(entity_id, patient_id);
            *linked.lock().unwrap() = Some(user_id);
            Ok(())
        });
    store
}

#[tokio::test]
async fn test_register_patient_links_record_and_issues_token() {
    let patient_id = Uuid::new_v4();
    let linked = Arc::new(Mutex::new(None));

    let uow = MockUnitOfWork::new()
        .with_users(open_users())
        .with_linkable(Role::Patient, patient_store(patient_id, linked.clone()));
    let tracker = uow.tracker();
    let auth = Authenticator::new(Arc::new(uow), tokens());

    let response = auth.register(register_dto(&["Patient"])).await.unwrap();

    assert!(!response.access_token.is_empty());
    assert_eq!(response.user.roles, vec![Role::Patient]);
    assert_eq!(*linked.lock().unwrap(), Some(response.user.id));
    assert_eq!(tracker.commits(), 1);
    assert_eq!(tracker.rollbacks(), 0);

    let claims = auth.verify_token(&response.access_token).unwrap();
    assert_eq!(claims.sub, response.user.id);
    assert_eq!(claims.roles, vec![Role::Patient]);
}

#[tokio::test]
async fn test_register_same_patient_twice_fails() {
    let linked = Arc::new(Mutex::new(None));
    let uow = MockUnitOfWork::new()
        .with_users(open_users())
        .with_linkable(Role::Patient, patient_store(Uuid::new_v4(), linked));
    let auth = Authenticator::new(Arc::new(uow), tokens());

    auth.register(register_dto(&["Patient"])).await.unwrap();
    let second = auth.register(register_dto(&["Patient"])).await;

    match second {
        Err(AppError::Conflict(msg)) => {
            assert_eq!(
                msg,
                "El paciente con identificación 123 ya tiene una cuenta de usuario asociada"
            )
        }
        other => panic!("expected conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn test_register_doctor_and_nurse_always_fails() {
    let mut users = MockUserRepository::new();
    users.expect_create().never();
    let auth = Authenticator::new(Arc::new(MockUnitOfWork::new().with_users(users)), tokens());

    for dto in [
        register_dto(&["Doctor", "Nurse"]),
        RegisterUser {
            validation_data: None,
            ..register_dto(&["Nurse", "Doctor"])
        },
        register_dto(&["Patient", "Doctor", "Nurse"]),
    ] {
        let result = auth.register(dto).await;
        assert!(matches!(result, Err(AppError::Validation(msg)) if msg == DOCTOR_NURSE_CONFLICT));
    }
}

#[tokio::test]
async fn test_register_admin_always_fails() {
    let auth = Authenticator::new(Arc::new(MockUnitOfWork::new()), tokens());

    let result = auth.register(register_dto(&["Admin"])).await;

    assert!(matches!(result, Err(AppError::Validation(msg)) if msg == ADMIN_NOT_ALLOWED));
}

#[tokio::test]
async fn test_register_without_matching_record_fails() {
    let mut doctors = MockLinkableRepository::new();
    doctors.expect_find_linkable().returning(|_| Ok(None));
    let mut users = MockUserRepository::new();
    users.expect_create().never();

    let uow = MockUnitOfWork::new()
        .with_users(users)
        .with_linkable(Role::Doctor, doctors);
    let auth = Authenticator::new(Arc::new(uow), tokens());

    let result = auth.register(register_dto(&["Doctor"])).await;

    assert!(matches!(result, Err(AppError::Validation(msg)) if msg.contains("Doctor")));
}

#[tokio::test]
async fn test_link_failure_rolls_back_registration() {
    let mut store = MockLinkableRepository::new();
    store.expect_find_linkable().returning(|_| {
        Ok(Some(LinkableEntity {
            id: Uuid::new_v4(),
            user_id: None,
        }))
    });
    store
        .expect_link_user()
        .returning(|_, _| Err(AppError::not_found("Doctor no encontrado")));

    let uow = MockUnitOfWork::new()
        .with_users(open_users())
        .with_linkable(Role::Doctor, store);
    let tracker = uow.tracker();
    let auth = Authenticator::new(Arc::new(uow), tokens());

    let result = auth.register(register_dto(&["Doctor"])).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert_eq!(tracker.commits(), 0);
    assert_eq!(tracker.rollbacks(), 1);
}

#[tokio::test]
async fn test_record_linked_meanwhile_rolls_back_registration() {
    let mut store = MockLinkableRepository::new();
    store.expect_find_linkable().returning(|_| {
        Ok(Some(LinkableEntity {
            id: Uuid::new_v4(),
            user_id: None,
        }))
    });
    store.expect_link_user().times(1).returning(|_, _| {
        Err(AppError::conflict(
            "El registro ya tiene una cuenta de usuario asociada",
        ))
    });

    let uow = MockUnitOfWork::new()
        .with_users(open_users())
        .with_linkable(Role::Patient, store);
    let tracker = uow.tracker();
    let auth = Authenticator::new(Arc::new(uow), tokens());

    let result = auth.register(register_dto(&["Patient"])).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert_eq!(tracker.commits(), 0);
    assert_eq!(tracker.rollbacks(), 1);
}

#[tokio::test]
async fn test_register_with_taken_email_fails() {
    let mut store = MockLinkableRepository::new();
    store.expect_find_linkable().returning(|_| {
        Ok(Some(LinkableEntity {
            id: Uuid::new_v4(),
            user_id: None,
        }))
    });
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().returning(|_| Ok(None));
    users.expect_find_by_email().returning(|email| {
        Ok(Some(User::new("otro".into(), email.to_string(), "hash".into())))
    });
    users.expect_create().never();

    let uow = MockUnitOfWork::new()
        .with_users(users)
        .with_linkable(Role::Patient, store);
    let tracker = uow.tracker();
    let auth = Authenticator::new(Arc::new(uow), tokens());

    let result = auth.register(register_dto(&["Patient"])).await;

    assert!(matches!(result, Err(AppError::Conflict(msg)) if msg.contains("mlopez@example.com")));
    assert_eq!(tracker.commits() + tracker.rollbacks(), 0);
}

#[tokio::test]
async fn test_login_success_and_failures() {
    let hash = Password::new("s3gura-clave").unwrap().into_string();
    let user = User::new("mlopez".into(), "mlopez@example.com".into(), hash);
    let user_id = user.id;

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .returning(move |email| Ok((email == "mlopez@example.com").then(|| user.clone())));
    users
        .expect_find_roles()
        .with(eq(user_id))
        .returning(|_| Ok(vec![Role::Nurse]));
    let auth = Authenticator::new(Arc::new(MockUnitOfWork::new().with_users(users)), tokens());

    let response = auth
        .login(LoginUser {
            email: "mlopez@example.com".into(),
            password: "s3gura-clave".into(),
        })
        .await
        .unwrap();
    assert_eq!(response.user.id, user_id);
    assert_eq!(response.user.roles, vec![Role::Nurse]);

    let wrong_password = auth
        .login(LoginUser {
            email: "mlopez@example.com".into(),
            password: "otra-clave".into(),
        })
        .await;
    assert!(matches!(wrong_password, Err(AppError::InvalidCredentials)));

    let unknown = auth
        .login(LoginUser {
            email: "nadie@example.com".into(),
            password: "s3gura-clave".into(),
        })
        .await;
    assert!(matches!(unknown, Err(AppError::InvalidCredentials)));
}

#[tokio::test]
async fn test_assign_nurse_to_doctor_fails() {
    let user = User::new("cperez".into(), "cperez@example.com".into(), "hash".into());
    let user_id = user.id;

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(move |_| Ok(Some(user.clone())));
    users
        .expect_find_roles()
        .returning(|_| Ok(vec![Role::Doctor]));
    users.expect_assign_role().never();
    let auth = Authenticator::new(Arc::new(MockUnitOfWork::new().with_users(users)), tokens());

    let result = auth
        .assign_role(
            user_id,
            AssignRole {
                role: "Nurse".into(),
                validation_data: Some(ValidationData::new("N-1")),
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Validation(msg)) if msg == DOCTOR_NURSE_CONFLICT));
}

#[tokio::test]
async fn test_assign_department_head_links_record() {
    let user = User::new("cperez".into(), "cperez@example.com".into(), "hash".into());
    let user_id = user.id;
    let head_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(move |_| Ok(Some(user.clone())));
    users
        .expect_find_roles()
        .returning(|_| Ok(vec![Role::Doctor]));
    users
        .expect_assign_role()
        .with(eq(user_id), eq(Role::DepartmentHead))
        .times(1)
        .returning(|_, _| Ok(()));

    let mut heads = MockLinkableRepository::new();
    heads.expect_find_linkable().returning(move |_| {
        Ok(Some(LinkableEntity {
            id: head_id,
            user_id: None,
        }))
    });
    heads
        .expect_link_user()
        .with(eq(head_id), eq(user_id))
        .times(1)
        .returning(|_, _| Ok(()));

    let uow = MockUnitOfWork::new()
        .with_users(users)
        .with_linkable(Role::DepartmentHead, heads);
    let tracker = uow.tracker();
    let auth = Authenticator::new(Arc::new(uow), tokens());

    let info = auth
        .assign_role(
            user_id,
            AssignRole {
                role: "DepartmentHead".into(),
                validation_data: Some(ValidationData::new("H-7")),
            },
        )
        .await
        .unwrap();

    assert_eq!(info.roles, vec![Role::Doctor, Role::DepartmentHead]);
    assert_eq!(tracker.commits(), 1);
}

#[tokio::test]
async fn test_create_admin() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_username().returning(|_| Ok(None));
    users.expect_find_by_email().returning(|_| Ok(None));
    users.expect_create().times(1).returning(Ok);
    users
        .expect_assign_role()
        .withf(|_, role| *role == Role::Admin)
        .times(1)
        .returning(|_, _| Ok(()));

    let auth = Authenticator::new(Arc::new(MockUnitOfWork::new().with_users(users)), tokens());

    let info = auth
        .create_admin(
            "admin".into(),
            "admin@polyclinic.local".into(),
            "cambiar-esta-clave".into(),
        )
        .await
        .unwrap();

    assert_eq!(info.roles, vec![Role::Admin]);
}
