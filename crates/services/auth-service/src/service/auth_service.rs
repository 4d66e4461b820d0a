//! Authentication service - registration, login and role management.
//!
//! Registration validates the requested roles before touching the database,
//! then creates the account, grants the roles and links the clinical records
//! inside one transaction. Any failure in that phase rolls everything back
//! and no token is issued.

use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use uuid::Uuid;
use validator::Validate;

use super::entity_linking::{EntityLinker, EntityLinkingService};
use super::role_validation::{RoleValidationService, RoleValidator, NO_ROLES};
use super::token_service::{Claims, TokenService};
use clinic_service_lib::infra::{TransactionScope, UnitOfWork};
use common::{AppError, AppResult, OptionExt};
use domain::{
    AssignRole, AuthResponse, EntityLink, LoginUser, Password, RegisterUser, Role, User,
    UserInfo,
};

const USER_NOT_FOUND: &str = "Usuario no encontrado";

/// Hash verified when the email is unknown so both paths cost the same.
static DUMMY_HASH: Lazy<Password> = Lazy::new(|| {
    Password::new("timing-equalizer-password")
        .unwrap_or_else(|_| Password::from_hash(String::new()))
});

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account bound to the clinical records behind its roles.
    async fn register(&self, dto: RegisterUser) -> AppResult<AuthResponse>;

    /// Login and return JWT token
    async fn login(&self, dto: LoginUser) -> AppResult<AuthResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Attach one more role to an existing account.
    async fn assign_role(&self, user_id: Uuid, dto: AssignRole) -> AppResult<UserInfo>;

    async fn current_user(&self, user_id: Uuid) -> AppResult<UserInfo>;

    /// Create an administrator account. Not reachable through registration.
    async fn create_admin(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> AppResult<UserInfo>;
}

pub struct Authenticator {
    uow: Arc<dyn UnitOfWork>,
    roles: Arc<dyn RoleValidationService>,
    linker: Arc<dyn EntityLinkingService>,
    tokens: Arc<dyn TokenService>,
}

impl Authenticator {
    pub fn new(uow: Arc<dyn UnitOfWork>, tokens: Arc<dyn TokenService>) -> Self {
        Self {
            roles: Arc::new(RoleValidator::new(uow.clone())),
            linker: Arc::new(EntityLinker),
            uow,
            tokens,
        }
    }

    async fn ensure_account_free(&self, username: &str, email: &str) -> AppResult<()> {
        let users = self.uow.users();
        if users.find_by_username(username).await?.is_some() {
            return Err(AppError::conflict(format!(
                "El nombre de usuario '{}' ya está en uso",
                username
            )));
        }
        if users.find_by_email(email).await?.is_some() {
            return Err(AppError::conflict(format!(
                "El correo electrónico '{}' ya está registrado",
                email
            )));
        }
        Ok(())
    }

    /// Grant `roles` and link `links` to `user_id` inside `scope`.
    async fn grant(
        &self,
        scope: &dyn TransactionScope,
        user_id: Uuid,
        roles: &[Role],
        links: &[EntityLink],
    ) -> AppResult<()> {
        let users = scope.users();
        for &role in roles {
            users.assign_role(user_id, role).await?;
        }
        for link in links {
            self.linker
                .link_entity_to_user(scope, link.entity_id, user_id, link.role)
                .await?;
        }
        Ok(())
    }

    async fn persist_account(
        &self,
        scope: &dyn TransactionScope,
        user: User,
        roles: &[Role],
        links: &[EntityLink],
    ) -> AppResult<User> {
        let user = scope.users().create(user).await?;
        self.grant(scope, user.id, roles, links).await?;
        Ok(user)
    }

    /// Commit on success, roll back and keep the original error otherwise.
    async fn finish<T>(scope: Box<dyn TransactionScope>, outcome: AppResult<T>) -> AppResult<T> {
        match outcome {
            Ok(value) => {
                scope.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = scope.rollback().await {
                    tracing::error!(error = %rollback_err, "Rollback failed");
                }
                Err(err)
            }
        }
    }

    async fn user_info(&self, user: &User) -> AppResult<UserInfo> {
        let roles = self.uow.users().find_roles(user.id).await?;
        Ok(UserInfo::new(user, roles))
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, dto: RegisterUser) -> AppResult<AuthResponse> {
        dto.validate()?;
        let data = dto.validation_data.as_ref();

        let roles = self.roles.validate_roles_exist(&dto.roles)?;
        self.roles.validate_roles_combination(&roles)?;
        let links = self.roles.validate_entity_not_linked(&roles, data).await?;
        self.roles
            .validate_required_data_for_roles(&roles, data)
            .await?;
        self.ensure_account_free(&dto.username, &dto.email).await?;

        let password_hash = Password::new(&dto.password)?.into_string();
        let user = User::new(dto.username, dto.email, password_hash);

        let scope = self.uow.begin().await?;
        let outcome = self
            .persist_account(scope.as_ref(), user, &roles, &links)
            .await;
        let user = Self::finish(scope, outcome).await?;

        tracing::info!(
            user_id = %user.id,
            roles = ?roles,
            linked = links.len(),
            "User registered"
        );
        self.tokens.issue(UserInfo::new(&user, roles))
    }

    async fn login(&self, dto: LoginUser) -> AppResult<AuthResponse> {
        dto.validate()?;
        let user = self.uow.users().find_by_email(&dto.email).await?;

        // Verify even for unknown emails so response time does not reveal them.
        let password_valid = match &user {
            Some(user) => Password::from_hash(user.password_hash.as_str()).verify(&dto.password),
            None => {
                DUMMY_HASH.verify(&dto.password);
                false
            }
        };

        let user = match user {
            Some(user) if password_valid => user,
            _ => return Err(AppError::InvalidCredentials),
        };

        let info = self.user_info(&user).await?;
        tracing::info!(user_id = %user.id, "User logged in");
        self.tokens.issue(info)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        self.tokens.verify(token)
    }

    async fn assign_role(&self, user_id: Uuid, dto: AssignRole) -> AppResult<UserInfo> {
        dto.validate()?;
        let user = self
            .uow
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_not_found(USER_NOT_FOUND)?;

        let role = self
            .roles
            .validate_roles_exist(std::slice::from_ref(&dto.role))?
            .first()
            .copied()
            .ok_or_else(|| AppError::validation(NO_ROLES))?;

        let mut held = self.uow.users().find_roles(user.id).await?;
        if held.contains(&role) {
            return Err(AppError::conflict(format!("El usuario ya tiene el rol {}", role)));
        }
        held.push(role);
        self.roles.validate_roles_combination(&held)?;

        let data = dto.validation_data.as_ref();
        let links = self.roles.validate_entity_not_linked(&[role], data).await?;
        self.roles
            .validate_required_data_for_roles(&[role], data)
            .await?;

        let scope = self.uow.begin().await?;
        let outcome = self.grant(scope.as_ref(), user.id, &[role], &links).await;
        Self::finish(scope, outcome).await?;

        tracing::info!(user_id = %user.id, %role, "Role assigned");
        Ok(UserInfo::new(&user, held))
    }

    async fn current_user(&self, user_id: Uuid) -> AppResult<UserInfo> {
        let user = self
            .uow
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_not_found(USER_NOT_FOUND)?;
        self.user_info(&user).await
    }

    async fn create_admin(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> AppResult<UserInfo> {
        let dto = RegisterUser {
            username,
            email,
            password,
            roles: vec![Role::Admin.to_string()],
            validation_data: None,
        };
        dto.validate()?;
        self.ensure_account_free(&dto.username, &dto.email).await?;

        let password_hash = Password::new(&dto.password)?.into_string();
        let user = User::new(dto.username, dto.email, password_hash);

        let scope = self.uow.begin().await?;
        let outcome = self
            .persist_account(scope.as_ref(), user, &[Role::Admin], &[])
            .await;
        let user = Self::finish(scope, outcome).await?;

        tracing::info!(user_id = %user.id, "Administrator created");
        Ok(UserInfo::new(&user, vec![Role::Admin]))
    }
}
