//! User account repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::base::{self, DbHandle};
use super::entities::user::{self, Entity as UserEntity};
use super::entities::user_role::{self, Entity as UserRoleEntity};
use common::AppResult;
use domain::{Role, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Persist a new user
    async fn create(&self, user: User) -> AppResult<User>;

    /// Grant a role to a user
    async fn assign_role(&self, user_id: Uuid, role: Role) -> AppResult<()>;

    /// Roles currently held by a user
    async fn find_roles(&self, user_id: Uuid) -> AppResult<Vec<Role>>;
}

/// SeaORM implementation of UserRepository
pub struct UserStore<C = DatabaseConnection> {
    db: C,
}

impl<C: DbHandle> UserStore<C> {
    pub fn new(db: C) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<C: DbHandle> UserRepository for UserStore<C> {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        base::find_by_id::<UserEntity, User, _>(self.db.conn(), id).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.conn())
            .await?;

        Ok(result.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.db.conn())
            .await?;

        Ok(result.map(User::from))
    }

    async fn create(&self, user: User) -> AppResult<User> {
        base::insert(self.db.conn(), user::ActiveModel::from(user)).await
    }

    async fn assign_role(&self, user_id: Uuid, role: Role) -> AppResult<()> {
        let active_model = user_role::ActiveModel {
            user_id: Set(user_id),
            role: Set(role.to_string()),
            assigned_at: Set(chrono::Utc::now()),
        };

        active_model.insert(self.db.conn()).await?;
        Ok(())
    }

    async fn find_roles(&self, user_id: Uuid) -> AppResult<Vec<Role>> {
        let rows = UserRoleEntity::find()
            .filter(user_role::Column::UserId.eq(user_id))
            .all(self.db.conn())
            .await?;

        let roles = rows
            .into_iter()
            .filter_map(|row| match row.role.parse::<Role>() {
                Ok(role) => Some(role),
                Err(_) => {
                    tracing::warn!(%user_id, role = %row.role, "Ignoring unknown stored role");
                    None
                }
            })
            .collect();

        Ok(roles)
    }
}
