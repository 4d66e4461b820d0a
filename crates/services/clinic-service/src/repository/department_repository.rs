//! Departments and external medical posts.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::base::{self, DbHandle};
use super::entities::{department, external_post};
use common::AppResult;
use domain::{Department, ExternalMedicalPost};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Department>>;

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Department>>;

    async fn list(&self) -> AppResult<Vec<Department>>;

    async fn create(&self, department: Department) -> AppResult<Department>;

    async fn update(&self, department: Department) -> AppResult<Department>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct DepartmentStore<C = DatabaseConnection> {
    db: C,
}

impl<C: DbHandle> DepartmentStore<C> {
    pub fn new(db: C) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<C: DbHandle> DepartmentRepository for DepartmentStore<C> {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Department>> {
        base::find_by_id::<department::Entity, Department, _>(self.db.conn(), id).await
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Department>> {
        let result = department::Entity::find()
            .filter(department::Column::Name.eq(name))
            .one(self.db.conn())
            .await?;

        Ok(result.map(Department::from))
    }

    async fn list(&self) -> AppResult<Vec<Department>> {
        let models = department::Entity::find()
            .order_by_asc(department::Column::Name)
            .all(self.db.conn())
            .await?;

        Ok(models.into_iter().map(Department::from).collect())
    }

    async fn create(&self, department: Department) -> AppResult<Department> {
        base::insert(self.db.conn(), department::ActiveModel::from(department)).await
    }

    async fn update(&self, department: Department) -> AppResult<Department> {
        base::update(self.db.conn(), department::ActiveModel::from(department)).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        base::delete_by_id::<department::Entity, _>(
            self.db.conn(),
            id,
            "Departamento no encontrado",
        )
        .await
    }
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ExternalPostRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ExternalMedicalPost>>;

    async fn list(&self) -> AppResult<Vec<ExternalMedicalPost>>;

    async fn create(&self, post: ExternalMedicalPost) -> AppResult<ExternalMedicalPost>;

    async fn update(&self, post: ExternalMedicalPost) -> AppResult<ExternalMedicalPost>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct ExternalPostStore<C = DatabaseConnection> {
    db: C,
}

impl<C: DbHandle> ExternalPostStore<C> {
    pub fn new(db: C) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<C: DbHandle> ExternalPostRepository for ExternalPostStore<C> {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ExternalMedicalPost>> {
        base::find_by_id::<external_post::Entity, ExternalMedicalPost, _>(self.db.conn(), id).await
    }

    async fn list(&self) -> AppResult<Vec<ExternalMedicalPost>> {
        base::find_all::<external_post::Entity, ExternalMedicalPost, _>(self.db.conn()).await
    }

    async fn create(&self, post: ExternalMedicalPost) -> AppResult<ExternalMedicalPost> {
        base::insert(self.db.conn(), external_post::ActiveModel::from(post)).await
    }

    async fn update(&self, post: ExternalMedicalPost) -> AppResult<ExternalMedicalPost> {
        base::update(self.db.conn(), external_post::ActiveModel::from(post)).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        base::delete_by_id::<external_post::Entity, _>(
            self.db.conn(),
            id,
            "Puesto médico externo no encontrado",
        )
        .await
    }
}
