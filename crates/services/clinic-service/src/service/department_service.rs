//! Departments and external medical posts.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;
use validator::Validate;

use super::lookup;
use crate::infra::UnitOfWork;
use common::{AppError, AppResult};
use domain::{
    CreateDepartment, CreateExternalMedicalPost, Department, ExternalMedicalPost,
    UpdateDepartment, UpdateExternalMedicalPost,
};

#[async_trait]
pub trait DepartmentService: Send + Sync {
    async fn get(&self, id: Uuid) -> AppResult<Department>;

    async fn list(&self) -> AppResult<Vec<Department>>;

    /// Create a department. Names are unique.
    async fn create(&self, dto: CreateDepartment) -> AppResult<Department>;

    async fn update(&self, id: Uuid, dto: UpdateDepartment) -> AppResult<Department>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct DepartmentManager {
    uow: Arc<dyn UnitOfWork>,
}

impl DepartmentManager {
    pub fn new(uow: Arc<dyn UnitOfWork>) -> Self {
        Self { uow }
    }

    async fn ensure_name_free(&self, name: &str) -> AppResult<()> {
        if self.uow.departments().find_by_name(name).await?.is_some() {
            return Err(AppError::conflict(format!(
                "El departamento '{}' ya existe",
                name
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl DepartmentService for DepartmentManager {
    async fn get(&self, id: Uuid) -> AppResult<Department> {
        lookup::department(self.uow.as_ref(), id).await
    }

    async fn list(&self) -> AppResult<Vec<Department>> {
        self.uow.departments().list().await
    }

    async fn create(&self, dto: CreateDepartment) -> AppResult<Department> {
        dto.validate()?;
        self.ensure_name_free(&dto.name).await?;

        let department = self
            .uow
            .departments()
            .create(Department::new(dto.name, dto.description))
            .await?;

        tracing::info!(
            department_id = %department.id,
            name = %department.name,
            "Department created"
        );
        Ok(department)
    }

    async fn update(&self, id: Uuid, dto: UpdateDepartment) -> AppResult<Department> {
        dto.validate()?;
        let mut department = lookup::department(self.uow.as_ref(), id).await?;

        if let Some(name) = dto.name {
            if name != department.name {
                self.ensure_name_free(&name).await?;
                department.rename(name);
            }
        }
        if let Some(description) = dto.description {
            department.update_description(description);
        }

        self.uow.departments().update(department).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.uow.departments().delete(id).await
    }
}

#[async_trait]
pub trait ExternalPostService: Send + Sync {
    async fn get(&self, id: Uuid) -> AppResult<ExternalMedicalPost>;

    async fn list(&self) -> AppResult<Vec<ExternalMedicalPost>>;

    async fn create(&self, dto: CreateExternalMedicalPost) -> AppResult<ExternalMedicalPost>;

    async fn update(
        &self,
        id: Uuid,
        dto: UpdateExternalMedicalPost,
    ) -> AppResult<ExternalMedicalPost>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct ExternalPostManager {
    uow: Arc<dyn UnitOfWork>,
}

impl ExternalPostManager {
    pub fn new(uow: Arc<dyn UnitOfWork>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl ExternalPostService for ExternalPostManager {
    async fn get(&self, id: Uuid) -> AppResult<ExternalMedicalPost> {
        lookup::external_post(self.uow.as_ref(), id).await
    }

    async fn list(&self) -> AppResult<Vec<ExternalMedicalPost>> {
        self.uow.external_posts().list().await
    }

    async fn create(&self, dto: CreateExternalMedicalPost) -> AppResult<ExternalMedicalPost> {
        dto.validate()?;
        self.uow
            .external_posts()
            .create(ExternalMedicalPost::new(dto.name, dto.address))
            .await
    }

    async fn update(
        &self,
        id: Uuid,
        dto: UpdateExternalMedicalPost,
    ) -> AppResult<ExternalMedicalPost> {
        dto.validate()?;
        let mut post = lookup::external_post(self.uow.as_ref(), id).await?;
        post.apply(dto);
        self.uow.external_posts().update(post).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.uow.external_posts().delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockDepartmentRepository;
    use crate::testing::MockUnitOfWork;

    #[tokio::test]
    async fn test_create_department_with_taken_name() {
        let mut repo = MockDepartmentRepository::new();
        repo.expect_find_by_name()
            .returning(|name| Ok(Some(Department::new(name.to_string(), None))));
        repo.expect_create().never();

        let service = DepartmentManager::new(Arc::new(MockUnitOfWork::new().with_departments(repo)));
        let result = service
            .create(CreateDepartment {
                name: "Pediatría".to_string(),
                description: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::Conflict(msg)) if msg.contains("Pediatría")));
    }

    #[tokio::test]
    async fn test_rename_department() {
        let department = Department::new("Pediatria".to_string(), None);
        let id = department.id;

        let mut repo = MockDepartmentRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(department.clone())));
        repo.expect_find_by_name().returning(|_| Ok(None));
        repo.expect_update().times(1).returning(Ok);

        let service = DepartmentManager::new(Arc::new(MockUnitOfWork::new().with_departments(repo)));
        let updated = service
            .update(
                id,
                UpdateDepartment {
                    name: Some("Pediatría".to_string()),
                    description: Some("Atención infantil".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Pediatría");
        assert_eq!(updated.description.as_deref(), Some("Atención infantil"));
    }
}
