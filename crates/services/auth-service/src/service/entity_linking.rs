//! Binding of clinical records to user accounts.

use async_trait::async_trait;
use uuid::Uuid;

use clinic_service_lib::infra::TransactionScope;
use common::{AppError, AppResult};
use domain::Role;

#[async_trait]
pub trait EntityLinkingService: Send + Sync {
    /// Stamp `user_id` on the record behind `role` inside `scope`.
    async fn link_entity_to_user(
        &self,
        scope: &dyn TransactionScope,
        entity_id: Uuid,
        user_id: Uuid,
        role: Role,
    ) -> AppResult<()>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EntityLinker;

#[async_trait]
impl EntityLinkingService for EntityLinker {
    async fn link_entity_to_user(
        &self,
        scope: &dyn TransactionScope,
        entity_id: Uuid,
        user_id: Uuid,
        role: Role,
    ) -> AppResult<()> {
        let store = scope.linkable(role).ok_or_else(|| {
            AppError::validation(format!("El rol {} no admite vinculación", role))
        })?;
        store.link_user(entity_id, user_id).await?;

        tracing::info!(%role, %entity_id, %user_id, "Record linked to user");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_service_lib::infra::UnitOfWork;
    use clinic_service_lib::repository::MockLinkableRepository;
    use clinic_service_lib::testing::MockUnitOfWork;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_link_dispatches_on_role() {
        let entity_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let mut doctors = MockLinkableRepository::new();
        doctors
            .expect_link_user()
            .with(eq(entity_id), eq(user_id))
            .times(1)
            .returning(|_, _| Ok(()));
        let mut patients = MockLinkableRepository::new();
        patients.expect_link_user().never();

        let uow = MockUnitOfWork::new()
            .with_linkable(Role::Doctor, doctors)
            .with_linkable(Role::Patient, patients);
        let scope = uow.begin().await.unwrap();

        let result = EntityLinker
            .link_entity_to_user(scope.as_ref(), entity_id, user_id, Role::Doctor)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_link_admin_is_unsupported() {
        let scope = MockUnitOfWork::new().begin().await.unwrap();

        let result = EntityLinker
            .link_entity_to_user(scope.as_ref(), Uuid::new_v4(), Uuid::new_v4(), Role::Admin)
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_link_missing_entity() {
        let mut nurses = MockLinkableRepository::new();
        nurses
            .expect_link_user()
            .returning(|_, _| Err(AppError::not_found("Enfermero no encontrado")));

        let scope = MockUnitOfWork::new()
            .with_linkable(Role::Nurse, nurses)
            .begin()
            .await
            .unwrap();

        let result = EntityLinker
            .link_entity_to_user(scope.as_ref(), Uuid::new_v4(), Uuid::new_v4(), Role::Nurse)
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
