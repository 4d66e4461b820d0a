//! Records that can be bound to a user account.
//!
//! Patients and every kind of staff member carry an optional `user_id`. The
//! registration flow looks them up by identification number and stamps the new
//! account id on the row. Each store implements [`LinkableRepository`] so the
//! caller only needs the [`Role`] to pick the right table.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::base::{self, DbHandle};
use super::entities::{department_head, doctor, nurse, patient, warehouse_manager};
use super::patient_repository::{PatientRepository, PatientStore};
use super::staff_repository::{
    DepartmentHeadRepository, DepartmentHeadStore, DoctorRepository, DoctorStore,
    NurseRepository, NurseStore, WarehouseManagerRepository, WarehouseManagerStore,
};
use common::AppResult;
use domain::{LinkableEntity, Role};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait LinkableRepository: Send + Sync {
    /// Look a record up by its identification number
    async fn find_linkable(&self, identification: &str) -> AppResult<Option<LinkableEntity>>;

    /// Bind a user account to the record
    async fn link_user(&self, entity_id: Uuid, user_id: Uuid) -> AppResult<()>;
}

#[async_trait]
impl<C: DbHandle> LinkableRepository for PatientStore<C> {
    async fn find_linkable(&self, identification: &str) -> AppResult<Option<LinkableEntity>> {
        let found = self.find_by_identification(identification).await?;
        Ok(found.map(|p| LinkableEntity {
            id: p.id,
            user_id: p.user_id,
        }))
    }

    async fn link_user(&self, entity_id: Uuid, user_id: Uuid) -> AppResult<()> {
        base::set_user_id::<patient::Entity, _>(
            self.handle().conn(),
            patient::Column::Id,
            patient::Column::UserId,
            entity_id,
            user_id,
            "Paciente no encontrado",
        )
        .await
    }
}

#[async_trait]
impl<C: DbHandle> LinkableRepository for DoctorStore<C> {
    async fn find_linkable(&self, identification: &str) -> AppResult<Option<LinkableEntity>> {
        let found = self.find_by_identification(identification).await?;
        Ok(found.map(|d| LinkableEntity {
            id: d.id,
            user_id: d.employee.user_id,
        }))
    }

    async fn link_user(&self, entity_id: Uuid, user_id: Uuid) -> AppResult<()> {
        base::set_user_id::<doctor::Entity, _>(
            self.handle().conn(),
            doctor::Column::Id,
            doctor::Column::UserId,
            entity_id,
            user_id,
            "Doctor no encontrado",
        )
        .await
    }
}

#[async_trait]
impl<C: DbHandle> LinkableRepository for NurseStore<C> {
    async fn find_linkable(&self, identification: &str) -> AppResult<Option<LinkableEntity>> {
        let found = self.find_by_identification(identification).await?;
        Ok(found.map(|n| LinkableEntity {
            id: n.id,
            user_id: n.employee.user_id,
        }))
    }

    async fn link_user(&self, entity_id: Uuid, user_id: Uuid) -> AppResult<()> {
        base::set_user_id::<nurse::Entity, _>(
            self.handle().conn(),
            nurse::Column::Id,
            nurse::Column::UserId,
            entity_id,
            user_id,
            "Enfermero no encontrado",
        )
        .await
    }
}

#[async_trait]
impl<C: DbHandle> LinkableRepository for DepartmentHeadStore<C> {
    async fn find_linkable(&self, identification: &str) -> AppResult<Option<LinkableEntity>> {
        let found = self.find_by_identification(identification).await?;
        Ok(found.map(|h| LinkableEntity {
            id: h.id,
            user_id: h.employee.user_id,
        }))
    }

    async fn link_user(&self, entity_id: Uuid, user_id: Uuid) -> AppResult<()> {
        base::set_user_id::<department_head::Entity, _>(
            self.handle().conn(),
            department_head::Column::Id,
            department_head::Column::UserId,
            entity_id,
            user_id,
            "Jefe de departamento no encontrado",
        )
        .await
    }
}

#[async_trait]
impl<C: DbHandle> LinkableRepository for WarehouseManagerStore<C> {
    async fn find_linkable(&self, identification: &str) -> AppResult<Option<LinkableEntity>> {
        let found = self.find_by_identification(identification).await?;
        Ok(found.map(|m| LinkableEntity {
            id: m.id,
            user_id: m.employee.user_id,
        }))
    }

    async fn link_user(&self, entity_id: Uuid, user_id: Uuid) -> AppResult<()> {
        base::set_user_id::<warehouse_manager::Entity, _>(
            self.handle().conn(),
            warehouse_manager::Column::Id,
            warehouse_manager::Column::UserId,
            entity_id,
            user_id,
            "Jefe de almacén no encontrado",
        )
        .await
    }
}

/// Pick the store backing a role. `None` for roles without a linked record.
pub fn linkable_store<C: DbHandle>(db: C, role: Role) -> Option<Arc<dyn LinkableRepository>> {
    let store: Arc<dyn LinkableRepository> = match role {
        Role::Patient => Arc::new(PatientStore::new(db)),
        Role::Doctor => Arc::new(DoctorStore::new(db)),
        Role::Nurse => Arc::new(NurseStore::new(db)),
        Role::DepartmentHead => Arc::new(DepartmentHeadStore::new(db)),
        Role::WarehouseManager => Arc::new(WarehouseManagerStore::new(db)),
        Role::Admin => return None,
    };
    Some(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::AppError;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};

    fn affected(rows: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected: rows,
        }
    }

    fn patient_row(id: Uuid, user_id: Option<Uuid>) -> patient::Model {
        patient::Model {
            id,
            identification: "123".to_string(),
            name: "Ana Ruiz".to_string(),
            age: 40,
            contact: "555-0199".to_string(),
            address: "Av. Central 4".to_string(),
            user_id,
        }
    }

    #[tokio::test]
    async fn test_link_user_only_updates_unlinked_rows() {
        let db: DatabaseConnection = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([affected(1)])
            .into_connection();
        let store = PatientStore::new(db.clone());

        store
            .link_user(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap();

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("UPDATE"));
        assert!(log.contains("IS NULL"));
    }

    #[tokio::test]
    async fn test_link_user_on_linked_row_conflicts() {
        let patient_id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([affected(0)])
            .append_query_results([vec![patient_row(patient_id, Some(Uuid::new_v4()))]])
            .into_connection();

        let result = PatientStore::new(db)
            .link_user(patient_id, Uuid::new_v4())
            .await;

        assert!(matches!(
            result,
            Err(AppError::Conflict(msg)) if msg.contains("ya tiene una cuenta de usuario asociada")
        ));
    }

    #[tokio::test]
    async fn test_link_user_on_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([affected(0)])
            .append_query_results([Vec::<patient::Model>::new()])
            .into_connection();

        let result = PatientStore::new(db)
            .link_user(Uuid::new_v4(), Uuid::new_v4())
            .await;

        assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == "Paciente no encontrado"));
    }
}
