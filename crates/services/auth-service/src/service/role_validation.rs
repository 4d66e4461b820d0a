//! Checks applied to the roles requested at registration or role assignment.
//!
//! Every role except `Admin` must be backed by an existing clinical record,
//! found by identification number, that is not yet linked to an account.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use clinic_service_lib::infra::UnitOfWork;
use clinic_service_lib::repository::LinkableRepository;
use common::{AppError, AppResult};
use domain::{EntityLink, Role, ValidationData};

pub const NO_ROLES: &str = "Debe especificar al menos un rol";
pub const ADMIN_NOT_ALLOWED: &str = "El rol Admin no puede asignarse durante el registro";
pub const DOCTOR_NURSE_CONFLICT: &str =
    "Un usuario no puede tener los roles Doctor y Nurse simultáneamente";
pub const IDENTIFICATION_REQUIRED: &str =
    "Se requiere el número de identificación para los roles solicitados";

#[async_trait]
pub trait RoleValidationService: Send + Sync {
    /// Parse role names. Fails on an empty list, an unknown name or `Admin`.
    /// Duplicates are dropped, order is kept.
    fn validate_roles_exist(&self, roles: &[String]) -> AppResult<Vec<Role>>;

    /// Reject role sets that cannot be held together.
    fn validate_roles_combination(&self, roles: &[Role]) -> AppResult<()>;

    /// Every role must have a record with the supplied identification.
    async fn validate_required_data_for_roles(
        &self,
        roles: &[Role],
        data: Option<&ValidationData>,
    ) -> AppResult<()>;

    /// Fails if a record behind one of the roles already has an account.
    /// Returns the records to link. Roles without a record are skipped.
    async fn validate_entity_not_linked(
        &self,
        roles: &[Role],
        data: Option<&ValidationData>,
    ) -> AppResult<Vec<EntityLink>>;
}

pub struct RoleValidator {
    uow: Arc<dyn UnitOfWork>,
}

impl RoleValidator {
    pub fn new(uow: Arc<dyn UnitOfWork>) -> Self {
        Self { uow }
    }

    fn store(&self, role: Role) -> AppResult<Arc<dyn LinkableRepository>> {
        self.uow.linkable(role).ok_or_else(|| {
            AppError::validation(format!("El rol {} no se vincula a ningún registro", role))
        })
    }
}

#[async_trait]
impl RoleValidationService for RoleValidator {
    fn validate_roles_exist(&self, roles: &[String]) -> AppResult<Vec<Role>> {
        if roles.is_empty() {
            return Err(AppError::validation(NO_ROLES));
        }

        let mut seen = HashSet::new();
        let mut parsed = Vec::with_capacity(roles.len());
        for name in roles {
            let role: Role = name.parse()?;
            if role.is_admin() {
                return Err(AppError::validation(ADMIN_NOT_ALLOWED));
            }
            if seen.insert(role) {
                parsed.push(role);
            }
        }
        Ok(parsed)
    }

    fn validate_roles_combination(&self, roles: &[Role]) -> AppResult<()> {
        if roles.contains(&Role::Doctor) && roles.contains(&Role::Nurse) {
            return Err(AppError::validation(DOCTOR_NURSE_CONFLICT));
        }
        Ok(())
    }

    async fn validate_required_data_for_roles(
        &self,
        roles: &[Role],
        data: Option<&ValidationData>,
    ) -> AppResult<()> {
        let data = data.ok_or_else(|| AppError::validation(IDENTIFICATION_REQUIRED))?;
        let identification = data.identification_number.as_str();

        let mut missing = Vec::new();
        for &role in roles {
            if self.store(role)?.find_linkable(identification).await?.is_none() {
                missing.push(role.as_str());
            }
        }

        if !missing.is_empty() {
            tracing::warn!(%identification, roles = ?missing, "No record behind requested roles");
            return Err(AppError::validation(format!(
                "No existe un registro con identificación {} para los roles: {}",
                identification,
                missing.join(", ")
            )));
        }
        Ok(())
    }

    async fn validate_entity_not_linked(
        &self,
        roles: &[Role],
        data: Option<&ValidationData>,
    ) -> AppResult<Vec<EntityLink>> {
        let Some(data) = data else {
            return Ok(Vec::new());
        };
        let identification = data.identification_number.as_str();

        let mut links = Vec::with_capacity(roles.len());
        for &role in roles {
            let Some(entity) = self.store(role)?.find_linkable(identification).await? else {
                continue;
            };
            if entity.is_linked() {
                return Err(AppError::conflict(format!(
                    "{} con identificación {} ya tiene una cuenta de usuario asociada",
                    role.entity_label(),
                    identification
                )));
            }
            links.push(EntityLink {
                role,
                entity_id: entity.id,
            });
        }
        Ok(links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_service_lib::repository::MockLinkableRepository;
    use clinic_service_lib::testing::MockUnitOfWork;
    use domain::LinkableEntity;
    use uuid::Uuid;

    fn validator(uow: MockUnitOfWork) -> RoleValidator {
        RoleValidator::new(Arc::new(uow))
    }

    fn names(roles: &[&str]) -> Vec<String> {
        roles.iter().map(|r| r.to_string()).collect()
    }

    fn store_with(entity: Option<LinkableEntity>) -> MockLinkableRepository {
        let mut repo = MockLinkableRepository::new();
        repo.expect_find_linkable().returning(move |_| Ok(entity));
        repo
    }

    #[test]
    fn test_roles_exist_rejects_empty_list() {
        let result = validator(MockUnitOfWork::new()).validate_roles_exist(&[]);
        assert!(matches!(result, Err(AppError::Validation(msg)) if msg == NO_ROLES));
    }

    #[test]
    fn test_roles_exist_rejects_unknown_role() {
        let result = validator(MockUnitOfWork::new()).validate_roles_exist(&names(&["Surgeon"]));
        assert!(matches!(result, Err(AppError::Validation(msg)) if msg.contains("Surgeon")));
    }

    #[test]
    fn test_roles_exist_rejects_admin() {
        let result =
            validator(MockUnitOfWork::new()).validate_roles_exist(&names(&["Patient", "Admin"]));
        assert!(matches!(result, Err(AppError::Validation(msg)) if msg == ADMIN_NOT_ALLOWED));
    }

    #[test]
    fn test_roles_exist_drops_duplicates() {
        let roles = validator(MockUnitOfWork::new())
            .validate_roles_exist(&names(&["Patient", "DepartmentHead", "Patient"]))
            .unwrap();
        assert_eq!(roles, vec![Role::Patient, Role::DepartmentHead]);
    }

    #[test]
    fn test_doctor_and_nurse_conflict() {
        let service = validator(MockUnitOfWork::new());
        let result = service.validate_roles_combination(&[Role::Nurse, Role::Patient, Role::Doctor]);
        assert!(matches!(result, Err(AppError::Validation(msg)) if msg == DOCTOR_NURSE_CONFLICT));
        assert!(service
            .validate_roles_combination(&[Role::Doctor, Role::DepartmentHead])
            .is_ok());
    }

    #[tokio::test]
    async fn test_required_data_missing() {
        let result = validator(MockUnitOfWork::new())
            .validate_required_data_for_roles(&[Role::Patient], None)
            .await;
        assert!(matches!(result, Err(AppError::Validation(msg)) if msg == IDENTIFICATION_REQUIRED));
    }

    #[tokio::test]
    async fn test_required_data_lists_every_missing_role() {
        let uow = MockUnitOfWork::new()
            .with_linkable(Role::Doctor, store_with(None))
            .with_linkable(
                Role::Patient,
                store_with(Some(LinkableEntity {
                    id: Uuid::new_v4(),
                    user_id: None,
                })),
            )
            .with_linkable(Role::DepartmentHead, store_with(None));

        let data = ValidationData::new("123");
        let result = validator(uow)
            .validate_required_data_for_roles(
                &[Role::Doctor, Role::Patient, Role::DepartmentHead],
                Some(&data),
            )
            .await;

        match result {
            Err(AppError::Validation(msg)) => {
                assert!(msg.contains("Doctor, DepartmentHead"));
                assert!(!msg.contains("Patient"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_entity_already_linked_for_every_role() {
        for role in Role::LINKABLE {
            let uow = MockUnitOfWork::new().with_linkable(
                role,
                store_with(Some(LinkableEntity {
                    id: Uuid::new_v4(),
                    user_id: Some(Uuid::new_v4()),
                })),
            );

            let data = ValidationData::new("123");
            let result = validator(uow)
                .validate_entity_not_linked(&[role], Some(&data))
                .await;

            match result {
                Err(AppError::Conflict(msg)) => {
                    assert!(msg.starts_with(role.entity_label()));
                    assert!(msg.ends_with("ya tiene una cuenta de usuario asociada"));
                }
                other => panic!("expected conflict for {}, got {:?}", role, other),
            }
        }
    }

    #[tokio::test]
    async fn test_entity_not_linked_returns_links() {
        let entity_id = Uuid::new_v4();
        let uow = MockUnitOfWork::new()
            .with_linkable(
                Role::Patient,
                store_with(Some(LinkableEntity {
                    id: entity_id,
                    user_id: None,
                })),
            )
            .with_linkable(Role::Nurse, store_with(None));

        let data = ValidationData::new("123");
        let links = validator(uow)
            .validate_entity_not_linked(&[Role::Patient, Role::Nurse], Some(&data))
            .await
            .unwrap();

        assert_eq!(
            links,
            vec![EntityLink {
                role: Role::Patient,
                entity_id
            }]
        );
    }
}
