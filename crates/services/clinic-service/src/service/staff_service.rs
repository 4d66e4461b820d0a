//! Staff services: doctors, nurses, department heads and warehouse managers.
//!
//! Identification numbers are unique within each staff category. Members that
//! belong to a department can only point at a department that exists.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;
use validator::Validate;

use super::lookup::{self, duplicate_identification};
use crate::infra::UnitOfWork;
use common::{AppResult, OptionExt};
use domain::{
    CreateDepartmentHead, CreateDoctor, CreateNurse, CreateWarehouseManager, DepartmentHead,
    Doctor, Employee, Nurse, Role, UpdateDepartmentHead, UpdateDoctor, UpdateNurse,
    UpdateWarehouseManager, WarehouseManager,
};

// =============================================================================
// Doctor
// =============================================================================

#[async_trait]
pub trait DoctorService: Send + Sync {
    async fn get(&self, id: Uuid) -> AppResult<Doctor>;

    async fn list(&self) -> AppResult<Vec<Doctor>>;

    async fn list_by_department(&self, department_id: Uuid) -> AppResult<Vec<Doctor>>;

    async fn create(&self, dto: CreateDoctor) -> AppResult<Doctor>;

    async fn update(&self, id: Uuid, dto: UpdateDoctor) -> AppResult<Doctor>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct DoctorManager {
    uow: Arc<dyn UnitOfWork>,
}

impl DoctorManager {
    pub fn new(uow: Arc<dyn UnitOfWork>) -> Self {
        Self { uow }
    }

    async fn ensure_identification_free(&self, identification: &str) -> AppResult<()> {
        let taken = self.uow.doctors().find_by_identification(identification).await?;
        match taken {
            Some(_) => Err(duplicate_identification(Role::Doctor, identification)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DoctorService for DoctorManager {
    async fn get(&self, id: Uuid) -> AppResult<Doctor> {
        lookup::doctor(self.uow.as_ref(), id).await
    }

    async fn list(&self) -> AppResult<Vec<Doctor>> {
        self.uow.doctors().list().await
    }

    async fn list_by_department(&self, department_id: Uuid) -> AppResult<Vec<Doctor>> {
        self.uow.doctors().list_by_department(department_id).await
    }

    async fn create(&self, dto: CreateDoctor) -> AppResult<Doctor> {
        dto.validate()?;
        self.ensure_identification_free(&dto.identification).await?;
        lookup::department(self.uow.as_ref(), dto.department_id).await?;

        let employee = Employee::new(dto.identification, dto.name, dto.status);
        let doctor = Doctor::new(employee, dto.department_id, dto.specialty);
        let doctor = self.uow.doctors().create(doctor).await?;

        tracing::info!(doctor_id = %doctor.id, "Doctor created");
        Ok(doctor)
    }

    async fn update(&self, id: Uuid, dto: UpdateDoctor) -> AppResult<Doctor> {
        dto.validate()?;
        let mut doctor = lookup::doctor(self.uow.as_ref(), id).await?;

        if let Some(identification) = dto.identification.as_deref() {
            if identification != doctor.employee.identification {
                self.ensure_identification_free(identification).await?;
            }
        }
        if let Some(department_id) = dto.department_id {
            lookup::department(self.uow.as_ref(), department_id).await?;
        }

        doctor.apply(dto);
        self.uow.doctors().update(doctor).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.uow.doctors().delete(id).await
    }
}

// =============================================================================
// Nurse
// =============================================================================

#[async_trait]
pub trait NurseService: Send + Sync {
    async fn get(&self, id: Uuid) -> AppResult<Nurse>;

    async fn list(&self) -> AppResult<Vec<Nurse>>;

    async fn list_by_department(&self, department_id: Uuid) -> AppResult<Vec<Nurse>>;

    async fn create(&self, dto: CreateNurse) -> AppResult<Nurse>;

    async fn update(&self, id: Uuid, dto: UpdateNurse) -> AppResult<Nurse>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct NurseManager {
    uow: Arc<dyn UnitOfWork>,
}

impl NurseManager {
    pub fn new(uow: Arc<dyn UnitOfWork>) -> Self {
        Self { uow }
    }

    async fn ensure_identification_free(&self, identification: &str) -> AppResult<()> {
        let taken = self.uow.nurses().find_by_identification(identification).await?;
        match taken {
            Some(_) => Err(duplicate_identification(Role::Nurse, identification)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl NurseService for NurseManager {
    async fn get(&self, id: Uuid) -> AppResult<Nurse> {
        self.uow
            .nurses()
            .find_by_id(id)
            .await?
            .ok_or_not_found(lookup::NURSE_NOT_FOUND)
    }

    async fn list(&self) -> AppResult<Vec<Nurse>> {
        self.uow.nurses().list().await
    }

    async fn list_by_department(&self, department_id: Uuid) -> AppResult<Vec<Nurse>> {
        self.uow.nurses().list_by_department(department_id).await
    }

    async fn create(&self, dto: CreateNurse) -> AppResult<Nurse> {
        dto.validate()?;
        self.ensure_identification_free(&dto.identification).await?;
        lookup::department(self.uow.as_ref(), dto.department_id).await?;

        let employee = Employee::new(dto.identification, dto.name, dto.status);
        let nurse = self
            .uow
            .nurses()
            .create(Nurse::new(employee, dto.department_id))
            .await?;

        tracing::info!(nurse_id = %nurse.id, "Nurse created");
        Ok(nurse)
    }

    async fn update(&self, id: Uuid, dto: UpdateNurse) -> AppResult<Nurse> {
        dto.validate()?;
        let mut nurse = self.get(id).await?;

        if let Some(identification) = dto.identification.as_deref() {
            if identification != nurse.employee.identification {
                self.ensure_identification_free(identification).await?;
            }
        }
        if let Some(department_id) = dto.department_id {
            lookup::department(self.uow.as_ref(), department_id).await?;
        }

        nurse.apply(dto);
        self.uow.nurses().update(nurse).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.uow.nurses().delete(id).await
    }
}

// =============================================================================
// Department head
// =============================================================================

#[async_trait]
pub trait DepartmentHeadService: Send + Sync {
    async fn get(&self, id: Uuid) -> AppResult<DepartmentHead>;

    async fn list(&self) -> AppResult<Vec<DepartmentHead>>;

    async fn list_by_department(&self, department_id: Uuid) -> AppResult<Vec<DepartmentHead>>;

    async fn create(&self, dto: CreateDepartmentHead) -> AppResult<DepartmentHead>;

    async fn update(&self, id: Uuid, dto: UpdateDepartmentHead) -> AppResult<DepartmentHead>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct DepartmentHeadManager {
    uow: Arc<dyn UnitOfWork>,
}

impl DepartmentHeadManager {
    pub fn new(uow: Arc<dyn UnitOfWork>) -> Self {
        Self { uow }
    }

    async fn ensure_identification_free(&self, identification: &str) -> AppResult<()> {
        let taken = self
            .uow
            .department_heads()
            .find_by_identification(identification)
            .await?;
        match taken {
            Some(_) => Err(duplicate_identification(Role::DepartmentHead, identification)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DepartmentHeadService for DepartmentHeadManager {
    async fn get(&self, id: Uuid) -> AppResult<DepartmentHead> {
        lookup::department_head(self.uow.as_ref(), id).await
    }

    async fn list(&self) -> AppResult<Vec<DepartmentHead>> {
        self.uow.department_heads().list().await
    }

    async fn list_by_department(&self, department_id: Uuid) -> AppResult<Vec<DepartmentHead>> {
        self.uow
            .department_heads()
            .list_by_department(department_id)
            .await
    }

    async fn create(&self, dto: CreateDepartmentHead) -> AppResult<DepartmentHead> {
        dto.validate()?;
        self.ensure_identification_free(&dto.identification).await?;
        lookup::department(self.uow.as_ref(), dto.department_id).await?;

        let employee = Employee::new(dto.identification, dto.name, dto.status);
        let head = DepartmentHead::new(employee, dto.department_id, dto.appointed_on);
        let head = self.uow.department_heads().create(head).await?;

        tracing::info!(
            head_id = %head.id,
            department_id = %head.department_id,
            "Department head appointed"
        );
        Ok(head)
    }

    async fn update(&self, id: Uuid, dto: UpdateDepartmentHead) -> AppResult<DepartmentHead> {
        dto.validate()?;
        let mut head = lookup::department_head(self.uow.as_ref(), id).await?;

        if let Some(identification) = dto.identification.as_deref() {
            if identification != head.employee.identification {
                self.ensure_identification_free(identification).await?;
            }
        }
        if let Some(department_id) = dto.department_id {
            lookup::department(self.uow.as_ref(), department_id).await?;
        }

        head.apply(dto);
        self.uow.department_heads().update(head).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.uow.department_heads().delete(id).await
    }
}

// =============================================================================
// Warehouse manager
// =============================================================================

#[async_trait]
pub trait WarehouseManagerService: Send + Sync {
    async fn get(&self, id: Uuid) -> AppResult<WarehouseManager>;

    async fn list(&self) -> AppResult<Vec<WarehouseManager>>;

    async fn create(&self, dto: CreateWarehouseManager) -> AppResult<WarehouseManager>;

    async fn update(&self, id: Uuid, dto: UpdateWarehouseManager) -> AppResult<WarehouseManager>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Service over warehouse manager records.
pub struct WarehouseStaffManager {
    uow: Arc<dyn UnitOfWork>,
}

impl WarehouseStaffManager {
    pub fn new(uow: Arc<dyn UnitOfWork>) -> Self {
        Self { uow }
    }

    async fn ensure_identification_free(&self, identification: &str) -> AppResult<()> {
        let taken = self
            .uow
            .warehouse_managers()
            .find_by_identification(identification)
            .await?;
        match taken {
            Some(_) => Err(duplicate_identification(Role::WarehouseManager, identification)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl WarehouseManagerService for WarehouseStaffManager {
    async fn get(&self, id: Uuid) -> AppResult<WarehouseManager> {
        self.uow
            .warehouse_managers()
            .find_by_id(id)
            .await?
            .ok_or_not_found(lookup::WAREHOUSE_MANAGER_NOT_FOUND)
    }

    async fn list(&self) -> AppResult<Vec<WarehouseManager>> {
        self.uow.warehouse_managers().list().await
    }

    async fn create(&self, dto: CreateWarehouseManager) -> AppResult<WarehouseManager> {
        dto.validate()?;
        self.ensure_identification_free(&dto.identification).await?;

        let employee = Employee::new(dto.identification, dto.name, dto.status);
        let manager = self
            .uow
            .warehouse_managers()
            .create(WarehouseManager::new(employee, dto.warehouse))
            .await?;

        tracing::info!(manager_id = %manager.id, "Warehouse manager created");
        Ok(manager)
    }

    async fn update(&self, id: Uuid, dto: UpdateWarehouseManager) -> AppResult<WarehouseManager> {
        dto.validate()?;
        let mut manager = self.get(id).await?;

        if let Some(identification) = dto.identification.as_deref() {
            if identification != manager.employee.identification {
                self.ensure_identification_free(identification).await?;
            }
        }

        manager.apply(dto);
        self.uow.warehouse_managers().update(manager).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.uow.warehouse_managers().delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{
        MockDepartmentRepository, MockDoctorRepository, MockNurseRepository,
        MockWarehouseManagerRepository,
    };
    use crate::testing::MockUnitOfWork;
    use common::AppError;
    use domain::Department;

    fn departments_with(department: Department) -> MockDepartmentRepository {
        let mut repo = MockDepartmentRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(department.clone())));
        repo
    }

    fn doctor_dto(department_id: Uuid) -> CreateDoctor {
        CreateDoctor {
            identification: "D-100".to_string(),
            name: "Carlos Pérez".to_string(),
            status: None,
            department_id,
            specialty: "Cardiología".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_doctor_success() {
        let department = Department::new("Cardiología".to_string(), None);
        let department_id = department.id;

        let mut doctors = MockDoctorRepository::new();
        doctors.expect_find_by_identification().returning(|_| Ok(None));
        doctors.expect_create().times(1).returning(Ok);

        let uow = MockUnitOfWork::new()
            .with_doctors(doctors)
            .with_departments(departments_with(department));
        let service = DoctorManager::new(Arc::new(uow));

        let doctor = service.create(doctor_dto(department_id)).await.unwrap();

        assert_eq!(doctor.department_id, department_id);
        assert!(!doctor.employee.is_linked());
    }

    #[tokio::test]
    async fn test_create_doctor_duplicate_identification() {
        let mut doctors = MockDoctorRepository::new();
        doctors.expect_find_by_identification().returning(|_| {
            let employee = Employee::new("D-100".into(), "Otro".into(), None);
            Ok(Some(Doctor::new(employee, Uuid::new_v4(), "Pediatría".into())))
        });
        doctors.expect_create().never();

        let service = DoctorManager::new(Arc::new(MockUnitOfWork::new().with_doctors(doctors)));
        let result = service.create(doctor_dto(Uuid::new_v4())).await;

        match result {
            Err(AppError::Conflict(msg)) => {
                assert_eq!(msg, "El doctor con identificación D-100 ya existe")
            }
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_doctor_unknown_department() {
        let mut doctors = MockDoctorRepository::new();
        doctors.expect_find_by_identification().returning(|_| Ok(None));
        doctors.expect_create().never();

        let mut departments = MockDepartmentRepository::new();
        departments.expect_find_by_id().returning(|_| Ok(None));

        let uow = MockUnitOfWork::new()
            .with_doctors(doctors)
            .with_departments(departments);
        let result = DoctorManager::new(Arc::new(uow))
            .create(doctor_dto(Uuid::new_v4()))
            .await;

        assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == "Departamento no encontrado"));
    }

    #[tokio::test]
    async fn test_create_nurse_duplicate_identification() {
        let mut nurses = MockNurseRepository::new();
        nurses.expect_find_by_identification().returning(|_| {
            let employee = Employee::new("N-7".into(), "Laura Gil".into(), None);
            Ok(Some(Nurse::new(employee, Uuid::new_v4())))
        });
        nurses.expect_create().never();

        let service = NurseManager::new(Arc::new(MockUnitOfWork::new().with_nurses(nurses)));
        let result = service
            .create(CreateNurse {
                identification: "N-7".to_string(),
                name: "Laura Gil".to_string(),
                status: None,
                department_id: Uuid::new_v4(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Conflict(msg)) if msg.contains("N-7")));
    }

    #[tokio::test]
    async fn test_create_warehouse_manager_duplicate_identification() {
        let mut managers = MockWarehouseManagerRepository::new();
        managers.expect_find_by_identification().returning(|_| {
            let employee = Employee::new("W-1".into(), "Pedro Sanz".into(), None);
            Ok(Some(WarehouseManager::new(employee, "Central".into())))
        });
        managers.expect_create().never();

        let service = WarehouseStaffManager::new(Arc::new(
            MockUnitOfWork::new().with_warehouse_managers(managers),
        ));
        let result = service
            .create(CreateWarehouseManager {
                identification: "W-1".to_string(),
                name: "Pedro Sanz".to_string(),
                status: None,
                warehouse: "Central".to_string(),
            })
            .await;

        assert!(matches!(
            result,
            Err(AppError::Conflict(msg)) if msg == "El jefe de almacén con identificación W-1 ya existe"
        ));
    }

    #[tokio::test]
    async fn test_update_doctor_keeps_own_identification() {
        let employee = Employee::new("D-100".into(), "Carlos Pérez".into(), None);
        let doctor = Doctor::new(employee, Uuid::new_v4(), "Cardiología".into());
        let id = doctor.id;

        let mut doctors = MockDoctorRepository::new();
        doctors
            .expect_find_by_id()
            .returning(move |_| Ok(Some(doctor.clone())));
        doctors.expect_find_by_identification().never();
        doctors.expect_update().times(1).returning(Ok);

        let service = DoctorManager::new(Arc::new(MockUnitOfWork::new().with_doctors(doctors)));
        let updated = service
            .update(
                id,
                UpdateDoctor {
                    identification: Some("D-100".to_string()),
                    specialty: Some("Neurología".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.specialty, "Neurología");
    }
}
