//! Medication catalog, department stock and medication usage.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;
use validator::Validate;

use super::lookup;
use crate::infra::UnitOfWork;
use common::{AppError, AppResult};
use domain::{
    CreateMedication, CreateMedicationUsage, CreateStockDepartment, Medication, MedicationUsage,
    StockDepartment, UpdateMedication, UpdateStockDepartment, UsageKind,
};

#[async_trait]
pub trait MedicationService: Send + Sync {
    async fn get(&self, id: Uuid) -> AppResult<Medication>;

    async fn list(&self) -> AppResult<Vec<Medication>>;

    async fn create(&self, dto: CreateMedication) -> AppResult<Medication>;

    async fn update(&self, id: Uuid, dto: UpdateMedication) -> AppResult<Medication>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct MedicationManager {
    uow: Arc<dyn UnitOfWork>,
}

impl MedicationManager {
    pub fn new(uow: Arc<dyn UnitOfWork>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl MedicationService for MedicationManager {
    async fn get(&self, id: Uuid) -> AppResult<Medication> {
        lookup::medication(self.uow.as_ref(), id).await
    }

    async fn list(&self) -> AppResult<Vec<Medication>> {
        self.uow.medications().list().await
    }

    async fn create(&self, dto: CreateMedication) -> AppResult<Medication> {
        dto.validate()?;
        let medication = self.uow.medications().create(Medication::new(dto)).await?;
        tracing::info!(
            medication_id = %medication.id,
            batch = %medication.batch,
            "Medication registered"
        );
        Ok(medication)
    }

    async fn update(&self, id: Uuid, dto: UpdateMedication) -> AppResult<Medication> {
        dto.validate()?;
        let mut medication = lookup::medication(self.uow.as_ref(), id).await?;
        medication.apply(dto);
        self.uow.medications().update(medication).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.uow.medications().delete(id).await
    }
}

#[async_trait]
pub trait StockService: Send + Sync {
    async fn get(&self, id: Uuid) -> AppResult<StockDepartment>;

    async fn list(&self) -> AppResult<Vec<StockDepartment>>;

    async fn list_by_department(&self, department_id: Uuid) -> AppResult<Vec<StockDepartment>>;

    /// Open a stock row. Each department keeps one row per medication.
    async fn create(&self, dto: CreateStockDepartment) -> AppResult<StockDepartment>;

    async fn update(&self, id: Uuid, dto: UpdateStockDepartment) -> AppResult<StockDepartment>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct StockManager {
    uow: Arc<dyn UnitOfWork>,
}

impl StockManager {
    pub fn new(uow: Arc<dyn UnitOfWork>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl StockService for StockManager {
    async fn get(&self, id: Uuid) -> AppResult<StockDepartment> {
        lookup::stock(self.uow.as_ref(), id).await
    }

    async fn list(&self) -> AppResult<Vec<StockDepartment>> {
        self.uow.stock().list().await
    }

    async fn list_by_department(&self, department_id: Uuid) -> AppResult<Vec<StockDepartment>> {
        lookup::department(self.uow.as_ref(), department_id).await?;
        self.uow.stock().list_by_department(department_id).await
    }

    async fn create(&self, dto: CreateStockDepartment) -> AppResult<StockDepartment> {
        dto.validate()?;
        let uow = self.uow.as_ref();
        let (department, medication) = futures::try_join!(
            lookup::department(uow, dto.department_id),
            lookup::medication(uow, dto.medication_id),
        )?;

        if self
            .uow
            .stock()
            .find_by_department_and_medication(department.id, medication.id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(format!(
                "El departamento '{}' ya tiene existencias de {}",
                department.name, medication.name
            )));
        }

        let stock = self.uow.stock().create(StockDepartment::new(dto)).await?;
        tracing::info!(
            stock_id = %stock.id,
            department_id = %stock.department_id,
            medication_id = %stock.medication_id,
            "Department stock opened"
        );
        Ok(stock)
    }

    async fn update(&self, id: Uuid, dto: UpdateStockDepartment) -> AppResult<StockDepartment> {
        dto.validate()?;
        let mut stock = lookup::stock(self.uow.as_ref(), id).await?;
        stock.update_quantities(dto.quantity, dto.min_quantity);

        if stock.is_below_minimum() {
            tracing::warn!(
                stock_id = %stock.id,
                quantity = stock.quantity,
                min_quantity = stock.min_quantity,
                "Department stock below minimum"
            );
        }
        self.uow.stock().update(stock).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.uow.stock().delete(id).await
    }
}

/// Medications consumed by consultations and emergency cares.
#[async_trait]
pub trait MedicationUsageService: Send + Sync {
    /// Record a usage against the consultation or care identified by
    /// `dto.record_id`.
    async fn record_usage(
        &self,
        kind: UsageKind,
        dto: CreateMedicationUsage,
    ) -> AppResult<MedicationUsage>;

    async fn list_by_record(&self, kind: UsageKind, record_id: Uuid)
        -> AppResult<Vec<MedicationUsage>>;

    async fn delete(&self, kind: UsageKind, id: Uuid) -> AppResult<()>;
}

pub struct MedicationUsageManager {
    uow: Arc<dyn UnitOfWork>,
}

impl MedicationUsageManager {
    pub fn new(uow: Arc<dyn UnitOfWork>) -> Self {
        Self { uow }
    }

    async fn ensure_record_exists(&self, kind: UsageKind, record_id: Uuid) -> AppResult<()> {
        let uow = self.uow.as_ref();
        match kind {
            UsageKind::Derivation => {
                lookup::consultation_derivation(uow, record_id).await?;
            }
            UsageKind::Referral => {
                lookup::consultation_referral(uow, record_id).await?;
            }
            UsageKind::Emergency => {
                lookup::emergency_care(uow, record_id).await?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl MedicationUsageService for MedicationUsageManager {
    async fn record_usage(
        &self,
        kind: UsageKind,
        dto: CreateMedicationUsage,
    ) -> AppResult<MedicationUsage> {
        dto.validate()?;
        futures::try_join!(
            self.ensure_record_exists(kind, dto.record_id),
            lookup::medication(self.uow.as_ref(), dto.medication_id),
        )?;

        let usage = MedicationUsage::new(kind, dto)?;
        let usage = self.uow.medication_usages(kind).create(usage).await?;

        tracing::info!(
            usage_id = %usage.id,
            kind = %kind,
            record_id = %usage.record_id,
            quantity = usage.quantity,
            "Medication usage recorded"
        );
        Ok(usage)
    }

    async fn list_by_record(
        &self,
        kind: UsageKind,
        record_id: Uuid,
    ) -> AppResult<Vec<MedicationUsage>> {
        self.ensure_record_exists(kind, record_id).await?;
        self.uow.medication_usages(kind).list_by_record(record_id).await
    }

    async fn delete(&self, kind: UsageKind, id: Uuid) -> AppResult<()> {
        self.uow.medication_usages(kind).delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use domain::Department;

    use crate::repository::{
        MockDepartmentRepository, MockEmergencyRoomCareRepository, MockMedicationRepository,
        MockMedicationUsageRepository, MockStockDepartmentRepository,
    };
    use crate::testing::MockUnitOfWork;

    fn medication() -> Medication {
        Medication::new(CreateMedication {
            name: "Paracetamol".into(),
            batch: "P-01".into(),
            expiration_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            quantity: 200,
        })
    }

    fn medications() -> MockMedicationRepository {
        let mut repo = MockMedicationRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(Some(medication())));
        repo
    }

    fn departments() -> MockDepartmentRepository {
        let mut repo = MockDepartmentRepository::new();
        repo.expect_find_by_id()
            .returning(|_| Ok(Some(Department::new("Urgencias".into(), None))));
        repo
    }

    fn stock_dto(quantity: i32) -> CreateStockDepartment {
        CreateStockDepartment {
            department_id: Uuid::new_v4(),
            medication_id: Uuid::new_v4(),
            quantity,
            min_quantity: 10,
        }
    }

    #[tokio::test]
    async fn test_stock_one_row_per_department_and_medication() {
        let mut stock = MockStockDepartmentRepository::new();
        stock
            .expect_find_by_department_and_medication()
            .returning(|_, _| Ok(Some(StockDepartment::new(stock_dto(5)))));
        stock.expect_create().never();

        let uow = MockUnitOfWork::new()
            .with_departments(departments())
            .with_medications(medications())
            .with_stock(stock);
        let result = StockManager::new(Arc::new(uow)).create(stock_dto(20)).await;

        assert!(matches!(result, Err(AppError::Conflict(msg)) if msg.contains("Paracetamol")));
    }

    #[tokio::test]
    async fn test_stock_rejects_negative_quantity() {
        let result = StockManager::new(Arc::new(MockUnitOfWork::new()))
            .create(stock_dto(-1))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_usage_requires_existing_care() {
        let mut cares = MockEmergencyRoomCareRepository::new();
        cares.expect_find_by_id().returning(|_| Ok(None));
        let mut usages = MockMedicationUsageRepository::new();
        usages.expect_create().never();

        let uow = MockUnitOfWork::new()
            .with_emergency_room_cares(cares)
            .with_medications(medications())
            .with_medication_usages(usages);
        let result = MedicationUsageManager::new(Arc::new(uow))
            .record_usage(
                UsageKind::Emergency,
                CreateMedicationUsage {
                    record_id: Uuid::new_v4(),
                    medication_id: Uuid::new_v4(),
                    quantity: 2,
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(AppError::NotFound(msg)) if msg == "Atención de urgencia no encontrada"
        ));
    }

    #[tokio::test]
    async fn test_usage_rejects_zero_quantity() {
        let result = MedicationUsageManager::new(Arc::new(MockUnitOfWork::new()))
            .record_usage(
                UsageKind::Derivation,
                CreateMedicationUsage {
                    record_id: Uuid::new_v4(),
                    medication_id: Uuid::new_v4(),
                    quantity: 0,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
