//! Department requests to the central warehouse.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;
use validator::Validate;

use super::lookup;
use crate::infra::UnitOfWork;
use common::AppResult;
use domain::{
    ChangeRequestStatus, CreateMedicationRequest, CreateWarehouseRequest, MedicationRequest,
    UpdateWarehouseRequest, WarehouseRequest,
};

#[async_trait]
pub trait WarehouseRequestService: Send + Sync {
    async fn get(&self, id: Uuid) -> AppResult<WarehouseRequest>;

    async fn list(&self) -> AppResult<Vec<WarehouseRequest>>;

    async fn create(&self, dto: CreateWarehouseRequest) -> AppResult<WarehouseRequest>;

    async fn update(&self, id: Uuid, dto: UpdateWarehouseRequest) -> AppResult<WarehouseRequest>;

    /// Replace the free-text status of a request.
    async fn change_status(
        &self,
        id: Uuid,
        dto: ChangeRequestStatus,
    ) -> AppResult<WarehouseRequest>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Add a medication line to a request.
    async fn add_medication(
        &self,
        request_id: Uuid,
        dto: CreateMedicationRequest,
    ) -> AppResult<MedicationRequest>;

    async fn list_lines(&self, request_id: Uuid) -> AppResult<Vec<MedicationRequest>>;

    async fn remove_line(&self, line_id: Uuid) -> AppResult<()>;
}

pub struct WarehouseRequestManager {
    uow: Arc<dyn UnitOfWork>,
}

impl WarehouseRequestManager {
    pub fn new(uow: Arc<dyn UnitOfWork>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl WarehouseRequestService for WarehouseRequestManager {
    async fn get(&self, id: Uuid) -> AppResult<WarehouseRequest> {
        lookup::warehouse_request(self.uow.as_ref(), id).await
    }

    async fn list(&self) -> AppResult<Vec<WarehouseRequest>> {
        self.uow.warehouse_requests().list().await
    }

    async fn create(&self, dto: CreateWarehouseRequest) -> AppResult<WarehouseRequest> {
        dto.validate()?;
        lookup::department(self.uow.as_ref(), dto.department_id).await?;

        let request = self
            .uow
            .warehouse_requests()
            .create(WarehouseRequest::new(dto))
            .await?;

        tracing::info!(
            request_id = %request.id,
            department_id = %request.department_id,
            status = %request.status,
            "Warehouse request created"
        );
        Ok(request)
    }

    async fn update(&self, id: Uuid, dto: UpdateWarehouseRequest) -> AppResult<WarehouseRequest> {
        dto.validate()?;
        let mut request = lookup::warehouse_request(self.uow.as_ref(), id).await?;
        if let Some(department_id) = dto.department_id {
            lookup::department(self.uow.as_ref(), department_id).await?;
        }

        request.apply(dto);
        self.uow.warehouse_requests().update(request).await
    }

    async fn change_status(
        &self,
        id: Uuid,
        dto: ChangeRequestStatus,
    ) -> AppResult<WarehouseRequest> {
        dto.validate()?;
        let mut request = lookup::warehouse_request(self.uow.as_ref(), id).await?;
        let previous = std::mem::take(&mut request.status);
        request.change_status(dto.status);

        let request = self.uow.warehouse_requests().update(request).await?;
        tracing::info!(
            request_id = %request.id,
            from = %previous,
            to = %request.status,
            "Warehouse request status changed"
        );
        Ok(request)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.uow.warehouse_requests().delete(id).await
    }

    async fn add_medication(
        &self,
        request_id: Uuid,
        dto: CreateMedicationRequest,
    ) -> AppResult<MedicationRequest> {
        dto.validate()?;
        let uow = self.uow.as_ref();
        futures::try_join!(
            lookup::warehouse_request(uow, request_id),
            lookup::medication(uow, dto.medication_id),
        )?;

        self.uow
            .medication_requests()
            .create(MedicationRequest::new(request_id, dto))
            .await
    }

    async fn list_lines(&self, request_id: Uuid) -> AppResult<Vec<MedicationRequest>> {
        lookup::warehouse_request(self.uow.as_ref(), request_id).await?;
        self.uow.medication_requests().list_by_request(request_id).await
    }

    async fn remove_line(&self, line_id: Uuid) -> AppResult<()> {
        self.uow.medication_requests().delete(line_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use common::AppError;

    use crate::repository::{
        MockDepartmentRepository, MockMedicationRepository, MockMedicationRequestRepository,
        MockWarehouseRequestRepository,
    };
    use crate::testing::MockUnitOfWork;

    fn request() -> WarehouseRequest {
        WarehouseRequest::new(CreateWarehouseRequest {
            department_id: Uuid::new_v4(),
            request_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            status: None,
        })
    }

    #[tokio::test]
    async fn test_create_request_defaults_status() {
        let mut departments = MockDepartmentRepository::new();
        departments
            .expect_find_by_id()
            .returning(|_| Ok(Some(domain::Department::new("Farmacia".into(), None))));
        let mut requests = MockWarehouseRequestRepository::new();
        requests.expect_create().times(1).returning(Ok);

        let uow = MockUnitOfWork::new()
            .with_departments(departments)
            .with_warehouse_requests(requests);
        let created = WarehouseRequestManager::new(Arc::new(uow))
            .create(CreateWarehouseRequest {
                department_id: Uuid::new_v4(),
                request_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
                status: None,
            })
            .await
            .unwrap();

        assert_eq!(created.status, domain::DEFAULT_REQUEST_STATUS);
    }

    #[tokio::test]
    async fn test_change_status() {
        let existing = request();
        let id = existing.id;

        let mut requests = MockWarehouseRequestRepository::new();
        requests
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        requests.expect_update().times(1).returning(Ok);

        let service = WarehouseRequestManager::new(Arc::new(
            MockUnitOfWork::new().with_warehouse_requests(requests),
        ));
        let updated = service
            .change_status(
                id,
                ChangeRequestStatus {
                    status: "Aprobada".into(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, "Aprobada");
    }

    #[tokio::test]
    async fn test_add_medication_to_missing_request() {
        let mut requests = MockWarehouseRequestRepository::new();
        requests.expect_find_by_id().returning(|_| Ok(None));
        let mut medications = MockMedicationRepository::new();
        medications.expect_find_by_id().returning(|_| Ok(None));
        let mut lines = MockMedicationRequestRepository::new();
        lines.expect_create().never();

        let uow = MockUnitOfWork::new()
            .with_warehouse_requests(requests)
            .with_medications(medications)
            .with_medication_requests(lines);
        let result = WarehouseRequestManager::new(Arc::new(uow))
            .add_medication(
                Uuid::new_v4(),
                CreateMedicationRequest {
                    medication_id: Uuid::new_v4(),
                    quantity: 3,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
