//! Emergency room guard shifts and the care given during them.

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::base::{self, DbHandle};
use super::entities::{emergency_room, emergency_room_care};
use common::AppResult;
use domain::{EmergencyRoom, EmergencyRoomCare};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EmergencyRoomRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<EmergencyRoom>>;

    /// The guard a doctor is scheduled for on a given day, if any
    async fn find_guard(&self, doctor_id: Uuid, date: NaiveDate)
        -> AppResult<Option<EmergencyRoom>>;

    async fn list(&self) -> AppResult<Vec<EmergencyRoom>>;

    async fn list_by_date(&self, date: NaiveDate) -> AppResult<Vec<EmergencyRoom>>;

    async fn create(&self, guard: EmergencyRoom) -> AppResult<EmergencyRoom>;

    async fn update(&self, guard: EmergencyRoom) -> AppResult<EmergencyRoom>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct EmergencyRoomStore<C = DatabaseConnection> {
    db: C,
}

impl<C: DbHandle> EmergencyRoomStore<C> {
    pub fn new(db: C) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<C: DbHandle> EmergencyRoomRepository for EmergencyRoomStore<C> {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<EmergencyRoom>> {
        base::find_by_id::<emergency_room::Entity, EmergencyRoom, _>(self.db.conn(), id).await
    }

    async fn find_guard(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<EmergencyRoom>> {
        let result = emergency_room::Entity::find()
            .filter(emergency_room::Column::DoctorId.eq(doctor_id))
            .filter(emergency_room::Column::GuardDate.eq(date))
            .one(self.db.conn())
            .await?;

        Ok(result.map(EmergencyRoom::from))
    }

    async fn list(&self) -> AppResult<Vec<EmergencyRoom>> {
        let models = emergency_room::Entity::find()
            .order_by_desc(emergency_room::Column::GuardDate)
            .all(self.db.conn())
            .await?;

        Ok(models.into_iter().map(EmergencyRoom::from).collect())
    }

    async fn list_by_date(&self, date: NaiveDate) -> AppResult<Vec<EmergencyRoom>> {
        let models = emergency_room::Entity::find()
            .filter(emergency_room::Column::GuardDate.eq(date))
            .all(self.db.conn())
            .await?;

        Ok(models.into_iter().map(EmergencyRoom::from).collect())
    }

    async fn create(&self, guard: EmergencyRoom) -> AppResult<EmergencyRoom> {
        base::insert(self.db.conn(), emergency_room::ActiveModel::from(guard)).await
    }

    async fn update(&self, guard: EmergencyRoom) -> AppResult<EmergencyRoom> {
        base::update(self.db.conn(), emergency_room::ActiveModel::from(guard)).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        base::delete_by_id::<emergency_room::Entity, _>(self.db.conn(), id, "Guardia no encontrada")
            .await
    }
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EmergencyRoomCareRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<EmergencyRoomCare>>;

    async fn list(&self) -> AppResult<Vec<EmergencyRoomCare>>;

    async fn list_by_patient(&self, patient_id: Uuid) -> AppResult<Vec<EmergencyRoomCare>>;

    /// Cares recorded under one guard slot
    async fn list_by_guard(&self, emergency_room_id: Uuid) -> AppResult<Vec<EmergencyRoomCare>>;

    async fn create(&self, care: EmergencyRoomCare) -> AppResult<EmergencyRoomCare>;

    async fn update(&self, care: EmergencyRoomCare) -> AppResult<EmergencyRoomCare>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct EmergencyRoomCareStore<C = DatabaseConnection> {
    db: C,
}

impl<C: DbHandle> EmergencyRoomCareStore<C> {
    pub fn new(db: C) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<C: DbHandle> EmergencyRoomCareRepository for EmergencyRoomCareStore<C> {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<EmergencyRoomCare>> {
        base::find_by_id::<emergency_room_care::Entity, EmergencyRoomCare, _>(self.db.conn(), id)
            .await
    }

    async fn list(&self) -> AppResult<Vec<EmergencyRoomCare>> {
        let models = emergency_room_care::Entity::find()
            .order_by_desc(emergency_room_care::Column::CareDate)
            .all(self.db.conn())
            .await?;

        Ok(models.into_iter().map(EmergencyRoomCare::from).collect())
    }

    async fn list_by_patient(&self, patient_id: Uuid) -> AppResult<Vec<EmergencyRoomCare>> {
        let models = emergency_room_care::Entity::find()
            .filter(emergency_room_care::Column::PatientId.eq(patient_id))
            .order_by_desc(emergency_room_care::Column::CareDate)
            .all(self.db.conn())
            .await?;

        Ok(models.into_iter().map(EmergencyRoomCare::from).collect())
    }

    async fn list_by_guard(&self, emergency_room_id: Uuid) -> AppResult<Vec<EmergencyRoomCare>> {
        let models = emergency_room_care::Entity::find()
            .filter(emergency_room_care::Column::EmergencyRoomId.eq(emergency_room_id))
            .order_by_asc(emergency_room_care::Column::CareDate)
            .all(self.db.conn())
            .await?;

        Ok(models.into_iter().map(EmergencyRoomCare::from).collect())
    }

    async fn create(&self, care: EmergencyRoomCare) -> AppResult<EmergencyRoomCare> {
        base::insert(self.db.conn(), emergency_room_care::ActiveModel::from(care)).await
    }

    async fn update(&self, care: EmergencyRoomCare) -> AppResult<EmergencyRoomCare> {
        base::update(self.db.conn(), emergency_room_care::ActiveModel::from(care)).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        base::delete_by_id::<emergency_room_care::Entity, _>(
            self.db.conn(),
            id,
            "Atención de urgencia no encontrada",
        )
        .await
    }
}
