//! Emergency-room guards and the cares attended during them.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;
use validator::Validate;

use super::lookup;
use crate::infra::UnitOfWork;
use common::{AppError, AppResult};
use domain::{
    CreateEmergencyRoom, CreateEmergencyRoomCare, EmergencyRoom, EmergencyRoomCare,
    UpdateEmergencyRoom, UpdateEmergencyRoomCare,
};

#[async_trait]
pub trait EmergencyRoomService: Send + Sync {
    /// Whether the doctor holds a guard slot on `date`.
    async fn is_doctor_on_guard(&self, doctor_id: Uuid, date: NaiveDate) -> AppResult<bool>;

    async fn get(&self, id: Uuid) -> AppResult<EmergencyRoom>;

    async fn list(&self) -> AppResult<Vec<EmergencyRoom>>;

    async fn list_by_date(&self, date: NaiveDate) -> AppResult<Vec<EmergencyRoom>>;

    /// Schedule a guard. A doctor holds at most one slot per date.
    async fn create(&self, dto: CreateEmergencyRoom) -> AppResult<EmergencyRoom>;

    async fn update(&self, id: Uuid, dto: UpdateEmergencyRoom) -> AppResult<EmergencyRoom>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct EmergencyRoomManager {
    uow: Arc<dyn UnitOfWork>,
}

impl EmergencyRoomManager {
    pub fn new(uow: Arc<dyn UnitOfWork>) -> Self {
        Self { uow }
    }

    /// Fails if another slot already covers `doctor_id` on `date`.
    async fn ensure_slot_free(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
        except: Option<Uuid>,
    ) -> AppResult<()> {
        let taken = self
            .uow
            .emergency_rooms()
            .find_guard(doctor_id, date)
            .await?
            .filter(|guard| Some(guard.id) != except);

        if taken.is_some() {
            return Err(AppError::conflict(format!(
                "El doctor ya tiene una guardia el {}",
                date
            )));
        }
        Ok(())
    }

    /// Cares already recorded under `guard` must stay on its doctor and date.
    async fn ensure_cares_still_fit(
        &self,
        guard: &EmergencyRoom,
        doctor_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<()> {
        let cares = self
            .uow
            .emergency_room_cares()
            .list_by_guard(guard.id)
            .await?;

        if cares.is_empty() {
            return Ok(());
        }

        if doctor_id != guard.doctor_id {
            return Err(AppError::validation(
                "La guardia tiene atenciones registradas; no puede cambiar de doctor",
            ));
        }

        if let Some(care) = cares.iter().find(|care| care.care_date.date() != date) {
            return Err(AppError::validation(format!(
                "La guardia tiene atenciones registradas el {}; no puede moverse al {}",
                care.care_date.date(),
                date
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl EmergencyRoomService for EmergencyRoomManager {
    async fn is_doctor_on_guard(&self, doctor_id: Uuid, date: NaiveDate) -> AppResult<bool> {
        Ok(self
            .uow
            .emergency_rooms()
            .find_guard(doctor_id, date)
            .await?
            .is_some())
    }

    async fn get(&self, id: Uuid) -> AppResult<EmergencyRoom> {
        lookup::emergency_room(self.uow.as_ref(), id).await
    }

    async fn list(&self) -> AppResult<Vec<EmergencyRoom>> {
        self.uow.emergency_rooms().list().await
    }

    async fn list_by_date(&self, date: NaiveDate) -> AppResult<Vec<EmergencyRoom>> {
        self.uow.emergency_rooms().list_by_date(date).await
    }

    async fn create(&self, dto: CreateEmergencyRoom) -> AppResult<EmergencyRoom> {
        dto.validate()?;
        lookup::doctor(self.uow.as_ref(), dto.doctor_id).await?;
        self.ensure_slot_free(dto.doctor_id, dto.guard_date, None)
            .await?;

        let guard = self
            .uow
            .emergency_rooms()
            .create(EmergencyRoom::new(dto.doctor_id, dto.guard_date))
            .await?;

        tracing::info!(
            guard_id = %guard.id,
            doctor_id = %guard.doctor_id,
            date = %guard.guard_date,
            "Guard scheduled"
        );
        Ok(guard)
    }

    async fn update(&self, id: Uuid, dto: UpdateEmergencyRoom) -> AppResult<EmergencyRoom> {
        dto.validate()?;
        let mut guard = lookup::emergency_room(self.uow.as_ref(), id).await?;

        if let Some(doctor_id) = dto.doctor_id {
            lookup::doctor(self.uow.as_ref(), doctor_id).await?;
        }

        let doctor_id = dto.doctor_id.unwrap_or(guard.doctor_id);
        let date = dto.guard_date.unwrap_or(guard.guard_date);
        if doctor_id != guard.doctor_id || date != guard.guard_date {
            self.ensure_slot_free(doctor_id, date, Some(guard.id)).await?;
            self.ensure_cares_still_fit(&guard, doctor_id, date).await?;
        }

        guard.reschedule(dto.doctor_id, dto.guard_date);
        self.uow.emergency_rooms().update(guard).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.uow.emergency_rooms().delete(id).await
    }
}

#[async_trait]
pub trait EmergencyCareService: Send + Sync {
    async fn get(&self, id: Uuid) -> AppResult<EmergencyRoomCare>;

    async fn list(&self) -> AppResult<Vec<EmergencyRoomCare>>;

    async fn list_by_patient(&self, patient_id: Uuid) -> AppResult<Vec<EmergencyRoomCare>>;

    /// Record a care. The doctor must be on guard on the care's date; the
    /// care is attached to that guard.
    async fn create(&self, dto: CreateEmergencyRoomCare) -> AppResult<EmergencyRoomCare>;

    async fn update(&self, id: Uuid, dto: UpdateEmergencyRoomCare) -> AppResult<EmergencyRoomCare>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct EmergencyCareManager {
    uow: Arc<dyn UnitOfWork>,
}

impl EmergencyCareManager {
    pub fn new(uow: Arc<dyn UnitOfWork>) -> Self {
        Self { uow }
    }

    async fn guard_for(&self, doctor_id: Uuid, at: NaiveDateTime) -> AppResult<EmergencyRoom> {
        match self
            .uow
            .emergency_rooms()
            .find_guard(doctor_id, at.date())
            .await?
        {
            Some(guard) => Ok(guard),
            None => {
                tracing::warn!(%doctor_id, date = %at.date(), "Care rejected, doctor not on guard");
                Err(AppError::validation(format!(
                    "El doctor no está de guardia el {}",
                    at.date()
                )))
            }
        }
    }
}

#[async_trait]
impl EmergencyCareService for EmergencyCareManager {
    async fn get(&self, id: Uuid) -> AppResult<EmergencyRoomCare> {
        lookup::emergency_care(self.uow.as_ref(), id).await
    }

    async fn list(&self) -> AppResult<Vec<EmergencyRoomCare>> {
        self.uow.emergency_room_cares().list().await
    }

    async fn list_by_patient(&self, patient_id: Uuid) -> AppResult<Vec<EmergencyRoomCare>> {
        lookup::patient(self.uow.as_ref(), patient_id).await?;
        self.uow.emergency_room_cares().list_by_patient(patient_id).await
    }

    async fn create(&self, dto: CreateEmergencyRoomCare) -> AppResult<EmergencyRoomCare> {
        dto.validate()?;
        let uow = self.uow.as_ref();
        futures::try_join!(
            lookup::patient(uow, dto.patient_id),
            lookup::doctor(uow, dto.doctor_id),
        )?;

        let guard = self.guard_for(dto.doctor_id, dto.care_date).await?;
        let care = EmergencyRoomCare::new(&guard, dto.patient_id, dto.care_date, dto.diagnosis)?;
        let care = self.uow.emergency_room_cares().create(care).await?;

        tracing::info!(
            care_id = %care.id,
            guard_id = %care.emergency_room_id,
            patient_id = %care.patient_id,
            "Emergency care recorded"
        );
        Ok(care)
    }

    async fn update(&self, id: Uuid, dto: UpdateEmergencyRoomCare) -> AppResult<EmergencyRoomCare> {
        dto.validate()?;
        let uow = self.uow.as_ref();
        let mut care = lookup::emergency_care(uow, id).await?;

        if let Some(patient_id) = dto.patient_id {
            lookup::patient(uow, patient_id).await?;
            care.patient_id = patient_id;
        }

        if dto.doctor_id.is_some() || dto.care_date.is_some() {
            let doctor_id = match dto.doctor_id {
                Some(doctor_id) => lookup::doctor(uow, doctor_id).await?.id,
                None => lookup::emergency_room(uow, care.emergency_room_id).await?.doctor_id,
            };
            let care_date = dto.care_date.unwrap_or(care.care_date);
            let guard = self.guard_for(doctor_id, care_date).await?;
            care.reassign(&guard, care_date)?;
        }

        if let Some(diagnosis) = dto.diagnosis {
            care.update_diagnosis(diagnosis);
        }

        self.uow.emergency_room_cares().update(care).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.uow.emergency_room_cares().delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{CreatePatient, Doctor, Employee, Patient};

    use crate::repository::{
        MockDoctorRepository, MockEmergencyRoomCareRepository, MockEmergencyRoomRepository,
        MockPatientRepository,
    };
    use crate::testing::MockUnitOfWork;

    fn guard_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, day)
            .unwrap()
            .and_hms_opt(22, 15, 0)
            .unwrap()
    }

    fn patients() -> MockPatientRepository {
        let mut repo = MockPatientRepository::new();
        repo.expect_find_by_id().returning(|_| {
            Ok(Some(Patient::new(CreatePatient {
                identification: "123".into(),
                name: "Ana Ruiz".into(),
                age: 40,
                contact: "555-0199".into(),
                address: "Av. Central 4".into(),
            })))
        });
        repo
    }

    fn doctors() -> MockDoctorRepository {
        let mut repo = MockDoctorRepository::new();
        repo.expect_find_by_id().returning(|_| {
            let employee = Employee::new("D-9".into(), "Luis Vega".into(), None);
            Ok(Some(Doctor::new(employee, Uuid::new_v4(), "Urgencias".into())))
        });
        repo
    }

    fn care_dto(day: u32) -> CreateEmergencyRoomCare {
        CreateEmergencyRoomCare {
            doctor_id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            care_date: at(day),
            diagnosis: "Contusión".into(),
        }
    }

    #[tokio::test]
    async fn test_care_requires_doctor_on_guard() {
        let mut guards = MockEmergencyRoomRepository::new();
        guards.expect_find_guard().returning(|_, _| Ok(None));
        let mut cares = MockEmergencyRoomCareRepository::new();
        cares.expect_create().never();

        let uow = MockUnitOfWork::new()
            .with_patients(patients())
            .with_doctors(doctors())
            .with_emergency_rooms(guards)
            .with_emergency_room_cares(cares);
        let result = EmergencyCareManager::new(Arc::new(uow))
            .create(care_dto(3))
            .await;

        assert!(matches!(
            result,
            Err(AppError::Validation(msg)) if msg == "El doctor no está de guardia el 2024-06-03"
        ));
    }

    #[tokio::test]
    async fn test_care_attached_to_matching_guard() {
        let dto = care_dto(3);
        let guard = EmergencyRoom::new(dto.doctor_id, guard_date());
        let guard_id = guard.id;

        let mut guards = MockEmergencyRoomRepository::new();
        guards
            .expect_find_guard()
            .withf(|_, date| *date == guard_date())
            .returning(move |_, _| Ok(Some(guard.clone())));
        let mut cares = MockEmergencyRoomCareRepository::new();
        cares.expect_create().times(1).returning(Ok);

        let uow = MockUnitOfWork::new()
            .with_patients(patients())
            .with_doctors(doctors())
            .with_emergency_rooms(guards)
            .with_emergency_room_cares(cares);
        let care = EmergencyCareManager::new(Arc::new(uow))
            .create(dto)
            .await
            .unwrap();

        assert_eq!(care.emergency_room_id, guard_id);
    }

    #[tokio::test]
    async fn test_moving_care_off_guard_date_fails() {
        let guard = EmergencyRoom::new(Uuid::new_v4(), guard_date());
        let care = EmergencyRoomCare::new(&guard, Uuid::new_v4(), at(3), "Fiebre".into()).unwrap();
        let care_id = care.id;

        let mut cares = MockEmergencyRoomCareRepository::new();
        cares
            .expect_find_by_id()
            .returning(move |_| Ok(Some(care.clone())));
        cares.expect_update().never();

        let mut guards = MockEmergencyRoomRepository::new();
        guards
            .expect_find_by_id()
            .returning(move |_| Ok(Some(guard.clone())));
        guards.expect_find_guard().returning(|_, _| Ok(None));

        let uow = MockUnitOfWork::new()
            .with_emergency_rooms(guards)
            .with_emergency_room_cares(cares);
        let result = EmergencyCareManager::new(Arc::new(uow))
            .update(
                care_id,
                UpdateEmergencyRoomCare {
                    care_date: Some(at(4)),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_second_guard_same_day_conflicts() {
        let mut guards = MockEmergencyRoomRepository::new();
        guards
            .expect_find_guard()
            .returning(|doctor_id, date| Ok(Some(EmergencyRoom::new(doctor_id, date))));
        guards.expect_create().never();

        let uow = MockUnitOfWork::new()
            .with_doctors(doctors())
            .with_emergency_rooms(guards);
        let result = EmergencyRoomManager::new(Arc::new(uow))
            .create(CreateEmergencyRoom {
                doctor_id: Uuid::new_v4(),
                guard_date: guard_date(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_is_doctor_on_guard() {
        let doctor_id = Uuid::new_v4();
        let mut guards = MockEmergencyRoomRepository::new();
        guards.expect_find_guard().returning(move |id, date| {
            Ok((id == doctor_id && date == guard_date()).then(|| EmergencyRoom::new(id, date)))
        });

        let service =
            EmergencyRoomManager::new(Arc::new(MockUnitOfWork::new().with_emergency_rooms(guards)));

        assert!(service.is_doctor_on_guard(doctor_id, guard_date()).await.unwrap());
        assert!(!service
            .is_doctor_on_guard(doctor_id, NaiveDate::from_ymd_opt(2024, 6, 4).unwrap())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_guard_with_cares_cannot_move_date() {
        let guard = EmergencyRoom::new(Uuid::new_v4(), guard_date());
        let guard_id = guard.id;
        let care = EmergencyRoomCare::new(&guard, Uuid::new_v4(), at(3), "Fiebre".into()).unwrap();

        let mut guards = MockEmergencyRoomRepository::new();
        guards
            .expect_find_by_id()
            .returning(move |_| Ok(Some(guard.clone())));
        guards.expect_find_guard().returning(|_, _| Ok(None));
        guards.expect_update().never();
        let mut cares = MockEmergencyRoomCareRepository::new();
        cares
            .expect_list_by_guard()
            .withf(move |id| *id == guard_id)
            .times(1)
            .returning(move |_| Ok(vec![care.clone()]));

        let uow = MockUnitOfWork::new()
            .with_emergency_rooms(guards)
            .with_emergency_room_cares(cares);
        let result = EmergencyRoomManager::new(Arc::new(uow))
            .update(
                guard_id,
                UpdateEmergencyRoom {
                    guard_date: NaiveDate::from_ymd_opt(2024, 6, 9),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(AppError::Validation(msg))
                if msg == "La guardia tiene atenciones registradas el 2024-06-03; no puede moverse al 2024-06-09"
        ));
    }

    #[tokio::test]
    async fn test_guard_with_cares_cannot_change_doctor() {
        let guard = EmergencyRoom::new(Uuid::new_v4(), guard_date());
        let guard_id = guard.id;
        let care = EmergencyRoomCare::new(&guard, Uuid::new_v4(), at(3), "Fiebre".into()).unwrap();

        let mut guards = MockEmergencyRoomRepository::new();
        guards
            .expect_find_by_id()
            .returning(move |_| Ok(Some(guard.clone())));
        guards.expect_find_guard().returning(|_, _| Ok(None));
        guards.expect_update().never();
        let mut cares = MockEmergencyRoomCareRepository::new();
        cares
            .expect_list_by_guard()
            .returning(move |_| Ok(vec![care.clone()]));

        let uow = MockUnitOfWork::new()
            .with_doctors(doctors())
            .with_emergency_rooms(guards)
            .with_emergency_room_cares(cares);
        let result = EmergencyRoomManager::new(Arc::new(uow))
            .update(
                guard_id,
                UpdateEmergencyRoom {
                    doctor_id: Some(Uuid::new_v4()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_empty_guard_can_be_rescheduled() {
        let guard = EmergencyRoom::new(Uuid::new_v4(), guard_date());
        let guard_id = guard.id;
        let new_date = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();

        let mut guards = MockEmergencyRoomRepository::new();
        guards
            .expect_find_by_id()
            .returning(move |_| Ok(Some(guard.clone())));
        guards.expect_find_guard().returning(|_, _| Ok(None));
        guards.expect_update().times(1).returning(Ok);
        let mut cares = MockEmergencyRoomCareRepository::new();
        cares.expect_list_by_guard().returning(|_| Ok(vec![]));

        let uow = MockUnitOfWork::new()
            .with_emergency_rooms(guards)
            .with_emergency_room_cares(cares);
        let moved = EmergencyRoomManager::new(Arc::new(uow))
            .update(
                guard_id,
                UpdateEmergencyRoom {
                    guard_date: Some(new_date),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(moved.guard_date, new_date);
    }
}
