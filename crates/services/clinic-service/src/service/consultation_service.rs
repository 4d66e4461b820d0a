//! Derivation and referral workflows.
//!
//! A consultation can only be attended by a doctor and approved by a
//! department head who both belong to the destination department of the
//! derivation or referral it belongs to. The rule is checked on creation and
//! whenever the attending staff is re-pointed.

use std::sync::Arc;

use async_trait::async_trait;
use futures::try_join;
use uuid::Uuid;
use validator::Validate;

use super::lookup;
use crate::infra::UnitOfWork;
use common::{AppError, AppResult};
use domain::{
    ConsultationDerivation, ConsultationReferral, CreateConsultationDerivation,
    CreateConsultationReferral, CreateDerivation, CreateReferral, DepartmentHead, Derivation,
    Doctor, Referral, UpdateConsultation, UpdateDerivation, UpdateReferral,
};

/// Both members of the attending staff must work in `destination`.
fn ensure_staff_in_department(
    doctor: &Doctor,
    head: &DepartmentHead,
    destination: Uuid,
) -> AppResult<()> {
    if doctor.department_id != destination {
        return Err(AppError::validation(
            "El doctor no pertenece al departamento de destino",
        ));
    }
    if head.department_id != destination {
        return Err(AppError::validation(
            "El jefe de departamento no pertenece al departamento de destino",
        ));
    }
    Ok(())
}

/// Consultations already recorded must keep fitting a new destination.
/// `staff` holds each consultation's doctor and department head.
async fn ensure_recorded_staff_in_department(
    uow: &dyn UnitOfWork,
    staff: Vec<(Uuid, Uuid)>,
    destination: Uuid,
) -> AppResult<()> {
    for (doctor_id, head_id) in staff {
        let (doctor, head) = try_join!(
            lookup::doctor(uow, doctor_id),
            lookup::department_head(uow, head_id),
        )?;
        ensure_staff_in_department(&doctor, &head, destination).map_err(|err| match err {
            AppError::Validation(msg) => AppError::validation(format!(
                "Hay consultas registradas que no encajan con el nuevo destino: {}",
                msg.to_lowercase()
            )),
            other => other,
        })?;
    }
    Ok(())
}

// =============================================================================
// Derivation
// =============================================================================

#[async_trait]
pub trait DerivationService: Send + Sync {
    async fn get(&self, id: Uuid) -> AppResult<Derivation>;

    async fn list(&self) -> AppResult<Vec<Derivation>>;

    async fn list_by_patient(&self, patient_id: Uuid) -> AppResult<Vec<Derivation>>;

    /// Create a derivation; patient and both departments must exist.
    async fn create(&self, dto: CreateDerivation) -> AppResult<Derivation>;

    async fn update(&self, id: Uuid, dto: UpdateDerivation) -> AppResult<Derivation>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct DerivationManager {
    uow: Arc<dyn UnitOfWork>,
}

impl DerivationManager {
    pub fn new(uow: Arc<dyn UnitOfWork>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl DerivationService for DerivationManager {
    async fn get(&self, id: Uuid) -> AppResult<Derivation> {
        lookup::derivation(self.uow.as_ref(), id).await
    }

    async fn list(&self) -> AppResult<Vec<Derivation>> {
        self.uow.derivations().list().await
    }

    async fn list_by_patient(&self, patient_id: Uuid) -> AppResult<Vec<Derivation>> {
        lookup::patient(self.uow.as_ref(), patient_id).await?;
        self.uow.derivations().list_by_patient(patient_id).await
    }

    async fn create(&self, dto: CreateDerivation) -> AppResult<Derivation> {
        dto.validate()?;
        let derivation = Derivation::new(dto)?;

        let uow = self.uow.as_ref();
        try_join!(
            lookup::patient(uow, derivation.patient_id),
            lookup::department(uow, derivation.origin_department_id),
            lookup::department(uow, derivation.destination_department_id),
        )?;

        let derivation = self.uow.derivations().create(derivation).await?;
        tracing::info!(
            derivation_id = %derivation.id,
            patient_id = %derivation.patient_id,
            "Derivation created"
        );
        Ok(derivation)
    }

    async fn update(&self, id: Uuid, dto: UpdateDerivation) -> AppResult<Derivation> {
        dto.validate()?;
        let uow = self.uow.as_ref();
        let mut derivation = lookup::derivation(uow, id).await?;

        if let Some(patient_id) = dto.patient_id {
            lookup::patient(uow, patient_id).await?;
        }
        if let Some(origin) = dto.origin_department_id {
            lookup::department(uow, origin).await?;
        }
        if let Some(destination) = dto.destination_department_id {
            lookup::department(uow, destination).await?;
            if destination != derivation.destination_department_id {
                let staff = uow
                    .consultation_derivations()
                    .list_by_derivation(id)
                    .await?
                    .into_iter()
                    .map(|c| (c.doctor_id, c.department_head_id))
                    .collect();
                ensure_recorded_staff_in_department(uow, staff, destination).await?;
            }
        }

        derivation.apply(dto)?;
        self.uow.derivations().update(derivation).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.uow.derivations().delete(id).await
    }
}

// =============================================================================
// Referral
// =============================================================================

#[async_trait]
pub trait ReferralService: Send + Sync {
    async fn get(&self, id: Uuid) -> AppResult<Referral>;

    async fn list(&self) -> AppResult<Vec<Referral>>;

    async fn list_by_patient(&self, patient_id: Uuid) -> AppResult<Vec<Referral>>;

    /// Create a referral; patient, external post and destination must exist.
    async fn create(&self, dto: CreateReferral) -> AppResult<Referral>;

    async fn update(&self, id: Uuid, dto: UpdateReferral) -> AppResult<Referral>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct ReferralManager {
    uow: Arc<dyn UnitOfWork>,
}

impl ReferralManager {
    pub fn new(uow: Arc<dyn UnitOfWork>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl ReferralService for ReferralManager {
    async fn get(&self, id: Uuid) -> AppResult<Referral> {
        lookup::referral(self.uow.as_ref(), id).await
    }

    async fn list(&self) -> AppResult<Vec<Referral>> {
        self.uow.referrals().list().await
    }

    async fn list_by_patient(&self, patient_id: Uuid) -> AppResult<Vec<Referral>> {
        lookup::patient(self.uow.as_ref(), patient_id).await?;
        self.uow.referrals().list_by_patient(patient_id).await
    }

    async fn create(&self, dto: CreateReferral) -> AppResult<Referral> {
        dto.validate()?;
        let uow = self.uow.as_ref();
        try_join!(
            lookup::patient(uow, dto.patient_id),
            lookup::external_post(uow, dto.external_post_id),
            lookup::department(uow, dto.destination_department_id),
        )?;

        let referral = self.uow.referrals().create(Referral::new(dto)).await?;
        tracing::info!(
            referral_id = %referral.id,
            patient_id = %referral.patient_id,
            "Referral created"
        );
        Ok(referral)
    }

    async fn update(&self, id: Uuid, dto: UpdateReferral) -> AppResult<Referral> {
        dto.validate()?;
        let uow = self.uow.as_ref();
        let mut referral = lookup::referral(uow, id).await?;

        if let Some(patient_id) = dto.patient_id {
            lookup::patient(uow, patient_id).await?;
        }
        if let Some(post_id) = dto.external_post_id {
            lookup::external_post(uow, post_id).await?;
        }
        if let Some(destination) = dto.destination_department_id {
            lookup::department(uow, destination).await?;
            if destination != referral.destination_department_id {
                let staff = uow
                    .consultation_referrals()
                    .list_by_referral(id)
                    .await?
                    .into_iter()
                    .map(|c| (c.doctor_id, c.department_head_id))
                    .collect();
                ensure_recorded_staff_in_department(uow, staff, destination).await?;
            }
        }

        referral.apply(dto);
        self.uow.referrals().update(referral).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.uow.referrals().delete(id).await
    }
}

// =============================================================================
// Consultation derivation
// =============================================================================

#[async_trait]
pub trait ConsultationDerivationService: Send + Sync {
    async fn get(&self, id: Uuid) -> AppResult<ConsultationDerivation>;

    async fn list(&self) -> AppResult<Vec<ConsultationDerivation>>;

    async fn list_by_derivation(&self, derivation_id: Uuid)
        -> AppResult<Vec<ConsultationDerivation>>;

    async fn create(&self, dto: CreateConsultationDerivation) -> AppResult<ConsultationDerivation>;

    async fn update(
        &self,
        id: Uuid,
        dto: UpdateConsultation,
    ) -> AppResult<ConsultationDerivation>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct ConsultationDerivationManager {
    uow: Arc<dyn UnitOfWork>,
}

impl ConsultationDerivationManager {
    pub fn new(uow: Arc<dyn UnitOfWork>) -> Self {
        Self { uow }
    }

    async fn check_staff(
        &self,
        derivation_id: Uuid,
        doctor_id: Uuid,
        head_id: Uuid,
    ) -> AppResult<()> {
        let uow = self.uow.as_ref();
        let (derivation, doctor, head) = try_join!(
            lookup::derivation(uow, derivation_id),
            lookup::doctor(uow, doctor_id),
            lookup::department_head(uow, head_id),
        )?;
        ensure_staff_in_department(&doctor, &head, derivation.destination_department_id)
    }
}

#[async_trait]
impl ConsultationDerivationService for ConsultationDerivationManager {
    async fn get(&self, id: Uuid) -> AppResult<ConsultationDerivation> {
        lookup::consultation_derivation(self.uow.as_ref(), id).await
    }

    async fn list(&self) -> AppResult<Vec<ConsultationDerivation>> {
        self.uow.consultation_derivations().list().await
    }

    async fn list_by_derivation(
        &self,
        derivation_id: Uuid,
    ) -> AppResult<Vec<ConsultationDerivation>> {
        self.uow
            .consultation_derivations()
            .list_by_derivation(derivation_id)
            .await
    }

    async fn create(&self, dto: CreateConsultationDerivation) -> AppResult<ConsultationDerivation> {
        dto.validate()?;
        self.check_staff(dto.derivation_id, dto.doctor_id, dto.department_head_id)
            .await?;

        let consultation = self
            .uow
            .consultation_derivations()
            .create(ConsultationDerivation::new(dto))
            .await?;

        tracing::info!(
            consultation_id = %consultation.id,
            derivation_id = %consultation.derivation_id,
            "Derivation consultation recorded"
        );
        Ok(consultation)
    }

    async fn update(
        &self,
        id: Uuid,
        dto: UpdateConsultation,
    ) -> AppResult<ConsultationDerivation> {
        dto.validate()?;
        let mut consultation = lookup::consultation_derivation(self.uow.as_ref(), id).await?;

        if dto.changes_staff() {
            self.check_staff(
                consultation.derivation_id,
                dto.doctor_id.unwrap_or(consultation.doctor_id),
                dto.department_head_id
                    .unwrap_or(consultation.department_head_id),
            )
            .await?;
        }

        consultation.apply(dto);
        self.uow.consultation_derivations().update(consultation).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.uow.consultation_derivations().delete(id).await
    }
}

// =============================================================================
// Consultation referral
// =============================================================================

#[async_trait]
pub trait ConsultationReferralService: Send + Sync {
    async fn get(&self, id: Uuid) -> AppResult<ConsultationReferral>;

    async fn list(&self) -> AppResult<Vec<ConsultationReferral>>;

    async fn list_by_referral(&self, referral_id: Uuid) -> AppResult<Vec<ConsultationReferral>>;

    async fn create(&self, dto: CreateConsultationReferral) -> AppResult<ConsultationReferral>;

    async fn update(&self, id: Uuid, dto: UpdateConsultation) -> AppResult<ConsultationReferral>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct ConsultationReferralManager {
    uow: Arc<dyn UnitOfWork>,
}

impl ConsultationReferralManager {
    pub fn new(uow: Arc<dyn UnitOfWork>) -> Self {
        Self { uow }
    }

    async fn check_staff(&self, referral_id: Uuid, doctor_id: Uuid, head_id: Uuid) -> AppResult<()> {
        let uow = self.uow.as_ref();
        let (referral, doctor, head) = try_join!(
            lookup::referral(uow, referral_id),
            lookup::doctor(uow, doctor_id),
            lookup::department_head(uow, head_id),
        )?;
        ensure_staff_in_department(&doctor, &head, referral.destination_department_id)
    }
}

#[async_trait]
impl ConsultationReferralService for ConsultationReferralManager {
    async fn get(&self, id: Uuid) -> AppResult<ConsultationReferral> {
        lookup::consultation_referral(self.uow.as_ref(), id).await
    }

    async fn list(&self) -> AppResult<Vec<ConsultationReferral>> {
        self.uow.consultation_referrals().list().await
    }

    async fn list_by_referral(&self, referral_id: Uuid) -> AppResult<Vec<ConsultationReferral>> {
        self.uow
            .consultation_referrals()
            .list_by_referral(referral_id)
            .await
    }

    async fn create(&self, dto: CreateConsultationReferral) -> AppResult<ConsultationReferral> {
        dto.validate()?;
        self.check_staff(dto.referral_id, dto.doctor_id, dto.department_head_id)
            .await?;

        let consultation = self
            .uow
            .consultation_referrals()
            .create(ConsultationReferral::new(dto))
            .await?;

        tracing::info!(
            consultation_id = %consultation.id,
            referral_id = %consultation.referral_id,
            "Referral consultation recorded"
        );
        Ok(consultation)
    }

    async fn update(&self, id: Uuid, dto: UpdateConsultation) -> AppResult<ConsultationReferral> {
        dto.validate()?;
        let mut consultation = lookup::consultation_referral(self.uow.as_ref(), id).await?;

        if dto.changes_staff() {
            self.check_staff(
                consultation.referral_id,
                dto.doctor_id.unwrap_or(consultation.doctor_id),
                dto.department_head_id
                    .unwrap_or(consultation.department_head_id),
            )
            .await?;
        }

        consultation.apply(dto);
        self.uow.consultation_referrals().update(consultation).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.uow.consultation_referrals().delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use domain::{Department, Employee};

    use crate::repository::{
        MockConsultationDerivationRepository, MockConsultationReferralRepository,
        MockDepartmentHeadRepository, MockDepartmentRepository, MockDerivationRepository,
        MockDoctorRepository, MockReferralRepository,
    };
    use crate::testing::MockUnitOfWork;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    fn doctor_in(department_id: Uuid) -> Doctor {
        let employee = Employee::new("D-1".into(), "Carlos Pérez".into(), None);
        Doctor::new(employee, department_id, "Cardiología".into())
    }

    fn head_in(department_id: Uuid) -> DepartmentHead {
        let employee = Employee::new("H-1".into(), "Elena Mora".into(), None);
        DepartmentHead::new(employee, department_id, date())
    }

    fn derivation_to(destination: Uuid) -> Derivation {
        Derivation::new(CreateDerivation {
            patient_id: Uuid::new_v4(),
            origin_department_id: Uuid::new_v4(),
            destination_department_id: destination,
            derivation_date: date(),
            reason: "Evaluación".into(),
        })
        .unwrap()
    }

    fn staff_uow(derivation: Derivation, doctor: Doctor, head: DepartmentHead) -> MockUnitOfWork {
        let mut derivations = MockDerivationRepository::new();
        derivations
            .expect_find_by_id()
            .returning(move |_| Ok(Some(derivation.clone())));

        let mut doctors = MockDoctorRepository::new();
        doctors
            .expect_find_by_id()
            .returning(move |_| Ok(Some(doctor.clone())));

        let mut heads = MockDepartmentHeadRepository::new();
        heads
            .expect_find_by_id()
            .returning(move |_| Ok(Some(head.clone())));

        MockUnitOfWork::new()
            .with_derivations(derivations)
            .with_doctors(doctors)
            .with_department_heads(heads)
    }

    fn referral_to(destination: Uuid) -> Referral {
        Referral::new(CreateReferral {
            patient_id: Uuid::new_v4(),
            external_post_id: Uuid::new_v4(),
            destination_department_id: destination,
            referral_date: date(),
            reason: "Control".into(),
        })
    }

    fn referral_staff_uow(
        referral: Referral,
        doctor: Doctor,
        head: DepartmentHead,
    ) -> MockUnitOfWork {
        let mut referrals = MockReferralRepository::new();
        referrals
            .expect_find_by_id()
            .returning(move |_| Ok(Some(referral.clone())));

        let mut doctors = MockDoctorRepository::new();
        doctors
            .expect_find_by_id()
            .returning(move |_| Ok(Some(doctor.clone())));

        let mut heads = MockDepartmentHeadRepository::new();
        heads
            .expect_find_by_id()
            .returning(move |_| Ok(Some(head.clone())));

        MockUnitOfWork::new()
            .with_referrals(referrals)
            .with_doctors(doctors)
            .with_department_heads(heads)
    }

    fn referral_consultation_dto(referral: &Referral) -> CreateConsultationReferral {
        CreateConsultationReferral {
            referral_id: referral.id,
            doctor_id: Uuid::new_v4(),
            department_head_id: Uuid::new_v4(),
            diagnosis: "Sin hallazgos".into(),
            consultation_date: date(),
        }
    }

    fn departments() -> MockDepartmentRepository {
        let mut repo = MockDepartmentRepository::new();
        repo.expect_find_by_id()
            .returning(|_| Ok(Some(Department::new("Neurología".into(), None))));
        repo
    }

    fn consultation_dto(derivation: &Derivation) -> CreateConsultationDerivation {
        CreateConsultationDerivation {
            derivation_id: derivation.id,
            doctor_id: Uuid::new_v4(),
            department_head_id: Uuid::new_v4(),
            diagnosis: "Arritmia leve".into(),
            consultation_date: date(),
        }
    }

    #[tokio::test]
    async fn test_consultation_derivation_with_matching_staff() {
        let destination = Uuid::new_v4();
        let derivation = derivation_to(destination);
        let dto = consultation_dto(&derivation);

        let mut consultations = MockConsultationDerivationRepository::new();
        consultations.expect_create().times(1).returning(Ok);

        let uow = staff_uow(derivation, doctor_in(destination), head_in(destination))
            .with_consultation_derivations(consultations);
        let result = ConsultationDerivationManager::new(Arc::new(uow))
            .create(dto)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_consultation_derivation_doctor_from_other_department() {
        let destination = Uuid::new_v4();
        let derivation = derivation_to(destination);
        let dto = consultation_dto(&derivation);

        let mut consultations = MockConsultationDerivationRepository::new();
        consultations.expect_create().never();

        let uow = staff_uow(derivation, doctor_in(Uuid::new_v4()), head_in(destination))
            .with_consultation_derivations(consultations);
        let result = ConsultationDerivationManager::new(Arc::new(uow))
            .create(dto)
            .await;

        assert!(matches!(
            result,
            Err(AppError::Validation(msg)) if msg == "El doctor no pertenece al departamento de destino"
        ));
    }

    #[tokio::test]
    async fn test_consultation_derivation_head_from_other_department() {
        let destination = Uuid::new_v4();
        let derivation = derivation_to(destination);
        let dto = consultation_dto(&derivation);

        let mut consultations = MockConsultationDerivationRepository::new();
        consultations.expect_create().never();

        let uow = staff_uow(derivation, doctor_in(destination), head_in(Uuid::new_v4()))
            .with_consultation_derivations(consultations);
        let result = ConsultationDerivationManager::new(Arc::new(uow))
            .create(dto)
            .await;

        assert!(matches!(result, Err(AppError::Validation(msg)) if msg.contains("jefe de departamento")));
    }

    #[tokio::test]
    async fn test_repointing_consultation_rechecks_department() {
        let destination = Uuid::new_v4();
        let derivation = derivation_to(destination);
        let consultation = ConsultationDerivation::new(consultation_dto(&derivation));
        let id = consultation.id;

        let mut consultations = MockConsultationDerivationRepository::new();
        consultations
            .expect_find_by_id()
            .returning(move |_| Ok(Some(consultation.clone())));
        consultations.expect_update().never();

        let uow = staff_uow(derivation, doctor_in(Uuid::new_v4()), head_in(destination))
            .with_consultation_derivations(consultations);
        let result = ConsultationDerivationManager::new(Arc::new(uow))
            .update(
                id,
                UpdateConsultation {
                    doctor_id: Some(Uuid::new_v4()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_consultation_referral_doctor_from_other_department() {
        let destination = Uuid::new_v4();
        let referral = Referral::new(CreateReferral {
            patient_id: Uuid::new_v4(),
            external_post_id: Uuid::new_v4(),
            destination_department_id: destination,
            referral_date: date(),
            reason: "Control".into(),
        });
        let referral_id = referral.id;

        let mut referrals = MockReferralRepository::new();
        referrals
            .expect_find_by_id()
            .returning(move |_| Ok(Some(referral.clone())));
        let mut doctors = MockDoctorRepository::new();
        doctors
            .expect_find_by_id()
            .returning(|_| Ok(Some(doctor_in(Uuid::new_v4()))));
        let mut heads = MockDepartmentHeadRepository::new();
        heads
            .expect_find_by_id()
            .returning(move |_| Ok(Some(head_in(destination))));
        let mut consultations = MockConsultationReferralRepository::new();
        consultations.expect_create().never();

        let uow = MockUnitOfWork::new()
            .with_referrals(referrals)
            .with_doctors(doctors)
            .with_department_heads(heads)
            .with_consultation_referrals(consultations);
        let result = ConsultationReferralManager::new(Arc::new(uow))
            .create(CreateConsultationReferral {
                referral_id,
                doctor_id: Uuid::new_v4(),
                department_head_id: Uuid::new_v4(),
                diagnosis: "Sin hallazgos".into(),
                consultation_date: date(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_derivation_between_same_department_fails() {
        let department = Uuid::new_v4();
        let mut derivations = MockDerivationRepository::new();
        derivations.expect_create().never();

        let service =
            DerivationManager::new(Arc::new(MockUnitOfWork::new().with_derivations(derivations)));
        let result = service
            .create(CreateDerivation {
                patient_id: Uuid::new_v4(),
                origin_department_id: department,
                destination_department_id: department,
                derivation_date: date(),
                reason: "Traslado".into(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_consultation_referral_head_from_other_department() {
        let destination = Uuid::new_v4();
        let referral = referral_to(destination);
        let dto = referral_consultation_dto(&referral);

        let mut consultations = MockConsultationReferralRepository::new();
        consultations.expect_create().never();

        let uow = referral_staff_uow(referral, doctor_in(destination), head_in(Uuid::new_v4()))
            .with_consultation_referrals(consultations);
        let result = ConsultationReferralManager::new(Arc::new(uow))
            .create(dto)
            .await;

        assert!(matches!(
            result,
            Err(AppError::Validation(msg))
                if msg == "El jefe de departamento no pertenece al departamento de destino"
        ));
    }

    #[tokio::test]
    async fn test_repointing_consultation_referral_rechecks_department() {
        let destination = Uuid::new_v4();
        let referral = referral_to(destination);
        let consultation = ConsultationReferral::new(referral_consultation_dto(&referral));
        let id = consultation.id;

        let mut consultations = MockConsultationReferralRepository::new();
        consultations
            .expect_find_by_id()
            .returning(move |_| Ok(Some(consultation.clone())));
        consultations.expect_update().never();

        let uow = referral_staff_uow(referral, doctor_in(destination), head_in(Uuid::new_v4()))
            .with_consultation_referrals(consultations);
        let result = ConsultationReferralManager::new(Arc::new(uow))
            .update(
                id,
                UpdateConsultation {
                    department_head_id: Some(Uuid::new_v4()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(msg)) if msg.contains("jefe de departamento")));
    }

    #[tokio::test]
    async fn test_redirecting_derivation_checks_recorded_consultations() {
        let old_destination = Uuid::new_v4();
        let derivation = derivation_to(old_destination);
        let id = derivation.id;
        let consultation = ConsultationDerivation::new(consultation_dto(&derivation));

        let mut consultations = MockConsultationDerivationRepository::new();
        consultations
            .expect_list_by_derivation()
            .withf(move |derivation_id| *derivation_id == id)
            .times(1)
            .returning(move |_| Ok(vec![consultation.clone()]));

        let mut derivations = MockDerivationRepository::new();
        derivations
            .expect_find_by_id()
            .returning(move |_| Ok(Some(derivation.clone())));
        derivations.expect_update().never();
        let mut doctors = MockDoctorRepository::new();
        doctors
            .expect_find_by_id()
            .returning(move |_| Ok(Some(doctor_in(old_destination))));
        let mut heads = MockDepartmentHeadRepository::new();
        heads
            .expect_find_by_id()
            .returning(move |_| Ok(Some(head_in(old_destination))));

        let uow = MockUnitOfWork::new()
            .with_departments(departments())
            .with_derivations(derivations)
            .with_doctors(doctors)
            .with_department_heads(heads)
            .with_consultation_derivations(consultations);
        let result = DerivationManager::new(Arc::new(uow))
            .update(
                id,
                UpdateDerivation {
                    destination_department_id: Some(Uuid::new_v4()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(AppError::Validation(msg)) if msg.contains("el doctor no pertenece")
        ));
    }

    #[tokio::test]
    async fn test_redirecting_derivation_without_consultations() {
        let derivation = derivation_to(Uuid::new_v4());
        let id = derivation.id;
        let new_destination = Uuid::new_v4();

        let mut consultations = MockConsultationDerivationRepository::new();
        consultations
            .expect_list_by_derivation()
            .returning(|_| Ok(vec![]));
        let mut derivations = MockDerivationRepository::new();
        derivations
            .expect_find_by_id()
            .returning(move |_| Ok(Some(derivation.clone())));
        derivations.expect_update().times(1).returning(Ok);

        let uow = MockUnitOfWork::new()
            .with_departments(departments())
            .with_derivations(derivations)
            .with_consultation_derivations(consultations);
        let updated = DerivationManager::new(Arc::new(uow))
            .update(
                id,
                UpdateDerivation {
                    destination_department_id: Some(new_destination),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.destination_department_id, new_destination);
    }

    #[tokio::test]
    async fn test_redirecting_referral_checks_recorded_consultations() {
        let old_destination = Uuid::new_v4();
        let referral = referral_to(old_destination);
        let id = referral.id;
        let consultation = ConsultationReferral::new(referral_consultation_dto(&referral));

        let mut consultations = MockConsultationReferralRepository::new();
        consultations
            .expect_list_by_referral()
            .withf(move |referral_id| *referral_id == id)
            .times(1)
            .returning(move |_| Ok(vec![consultation.clone()]));

        let new_destination = Uuid::new_v4();
        let mut referrals = MockReferralRepository::new();
        referrals
            .expect_find_by_id()
            .returning(move |_| Ok(Some(referral.clone())));
        referrals.expect_update().never();
        let mut doctors = MockDoctorRepository::new();
        doctors
            .expect_find_by_id()
            .returning(move |_| Ok(Some(doctor_in(new_destination))));
        let mut heads = MockDepartmentHeadRepository::new();
        heads
            .expect_find_by_id()
            .returning(move |_| Ok(Some(head_in(old_destination))));

        let uow = MockUnitOfWork::new()
            .with_departments(departments())
            .with_referrals(referrals)
            .with_doctors(doctors)
            .with_department_heads(heads)
            .with_consultation_referrals(consultations);
        let result = ReferralManager::new(Arc::new(uow))
            .update(
                id,
                UpdateReferral {
                    destination_department_id: Some(new_destination),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(AppError::Validation(msg)) if msg.contains("el jefe de departamento no pertenece")
        ));
    }
}
