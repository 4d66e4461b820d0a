//! Derivations, referrals and the consultations held for them.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::base::{self, DbHandle};
use super::entities::{consultation_derivation, consultation_referral, derivation, referral};
use common::AppResult;
use domain::{ConsultationDerivation, ConsultationReferral, Derivation, Referral};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DerivationRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Derivation>>;

    async fn list(&self) -> AppResult<Vec<Derivation>>;

    /// Derivations of a patient, newest first
    async fn list_by_patient(&self, patient_id: Uuid) -> AppResult<Vec<Derivation>>;

    async fn create(&self, record: Derivation) -> AppResult<Derivation>;

    async fn update(&self, record: Derivation) -> AppResult<Derivation>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct DerivationStore<C = DatabaseConnection> {
    db: C,
}

impl<C: DbHandle> DerivationStore<C> {
    pub fn new(db: C) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<C: DbHandle> DerivationRepository for DerivationStore<C> {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Derivation>> {
        base::find_by_id::<derivation::Entity, Derivation, _>(self.db.conn(), id).await
    }

    async fn list(&self) -> AppResult<Vec<Derivation>> {
        let models = derivation::Entity::find()
            .order_by_desc(derivation::Column::DerivationDate)
            .all(self.db.conn())
            .await?;

        Ok(models.into_iter().map(Derivation::from).collect())
    }

    async fn list_by_patient(&self, patient_id: Uuid) -> AppResult<Vec<Derivation>> {
        let models = derivation::Entity::find()
            .filter(derivation::Column::PatientId.eq(patient_id))
            .order_by_desc(derivation::Column::DerivationDate)
            .all(self.db.conn())
            .await?;

        Ok(models.into_iter().map(Derivation::from).collect())
    }

    async fn create(&self, record: Derivation) -> AppResult<Derivation> {
        base::insert(self.db.conn(), derivation::ActiveModel::from(record)).await
    }

    async fn update(&self, record: Derivation) -> AppResult<Derivation> {
        base::update(self.db.conn(), derivation::ActiveModel::from(record)).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        base::delete_by_id::<derivation::Entity, _>(self.db.conn(), id, "Derivación no encontrada").await
    }
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReferralRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Referral>>;

    async fn list(&self) -> AppResult<Vec<Referral>>;

    /// Referrals of a patient, newest first
    async fn list_by_patient(&self, patient_id: Uuid) -> AppResult<Vec<Referral>>;

    async fn create(&self, record: Referral) -> AppResult<Referral>;

    async fn update(&self, record: Referral) -> AppResult<Referral>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct ReferralStore<C = DatabaseConnection> {
    db: C,
}

impl<C: DbHandle> ReferralStore<C> {
    pub fn new(db: C) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<C: DbHandle> ReferralRepository for ReferralStore<C> {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Referral>> {
        base::find_by_id::<referral::Entity, Referral, _>(self.db.conn(), id).await
    }

    async fn list(&self) -> AppResult<Vec<Referral>> {
        let models = referral::Entity::find()
            .order_by_desc(referral::Column::ReferralDate)
            .all(self.db.conn())
            .await?;

        Ok(models.into_iter().map(Referral::from).collect())
    }

    async fn list_by_patient(&self, patient_id: Uuid) -> AppResult<Vec<Referral>> {
        let models = referral::Entity::find()
            .filter(referral::Column::PatientId.eq(patient_id))
            .order_by_desc(referral::Column::ReferralDate)
            .all(self.db.conn())
            .await?;

        Ok(models.into_iter().map(Referral::from).collect())
    }

    async fn create(&self, record: Referral) -> AppResult<Referral> {
        base::insert(self.db.conn(), referral::ActiveModel::from(record)).await
    }

    async fn update(&self, record: Referral) -> AppResult<Referral> {
        base::update(self.db.conn(), referral::ActiveModel::from(record)).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        base::delete_by_id::<referral::Entity, _>(self.db.conn(), id, "Remisión no encontrada").await
    }
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ConsultationDerivationRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ConsultationDerivation>>;

    async fn list(&self) -> AppResult<Vec<ConsultationDerivation>>;

    /// Consultations held for one derivation
    async fn list_by_derivation(&self, derivation_id: Uuid) -> AppResult<Vec<ConsultationDerivation>>;

    async fn create(&self, record: ConsultationDerivation) -> AppResult<ConsultationDerivation>;

    async fn update(&self, record: ConsultationDerivation) -> AppResult<ConsultationDerivation>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct ConsultationDerivationStore<C = DatabaseConnection> {
    db: C,
}

impl<C: DbHandle> ConsultationDerivationStore<C> {
    pub fn new(db: C) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<C: DbHandle> ConsultationDerivationRepository for ConsultationDerivationStore<C> {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ConsultationDerivation>> {
        base::find_by_id::<consultation_derivation::Entity, ConsultationDerivation, _>(self.db.conn(), id).await
    }

    async fn list(&self) -> AppResult<Vec<ConsultationDerivation>> {
        let models = consultation_derivation::Entity::find()
            .order_by_desc(consultation_derivation::Column::ConsultationDate)
            .all(self.db.conn())
            .await?;

        Ok(models.into_iter().map(ConsultationDerivation::from).collect())
    }

    async fn list_by_derivation(&self, derivation_id: Uuid) -> AppResult<Vec<ConsultationDerivation>> {
        let models = consultation_derivation::Entity::find()
            .filter(consultation_derivation::Column::DerivationId.eq(derivation_id))
            .order_by_desc(consultation_derivation::Column::ConsultationDate)
            .all(self.db.conn())
            .await?;

        Ok(models.into_iter().map(ConsultationDerivation::from).collect())
    }

    async fn create(&self, record: ConsultationDerivation) -> AppResult<ConsultationDerivation> {
        base::insert(self.db.conn(), consultation_derivation::ActiveModel::from(record)).await
    }

    async fn update(&self, record: ConsultationDerivation) -> AppResult<ConsultationDerivation> {
        base::update(self.db.conn(), consultation_derivation::ActiveModel::from(record)).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        base::delete_by_id::<consultation_derivation::Entity, _>(self.db.conn(), id, "Consulta de derivación no encontrada").await
    }
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ConsultationReferralRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ConsultationReferral>>;

    async fn list(&self) -> AppResult<Vec<ConsultationReferral>>;

    /// Consultations held for one referral
    async fn list_by_referral(&self, referral_id: Uuid) -> AppResult<Vec<ConsultationReferral>>;

    async fn create(&self, record: ConsultationReferral) -> AppResult<ConsultationReferral>;

    async fn update(&self, record: ConsultationReferral) -> AppResult<ConsultationReferral>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct ConsultationReferralStore<C = DatabaseConnection> {
    db: C,
}

impl<C: DbHandle> ConsultationReferralStore<C> {
    pub fn new(db: C) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<C: DbHandle> ConsultationReferralRepository for ConsultationReferralStore<C> {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ConsultationReferral>> {
        base::find_by_id::<consultation_referral::Entity, ConsultationReferral, _>(self.db.conn(), id).await
    }

    async fn list(&self) -> AppResult<Vec<ConsultationReferral>> {
        let models = consultation_referral::Entity::find()
            .order_by_desc(consultation_referral::Column::ConsultationDate)
            .all(self.db.conn())
            .await?;

        Ok(models.into_iter().map(ConsultationReferral::from).collect())
    }

    async fn list_by_referral(&self, referral_id: Uuid) -> AppResult<Vec<ConsultationReferral>> {
        let models = consultation_referral::Entity::find()
            .filter(consultation_referral::Column::ReferralId.eq(referral_id))
            .order_by_desc(consultation_referral::Column::ConsultationDate)
            .all(self.db.conn())
            .await?;

        Ok(models.into_iter().map(ConsultationReferral::from).collect())
    }

    async fn create(&self, record: ConsultationReferral) -> AppResult<ConsultationReferral> {
        base::insert(self.db.conn(), consultation_referral::ActiveModel::from(record)).await
    }

    async fn update(&self, record: ConsultationReferral) -> AppResult<ConsultationReferral> {
        base::update(self.db.conn(), consultation_referral::ActiveModel::from(record)).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        base::delete_by_id::<consultation_referral::Entity, _>(self.db.conn(), id, "Consulta de remisión no encontrada").await
    }
}
