//! Referral table.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::Referral;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "referrals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub patient_id: Uuid,
    pub external_post_id: Uuid,
    pub destination_department_id: Uuid,
    pub referral_date: Date,
    pub reason: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Referral {
    fn from(model: Model) -> Self {
        Referral {
            id: model.id,
            patient_id: model.patient_id,
            external_post_id: model.external_post_id,
            destination_department_id: model.destination_department_id,
            referral_date: model.referral_date,
            reason: model.reason,
        }
    }
}

impl From<Referral> for ActiveModel {
    fn from(referral: Referral) -> Self {
        ActiveModel {
            id: Set(referral.id),
            patient_id: Set(referral.patient_id),
            external_post_id: Set(referral.external_post_id),
            destination_department_id: Set(referral.destination_department_id),
            referral_date: Set(referral.referral_date),
            reason: Set(referral.reason),
        }
    }
}
