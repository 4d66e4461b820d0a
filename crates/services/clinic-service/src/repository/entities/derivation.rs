//! Derivation table.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::Derivation;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "derivations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub patient_id: Uuid,
    pub origin_department_id: Uuid,
    pub destination_department_id: Uuid,
    pub derivation_date: Date,
    pub reason: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Derivation {
    fn from(model: Model) -> Self {
        Derivation {
            id: model.id,
            patient_id: model.patient_id,
            origin_department_id: model.origin_department_id,
            destination_department_id: model.destination_department_id,
            derivation_date: model.derivation_date,
            reason: model.reason,
        }
    }
}

impl From<Derivation> for ActiveModel {
    fn from(derivation: Derivation) -> Self {
        ActiveModel {
            id: Set(derivation.id),
            patient_id: Set(derivation.patient_id),
            origin_department_id: Set(derivation.origin_department_id),
            destination_department_id: Set(derivation.destination_department_id),
            derivation_date: Set(derivation.derivation_date),
            reason: Set(derivation.reason),
        }
    }
}
