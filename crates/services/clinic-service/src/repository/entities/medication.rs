//! Medication catalog table.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::Medication;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "medications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub batch: String,
    pub expiration_date: Date,
    pub quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Medication {
    fn from(model: Model) -> Self {
        Medication {
            id: model.id,
            name: model.name,
            batch: model.batch,
            expiration_date: model.expiration_date,
            quantity: model.quantity,
        }
    }
}

impl From<Medication> for ActiveModel {
    fn from(medication: Medication) -> Self {
        ActiveModel {
            id: Set(medication.id),
            name: Set(medication.name),
            batch: Set(medication.batch),
            expiration_date: Set(medication.expiration_date),
            quantity: Set(medication.quantity),
        }
    }
}
