//! Patient table.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::Patient;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "patients")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub identification: String,
    pub name: String,
    pub age: i32,
    pub contact: String,
    pub address: String,
    pub user_id: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Patient {
    fn from(model: Model) -> Self {
        Patient {
            id: model.id,
            identification: model.identification,
            name: model.name,
            age: model.age,
            contact: model.contact,
            address: model.address,
            user_id: model.user_id,
        }
    }
}

impl From<Patient> for ActiveModel {
    fn from(patient: Patient) -> Self {
        ActiveModel {
            id: Set(patient.id),
            identification: Set(patient.identification),
            name: Set(patient.name),
            age: Set(patient.age),
            contact: Set(patient.contact),
            address: Set(patient.address),
            user_id: Set(patient.user_id),
        }
    }
}
