//! Emergency-room guard slots. One row per doctor and date.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::EmergencyRoom;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "emergency_rooms")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub guard_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for EmergencyRoom {
    fn from(model: Model) -> Self {
        EmergencyRoom {
            id: model.id,
            doctor_id: model.doctor_id,
            guard_date: model.guard_date,
        }
    }
}

impl From<EmergencyRoom> for ActiveModel {
    fn from(room: EmergencyRoom) -> Self {
        ActiveModel {
            id: Set(room.id),
            doctor_id: Set(room.doctor_id),
            guard_date: Set(room.guard_date),
        }
    }
}
