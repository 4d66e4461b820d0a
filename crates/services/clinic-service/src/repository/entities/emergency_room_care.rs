//! Emergency-room care table.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::EmergencyRoomCare;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "emergency_room_cares")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub emergency_room_id: Uuid,
    pub patient_id: Uuid,
    pub care_date: DateTime,
    pub diagnosis: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for EmergencyRoomCare {
    fn from(model: Model) -> Self {
        EmergencyRoomCare {
            id: model.id,
            emergency_room_id: model.emergency_room_id,
            patient_id: model.patient_id,
            care_date: model.care_date,
            diagnosis: model.diagnosis,
        }
    }
}

impl From<EmergencyRoomCare> for ActiveModel {
    fn from(care: EmergencyRoomCare) -> Self {
        ActiveModel {
            id: Set(care.id),
            emergency_room_id: Set(care.emergency_room_id),
            patient_id: Set(care.patient_id),
            care_date: Set(care.care_date),
            diagnosis: Set(care.diagnosis),
        }
    }
}
