//! Medication consumed by emergency-room cares.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::{MedicationUsage, UsageKind};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "medication_emergencies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub emergency_room_care_id: Uuid,
    pub medication_id: Uuid,
    pub quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for MedicationUsage {
    fn from(model: Model) -> Self {
        MedicationUsage {
            id: model.id,
            kind: UsageKind::Emergency,
            record_id: model.emergency_room_care_id,
            medication_id: model.medication_id,
            quantity: model.quantity,
        }
    }
}

impl From<MedicationUsage> for ActiveModel {
    fn from(usage: MedicationUsage) -> Self {
        ActiveModel {
            id: Set(usage.id),
            emergency_room_care_id: Set(usage.record_id),
            medication_id: Set(usage.medication_id),
            quantity: Set(usage.quantity),
        }
    }
}
