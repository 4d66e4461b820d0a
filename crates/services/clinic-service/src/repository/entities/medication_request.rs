//! Medication lines of a warehouse request.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::MedicationRequest;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "medication_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub warehouse_request_id: Uuid,
    pub medication_id: Uuid,
    pub quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for MedicationRequest {
    fn from(model: Model) -> Self {
        MedicationRequest {
            id: model.id,
            warehouse_request_id: model.warehouse_request_id,
            medication_id: model.medication_id,
            quantity: model.quantity,
        }
    }
}

impl From<MedicationRequest> for ActiveModel {
    fn from(line: MedicationRequest) -> Self {
        ActiveModel {
            id: Set(line.id),
            warehouse_request_id: Set(line.warehouse_request_id),
            medication_id: Set(line.medication_id),
            quantity: Set(line.quantity),
        }
    }
}
