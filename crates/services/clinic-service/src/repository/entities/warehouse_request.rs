//! Department requests to the warehouse.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::WarehouseRequest;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "warehouse_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub department_id: Uuid,
    pub request_date: Date,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for WarehouseRequest {
    fn from(model: Model) -> Self {
        WarehouseRequest {
            id: model.id,
            department_id: model.department_id,
            request_date: model.request_date,
            status: model.status,
        }
    }
}

impl From<WarehouseRequest> for ActiveModel {
    fn from(request: WarehouseRequest) -> Self {
        ActiveModel {
            id: Set(request.id),
            department_id: Set(request.department_id),
            request_date: Set(request.request_date),
            status: Set(request.status),
        }
    }
}
