//! Warehouse manager table.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::{Employee, WarehouseManager};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "warehouse_managers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub identification: String,
    pub name: String,
    pub status: String,
    pub user_id: Option<Uuid>,
    pub warehouse: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for WarehouseManager {
    fn from(model: Model) -> Self {
        WarehouseManager {
            id: model.id,
            employee: Employee {
                identification: model.identification,
                name: model.name,
                status: model.status.parse().unwrap_or_default(),
                user_id: model.user_id,
            },
            warehouse: model.warehouse,
        }
    }
}

impl From<WarehouseManager> for ActiveModel {
    fn from(manager: WarehouseManager) -> Self {
        ActiveModel {
            id: Set(manager.id),
            identification: Set(manager.employee.identification),
            name: Set(manager.employee.name),
            status: Set(manager.employee.status.to_string()),
            user_id: Set(manager.employee.user_id),
            warehouse: Set(manager.warehouse),
        }
    }
}
