//! Per-department medication stock.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::StockDepartment;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "stock_departments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub department_id: Uuid,
    pub medication_id: Uuid,
    pub quantity: i32,
    pub min_quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for StockDepartment {
    fn from(model: Model) -> Self {
        StockDepartment {
            id: model.id,
            department_id: model.department_id,
            medication_id: model.medication_id,
            quantity: model.quantity,
            min_quantity: model.min_quantity,
        }
    }
}

impl From<StockDepartment> for ActiveModel {
    fn from(stock: StockDepartment) -> Self {
        ActiveModel {
            id: Set(stock.id),
            department_id: Set(stock.department_id),
            medication_id: Set(stock.medication_id),
            quantity: Set(stock.quantity),
            min_quantity: Set(stock.min_quantity),
        }
    }
}
