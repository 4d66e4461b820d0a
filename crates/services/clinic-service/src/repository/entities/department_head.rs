//! Department head table.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::{DepartmentHead, Employee};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "department_heads")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub identification: String,
    pub name: String,
    pub status: String,
    pub user_id: Option<Uuid>,
    pub department_id: Uuid,
    pub appointed_on: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for DepartmentHead {
    fn from(model: Model) -> Self {
        DepartmentHead {
            id: model.id,
            employee: Employee {
                identification: model.identification,
                name: model.name,
                status: model.status.parse().unwrap_or_default(),
                user_id: model.user_id,
            },
            department_id: model.department_id,
            appointed_on: model.appointed_on,
        }
    }
}

impl From<DepartmentHead> for ActiveModel {
    fn from(head: DepartmentHead) -> Self {
        ActiveModel {
            id: Set(head.id),
            identification: Set(head.employee.identification),
            name: Set(head.employee.name),
            status: Set(head.employee.status.to_string()),
            user_id: Set(head.employee.user_id),
            department_id: Set(head.department_id),
            appointed_on: Set(head.appointed_on),
        }
    }
}
