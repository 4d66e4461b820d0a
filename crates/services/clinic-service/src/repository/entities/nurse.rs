//! Nurse table.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::{Employee, Nurse};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "nurses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub identification: String,
    pub name: String,
    pub status: String,
    pub user_id: Option<Uuid>,
    pub department_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Nurse {
    fn from(model: Model) -> Self {
        Nurse {
            id: model.id,
            employee: Employee {
                identification: model.identification,
                name: model.name,
                status: model.status.parse().unwrap_or_default(),
                user_id: model.user_id,
            },
            department_id: model.department_id,
        }
    }
}

impl From<Nurse> for ActiveModel {
    fn from(nurse: Nurse) -> Self {
        ActiveModel {
            id: Set(nurse.id),
            identification: Set(nurse.employee.identification),
            name: Set(nurse.employee.name),
            status: Set(nurse.employee.status.to_string()),
            user_id: Set(nurse.employee.user_id),
            department_id: Set(nurse.department_id),
        }
    }
}
