//! Doctor table.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::{Doctor, Employee};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "doctors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub identification: String,
    pub name: String,
    pub status: String,
    pub user_id: Option<Uuid>,
    pub department_id: Uuid,
    pub specialty: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Doctor {
    fn from(model: Model) -> Self {
        Doctor {
            id: model.id,
            employee: Employee {
                identification: model.identification,
                name: model.name,
                status: model.status.parse().unwrap_or_default(),
                user_id: model.user_id,
            },
            department_id: model.department_id,
            specialty: model.specialty,
        }
    }
}

impl From<Doctor> for ActiveModel {
    fn from(doctor: Doctor) -> Self {
        ActiveModel {
            id: Set(doctor.id),
            identification: Set(doctor.employee.identification),
            name: Set(doctor.employee.name),
            status: Set(doctor.employee.status.to_string()),
            user_id: Set(doctor.employee.user_id),
            department_id: Set(doctor.department_id),
            specialty: Set(doctor.specialty),
        }
    }
}
