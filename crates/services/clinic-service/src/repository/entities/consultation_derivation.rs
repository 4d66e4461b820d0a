//! Consultation table for derivations.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::ConsultationDerivation;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "consultation_derivations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub derivation_id: Uuid,
    pub doctor_id: Uuid,
    pub department_head_id: Uuid,
    pub diagnosis: String,
    pub consultation_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ConsultationDerivation {
    fn from(model: Model) -> Self {
        ConsultationDerivation {
            id: model.id,
            derivation_id: model.derivation_id,
            doctor_id: model.doctor_id,
            department_head_id: model.department_head_id,
            diagnosis: model.diagnosis,
            consultation_date: model.consultation_date,
        }
    }
}

impl From<ConsultationDerivation> for ActiveModel {
    fn from(consultation: ConsultationDerivation) -> Self {
        ActiveModel {
            id: Set(consultation.id),
            derivation_id: Set(consultation.derivation_id),
            doctor_id: Set(consultation.doctor_id),
            department_head_id: Set(consultation.department_head_id),
            diagnosis: Set(consultation.diagnosis),
            consultation_date: Set(consultation.consultation_date),
        }
    }
}
