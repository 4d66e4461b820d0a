//! External medical post table.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::ExternalMedicalPost;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "external_medical_posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub address: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ExternalMedicalPost {
    fn from(model: Model) -> Self {
        ExternalMedicalPost {
            id: model.id,
            name: model.name,
            address: model.address,
        }
    }
}

impl From<ExternalMedicalPost> for ActiveModel {
    fn from(post: ExternalMedicalPost) -> Self {
        ActiveModel {
            id: Set(post.id),
            name: Set(post.name),
            address: Set(post.address),
        }
    }
}
