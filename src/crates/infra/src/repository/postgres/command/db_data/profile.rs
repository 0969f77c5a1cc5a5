use domain::profile::{Profile, ProfileError, ProfileRole};
use domain::value::ProfileId;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "profile")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub role: String,
    pub created_at: DateTime,
    pub deleted_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Profile {
    type Error = ProfileError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Profile {
            id: ProfileId::from(model.id),
            name: model.name,
            email: model.email,
            role: model.role.parse::<ProfileRole>()?,
            deleted_at: model.deleted_at,
        })
    }
}
