use super::db_data::profile;
use async_trait::async_trait;
use domain::profile::{Profile, ProfileError};
use sea_orm::*;

#[derive(Clone)]
pub struct ProfileRepositoryImpl {
    db: DatabaseConnection,
}

impl ProfileRepositoryImpl {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl domain::profile::ProfileRepository for ProfileRepositoryImpl {
    async fn find_live_by_email(&self, email: &str) -> Result<Option<Profile>, ProfileError> {
        let result = profile::Entity::find()
            .filter(profile::Column::Email.eq(email))
            .filter(profile::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| ProfileError::DbErr(e.to_string()))?;
        result.map(Profile::try_from).transpose()
    }
}
