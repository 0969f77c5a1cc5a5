use super::db_data::entry::{self, ActiveModel, Column, Entity};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use domain::entry::{Entry, EntryError};
use domain::value::EntryId;
use sea_orm::sea_query::Expr;
use sea_orm::*;

#[derive(Clone)]
pub struct EntryRepositoryImpl {
    db: DatabaseConnection,
}

impl EntryRepositoryImpl {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn live_row(id: &EntryId) -> Condition {
        Condition::all()
            .add(Column::Id.eq(id.as_str()))
            .add(Column::DeletedAt.is_null())
    }
}

#[async_trait]
impl domain::entry::EntryRepository for EntryRepositoryImpl {
    async fn create(&self, agg: Entry) -> Result<Entry, EntryError> {
        let model = ActiveModel::from(&agg)
            .insert(&self.db)
            .await
            .map_err(|e| EntryError::DbErr(e.to_string()))?;
        Entry::try_from(model)
    }

    async fn find_live(&self, id: &EntryId) -> Result<Option<Entry>, EntryError> {
        let result = entry::Entity::find()
            .filter(Self::live_row(id))
            .one(&self.db)
            .await
            .map_err(|e| EntryError::DbErr(e.to_string()))?;
        result.map(Entry::try_from).transpose()
    }

    async fn save(&self, agg: &Entry) -> Result<(), EntryError> {
        let result = Entity::update_many()
            .set(ActiveModel::for_update(agg))
            .filter(Self::live_row(&agg.id))
            .exec(&self.db)
            .await
            .map_err(|e| EntryError::DbErr(e.to_string()))?;
        if result.rows_affected == 0 {
            return Err(EntryError::NotFound(agg.id.to_string()));
        }
        Ok(())
    }

    async fn save_details(&self, agg: &Entry) -> Result<(), EntryError> {
        let result = Entity::update_many()
            .set(ActiveModel::for_details(agg))
            .filter(Self::live_row(&agg.id))
            .exec(&self.db)
            .await
            .map_err(|e| EntryError::DbErr(e.to_string()))?;
        if result.rows_affected == 0 {
            return Err(EntryError::NotFound(agg.id.to_string()));
        }
        Ok(())
    }

    async fn soft_delete(
        &self,
        id: &EntryId,
        deleted_at: NaiveDateTime,
    ) -> Result<bool, EntryError> {
        let result = Entity::update_many()
            .col_expr(Column::DeletedAt, Expr::value(deleted_at))
            .filter(Self::live_row(id))
            .exec(&self.db)
            .await
            .map_err(|e| EntryError::DbErr(e.to_string()))?;
        Ok(result.rows_affected > 0)
    }

    async fn increase_view_count(&self, id: &EntryId) -> Result<bool, EntryError> {
        // view_count = COALESCE(view_count, 0) + 1 in a single UPDATE
        let result = Entity::update_many()
            .col_expr(
                Column::ViewCount,
                Expr::col((Entity, Column::ViewCount)).if_null(0i64).add(1i64),
            )
            .filter(Self::live_row(id))
            .exec(&self.db)
            .await
            .map_err(|e| EntryError::DbErr(e.to_string()))?;
        Ok(result.rows_affected > 0)
    }
}
