use crate::repository::postgres::command::db_data::entry::{self, Column, Entity};
use application::query::dao::{EntryDao, EntryOrder};
use application::query::filter::{EntryFilter, EntryPredicate};
use application::query::QueryError;
use async_trait::async_trait;
use domain::entry::Entry;
use domain::value::EntryId;
use log::debug;
use model::page::PageRequest;
use sea_orm::sea_query::{Expr, Order, SimpleExpr};
use sea_orm::*;

pub struct EntryDaoImpl {
    db: DatabaseConnection,
}

impl EntryDaoImpl {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn live() -> Select<Entity> {
        Entity::find().filter(Column::DeletedAt.is_null())
    }

    fn newest_first(select: Select<Entity>) -> Select<Entity> {
        select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
    }

    fn ordered(select: Select<Entity>, order: EntryOrder) -> Select<Entity> {
        match order {
            EntryOrder::Newest => Self::newest_first(select),
            EntryOrder::MostViewed => Self::newest_first(
                select.order_by(Expr::cust("COALESCE(view_count, 0)"), Order::Desc),
            ),
        }
    }

    async fn fetch_page(
        &self,
        select: Select<Entity>,
        page: PageRequest,
    ) -> Result<(Vec<Entry>, u64), QueryError> {
        // Paginator multiplies page by size unchecked
        if page.size == 0 || page.checked_offset().is_none() {
            return Err(QueryError::InvalidParameter(format!(
                "page {} of size {} is out of range",
                page.page, page.size
            )));
        }
        let paginator = select.paginate(&self.db, page.size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| QueryError::DbError(e.to_string()))?;
        let rows = paginator
            .fetch_page(page.page)
            .await
            .map_err(|e| QueryError::DbError(e.to_string()))?;
        Ok((into_entries(rows)?, total))
    }
}

fn into_entries(rows: Vec<entry::Model>) -> Result<Vec<Entry>, QueryError> {
    rows.into_iter()
        .map(|row| Entry::try_from(row).map_err(|e| QueryError::DbError(e.to_string())))
        .collect()
}

/// Escapes LIKE wildcards so the user pattern only ever matches literally.
fn escape_like(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn predicate_expr(predicate: &EntryPredicate) -> SimpleExpr {
    match predicate {
        EntryPredicate::CategoryIs(v) => Column::CategoryId.eq(v.as_str()),
        EntryPredicate::NameContains(v) => Expr::cust_with_values(
            "LOWER(name) LIKE $1",
            vec![format!("%{}%", escape_like(&v.to_lowercase()))],
        ),
        EntryPredicate::LanguageIs(v) => Column::TranslationLanguage.eq(v.as_str()),
        EntryPredicate::CountryIs(v) => Column::Country.eq(v.as_str()),
        EntryPredicate::MediaTypeIs(v) => Column::MediaType.eq(v.as_str()),
        EntryPredicate::StatusIs(status) => Column::Status.eq(status.as_str()),
        EntryPredicate::VisibleIs(visible) => Column::Visible.eq(*visible),
        EntryPredicate::CreatedFrom(from) => Column::CreatedAt.gte(*from),
        EntryPredicate::CreatedTo(to) => Column::CreatedAt.lte(*to),
    }
}

fn filter_condition(filter: &EntryFilter) -> Condition {
    filter
        .predicates()
        .iter()
        .fold(Condition::all(), |cond, p| cond.add(predicate_expr(p)))
}

#[async_trait]
impl EntryDao for EntryDaoImpl {
    async fn get_live(&self, id: &EntryId) -> Result<Option<Entry>, QueryError> {
        let row = Self::live()
            .filter(Column::Id.eq(id.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| QueryError::DbError(e.to_string()))?;
        row.map(|m| Entry::try_from(m).map_err(|e| QueryError::DbError(e.to_string())))
            .transpose()
    }

    async fn list_live(
        &self,
        order: EntryOrder,
        page: PageRequest,
    ) -> Result<(Vec<Entry>, u64), QueryError> {
        self.fetch_page(Self::ordered(Self::live(), order), page)
            .await
    }

    async fn list_by_category(
        &self,
        category_id: &str,
        page: PageRequest,
    ) -> Result<(Vec<Entry>, u64), QueryError> {
        let select = Self::newest_first(Self::live().filter(Column::CategoryId.eq(category_id)));
        self.fetch_page(select, page).await
    }

    async fn list_by_name(
        &self,
        name: &str,
        page: PageRequest,
    ) -> Result<(Vec<Entry>, u64), QueryError> {
        let select = Self::newest_first(Self::live().filter(Column::Name.eq(name)));
        self.fetch_page(select, page).await
    }

    async fn filter(&self, filter: &EntryFilter) -> Result<Vec<Entry>, QueryError> {
        debug!("Filtering entries with {} predicates", filter.predicates().len());
        let rows = Self::live()
            .filter(filter_condition(filter))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| QueryError::DbError(e.to_string()))?;
        into_entries(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn test_filter_sql_is_and_combined() {
        let filter = EntryFilter::new()
            .and(EntryPredicate::CategoryIs("c1".to_string()))
            .and(EntryPredicate::VisibleIs(true));
        let sql = EntryDaoImpl::live()
            .filter(filter_condition(&filter))
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.contains(r#""catalog_entry"."deleted_at" IS NULL"#), "{}", sql);
        assert!(sql.contains(r#""catalog_entry"."category_id" = 'c1'"#), "{}", sql);
        assert!(sql.contains(" AND "), "{}", sql);
    }

    #[test]
    fn test_most_viewed_order() {
        let sql = EntryDaoImpl::ordered(EntryDaoImpl::live(), EntryOrder::MostViewed)
            .build(DbBackend::Postgres)
            .to_string();
        let coalesce = sql.find("COALESCE(view_count, 0) DESC").unwrap();
        let created = sql.find(r#""catalog_entry"."created_at" DESC"#).unwrap();
        assert!(coalesce < created, "{}", sql);
    }

    #[tokio::test]
    async fn test_overflowing_page_fails_before_query() {
        let dao = EntryDaoImpl::new(DatabaseConnection::Disconnected);
        let result = dao
            .list_live(EntryOrder::Newest, PageRequest::new(u64::MAX / 2, 10))
            .await;
        assert!(matches!(result, Err(QueryError::InvalidParameter(_))));
    }
}
