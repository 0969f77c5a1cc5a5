use crate::query::filter::EntryFilter;
use crate::query::QueryError;
use async_trait::async_trait;
use domain::entry::Entry;
use domain::value::EntryId;
use model::page::PageRequest;

/// Sort key for paginated listings. Ties are always broken by id descending so that a
/// fixed key and page request yield a stable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryOrder {
    /// `created_at DESC`
    #[default]
    Newest,
    /// `COALESCE(view_count, 0) DESC, created_at DESC`
    MostViewed,
}

/// Read side of the entry store. Every method only ever sees live entries.
#[async_trait]
pub trait EntryDao: Send + Sync {
    async fn get_live(&self, id: &EntryId) -> Result<Option<Entry>, QueryError>;

    async fn list_live(
        &self,
        order: EntryOrder,
        page: PageRequest,
    ) -> Result<(Vec<Entry>, u64), QueryError>;

    /// Newest first.
    async fn list_by_category(
        &self,
        category_id: &str,
        page: PageRequest,
    ) -> Result<(Vec<Entry>, u64), QueryError>;

    /// Exact name match, newest first.
    async fn list_by_name(
        &self,
        name: &str,
        page: PageRequest,
    ) -> Result<(Vec<Entry>, u64), QueryError>;

    /// Unpaginated, oldest first.
    async fn filter(&self, filter: &EntryFilter) -> Result<Vec<Entry>, QueryError>;
}
