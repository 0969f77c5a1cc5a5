use crate::query::dao::{EntryDao, EntryOrder};
use crate::query::QueryError;
use domain::entry::Entry;
use model::entry::EntryView;
use model::page::{Page, PageRequest};
use std::sync::Arc;

pub const DEFAULT_MAX_PAGE_SIZE: u64 = 100;

#[derive(Clone)]
pub struct GetEntryList {
    entry_dao: Arc<dyn EntryDao>,
    max_page_size: u64,
}

impl GetEntryList {
    pub fn new(entry_dao: Arc<dyn EntryDao>) -> Self {
        Self {
            entry_dao,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }

    pub fn with_max_page_size(self, max_page_size: u64) -> Self {
        Self {
            max_page_size: max_page_size.max(1),
            ..self
        }
    }

    /// Zero-sized pages are rejected; oversized pages are clamped to the maximum. A page
    /// whose row offset overflows is rejected too.
    fn page_request(&self, page: u64, size: u64) -> Result<PageRequest, QueryError> {
        if size == 0 {
            return Err(QueryError::InvalidParameter(
                "page size must be greater than 0".to_string(),
            ));
        }
        let request = PageRequest::new(page, size.min(self.max_page_size));
        if request.checked_offset().is_none() {
            return Err(QueryError::InvalidParameter(format!(
                "page {} is out of range",
                page
            )));
        }
        Ok(request)
    }

    fn to_page(entries: Vec<Entry>, request: PageRequest, total: u64) -> Page<EntryView> {
        Page::new(entries, request, total).map(EntryView::from)
    }

    pub async fn newest(&self, page: u64, size: u64) -> Result<Page<EntryView>, QueryError> {
        let request = self.page_request(page, size)?;
        let (entries, total) = self.entry_dao.list_live(EntryOrder::Newest, request).await?;
        Ok(Self::to_page(entries, request, total))
    }

    pub async fn most_viewed(&self, page: u64, size: u64) -> Result<Page<EntryView>, QueryError> {
        let request = self.page_request(page, size)?;
        let (entries, total) = self
            .entry_dao
            .list_live(EntryOrder::MostViewed, request)
            .await?;
        Ok(Self::to_page(entries, request, total))
    }

    pub async fn by_category(
        &self,
        category_id: &str,
        page: u64,
        size: u64,
    ) -> Result<Page<EntryView>, QueryError> {
        if category_id.trim().is_empty() {
            return Err(QueryError::InvalidInput(
                "category id must not be blank".to_string(),
            ));
        }
        let request = self.page_request(page, size)?;
        let (entries, total) = self
            .entry_dao
            .list_by_category(category_id, request)
            .await?;
        Ok(Self::to_page(entries, request, total))
    }

    pub async fn by_name(
        &self,
        name: &str,
        page: u64,
        size: u64,
    ) -> Result<Page<EntryView>, QueryError> {
        if name.trim().is_empty() {
            return Err(QueryError::InvalidInput("name must not be blank".to_string()));
        }
        let request = self.page_request(page, size)?;
        let (entries, total) = self.entry_dao.list_by_name(name, request).await?;
        Ok(Self::to_page(entries, request, total))
    }
}
