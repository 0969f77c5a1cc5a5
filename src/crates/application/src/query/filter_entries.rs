use crate::query::dao::EntryDao;
use crate::query::filter::EntryFilter;
use crate::query::QueryError;
use model::entry::{EntrySearch, EntryView};
use std::sync::Arc;

#[derive(Clone)]
pub struct FilterEntries {
    entry_dao: Arc<dyn EntryDao>,
}

impl FilterEntries {
    pub fn new(entry_dao: Arc<dyn EntryDao>) -> Self {
        Self { entry_dao }
    }

    pub async fn handle(&self, search: &EntrySearch) -> Result<Vec<EntryView>, QueryError> {
        let filter = EntryFilter::from_search(search)?;
        let entries = self.entry_dao.filter(&filter).await?;
        Ok(entries.iter().map(EntryView::from).collect())
    }
}
