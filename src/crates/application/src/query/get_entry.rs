use crate::query::dao::EntryDao;
use crate::query::QueryError;
use domain::value::EntryId;
use model::entry::EntryView;
use std::sync::Arc;

#[derive(Clone)]
pub struct GetEntry {
    entry_dao: Arc<dyn EntryDao>,
}

impl GetEntry {
    pub fn new(entry_dao: Arc<dyn EntryDao>) -> Self {
        Self { entry_dao }
    }

    pub async fn handle(&self, id: &EntryId) -> Result<EntryView, QueryError> {
        self.entry_dao
            .get_live(id)
            .await?
            .map(EntryView::from)
            .ok_or_else(|| QueryError::NotFound(format!("entry {}", id)))
    }
}
