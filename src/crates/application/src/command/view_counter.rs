use crate::context::AppContext;
use crate::error::AppError;
use domain::entry::EntryRepository;
use domain::value::EntryId;
use log::{debug, warn};
use std::sync::Arc;

/// Increments entry view counts.
///
/// The first view initializes the counter through a full record write; every later view is
/// a single atomic increment at the storage layer, so concurrent viewers of an initialized
/// entry never lose an update. Two first viewers racing may still collapse into one count.
#[derive(Clone)]
pub struct ViewCounter {
    entry_repository: Arc<dyn EntryRepository>,
}

impl ViewCounter {
    pub fn new(entry_repository: Arc<dyn EntryRepository>) -> Self {
        Self { entry_repository }
    }

    pub async fn record_view(&self, ctx: &AppContext, id: &EntryId) -> Result<(), AppError> {
        let Some(mut entry) = self.entry_repository.find_live(id).await? else {
            warn!("Entry not found: {} ({})", id, ctx);
            return Err(AppError::entry_not_found(id));
        };

        if entry.init_view_count() {
            self.entry_repository.save(&entry).await?;
            debug!("Entry {} view count initialized ({})", id, ctx);
            return Ok(());
        }

        if !self.entry_repository.increase_view_count(id).await? {
            warn!("Entry {} vanished before view count update ({})", id, ctx);
            return Err(AppError::entry_not_found(id));
        }
        Ok(())
    }
}
