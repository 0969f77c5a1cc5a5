use crate::command::shared::IdGenerator;
use crate::context::AppContext;
use crate::error::AppError;
use chrono::Utc;
use domain::entry::{Entry, EntryChanges, EntryRepository, NewEntry};
use domain::value::EntryId;
use log::{info, warn};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct CreateEntryCmd {
    pub name: String,
    pub country: Option<String>,
    pub media_type: Option<String>,
    pub category_id: Option<String>,
    pub preview_attach_link: Option<String>,
    pub video_link: Option<String>,
    pub translation_language: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateEntryCmd {
    pub name: Option<String>,
    pub country: Option<String>,
    pub media_type: Option<String>,
    pub category_id: Option<String>,
}

#[derive(Clone)]
pub struct EntryService {
    id_generator: Arc<dyn IdGenerator>,
    entry_repository: Arc<dyn EntryRepository>,
}

impl EntryService {
    pub fn new(
        id_generator: Arc<dyn IdGenerator>,
        entry_repository: Arc<dyn EntryRepository>,
    ) -> Self {
        Self {
            id_generator,
            entry_repository,
        }
    }

    pub async fn create_entry(
        &self,
        ctx: &AppContext,
        cmd: CreateEntryCmd,
    ) -> Result<Entry, AppError> {
        let id = EntryId::from(self.id_generator.next_id().await?);
        let entry = Entry::create(
            id,
            NewEntry {
                name: cmd.name,
                country: cmd.country,
                media_type: cmd.media_type,
                category_id: cmd.category_id,
                preview_attach_link: cmd.preview_attach_link,
                video_link: cmd.video_link,
                translation_language: cmd.translation_language,
            },
        )?;
        let entry = self.entry_repository.create(entry).await?;
        info!("Entry {} created ({})", entry.id, ctx);
        Ok(entry)
    }

    pub async fn update_entry(
        &self,
        ctx: &AppContext,
        id: &EntryId,
        cmd: UpdateEntryCmd,
    ) -> Result<Entry, AppError> {
        let mut entry = self.get_live(ctx, id).await?;
        entry.apply(EntryChanges {
            name: cmd.name,
            country: cmd.country,
            media_type: cmd.media_type,
            category_id: cmd.category_id,
        })?;
        self.entry_repository.save_details(&entry).await?;
        info!("Entry {} updated ({})", entry.id, ctx);
        Ok(entry)
    }

    /// Soft delete. Deleting an already deleted entry is a not-found condition.
    pub async fn delete_entry(&self, ctx: &AppContext, id: &EntryId) -> Result<bool, AppError> {
        self.get_live(ctx, id).await?;
        let deleted = self
            .entry_repository
            .soft_delete(id, Utc::now().naive_utc())
            .await?;
        if !deleted {
            // Lost a race with a concurrent delete.
            warn!("Entry {} vanished before delete ({})", id, ctx);
            return Err(AppError::entry_not_found(id));
        }
        info!("Entry {} soft-deleted ({})", id, ctx);
        Ok(true)
    }

    pub async fn get_live(&self, ctx: &AppContext, id: &EntryId) -> Result<Entry, AppError> {
        match self.entry_repository.find_live(id).await? {
            Some(entry) => Ok(entry),
            None => {
                warn!("Entry not found: {} ({})", id, ctx);
                Err(AppError::entry_not_found(id))
            }
        }
    }
}
