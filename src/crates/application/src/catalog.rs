//! Catalog operations consumed by the request-routing layer.
//!
//! Admin operations (create, update, delete) trust the caller to have checked the actor's
//! role; every other operation is public.

use crate::command::entry::{CreateEntryCmd, EntryService, UpdateEntryCmd};
use crate::command::shared::IdGenerator;
use crate::command::view_counter::ViewCounter;
use crate::context::AppContext;
use crate::error::AppError;
use crate::query::dao::EntryDao;
use crate::query::filter_entries::FilterEntries;
use crate::query::get_entry::GetEntry;
use crate::query::get_entry_list::GetEntryList;
use crate::query::QueryError;
use domain::entry::EntryRepository;
use domain::value::EntryId;
use log::warn;
use model::entry::{EntrySearch, EntryView};
use model::page::Page;
use std::sync::Arc;

#[derive(Clone)]
pub struct CatalogService {
    entry_service: EntryService,
    view_counter: ViewCounter,
    get_entry: GetEntry,
    get_entry_list: GetEntryList,
    filter_entries: FilterEntries,
}

impl CatalogService {
    pub fn new(
        id_generator: Arc<dyn IdGenerator>,
        entry_repository: Arc<dyn EntryRepository>,
        entry_dao: Arc<dyn EntryDao>,
    ) -> Self {
        Self {
            entry_service: EntryService::new(id_generator, entry_repository.clone()),
            view_counter: ViewCounter::new(entry_repository),
            get_entry: GetEntry::new(entry_dao.clone()),
            get_entry_list: GetEntryList::new(entry_dao.clone()),
            filter_entries: FilterEntries::new(entry_dao),
        }
    }

    pub fn with_max_page_size(self, max_page_size: u64) -> Self {
        Self {
            get_entry_list: self.get_entry_list.with_max_page_size(max_page_size),
            ..self
        }
    }

    pub async fn create_entry(
        &self,
        ctx: &AppContext,
        cmd: CreateEntryCmd,
    ) -> Result<EntryView, AppError> {
        let entry = self.entry_service.create_entry(ctx, cmd).await?;
        Ok(EntryView::from(&entry))
    }

    pub async fn update_entry(
        &self,
        ctx: &AppContext,
        id: &EntryId,
        cmd: UpdateEntryCmd,
    ) -> Result<EntryView, AppError> {
        let entry = self.entry_service.update_entry(ctx, id, cmd).await?;
        Ok(EntryView::from(&entry))
    }

    pub async fn delete_entry(&self, ctx: &AppContext, id: &EntryId) -> Result<bool, AppError> {
        self.entry_service.delete_entry(ctx, id).await
    }

    pub async fn get_entry(&self, ctx: &AppContext, id: &EntryId) -> Result<EntryView, AppError> {
        self.get_entry.handle(id).await.map_err(|e| match e {
            QueryError::NotFound(_) => {
                warn!("Entry not found: {} ({})", id, ctx);
                AppError::entry_not_found(id)
            }
            other => other.into(),
        })
    }

    pub async fn list_entries(&self, page: u64, size: u64) -> Result<Page<EntryView>, AppError> {
        Ok(self.get_entry_list.newest(page, size).await?)
    }

    pub async fn list_by_category(
        &self,
        category_id: &str,
        page: u64,
        size: u64,
    ) -> Result<Page<EntryView>, AppError> {
        Ok(self
            .get_entry_list
            .by_category(category_id, page, size)
            .await?)
    }

    pub async fn list_by_name(
        &self,
        name: &str,
        page: u64,
        size: u64,
    ) -> Result<Page<EntryView>, AppError> {
        Ok(self.get_entry_list.by_name(name, page, size).await?)
    }

    pub async fn filter_entries(&self, search: &EntrySearch) -> Result<Vec<EntryView>, AppError> {
        Ok(self.filter_entries.handle(search).await?)
    }

    pub async fn list_by_view_count(
        &self,
        page: u64,
        size: u64,
    ) -> Result<Page<EntryView>, AppError> {
        Ok(self.get_entry_list.most_viewed(page, size).await?)
    }

    pub async fn record_view(&self, ctx: &AppContext, id: &EntryId) -> Result<(), AppError> {
        self.view_counter.record_view(ctx, id).await
    }
}
