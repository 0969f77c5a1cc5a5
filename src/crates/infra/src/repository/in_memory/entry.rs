use application::query::dao::{EntryDao, EntryOrder};
use application::query::filter::EntryFilter;
use application::query::QueryError;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use dashmap::mapref::entry::Entry as Slot;
use dashmap::DashMap;
use domain::entry::{Entry, EntryError, EntryRepository};
use domain::value::EntryId;
use model::page::PageRequest;
use std::cmp::Reverse;
use std::sync::Arc;

/// Process-local entry store serving both the write and the read side.
///
/// Every mutation of a single entry happens while holding that entry's shard lock, so
/// `increase_view_count` is as atomic here as the single-statement UPDATE in Postgres.
#[derive(Clone, Default)]
pub struct InMemoryEntryStore {
    store: Arc<DashMap<EntryId, Entry>>,
}

impl InMemoryEntryStore {
    pub fn new() -> Self {
        Self {
            store: Arc::new(DashMap::new()),
        }
    }

    fn live_where(&self, keep: impl Fn(&Entry) -> bool) -> Vec<Entry> {
        self.store
            .iter()
            .filter(|e| e.value().is_live() && keep(e.value()))
            .map(|e| e.value().clone())
            .collect()
    }
}

fn sort(entries: &mut [Entry], order: EntryOrder) {
    match order {
        EntryOrder::Newest => {
            entries.sort_by(|a, b| (b.created_at, &b.id).cmp(&(a.created_at, &a.id)))
        }
        EntryOrder::MostViewed => entries.sort_by_key(|e| {
            (
                Reverse(e.views()),
                Reverse(e.created_at),
                Reverse(e.id.clone()),
            )
        }),
    }
}

fn paginate(mut entries: Vec<Entry>, order: EntryOrder, page: PageRequest) -> (Vec<Entry>, u64) {
    sort(&mut entries, order);
    let total = entries.len() as u64;
    let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let size = usize::try_from(page.size).unwrap_or(usize::MAX);
    let items = entries.into_iter().skip(offset).take(size).collect();
    (items, total)
}

#[async_trait]
impl EntryRepository for InMemoryEntryStore {
    async fn create(&self, entry: Entry) -> Result<Entry, EntryError> {
        match self.store.entry(entry.id.clone()) {
            Slot::Occupied(_) => Err(EntryError::DbErr(format!(
                "duplicate key value violates unique constraint: {}",
                entry.id
            ))),
            Slot::Vacant(slot) => {
                slot.insert(entry.clone());
                Ok(entry)
            }
        }
    }

    async fn find_live(&self, id: &EntryId) -> Result<Option<Entry>, EntryError> {
        Ok(self
            .store
            .get(id)
            .filter(|e| e.is_live())
            .map(|e| e.value().clone()))
    }

    async fn save(&self, entry: &Entry) -> Result<(), EntryError> {
        match self.store.get_mut(&entry.id) {
            Some(mut stored) if stored.is_live() => {
                let created_at = stored.created_at;
                *stored = Entry {
                    created_at,
                    deleted_at: None,
                    ..entry.clone()
                };
                Ok(())
            }
            _ => Err(EntryError::NotFound(entry.id.to_string())),
        }
    }

    async fn save_details(&self, entry: &Entry) -> Result<(), EntryError> {
        match self.store.get_mut(&entry.id) {
            Some(mut stored) if stored.is_live() => {
                stored.name = entry.name.clone();
                stored.country = entry.country.clone();
                stored.media_type = entry.media_type.clone();
                stored.category_id = entry.category_id.clone();
                Ok(())
            }
            _ => Err(EntryError::NotFound(entry.id.to_string())),
        }
    }

    async fn soft_delete(
        &self,
        id: &EntryId,
        deleted_at: NaiveDateTime,
    ) -> Result<bool, EntryError> {
        match self.store.get_mut(id) {
            Some(mut stored) if stored.is_live() => {
                stored.deleted_at = Some(deleted_at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn increase_view_count(&self, id: &EntryId) -> Result<bool, EntryError> {
        match self.store.get_mut(id) {
            Some(mut stored) if stored.is_live() => {
                stored.view_count = Some(stored.views() + 1);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl EntryDao for InMemoryEntryStore {
    async fn get_live(&self, id: &EntryId) -> Result<Option<Entry>, QueryError> {
        Ok(self
            .store
            .get(id)
            .filter(|e| e.is_live())
            .map(|e| e.value().clone()))
    }

    async fn list_live(
        &self,
        order: EntryOrder,
        page: PageRequest,
    ) -> Result<(Vec<Entry>, u64), QueryError> {
        Ok(paginate(self.live_where(|_| true), order, page))
    }

    async fn list_by_category(
        &self,
        category_id: &str,
        page: PageRequest,
    ) -> Result<(Vec<Entry>, u64), QueryError> {
        let entries = self.live_where(|e| e.category_id.as_deref() == Some(category_id));
        Ok(paginate(entries, EntryOrder::Newest, page))
    }

    async fn list_by_name(
        &self,
        name: &str,
        page: PageRequest,
    ) -> Result<(Vec<Entry>, u64), QueryError> {
        let entries = self.live_where(|e| e.name == name);
        Ok(paginate(entries, EntryOrder::Newest, page))
    }

    async fn filter(&self, filter: &EntryFilter) -> Result<Vec<Entry>, QueryError> {
        let mut entries = self.live_where(|e| filter.matches(e));
        entries.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use domain::entry::NewEntry;

    fn entry(id: &str, name: &str, minutes_ago: i64) -> Entry {
        let mut entry = Entry::create(
            EntryId::from(id),
            NewEntry {
                name: name.to_string(),
                category_id: Some("c1".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        entry.created_at = Utc::now().naive_utc() - Duration::minutes(minutes_ago);
        entry
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_id() {
        let store = InMemoryEntryStore::new();
        store.create(entry("a", "A", 0)).await.unwrap();
        let result = store.create(entry("a", "B", 0)).await;
        assert!(matches!(result, Err(EntryError::DbErr(_))));
    }

    #[tokio::test]
    async fn test_save_details_keeps_stored_counter() {
        let store = InMemoryEntryStore::new();
        let created = store.create(entry("a", "A", 0)).await.unwrap();
        store.increase_view_count(&created.id).await.unwrap();

        let mut stale = created.clone();
        stale.name = "Renamed".to_string();
        stale.video_link = Some("ignored".to_string());
        store.save_details(&stale).await.unwrap();

        let stored = store.find_live(&created.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Renamed");
        assert_eq!(stored.view_count, Some(1));
        assert_eq!(stored.video_link, None);
    }

    #[tokio::test]
    async fn test_newest_first_with_id_tie_break() {
        let store = InMemoryEntryStore::new();
        let a = entry("a", "A", 5);
        let mut b = entry("b", "B", 5);
        b.created_at = a.created_at;
        store.create(a).await.unwrap();
        store.create(b).await.unwrap();
        store.create(entry("c", "C", 1)).await.unwrap();

        let (items, total) = store
            .list_live(EntryOrder::Newest, PageRequest::new(0, 10))
            .await
            .unwrap();
        let ids: Vec<&str> = items.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
        assert_eq!(total, 3);
    }

    #[tokio::test]
    async fn test_most_viewed_treats_unset_as_zero() {
        let store = InMemoryEntryStore::new();
        let mut popular = entry("p", "Popular", 10);
        popular.view_count = Some(3);
        let mut zero = entry("z", "Zero", 1);
        zero.view_count = Some(0);
        store.create(popular).await.unwrap();
        store.create(zero).await.unwrap();
        store.create(entry("u", "Unset", 2)).await.unwrap();

        let (items, _) = store
            .list_live(EntryOrder::MostViewed, PageRequest::new(0, 10))
            .await
            .unwrap();
        let ids: Vec<&str> = items.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["p", "z", "u"]);
    }

    #[tokio::test]
    async fn test_page_beyond_end_is_empty() {
        let store = InMemoryEntryStore::new();
        store.create(entry("a", "A", 0)).await.unwrap();
        let (items, total) = store
            .list_live(EntryOrder::Newest, PageRequest::new(3, 10))
            .await
            .unwrap();
        assert!(items.is_empty());
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn test_deleted_rows_are_not_mutated() {
        let store = InMemoryEntryStore::new();
        let e = store.create(entry("a", "A", 0)).await.unwrap();
        let now = Utc::now().naive_utc();
        assert!(store.soft_delete(&e.id, now).await.unwrap());
        assert!(!store.soft_delete(&e.id, now).await.unwrap());
        assert!(!store.increase_view_count(&e.id).await.unwrap());
        assert!(matches!(store.save(&e).await, Err(EntryError::NotFound(_))));
        assert!(EntryDao::get_live(&store, &e.id).await.unwrap().is_none());
        assert!(store.find_live(&e.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_keeps_created_at() {
        let store = InMemoryEntryStore::new();
        let original = store.create(entry("a", "A", 30)).await.unwrap();
        let mut changed = original.clone();
        changed.name = "Renamed".to_string();
        changed.created_at = Utc::now().naive_utc();
        store.save(&changed).await.unwrap();

        let stored = store.find_live(&original.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Renamed");
        assert_eq!(stored.created_at, original.created_at);
    }
}
