use crate::value::EntryId;
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EntryError {
    #[error("Database error: {0}")]
    DbErr(String),
    #[error("Entry not found: {0}")]
    NotFound(String),
    #[error("Validation error: {0}")]
    ValidationErr(String),
    #[error("Unknown status: {0}")]
    UnknownStatus(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EntryStatus {
    #[default]
    Active,
    Inactive,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Active => "ACTIVE",
            EntryStatus::Inactive => "INACTIVE",
        }
    }
}

impl FromStr for EntryStatus {
    type Err = EntryError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(EntryStatus::Active),
            "INACTIVE" => Ok(EntryStatus::Inactive),
            _ => Err(EntryError::UnknownStatus(s.to_string())),
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Attributes supplied by an admin when a new entry is uploaded.
#[derive(Debug, Clone, Default)]
pub struct NewEntry {
    pub name: String,
    pub country: Option<String>,
    pub media_type: Option<String>,
    pub category_id: Option<String>,
    pub preview_attach_link: Option<String>,
    pub video_link: Option<String>,
    pub translation_language: Option<String>,
}

/// Admin update. Only these four attributes are mutable; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct EntryChanges {
    pub name: Option<String>,
    pub country: Option<String>,
    pub media_type: Option<String>,
    pub category_id: Option<String>,
}

/// Catalog entry aggregate
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: EntryId,
    pub name: String,
    pub country: Option<String>,
    pub media_type: Option<String>,
    pub category_id: Option<String>,
    pub preview_attach_link: Option<String>,
    pub video_link: Option<String>,
    pub translation_language: Option<String>,
    pub status: EntryStatus,
    pub visible: bool,
    pub view_count: Option<i64>,
    pub created_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

fn validate_name(name: &str) -> Result<(), EntryError> {
    if name.trim().is_empty() {
        return Err(EntryError::ValidationErr(
            "entry name must not be blank".to_string(),
        ));
    }
    if name.chars().count() > 255 {
        return Err(EntryError::ValidationErr(
            "entry name must not exceed 255 characters".to_string(),
        ));
    }
    Ok(())
}

impl Entry {
    /// Builds a live entry. Status and visibility are forced regardless of input.
    pub fn create(id: EntryId, new_entry: NewEntry) -> Result<Self, EntryError> {
        validate_name(&new_entry.name)?;
        Ok(Self {
            id,
            name: new_entry.name,
            country: new_entry.country,
            media_type: new_entry.media_type,
            category_id: new_entry.category_id,
            preview_attach_link: new_entry.preview_attach_link,
            video_link: new_entry.video_link,
            translation_language: new_entry.translation_language,
            status: EntryStatus::Active,
            visible: true,
            view_count: None,
            created_at: Utc::now().naive_utc(),
            deleted_at: None,
        })
    }

    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }

    pub fn views(&self) -> i64 {
        self.view_count.unwrap_or(0)
    }

    /// Applies an admin update. Validation happens before any field is touched.
    pub fn apply(&mut self, changes: EntryChanges) -> Result<(), EntryError> {
        if !self.is_live() {
            return Err(EntryError::NotFound(self.id.to_string()));
        }
        if let Some(name) = changes.name.as_deref() {
            validate_name(name)?;
        }
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(country) = changes.country {
            self.country = Some(country);
        }
        if let Some(media_type) = changes.media_type {
            self.media_type = Some(media_type);
        }
        if let Some(category_id) = changes.category_id {
            self.category_id = Some(category_id);
        }
        Ok(())
    }

    /// Sets the counter to 1 when it was never initialized. Returns `false` when the
    /// counter already holds a value and must be bumped at the storage layer instead.
    pub fn init_view_count(&mut self) -> bool {
        if self.view_count.is_some() {
            return false;
        }
        self.view_count = Some(1);
        true
    }
}

// 仓储接口
#[async_trait]
pub trait EntryRepository: Send + Sync {
    async fn create(&self, entry: Entry) -> Result<Entry, EntryError>;

    /// Excludes soft-deleted rows.
    async fn find_live(&self, id: &EntryId) -> Result<Option<Entry>, EntryError>;

    /// Full-record write of a live entry. Fails with `NotFound` if the row is gone or deleted.
    async fn save(&self, entry: &Entry) -> Result<(), EntryError>;

    /// Writes only name, country, type and category of a live entry. The view counter is
    /// left as stored. Fails with `NotFound` if the row is gone or deleted.
    async fn save_details(&self, entry: &Entry) -> Result<(), EntryError>;

    /// Returns `true` if a live row was marked deleted.
    async fn soft_delete(&self, id: &EntryId, deleted_at: NaiveDateTime)
        -> Result<bool, EntryError>;

    /// Atomic in-place `view_count + 1` on a live row. Returns `true` if a row was touched.
    async fn increase_view_count(&self, id: &EntryId) -> Result<bool, EntryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(name: &str) -> NewEntry {
        NewEntry {
            name: name.to_string(),
            category_id: Some("c1".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_forces_defaults() {
        let entry = Entry::create(EntryId::from("e1"), movie("Movie A")).unwrap();
        assert_eq!(entry.status, EntryStatus::Active);
        assert!(entry.visible);
        assert!(entry.is_live());
        assert_eq!(entry.view_count, None);
        assert_eq!(entry.views(), 0);
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let err = Entry::create(EntryId::from("e1"), movie("   ")).unwrap_err();
        assert!(matches!(err, EntryError::ValidationErr(_)));
    }

    #[test]
    fn test_apply_only_touches_given_fields() {
        let mut entry = Entry::create(EntryId::from("e1"), movie("Movie A")).unwrap();
        entry.preview_attach_link = Some("preview".to_string());
        entry
            .apply(EntryChanges {
                country: Some("UZ".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(entry.name, "Movie A");
        assert_eq!(entry.country.as_deref(), Some("UZ"));
        assert_eq!(entry.category_id.as_deref(), Some("c1"));
        assert_eq!(entry.preview_attach_link.as_deref(), Some("preview"));
    }

    #[test]
    fn test_apply_invalid_name_leaves_entry_untouched() {
        let mut entry = Entry::create(EntryId::from("e1"), movie("Movie A")).unwrap();
        let before = entry.clone();
        let result = entry.apply(EntryChanges {
            name: Some("".to_string()),
            country: Some("UZ".to_string()),
            ..Default::default()
        });
        assert!(result.is_err());
        assert_eq!(entry, before);
    }

    #[test]
    fn test_apply_on_deleted_entry_is_not_found() {
        let mut entry = Entry::create(EntryId::from("e1"), movie("Movie A")).unwrap();
        entry.deleted_at = Some(Utc::now().naive_utc());
        let err = entry.apply(EntryChanges::default()).unwrap_err();
        assert!(matches!(err, EntryError::NotFound(_)));
    }

    #[test]
    fn test_init_view_count_only_once() {
        let mut entry = Entry::create(EntryId::from("e1"), movie("Movie A")).unwrap();
        assert!(entry.init_view_count());
        assert_eq!(entry.view_count, Some(1));
        assert!(!entry.init_view_count());
        assert_eq!(entry.view_count, Some(1));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("active".parse::<EntryStatus>().unwrap(), EntryStatus::Active);
        assert_eq!("INACTIVE".parse::<EntryStatus>().unwrap(), EntryStatus::Inactive);
        assert!("archived".parse::<EntryStatus>().is_err());
        assert_eq!(EntryStatus::Inactive.to_string(), "INACTIVE");
    }
}
