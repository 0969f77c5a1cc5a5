use chrono::NaiveDateTime;
use domain::entry::Entry;
use serde::{Deserialize, Serialize};

/// Client-facing representation of an entry. View count and deletion metadata are never
/// exposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryView {
    pub id: String,
    pub country: Option<String>,
    pub category_id: Option<String>,
    pub name: String,
    pub preview_attach_link: Option<String>,
    pub created_date: NaiveDateTime,
    pub translation_language: Option<String>,
    pub video_link: Option<String>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
}

impl From<&Entry> for EntryView {
    fn from(entry: &Entry) -> Self {
        Self {
            id: entry.id.to_string(),
            country: entry.country.clone(),
            category_id: entry.category_id.clone(),
            name: entry.name.clone(),
            preview_attach_link: entry.preview_attach_link.clone(),
            created_date: entry.created_at,
            translation_language: entry.translation_language.clone(),
            video_link: entry.video_link.clone(),
            media_type: entry.media_type.clone(),
        }
    }
}

impl From<Entry> for EntryView {
    fn from(entry: Entry) -> Self {
        EntryView::from(&entry)
    }
}

/// Search specification. A missing field imposes no constraint; a field present with an
/// empty string is a real constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntrySearch {
    pub category_id: Option<String>,
    /// Case-insensitive substring match on the entry name.
    pub name: Option<String>,
    pub translation_language: Option<String>,
    pub country: Option<String>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub status: Option<String>,
    pub visible: Option<bool>,
    pub created_from: Option<NaiveDateTime>,
    pub created_to: Option<NaiveDateTime>,
}
