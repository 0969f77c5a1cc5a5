use domain::entry::{Entry, EntryError, EntryStatus};
use domain::value::EntryId;
use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "catalog_entry")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub country: Option<String>,
    pub media_type: Option<String>,
    pub category_id: Option<String>,
    pub preview_attach_link: Option<String>,
    pub video_link: Option<String>,
    pub translation_language: Option<String>,
    pub status: String,
    pub visible: bool,
    #[sea_orm(column_type = "BigInteger", nullable)]
    pub view_count: Option<i64>,
    pub created_at: DateTime,
    pub deleted_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Entry> for ActiveModel {
    fn from(entry: &Entry) -> Self {
        Self {
            id: Set(entry.id.to_string()),
            name: Set(entry.name.clone()),
            country: Set(entry.country.clone()),
            media_type: Set(entry.media_type.clone()),
            category_id: Set(entry.category_id.clone()),
            preview_attach_link: Set(entry.preview_attach_link.clone()),
            video_link: Set(entry.video_link.clone()),
            translation_language: Set(entry.translation_language.clone()),
            status: Set(entry.status.as_str().to_string()),
            visible: Set(entry.visible),
            view_count: Set(entry.view_count),
            created_at: Set(entry.created_at),
            deleted_at: Set(entry.deleted_at),
        }
    }
}

impl ActiveModel {
    /// Columns a full-record write may touch. Identity, creation time and the deletion
    /// marker are left alone.
    pub fn for_update(entry: &Entry) -> Self {
        let mut active_model = Self::from(entry);
        active_model.id = NotSet;
        active_model.created_at = NotSet;
        active_model.deleted_at = NotSet;
        active_model
    }

    /// Only the admin-editable columns. `view_count` stays `NotSet` so a concurrent
    /// increment is never overwritten.
    pub fn for_details(entry: &Entry) -> Self {
        let mut active_model = <Self as ActiveModelTrait>::default();
        active_model.name = Set(entry.name.clone());
        active_model.country = Set(entry.country.clone());
        active_model.media_type = Set(entry.media_type.clone());
        active_model.category_id = Set(entry.category_id.clone());
        active_model
    }
}

impl TryFrom<Model> for Entry {
    type Error = EntryError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Entry {
            id: EntryId::from(model.id),
            name: model.name,
            country: model.country,
            media_type: model.media_type,
            category_id: model.category_id,
            preview_attach_link: model.preview_attach_link,
            video_link: model.video_link,
            translation_language: model.translation_language,
            status: model.status.parse::<EntryStatus>()?,
            visible: model.visible,
            view_count: model.view_count,
            created_at: model.created_at,
            deleted_at: model.deleted_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::entry::NewEntry;

    #[test]
    fn test_for_details_leaves_counter_and_identity_unset() {
        let mut entry = Entry::create(
            EntryId::from("e1"),
            NewEntry {
                name: "Movie A".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        entry.view_count = Some(7);
        let active_model = ActiveModel::for_details(&entry);
        assert_eq!(active_model.name, Set("Movie A".to_string()));
        assert!(!active_model.view_count.is_set());
        assert!(!active_model.id.is_set());
        assert!(!active_model.deleted_at.is_set());
        assert!(!active_model.status.is_set());
    }
}
