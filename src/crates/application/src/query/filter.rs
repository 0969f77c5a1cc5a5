use crate::query::QueryError;
use chrono::NaiveDateTime;
use domain::entry::{Entry, EntryStatus};
use model::entry::EntrySearch;

/// A single clause of an entry search. Clauses are always combined with AND.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryPredicate {
    CategoryIs(String),
    /// Case-insensitive substring match.
    NameContains(String),
    LanguageIs(String),
    CountryIs(String),
    MediaTypeIs(String),
    StatusIs(EntryStatus),
    VisibleIs(bool),
    CreatedFrom(NaiveDateTime),
    CreatedTo(NaiveDateTime),
}

impl EntryPredicate {
    pub fn matches(&self, entry: &Entry) -> bool {
        match self {
            EntryPredicate::CategoryIs(v) => entry.category_id.as_deref() == Some(v.as_str()),
            EntryPredicate::NameContains(v) => {
                entry.name.to_lowercase().contains(&v.to_lowercase())
            }
            EntryPredicate::LanguageIs(v) => {
                entry.translation_language.as_deref() == Some(v.as_str())
            }
            EntryPredicate::CountryIs(v) => entry.country.as_deref() == Some(v.as_str()),
            EntryPredicate::MediaTypeIs(v) => entry.media_type.as_deref() == Some(v.as_str()),
            EntryPredicate::StatusIs(status) => entry.status == *status,
            EntryPredicate::VisibleIs(visible) => entry.visible == *visible,
            EntryPredicate::CreatedFrom(from) => entry.created_at >= *from,
            EntryPredicate::CreatedTo(to) => entry.created_at <= *to,
        }
    }
}

/// Conjunction of predicates over live entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryFilter {
    predicates: Vec<EntryPredicate>,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, predicate: EntryPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn predicates(&self) -> &[EntryPredicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        entry.is_live() && self.predicates.iter().all(|p| p.matches(entry))
    }

    /// Validates a search specification and turns every populated field into a clause.
    pub fn from_search(search: &EntrySearch) -> Result<Self, QueryError> {
        if let (Some(from), Some(to)) = (search.created_from, search.created_to) {
            if from > to {
                return Err(QueryError::InvalidInput(format!(
                    "createdFrom ({}) is after createdTo ({})",
                    from, to
                )));
            }
        }

        let mut filter = EntryFilter::new();
        if let Some(category_id) = &search.category_id {
            filter = filter.and(EntryPredicate::CategoryIs(category_id.clone()));
        }
        if let Some(name) = &search.name {
            if name.trim().is_empty() {
                return Err(QueryError::InvalidInput(
                    "name pattern must not be blank".to_string(),
                ));
            }
            filter = filter.and(EntryPredicate::NameContains(name.trim().to_string()));
        }
        if let Some(language) = &search.translation_language {
            filter = filter.and(EntryPredicate::LanguageIs(language.clone()));
        }
        if let Some(country) = &search.country {
            filter = filter.and(EntryPredicate::CountryIs(country.clone()));
        }
        if let Some(media_type) = &search.media_type {
            filter = filter.and(EntryPredicate::MediaTypeIs(media_type.clone()));
        }
        if let Some(status) = &search.status {
            let status = status
                .parse::<EntryStatus>()
                .map_err(|e| QueryError::InvalidInput(e.to_string()))?;
            filter = filter.and(EntryPredicate::StatusIs(status));
        }
        if let Some(visible) = search.visible {
            filter = filter.and(EntryPredicate::VisibleIs(visible));
        }
        if let Some(from) = search.created_from {
            filter = filter.and(EntryPredicate::CreatedFrom(from));
        }
        if let Some(to) = search.created_to {
            filter = filter.and(EntryPredicate::CreatedTo(to));
        }
        Ok(filter)
    }
}
