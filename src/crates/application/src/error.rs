use crate::query::QueryError;
use domain::entry::EntryError;
use domain::profile::ProfileError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Aggregate not found: {0}: {1}")]
    AggregateNotFound(String, String),
    #[error("Entry error: {0}")]
    EntryError(#[from] EntryError),
    #[error("Profile error: {0}")]
    ProfileError(#[from] ProfileError),
    #[error("Query error: {0}")]
    QueryError(#[from] QueryError),
    #[error("Unknown error: {0}")]
    UnknownError(String),
}

impl AppError {
    pub fn entry_not_found(id: impl ToString) -> Self {
        AppError::AggregateNotFound("entry".to_string(), id.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AppError::AggregateNotFound(..)
                | AppError::EntryError(EntryError::NotFound(_))
                | AppError::ProfileError(ProfileError::NotFound(_))
                | AppError::QueryError(QueryError::NotFound(_))
        )
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::InvalidInput(_)
                | AppError::EntryError(EntryError::ValidationErr(_))
                | AppError::QueryError(QueryError::InvalidInput(_))
                | AppError::QueryError(QueryError::InvalidParameter(_))
        )
    }
}
