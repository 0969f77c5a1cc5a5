use thiserror::Error;

pub mod dao;
pub mod filter;
pub mod filter_entries;
pub mod get_entry;
pub mod get_entry_list;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Database error: {0}")]
    DbError(String),
}
