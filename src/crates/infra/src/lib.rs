pub mod repository;

pub mod id_generator;
pub use id_generator::UuidIdGenerator;

pub mod config;
pub use config::{AppConfigImpl, CatalogConfig, ServerConfig, StorageBackend};
