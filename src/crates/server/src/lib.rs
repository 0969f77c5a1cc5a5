pub mod catalog_api;
pub mod consts;
pub mod middleware;

use application::catalog::CatalogService;
use application::command::shared::IdGenerator;
use chrono::Utc;
use domain::profile::{Profile, ProfileRepository, ProfileRole};
use domain::value::ProfileId;
use infra::config::{AppConfigImpl, StorageBackend};
use infra::repository::in_memory::{entry::InMemoryEntryStore, profile::InMemoryProfileRepository};
use infra::repository::postgres::command::{
    entry::EntryRepositoryImpl, profile::ProfileRepositoryImpl,
};
use infra::repository::postgres::query::entry::EntryDaoImpl;
use infra::UuidIdGenerator;
use log::info;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, Statement};
use std::sync::Arc;
use std::time::Duration;

pub struct AppState {
    pub app_cfg: AppConfigImpl,
    pub catalog: CatalogService,
    pub profiles: Arc<dyn ProfileRepository>,
}

impl AppState {
    pub async fn init_db(db_url: &str) -> Result<DatabaseConnection, DbErr> {
        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(90)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(3))
            .acquire_timeout(Duration::from_secs(8))
            .idle_timeout(Duration::from_secs(60))
            .max_lifetime(Duration::from_secs(300))
            .sqlx_logging(false)
            .sqlx_logging_level(log::LevelFilter::Info);

        let db = Database::connect(opt).await?;

        let backend = DbBackend::Postgres;
        db.execute(Statement::from_string(backend, "SELECT 1".to_owned()))
            .await?;

        info!("Database connection pool initialized successfully");
        Ok(db)
    }

    /// Builds the state for the configured storage backend.
    pub async fn new(app_cfg: AppConfigImpl) -> Result<Self, DbErr> {
        match app_cfg.storage_backend() {
            StorageBackend::Postgres => {
                let db = Self::init_db(&app_cfg.database_url()).await?;
                Ok(Self::postgres(db, app_cfg))
            }
            StorageBackend::Memory => Ok(Self::in_memory(app_cfg)),
        }
    }

    pub fn postgres(db: DatabaseConnection, app_cfg: AppConfigImpl) -> Self {
        let catalog = CatalogService::new(
            Arc::new(UuidIdGenerator::new()),
            Arc::new(EntryRepositoryImpl::new(db.clone())),
            Arc::new(EntryDaoImpl::new(db.clone())),
        );
        Self::from_parts(app_cfg, catalog, Arc::new(ProfileRepositoryImpl::new(db)))
    }

    /// In-process store; the configured admin email is seeded as an admin profile.
    pub fn in_memory(app_cfg: AppConfigImpl) -> Self {
        let store = Arc::new(InMemoryEntryStore::new());
        let id_generator: Arc<dyn IdGenerator> = Arc::new(UuidIdGenerator::new());
        let catalog = CatalogService::new(id_generator, store.clone(), store);

        let profiles = InMemoryProfileRepository::new();
        profiles.insert(Profile {
            id: ProfileId::from(format!("admin-{}", Utc::now().timestamp_millis())),
            name: "admin".to_string(),
            email: app_cfg.admin_email().to_string(),
            role: ProfileRole::Admin,
            deleted_at: None,
        });
        info!("In-memory storage ready, admin profile {}", app_cfg.admin_email());
        Self::from_parts(app_cfg, catalog, Arc::new(profiles))
    }

    pub fn from_parts(
        app_cfg: AppConfigImpl,
        catalog: CatalogService,
        profiles: Arc<dyn ProfileRepository>,
    ) -> Self {
        let catalog = catalog.with_max_page_size(app_cfg.catalog().max_page_size);
        Self {
            app_cfg,
            catalog,
            profiles,
        }
    }
}
