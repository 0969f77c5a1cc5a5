use config::{Config, Environment, File};
use dotenvy::dotenv;
use log::info;
use serde::Deserialize;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawConfig {
    database_url: String,
    /// 启动时作为管理员写入内存存储的邮箱
    admin_email: String,
    server: RawServerConfig,
    storage: RawStorageConfig,
    catalog: RawCatalogConfig,
}

/// 服务器配置（原始配置）
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawServerConfig {
    /// 监听地址
    host: String,
    /// 监听端口
    port: u16,
}

impl Default for RawServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5533,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawStorageConfig {
    backend: String,
}

impl Default for RawStorageConfig {
    fn default() -> Self {
        Self {
            backend: "postgres".to_string(),
        }
    }
}

/// 目录分页配置（原始配置）
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawCatalogConfig {
    default_page_size: u64,
    max_page_size: u64,
}

impl Default for RawCatalogConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            database_url: "".to_string(),
            admin_email: "admin@kino.local".to_string(),
            server: RawServerConfig::default(),
            storage: RawStorageConfig::default(),
            catalog: RawCatalogConfig::default(),
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 监听地址
    pub host: String,
    /// 监听端口
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" | "in_memory" => Ok(StorageBackend::Memory),
            other => Err(format!("unknown storage backend: {}", other)),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Postgres => write!(f, "postgres"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

/// 目录分页配置
#[derive(Debug, Clone, Copy)]
pub struct CatalogConfig {
    /// 请求未携带 size 时使用
    pub default_page_size: u64,
    /// 超出部分会被截断
    pub max_page_size: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfigImpl {
    database_url: String,
    admin_email: String,
    server: ServerConfig,
    storage_backend: StorageBackend,
    catalog: CatalogConfig,
}

impl AppConfigImpl {
    fn new(data: RawConfig) -> Result<Self, Box<dyn Error>> {
        let storage_backend = data.storage.backend.parse::<StorageBackend>()?;
        if data.catalog.default_page_size == 0 || data.catalog.max_page_size == 0 {
            return Err("catalog page sizes must be positive".into());
        }
        Ok(AppConfigImpl {
            database_url: data.database_url,
            admin_email: data.admin_email,
            server: ServerConfig {
                host: data.server.host,
                port: data.server.port,
            },
            storage_backend,
            catalog: CatalogConfig {
                default_page_size: data
                    .catalog
                    .default_page_size
                    .min(data.catalog.max_page_size),
                max_page_size: data.catalog.max_page_size,
            },
        })
    }

    pub fn load() -> Result<AppConfigImpl, Box<dyn Error>> {
        dotenv().ok();

        let config = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        let raw: RawConfig = config.try_deserialize()?; // serde 自动填充默认值
        let app_config = AppConfigImpl::new(raw)?;
        info!(
            "Configuration loaded: storage backend {}, listening on {}:{}",
            app_config.storage_backend, app_config.server.host, app_config.server.port
        );
        Ok(app_config)
    }

    /// Every key at its default, backed by the in-process store.
    pub fn in_memory() -> Self {
        let raw = RawConfig::default();
        AppConfigImpl {
            database_url: raw.database_url,
            admin_email: raw.admin_email,
            server: ServerConfig {
                host: raw.server.host,
                port: raw.server.port,
            },
            storage_backend: StorageBackend::Memory,
            catalog: CatalogConfig {
                default_page_size: raw.catalog.default_page_size,
                max_page_size: raw.catalog.max_page_size,
            },
        }
    }

    pub fn server(&self) -> ServerConfig {
        self.server.clone()
    }

    pub fn database_url(&self) -> String {
        self.database_url.clone()
    }

    pub fn admin_email(&self) -> &str {
        &self.admin_email
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.storage_backend
    }

    pub fn catalog(&self) -> CatalogConfig {
        self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfigImpl::new(RawConfig::default()).unwrap();
        assert_eq!(cfg.server().port, 5533);
        assert_eq!(cfg.server().host, "0.0.0.0");
        assert_eq!(cfg.storage_backend(), StorageBackend::Postgres);
        assert_eq!(cfg.catalog().default_page_size, 10);
        assert_eq!(cfg.catalog().max_page_size, 100);
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let mut raw = RawConfig::default();
        raw.storage.backend = "sqlite".to_string();
        assert!(AppConfigImpl::new(raw).is_err());
    }

    #[test]
    fn test_default_page_size_never_exceeds_max() {
        let mut raw = RawConfig::default();
        raw.catalog.default_page_size = 500;
        raw.catalog.max_page_size = 50;
        let cfg = AppConfigImpl::new(raw).unwrap();
        assert_eq!(cfg.catalog().default_page_size, 50);
    }

    #[test]
    fn test_backend_parse() {
        assert_eq!("Memory".parse::<StorageBackend>(), Ok(StorageBackend::Memory));
        assert_eq!(
            "postgresql".parse::<StorageBackend>(),
            Ok(StorageBackend::Postgres)
        );
    }
}
