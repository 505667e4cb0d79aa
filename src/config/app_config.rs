use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::infrastructure::cache::{CacheConfig, CacheType};
use crate::infrastructure::storage::{PostgresConfig, StorageConfig, StorageType};
use crate::infrastructure::team::{InvalidationStrategy, LookupPolicy, TeamCachePolicy};

pub const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

const REDACTED: &str = "[redacted]";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub storage: StorageSettings,
    pub cache: CacheSettings,
    pub teams: TeamsConfig,
    pub auth: AuthConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Document store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: StorageType,
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
}

/// Query cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub backend: CacheType,
    pub redis_url: Option<String>,
    pub key_prefix: Option<String>,
    pub max_capacity: u64,
    /// Entry expiry; unset keeps entries until a write invalidates them
    pub ttl_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamsConfig {
    pub invalidation: InvalidationStrategy,
    pub sport_lookup: LookupPolicy,
    pub team_list_lookup: LookupPolicy,
}

/// Session gate settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub sign_in_path: String,
    pub cookie_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        let postgres = PostgresConfig::default();

        Self {
            backend: StorageType::default(),
            database_url: None,
            max_connections: postgres.max_connections,
            min_connections: postgres.min_connections,
            connect_timeout_secs: postgres.connect_timeout_secs,
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            backend: CacheType::default(),
            redis_url: None,
            key_prefix: None,
            max_capacity: 10_000,
            ttl_secs: None,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            sign_in_path: "/login".to_string(),
            cookie_name: "session".to_string(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl StorageSettings {
    pub fn to_storage_config(&self) -> Result<StorageConfig, DomainError> {
        match self.backend {
            StorageType::InMemory => Ok(StorageConfig::InMemory),
            StorageType::Postgres => {
                let url = self.database_url.clone().ok_or_else(|| {
                    DomainError::configuration("storage.database_url is required for postgres")
                })?;

                Ok(StorageConfig::Postgres(
                    PostgresConfig::new(url)
                        .with_max_connections(self.max_connections)
                        .with_min_connections(self.min_connections)
                        .with_connect_timeout(self.connect_timeout_secs),
                ))
            }
        }
    }
}

impl CacheSettings {
    pub fn to_cache_config(&self) -> CacheConfig {
        CacheConfig {
            cache_type: self.backend,
            redis_url: self.redis_url.clone(),
            key_prefix: self.key_prefix.clone(),
            max_capacity: Some(self.max_capacity),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Cache behaviour of the team service
    pub fn team_cache_policy(&self) -> TeamCachePolicy {
        TeamCachePolicy {
            invalidation: self.teams.invalidation,
            sport_lookup: self.teams.sport_lookup,
            team_list_lookup: self.teams.team_list_lookup,
            entry_ttl: self.cache.ttl_secs.map(Duration::from_secs),
        }
    }

    pub fn uses_default_jwt_secret(&self) -> bool {
        self.auth.jwt_secret == DEFAULT_JWT_SECRET
    }

    /// A copy that is safe to print
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        config.auth.jwt_secret = REDACTED.to_string();

        if config.storage.database_url.is_some() {
            config.storage.database_url = Some(REDACTED.to_string());
        }

        if config.cache.redis_url.is_some() {
            config.cache.redis_url = Some(REDACTED.to_string());
        }

        config
    }
}
