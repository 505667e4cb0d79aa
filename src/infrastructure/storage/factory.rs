//! Storage factory for runtime backend selection

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::team::TeamStore;
use crate::domain::user::UserDirectory;
use crate::domain::DomainError;
use crate::infrastructure::team::{InMemoryTeamStore, PostgresTeamStore};
use crate::infrastructure::user::{InMemoryUserDirectory, PostgresUserDirectory};

use super::postgres::{connect_pool, PostgresConfig};

/// Supported storage types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    #[default]
    #[serde(alias = "memory", alias = "inmemory")]
    InMemory,
    /// PostgreSQL storage
    #[serde(alias = "postgresql", alias = "pg")]
    Postgres,
}

impl std::fmt::Display for StorageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InMemory => write!(f, "in_memory"),
            Self::Postgres => write!(f, "postgres"),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// In-memory storage configuration
    InMemory,
    /// PostgreSQL storage configuration
    Postgres(PostgresConfig),
}

impl StorageConfig {
    /// Returns the storage type
    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// The document collections the team core reads and writes
#[derive(Debug, Clone)]
pub struct StorageBackends {
    pub teams: Arc<dyn TeamStore>,
    pub users: Arc<dyn UserDirectory>,
}

/// Factory for creating storage instances
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates the team store and user directory for the configuration
    pub async fn create(config: &StorageConfig) -> Result<StorageBackends, DomainError> {
        match config {
            StorageConfig::InMemory => {
                info!("Using in-memory storage");

                Ok(StorageBackends {
                    teams: Arc::new(InMemoryTeamStore::new()),
                    users: Arc::new(InMemoryUserDirectory::new()),
                })
            }
            StorageConfig::Postgres(pg_config) => {
                info!(
                    max_connections = pg_config.max_connections,
                    "Connecting to PostgreSQL"
                );

                let pool = connect_pool(pg_config).await?;

                let teams = PostgresTeamStore::new(pool.clone());
                teams.ensure_table().await?;

                let users = PostgresUserDirectory::new(pool);
                users.ensure_table().await?;

                Ok(StorageBackends {
                    teams: Arc::new(teams),
                    users: Arc::new(users),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::team::TeamFilter;

    #[test]
    fn test_storage_type_deserialize() {
        for (raw, expected) in [
            ("\"in_memory\"", StorageType::InMemory),
            ("\"memory\"", StorageType::InMemory),
            ("\"postgres\"", StorageType::Postgres),
            ("\"pg\"", StorageType::Postgres),
        ] {
            let parsed: StorageType = serde_json::from_str(raw).unwrap();
            assert_eq!(parsed, expected, "{raw}");
        }

        assert!(serde_json::from_str::<StorageType>("\"mongo\"").is_err());
    }

    #[test]
    fn test_storage_config_type() {
        assert_eq!(StorageConfig::InMemory.storage_type(), StorageType::InMemory);
        assert_eq!(
            StorageConfig::Postgres(PostgresConfig::default()).storage_type(),
            StorageType::Postgres
        );
    }

    #[tokio::test]
    async fn test_create_in_memory() {
        let backends = StorageFactory::create(&StorageConfig::InMemory).await.unwrap();

        assert!(backends.teams.find(&TeamFilter::All).await.unwrap().is_empty());
        backends.teams.ping().await.unwrap();
    }
}
