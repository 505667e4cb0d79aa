//! PostgreSQL connection pooling and document tables

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;

use crate::domain::DomainError;

/// PostgreSQL storage configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds
    pub idle_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/league_hub".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }
}

/// Opens a connection pool
pub async fn connect_pool(config: &PostgresConfig) -> Result<PgPool, DomainError> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect(&config.url)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))
}

/// Creates a `(key, data JSONB)` document table if it does not exist yet
pub async fn ensure_document_table(pool: &PgPool, table_name: &str) -> Result<(), DomainError> {
    let query = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            key VARCHAR(255) PRIMARY KEY,
            data JSONB NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        table_name
    );

    sqlx::query(&query)
        .execute(pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create table: {}", e)))?;

    Ok(())
}

/// Deserializes the `data` column of a document row
pub(crate) fn row_to_document<T>(row: &sqlx::postgres::PgRow) -> Result<T, DomainError>
where
    T: serde::de::DeserializeOwned,
{
    let data: serde_json::Value = row
        .try_get("data")
        .map_err(|e| DomainError::storage(format!("Failed to read document: {}", e)))?;

    serde_json::from_value(data)
        .map_err(|e| DomainError::storage(format!("Failed to deserialize document: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = PostgresConfig::new("postgres://db/league")
            .with_max_connections(20)
            .with_min_connections(2)
            .with_connect_timeout(5);

        assert_eq!(config.url, "postgres://db/league");
        assert_eq!(config.max_connections, 20);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.connect_timeout_secs, 5);
        assert_eq!(config.idle_timeout_secs, 600);
    }
}
