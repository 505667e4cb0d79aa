//! PostgreSQL user directory

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::user::{User, UserDirectory, UserId};
use crate::domain::DomainError;
use crate::infrastructure::storage::{ensure_document_table, row_to_document};

pub const DEFAULT_USERS_TABLE: &str = "users";

/// Reads user documents from a `(key, data JSONB)` table
#[derive(Debug, Clone)]
pub struct PostgresUserDirectory {
    pool: PgPool,
    table_name: String,
}

impl PostgresUserDirectory {
    /// Create a new directory with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            table_name: DEFAULT_USERS_TABLE.to_string(),
        }
    }

    /// Ensures the users table exists
    pub async fn ensure_table(&self) -> Result<(), DomainError> {
        ensure_document_table(&self.pool, &self.table_name).await
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT data FROM {} WHERE key = $1", self.table_name);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        row.as_ref().map(row_to_document).transpose()
    }

    async fn find_users(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!("SELECT data FROM {} WHERE key = ANY($1)", self.table_name);
        let keys: Vec<String> = ids.iter().map(ToString::to_string).collect();

        let rows = sqlx::query(&query)
            .bind(keys)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get users: {}", e)))?;

        rows.iter().map(row_to_document).collect()
    }
}
