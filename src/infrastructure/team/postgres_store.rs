//! PostgreSQL team store
//!
//! Teams are JSONB documents in a `(key, data)` table. Filters translate to
//! JSONB operators and updates run as a single `UPDATE ... RETURNING`, so
//! counter increments are applied atomically by the database.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::team::{InsertOneResult, NewTeam, Team, TeamFilter, TeamId, TeamStore, TeamUpdate};
use crate::domain::DomainError;
use crate::infrastructure::storage::{ensure_document_table, row_to_document};

pub const DEFAULT_TEAMS_TABLE: &str = "teams";

/// PostgreSQL implementation of TeamStore
#[derive(Debug, Clone)]
pub struct PostgresTeamStore {
    pool: PgPool,
    table_name: String,
}

impl PostgresTeamStore {
    /// Create a new store with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self::with_table(pool, DEFAULT_TEAMS_TABLE)
    }

    pub fn with_table(pool: PgPool, table_name: impl Into<String>) -> Self {
        Self {
            pool,
            table_name: table_name.into(),
        }
    }

    /// Ensures the teams table exists
    pub async fn ensure_table(&self) -> Result<(), DomainError> {
        ensure_document_table(&self.pool, &self.table_name).await?;

        let index = format!(
            "CREATE INDEX IF NOT EXISTS {0}_player_ids_idx ON {0} USING GIN ((data->'playerIds'))",
            self.table_name
        );

        sqlx::query(&index)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create index: {}", e)))?;

        Ok(())
    }

    fn select(&self, filter: &TeamFilter) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(format!("SELECT data FROM {}", self.table_name));
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at, key");
        qb
    }
}

/// Appends the WHERE clause for a filter
fn push_filter(qb: &mut QueryBuilder<'static, Postgres>, filter: &TeamFilter) {
    match filter {
        TeamFilter::All => {}
        TeamFilter::Id(id) => {
            qb.push(" WHERE key = ").push_bind(id.to_string());
        }
        TeamFilter::Ids(ids) => {
            let keys: Vec<String> = ids.iter().map(ToString::to_string).collect();
            qb.push(" WHERE key = ANY(").push_bind(keys).push(")");
        }
        TeamFilter::Manager(manager_id) => {
            qb.push(" WHERE data->>'managerId' = ")
                .push_bind(manager_id.to_string());
        }
        TeamFilter::Player(player_id) => {
            qb.push(" WHERE data->'playerIds' ? ")
                .push_bind(player_id.to_string());
        }
        TeamFilter::Sport(sport) => {
            qb.push(" WHERE data->>'sport' = ").push_bind(sport.as_str());
        }
    }
}

#[async_trait]
impl TeamStore for PostgresTeamStore {
    async fn find(&self, filter: &TeamFilter) -> Result<Vec<Team>, DomainError> {
        let rows = self
            .select(filter)
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to find teams: {}", e)))?;

        rows.iter().map(row_to_document).collect()
    }

    async fn find_one(&self, filter: &TeamFilter) -> Result<Option<Team>, DomainError> {
        let mut qb = self.select(filter);
        qb.push(" LIMIT 1");

        let row = qb
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to find team: {}", e)))?;

        row.as_ref().map(row_to_document).transpose()
    }

    async fn insert_one(&self, team: NewTeam) -> Result<InsertOneResult, DomainError> {
        let id = TeamId::generate();
        let document = serde_json::to_value(team.into_team(id))
            .map_err(|e| DomainError::insert_failed(format!("Failed to serialize team: {}", e)))?;

        let query = format!(
            "INSERT INTO {} (key, data, created_at, updated_at) VALUES ($1, $2, NOW(), NOW())",
            self.table_name
        );

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .bind(document)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::insert_failed(e.to_string()))?;

        Ok(InsertOneResult {
            inserted_id: (result.rows_affected() == 1).then_some(id),
        })
    }

    async fn find_one_and_update(
        &self,
        filter: &TeamFilter,
        update: &TeamUpdate,
    ) -> Result<Option<Team>, DomainError> {
        let increments = update.inc.fields();
        let patch = serde_json::Value::Object(update.set.to_document());

        // jsonb_set(jsonb_set((data || patch), '{numGames}', ...), '{numWins}', ...)
        let mut qb: QueryBuilder<'static, Postgres> =
            QueryBuilder::new(format!("UPDATE {} SET data = ", self.table_name));

        for _ in &increments {
            qb.push("jsonb_set(");
        }

        qb.push("(data || ").push_bind(patch).push(")");

        for (field, delta) in increments {
            qb.push(format!(
                ", '{{{0}}}', to_jsonb(COALESCE((data->>'{0}')::bigint, 0) + ",
                field
            ));
            qb.push_bind(i64::from(delta));
            qb.push("))");
        }

        qb.push(format!(
            ", updated_at = NOW() WHERE key = (SELECT key FROM {}",
            self.table_name
        ));
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at, key LIMIT 1) RETURNING data");

        let row = qb
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::update_failed(e.to_string()))?;

        row.as_ref().map(row_to_document).transpose()
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Database is unreachable: {}", e)))?;

        Ok(())
    }
}
