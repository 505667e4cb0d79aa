//! In-memory team store

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::team::{InsertOneResult, NewTeam, Team, TeamFilter, TeamId, TeamStore, TeamUpdate};
use crate::domain::DomainError;

/// Thread-safe in-memory `teams` collection
///
/// Documents keep their insertion order. Data is lost when the process
/// terminates.
#[derive(Debug, Default)]
pub struct InMemoryTeamStore {
    teams: RwLock<Vec<Team>>,
}

impl InMemoryTeamStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeamStore for InMemoryTeamStore {
    async fn find(&self, filter: &TeamFilter) -> Result<Vec<Team>, DomainError> {
        let teams = self.teams.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(teams
            .iter()
            .filter(|team| filter.matches(team))
            .cloned()
            .collect())
    }

    async fn find_one(&self, filter: &TeamFilter) -> Result<Option<Team>, DomainError> {
        let teams = self.teams.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(teams.iter().find(|team| filter.matches(team)).cloned())
    }

    async fn insert_one(&self, team: NewTeam) -> Result<InsertOneResult, DomainError> {
        let id = TeamId::generate();
        let mut teams = self.teams.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        teams.push(team.into_team(id));

        Ok(InsertOneResult {
            inserted_id: Some(id),
        })
    }

    async fn find_one_and_update(
        &self,
        filter: &TeamFilter,
        update: &TeamUpdate,
    ) -> Result<Option<Team>, DomainError> {
        let mut teams = self.teams.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        match teams.iter_mut().find(|team| filter.matches(team)) {
            Some(team) => {
                team.apply(update);
                Ok(Some(team.clone()))
            }
            None => Ok(None),
        }
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
