//! Team service - cached reads, validated writes and cross-entity checks
//!
//! Reads go through the cache; writes go to the store and then invalidate
//! the affected cache keys and re-prime `team/{id}` from a fresh store
//! read. Cache refreshes are serialized so a slow writer cannot put an
//! older document back over a newer one. Cache failures after a
//! successful store write are logged and do not fail the write.

use std::future::Future;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::policy::{InvalidationStrategy, LookupPolicy, TeamCachePolicy};
use crate::domain::cache::{Cache, CacheExt, TeamCacheKey};
use crate::domain::team::{
    validate_profile_picture, validate_team_name, CounterIncrements, CountryCode, NewTeam, Sport,
    Team, TeamChanges, TeamFilter, TeamId, TeamStore, TeamUpdate, TeamValidationError,
};
use crate::domain::user::{parse_user_ids, User, UserDirectory, UserId};
use crate::domain::DomainError;
use crate::infrastructure::observability::{record_cache_invalidation, record_cache_lookup};

/// Request for creating a new team
#[derive(Debug, Clone)]
pub struct CreateTeamRequest {
    pub name: String,
    pub sport: String,
    pub location: String,
    pub manager_id: String,
    pub player_ids: Vec<String>,
}

/// Partial update of a team; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct EditTeamRequest {
    pub name: Option<String>,
    pub sport: Option<String>,
    pub location: Option<String>,
    pub manager_id: Option<String>,
    pub player_ids: Option<Vec<String>>,
    pub profile_picture: Option<String>,
}

fn team_not_found(id: &TeamId) -> DomainError {
    DomainError::not_found(format!("Team '{}' not found", id))
}

/// Team service for managing teams
#[derive(Debug)]
pub struct TeamService {
    store: Arc<dyn TeamStore>,
    cache: Arc<dyn Cache>,
    users: Arc<dyn UserDirectory>,
    policy: TeamCachePolicy,
    refresh_lock: Mutex<()>,
}

impl TeamService {
    /// Create a new team service
    pub fn new(
        store: Arc<dyn TeamStore>,
        cache: Arc<dyn Cache>,
        users: Arc<dyn UserDirectory>,
        policy: TeamCachePolicy,
    ) -> Self {
        Self {
            store,
            cache,
            users,
            policy,
            refresh_lock: Mutex::new(()),
        }
    }

    /// Check that the store and the cache are reachable
    pub async fn ping(&self) -> Result<(), DomainError> {
        self.store.ping().await?;
        self.cache.exists("ping").await?;
        Ok(())
    }

    // Reads

    /// All teams
    pub async fn get_all_teams(&self) -> Result<Vec<Team>, DomainError> {
        self.read_through(TeamCacheKey::AllTeams, || async move {
            self.store.find(&TeamFilter::All).await
        })
        .await
    }

    /// A single team
    pub async fn get_team_by_id(&self, id: &str) -> Result<Team, DomainError> {
        let team_id = TeamId::parse(id)?;
        self.find_team(team_id).await
    }

    /// Teams whose roster contains the player
    pub async fn get_teams_by_player(&self, player_id: &str) -> Result<Vec<Team>, DomainError> {
        let player_id = UserId::parse(player_id)?;

        self.read_through(TeamCacheKey::TeamsByPlayer(player_id), || async move {
            self.store.find(&TeamFilter::Player(player_id)).await
        })
        .await
    }

    /// Teams managed by the user
    pub async fn get_teams_by_manager(&self, manager_id: &str) -> Result<Vec<Team>, DomainError> {
        let manager_id = UserId::parse(manager_id)?;

        self.read_through(TeamCacheKey::TeamsByManager(manager_id), || async move {
            self.store.find(&TeamFilter::Manager(manager_id)).await
        })
        .await
    }

    /// Teams playing the sport
    pub async fn get_teams_by_sport(&self, sport: &str) -> Result<Vec<Team>, DomainError> {
        let sport = Sport::parse(sport)?;

        match self.policy.sport_lookup {
            LookupPolicy::Bypass => self.store.find(&TeamFilter::Sport(sport)).await,
            LookupPolicy::ReadThrough => {
                self.read_through(TeamCacheKey::TeamsBySport(sport), || async move {
                    self.store.find(&TeamFilter::Sport(sport)).await
                })
                .await
            }
        }
    }

    /// The full user records of a team's roster, in roster order
    pub async fn get_teams_players(&self, team_id: &str) -> Result<Vec<User>, DomainError> {
        let team = self.get_team_by_id(team_id).await?;
        self.users.get_list_of_players(team.player_ids()).await
    }

    // Writes

    /// Create a team
    pub async fn create_team(&self, request: CreateTeamRequest) -> Result<Team, DomainError> {
        info!(name = %request.name, sport = %request.sport, "Creating team");

        let name = validate_team_name(&request.name)?;
        let sport = Sport::parse(&request.sport)?;
        let location = CountryCode::parse(&request.location)?;
        let manager_id = UserId::parse(&request.manager_id)?;
        let player_ids = parse_user_ids(&request.player_ids)?;

        self.users.get_user_by_id(&manager_id).await?;
        let player_ids = self.users.check_id_array(&player_ids).await?;

        let inserted = self
            .store
            .insert_one(NewTeam {
                name,
                sport,
                location,
                manager_id,
                player_ids,
            })
            .await?;

        let team_id = inserted
            .inserted_id
            .ok_or_else(|| DomainError::insert_failed("store did not return an id"))?;

        let team = self.load_fresh(team_id).await?;
        self.refresh_cache(None, &team).await;

        info!(id = %team_id, "Team created");
        Ok(team)
    }

    /// Update the fields present in the request
    pub async fn edit_team(&self, id: &str, patch: EditTeamRequest) -> Result<Team, DomainError> {
        info!(id = %id, "Editing team");

        let team_id = TeamId::parse(id)?;
        let current = self.load_fresh(team_id).await?;

        let mut changes = TeamChanges::default();

        if let Some(name) = &patch.name {
            changes.name = Some(validate_team_name(name)?);
        }

        if let Some(sport) = &patch.sport {
            changes.sport = Some(Sport::parse(sport)?);
        }

        if let Some(location) = &patch.location {
            changes.location = Some(CountryCode::parse(location)?);
        }

        if let Some(manager_id) = &patch.manager_id {
            let manager_id = UserId::parse(manager_id)?;
            self.users.get_user_by_id(&manager_id).await?;
            changes.manager_id = Some(manager_id);
        }

        if let Some(player_ids) = &patch.player_ids {
            let player_ids = parse_user_ids(player_ids)?;
            changes.player_ids = Some(self.users.check_id_array(&player_ids).await?);
        }

        if let Some(picture) = &patch.profile_picture {
            changes.profile_picture = Some(validate_profile_picture(picture)?);
        }

        if changes.is_empty() {
            debug!(id = %team_id, "Empty patch, nothing to update");
            return Ok(current);
        }

        let team = self.apply_update(team_id, &TeamUpdate::set(changes)).await?;
        self.refresh_cache(Some(&current), &team).await;

        Ok(team)
    }

    /// Flip the team's active flag
    pub async fn toggle_active(&self, id: &str) -> Result<Team, DomainError> {
        let team_id = TeamId::parse(id)?;
        let current = self.load_fresh(team_id).await?;

        info!(id = %team_id, active = !current.is_active(), "Toggling team active flag");

        let update = TeamUpdate::set(TeamChanges {
            active: Some(!current.is_active()),
            ..Default::default()
        });

        let team = self.apply_update(team_id, &update).await?;
        self.refresh_cache(Some(&current), &team).await;

        Ok(team)
    }

    /// Append a player to the roster
    pub async fn add_player(&self, team_id: &str, player_id: &str) -> Result<Team, DomainError> {
        let team_id = TeamId::parse(team_id)?;
        let player_id = UserId::parse(player_id)?;

        info!(id = %team_id, player_id = %player_id, "Adding player to team");

        self.users.get_user_by_id(&player_id).await?;
        let current = self.load_fresh(team_id).await?;

        if current.has_player(&player_id) {
            return Err(TeamValidationError::DuplicatePlayer(player_id.to_string()).into());
        }

        let mut roster = current.player_ids().to_vec();
        roster.push(player_id);

        let update = TeamUpdate::set(TeamChanges {
            player_ids: Some(roster),
            ..Default::default()
        });

        let team = self.apply_update(team_id, &update).await?;
        self.refresh_cache(Some(&current), &team).await;

        Ok(team)
    }

    /// Record a won game
    pub async fn add_win(&self, id: &str) -> Result<Team, DomainError> {
        self.increment(id, CounterIncrements::win()).await
    }

    /// Record a lost game
    pub async fn add_loss(&self, id: &str) -> Result<Team, DomainError> {
        self.increment(id, CounterIncrements::loss()).await
    }

    /// Record a tournament win
    pub async fn add_tournament_win(&self, id: &str) -> Result<Team, DomainError> {
        self.increment(id, CounterIncrements::tournament_win()).await
    }

    // Cross-entity validation

    /// Confirm a bracket has exactly `bracket_size` teams that all exist
    pub async fn check_id_array<S>(
        &self,
        ids: &[S],
        bracket_size: usize,
    ) -> Result<Vec<TeamId>, DomainError>
    where
        S: AsRef<str> + Sync,
    {
        let teams = self.resolve_bracket(ids, bracket_size).await?;
        Ok(teams.iter().map(|team| *team.id()).collect())
    }

    /// The teams of a validated bracket
    pub async fn get_list_of_teams<S>(
        &self,
        ids: &[S],
        bracket_size: usize,
    ) -> Result<Vec<Team>, DomainError>
    where
        S: AsRef<str> + Sync,
    {
        let teams = self.resolve_bracket(ids, bracket_size).await?;

        match self.policy.team_list_lookup {
            LookupPolicy::ReadThrough => Ok(teams),
            LookupPolicy::Bypass => {
                let team_ids = teams.iter().map(|team| *team.id()).collect();
                self.store.find(&TeamFilter::Ids(team_ids)).await
            }
        }
    }

    /// Fail on the first team, in input order, that does not play `sport`
    pub async fn teams_match_sport<S>(
        &self,
        ids: &[S],
        sport: &str,
    ) -> Result<Vec<TeamId>, DomainError>
    where
        S: AsRef<str> + Sync,
    {
        let sport = Sport::parse(sport)?;
        let mut team_ids = Vec::with_capacity(ids.len());

        for id in ids {
            let team = self.get_team_by_id(id.as_ref()).await?;

            if team.sport() != sport {
                return Err(DomainError::validation(format!(
                    "{} is a {} team and cannot be added to a {} tournament.",
                    team.name(),
                    team.sport(),
                    sport
                )));
            }

            team_ids.push(*team.id());
        }

        Ok(team_ids)
    }

    /// Bracket check used by the HTTP layer: size, existence and optionally sport
    pub async fn validate_bracket<S>(
        &self,
        ids: &[S],
        bracket_size: usize,
        sport: Option<&str>,
    ) -> Result<Vec<Team>, DomainError>
    where
        S: AsRef<str> + Sync,
    {
        let teams = self.get_list_of_teams(ids, bracket_size).await?;

        if let Some(sport) = sport {
            self.teams_match_sport(ids, sport).await?;
        }

        Ok(teams)
    }

    // Internals

    async fn read_through<T, F, Fut>(&self, key: TeamCacheKey, load: F) -> Result<T, DomainError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T, DomainError>> + Send,
    {
        let cache_key = key.to_string();

        let cached: Option<T> = self.cache.get(&cache_key).await?;
        if let Some(value) = cached {
            record_cache_lookup(key.lookup(), true);
            debug!(key = %cache_key, "Team cache hit");
            return Ok(value);
        }

        record_cache_lookup(key.lookup(), false);
        debug!(key = %cache_key, "Team cache miss");

        let value = load().await?;
        self.cache.set(&cache_key, &value, self.policy.entry_ttl).await?;

        Ok(value)
    }

    async fn find_team(&self, id: TeamId) -> Result<Team, DomainError> {
        self.read_through(TeamCacheKey::Team(id), || async move {
            self.store
                .find_one(&TeamFilter::Id(id))
                .await?
                .ok_or_else(|| team_not_found(&id))
        })
        .await
    }

    /// Read straight from the store, skipping the cache
    async fn load_fresh(&self, id: TeamId) -> Result<Team, DomainError> {
        self.store
            .find_one(&TeamFilter::Id(id))
            .await?
            .ok_or_else(|| team_not_found(&id))
    }

    async fn apply_update(&self, id: TeamId, update: &TeamUpdate) -> Result<Team, DomainError> {
        self.store
            .find_one_and_update(&TeamFilter::Id(id), update)
            .await?
            .ok_or_else(|| {
                DomainError::update_failed(format!("Could not update the team with id {}", id))
            })
    }

    async fn increment(&self, id: &str, inc: CounterIncrements) -> Result<Team, DomainError> {
        let team_id = TeamId::parse(id)?;

        info!(id = %team_id, ?inc, "Incrementing team counters");

        let team = self
            .store
            .find_one_and_update(&TeamFilter::Id(team_id), &TeamUpdate::increment(inc))
            .await?
            .ok_or_else(|| team_not_found(&team_id))?;

        self.refresh_cache(None, &team).await;
        Ok(team)
    }

    async fn resolve_bracket<S>(
        &self,
        ids: &[S],
        bracket_size: usize,
    ) -> Result<Vec<Team>, DomainError>
    where
        S: AsRef<str> + Sync,
    {
        if ids.len() != bracket_size {
            return Err(DomainError::validation(
                "Number of teams provided does not match bracket size",
            ));
        }

        let mut teams = Vec::with_capacity(ids.len());

        for id in ids {
            teams.push(self.get_team_by_id(id.as_ref()).await?);
        }

        Ok(teams)
    }

    /// Invalidate after a write, then re-prime `team/{id}` from the store
    ///
    /// `after` is only used to find the keys to invalidate. The re-primed
    /// document is read under `refresh_lock`, so the last refresh to run
    /// always caches the newest stored state.
    async fn refresh_cache(&self, before: Option<&Team>, after: &Team) {
        let strategy = self.policy.invalidation;
        let _guard = self.refresh_lock.lock().await;

        let invalidated = match strategy {
            InvalidationStrategy::Scoped => {
                let keys: Vec<String> =
                    TeamCacheKey::affected_by(before.into_iter().chain(std::iter::once(after)))
                        .iter()
                        .map(ToString::to_string)
                        .collect();

                self.cache.delete_many(&keys).await.map(|deleted| {
                    debug!(id = %after.id(), deleted, "Invalidated team cache keys");
                })
            }
            InvalidationStrategy::FlushAll => self.cache.clear().await,
        };

        record_cache_invalidation(strategy.as_str());

        if let Err(e) = invalidated {
            warn!(
                id = %after.id(),
                strategy = strategy.as_str(),
                error = %e,
                "Failed to invalidate team cache"
            );
        }

        let current = match self.load_fresh(*after.id()).await {
            Ok(team) => team,
            Err(e) => {
                warn!(id = %after.id(), error = %e, "Failed to reload team for cache re-prime");
                return;
            }
        };

        let key = TeamCacheKey::Team(*current.id()).to_string();

        if let Err(e) = self.cache.set(&key, &current, self.policy.entry_ttl).await {
            warn!(id = %current.id(), error = %e, "Failed to re-prime team cache");
        }
    }
}
