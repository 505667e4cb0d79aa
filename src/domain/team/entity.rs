//! Team entity and related types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::sport::{CountryCode, Sport};
use super::store::TeamUpdate;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Team identifier assigned by the document store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(Uuid);

impl TeamId {
    /// Generate a fresh identifier (store use only)
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a string-encoded team ID
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let trimmed = value.trim();

        Uuid::parse_str(trimmed).map(Self).map_err(|_| {
            DomainError::invalid_id(format!("'{}' is not a valid team id", trimmed))
        })
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated team document that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewTeam {
    pub name: String,
    pub sport: Sport,
    pub location: CountryCode,
    pub manager_id: UserId,
    pub player_ids: Vec<UserId>,
}

impl NewTeam {
    /// Materialize the initial document under a store-assigned ID
    pub fn into_team(self, id: TeamId) -> Team {
        Team {
            id,
            num_players: self.player_ids.len() as u32,
            name: self.name,
            sport: self.sport,
            location: self.location,
            manager_id: self.manager_id,
            player_ids: self.player_ids,
            num_games: 0,
            num_wins: 0,
            num_losses: 0,
            tournaments_won: 0,
            active: true,
            profile_picture: None,
        }
    }
}

/// Team document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    id: TeamId,
    name: String,
    sport: Sport,
    location: CountryCode,
    manager_id: UserId,
    player_ids: Vec<UserId>,
    num_players: u32,
    num_games: u32,
    num_wins: u32,
    num_losses: u32,
    tournaments_won: u32,
    active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    profile_picture: Option<String>,
}

impl Team {
    // Getters

    pub fn id(&self) -> &TeamId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sport(&self) -> Sport {
        self.sport
    }

    pub fn location(&self) -> &CountryCode {
        &self.location
    }

    pub fn manager_id(&self) -> &UserId {
        &self.manager_id
    }

    pub fn player_ids(&self) -> &[UserId] {
        &self.player_ids
    }

    pub fn num_players(&self) -> u32 {
        self.num_players
    }

    pub fn num_games(&self) -> u32 {
        self.num_games
    }

    pub fn num_wins(&self) -> u32 {
        self.num_wins
    }

    pub fn num_losses(&self) -> u32 {
        self.num_losses
    }

    pub fn tournaments_won(&self) -> u32 {
        self.tournaments_won
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn profile_picture(&self) -> Option<&str> {
        self.profile_picture.as_deref()
    }

    pub fn has_player(&self, player_id: &UserId) -> bool {
        self.player_ids.contains(player_id)
    }

    /// Apply a store update in place, keeping `num_players` in step with the roster
    pub fn apply(&mut self, update: &TeamUpdate) {
        let set = &update.set;

        if let Some(name) = &set.name {
            self.name = name.clone();
        }

        if let Some(sport) = set.sport {
            self.sport = sport;
        }

        if let Some(location) = &set.location {
            self.location = location.clone();
        }

        if let Some(manager_id) = set.manager_id {
            self.manager_id = manager_id;
        }

        if let Some(player_ids) = &set.player_ids {
            self.player_ids = player_ids.clone();
            self.num_players = player_ids.len() as u32;
        }

        if let Some(active) = set.active {
            self.active = active;
        }

        if let Some(picture) = &set.profile_picture {
            self.profile_picture = Some(picture.clone());
        }

        let inc = &update.inc;
        self.num_games = self.num_games.saturating_add(inc.num_games);
        self.num_wins = self.num_wins.saturating_add(inc.num_wins);
        self.num_losses = self.num_losses.saturating_add(inc.num_losses);
        self.tournaments_won = self.tournaments_won.saturating_add(inc.tournaments_won);
    }
}
