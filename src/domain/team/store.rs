//! Document store contract for the `teams` collection

use std::fmt::Debug;

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::entity::{NewTeam, Team, TeamId};
use super::sport::{CountryCode, Sport};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Query filter over team documents
#[derive(Debug, Clone, PartialEq)]
pub enum TeamFilter {
    /// Every team
    All,
    /// Equality on the team ID
    Id(TeamId),
    /// Set membership on the team ID
    Ids(Vec<TeamId>),
    /// Equality on `managerId`
    Manager(UserId),
    /// Containment in `playerIds`
    Player(UserId),
    /// Equality on `sport`
    Sport(Sport),
}

impl TeamFilter {
    pub fn matches(&self, team: &Team) -> bool {
        match self {
            Self::All => true,
            Self::Id(id) => team.id() == id,
            Self::Ids(ids) => ids.contains(team.id()),
            Self::Manager(manager_id) => team.manager_id() == manager_id,
            Self::Player(player_id) => team.has_player(player_id),
            Self::Sport(sport) => team.sport() == *sport,
        }
    }
}

/// Fields replaced by an update (`$set`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamChanges {
    pub name: Option<String>,
    pub sport: Option<Sport>,
    pub location: Option<CountryCode>,
    pub manager_id: Option<UserId>,
    pub player_ids: Option<Vec<UserId>>,
    pub active: Option<bool>,
    pub profile_picture: Option<String>,
}

impl TeamChanges {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// The changes as a partial JSON document, including the derived player count
    pub fn to_document(&self) -> Map<String, Value> {
        let mut doc = Map::new();

        if let Some(name) = &self.name {
            doc.insert("name".into(), Value::from(name.as_str()));
        }

        if let Some(sport) = self.sport {
            doc.insert("sport".into(), Value::from(sport.as_str()));
        }

        if let Some(location) = &self.location {
            doc.insert("location".into(), Value::from(location.as_str()));
        }

        if let Some(manager_id) = &self.manager_id {
            doc.insert("managerId".into(), Value::from(manager_id.to_string()));
        }

        if let Some(player_ids) = &self.player_ids {
            let ids: Vec<Value> = player_ids
                .iter()
                .map(|id| Value::from(id.to_string()))
                .collect();
            doc.insert("playerIds".into(), Value::Array(ids));
            doc.insert("numPlayers".into(), Value::from(player_ids.len()));
        }

        if let Some(active) = self.active {
            doc.insert("active".into(), Value::from(active));
        }

        if let Some(picture) = &self.profile_picture {
            doc.insert("profilePicture".into(), Value::from(picture.as_str()));
        }

        doc
    }
}

/// Counter increments applied atomically by the store (`$inc`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterIncrements {
    pub num_games: u32,
    pub num_wins: u32,
    pub num_losses: u32,
    pub tournaments_won: u32,
}

impl CounterIncrements {
    pub fn win() -> Self {
        Self {
            num_games: 1,
            num_wins: 1,
            ..Default::default()
        }
    }

    pub fn loss() -> Self {
        Self {
            num_games: 1,
            num_losses: 1,
            ..Default::default()
        }
    }

    pub fn tournament_win() -> Self {
        Self {
            tournaments_won: 1,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Non-zero increments keyed by document field name
    pub fn fields(&self) -> Vec<(&'static str, u32)> {
        [
            ("numGames", self.num_games),
            ("numWins", self.num_wins),
            ("numLosses", self.num_losses),
            ("tournamentsWon", self.tournaments_won),
        ]
        .into_iter()
        .filter(|(_, delta)| *delta > 0)
        .collect()
    }
}

/// A partial update: replaced fields plus counter increments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamUpdate {
    pub set: TeamChanges,
    pub inc: CounterIncrements,
}

impl TeamUpdate {
    pub fn set(changes: TeamChanges) -> Self {
        Self {
            set: changes,
            inc: CounterIncrements::default(),
        }
    }

    pub fn increment(inc: CounterIncrements) -> Self {
        Self {
            set: TeamChanges::default(),
            inc,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.inc.is_empty()
    }
}

/// Outcome of an insert
#[derive(Debug, Clone, PartialEq)]
pub struct InsertOneResult {
    /// The new document's ID, absent if the store did not acknowledge the insert
    pub inserted_id: Option<TeamId>,
}

/// Handle on the `teams` collection
#[async_trait]
pub trait TeamStore: Send + Sync + Debug {
    /// All teams matching the filter
    async fn find(&self, filter: &TeamFilter) -> Result<Vec<Team>, DomainError>;

    /// The first team matching the filter
    async fn find_one(&self, filter: &TeamFilter) -> Result<Option<Team>, DomainError>;

    /// Insert a new document; the store assigns its ID
    async fn insert_one(&self, team: NewTeam) -> Result<InsertOneResult, DomainError>;

    /// Apply an update to the first match and return the document after the update
    async fn find_one_and_update(
        &self,
        filter: &TeamFilter,
        update: &TeamUpdate,
    ) -> Result<Option<Team>, DomainError>;

    /// Check that the store is reachable
    async fn ping(&self) -> Result<(), DomainError> {
        self.find_one(&TeamFilter::Id(TeamId::generate())).await?;
        Ok(())
    }
}
