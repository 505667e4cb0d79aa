//! Domain layer - Core business logic and entities

pub mod cache;
pub mod error;
pub mod team;
pub mod user;

pub use cache::{Cache, CacheExt, TeamCacheKey};
pub use error::{DomainError, WriteOperation};
pub use team::{
    CountryCode, CounterIncrements, NewTeam, Sport, Team, TeamChanges, TeamFilter, TeamId,
    TeamStore, TeamUpdate,
};
pub use user::{User, UserDirectory, UserId};
