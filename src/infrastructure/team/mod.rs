//! Team infrastructure implementations

mod in_memory_store;
mod policy;
mod postgres_store;
mod service;

pub use in_memory_store::InMemoryTeamStore;
pub use policy::{InvalidationStrategy, LookupPolicy, TeamCachePolicy};
pub use postgres_store::{PostgresTeamStore, DEFAULT_TEAMS_TABLE};
pub use service::{CreateTeamRequest, EditTeamRequest, TeamService};
