//! Team domain

mod entity;
mod sport;
mod store;
mod validation;

pub use entity::{NewTeam, Team, TeamId};
pub use sport::{CountryCode, Sport, COUNTRY_CODES};
pub use store::{
    CounterIncrements, InsertOneResult, TeamChanges, TeamFilter, TeamStore, TeamUpdate,
};
pub use validation::{validate_profile_picture, validate_team_name, TeamValidationError};
