//! Team validation

use thiserror::Error;

use crate::domain::DomainError;

/// Errors that can occur during team validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamValidationError {
    #[error("Team name cannot be empty")]
    EmptyName,

    #[error("Team name cannot exceed {0} characters")]
    NameTooLong(usize),

    #[error("'{0}' is not a supported sport")]
    UnknownSport(String),

    #[error("'{0}' is not a supported location")]
    UnknownLocation(String),

    #[error("Profile picture cannot be empty")]
    EmptyProfilePicture,

    #[error("Player '{0}' is already on the roster")]
    DuplicatePlayer(String),
}

impl From<TeamValidationError> for DomainError {
    fn from(err: TeamValidationError) -> Self {
        DomainError::validation(err.to_string())
    }
}

const MAX_TEAM_NAME_LENGTH: usize = 100;

/// Validate and normalize a team name
pub fn validate_team_name(name: &str) -> Result<String, TeamValidationError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(TeamValidationError::EmptyName);
    }

    if name.chars().count() > MAX_TEAM_NAME_LENGTH {
        return Err(TeamValidationError::NameTooLong(MAX_TEAM_NAME_LENGTH));
    }

    Ok(name.to_string())
}

/// Validate and normalize a profile picture reference
pub fn validate_profile_picture(value: &str) -> Result<String, TeamValidationError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(TeamValidationError::EmptyProfilePicture);
    }

    Ok(value.to_string())
}
