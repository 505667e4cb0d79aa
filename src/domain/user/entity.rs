//! User entity and related types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// User identifier, string-encoded as a UUID at every boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a string-encoded user ID
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let trimmed = value.trim();

        Uuid::parse_str(trimmed).map(Self).map_err(|_| {
            DomainError::invalid_id(format!("'{}' is not a valid user id", trimmed))
        })
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse every string-encoded ID in order, failing on the first malformed one
pub fn parse_user_ids<S: AsRef<str>>(values: &[S]) -> Result<Vec<UserId>, DomainError> {
    values.iter().map(|v| UserId::parse(v.as_ref())).collect()
}

/// A registered user who can manage or play for teams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    first_name: String,
    last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
}

impl User {
    pub fn new(id: UserId, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: None,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }
}
