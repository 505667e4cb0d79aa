//! User directory trait - how the team core resolves user references

use std::collections::HashMap;
use std::fmt::Debug;

use async_trait::async_trait;

use super::entity::{User, UserId};
use crate::domain::DomainError;

/// Read access to registered users
///
/// Implementors only provide the two lookups; the resolution helpers used by
/// the team core are derived from them and fail with `ReferenceNotFound`.
#[async_trait]
pub trait UserDirectory: Send + Sync + Debug {
    /// Look up a single user
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Look up every user in `ids` that exists, in any order
    async fn find_users(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError>;

    /// Resolve a user or fail
    async fn get_user_by_id(&self, id: &UserId) -> Result<User, DomainError> {
        self.find_user(id)
            .await?
            .ok_or_else(|| DomainError::reference_not_found(format!("User '{}' not found", id)))
    }

    /// Confirm every ID resolves to a user, returning the IDs unchanged
    async fn check_id_array(&self, ids: &[UserId]) -> Result<Vec<UserId>, DomainError> {
        self.get_list_of_players(ids).await?;
        Ok(ids.to_vec())
    }

    /// Expand IDs into full user records, preserving input order
    async fn get_list_of_players(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let found: HashMap<UserId, User> = self
            .find_users(ids)
            .await?
            .into_iter()
            .map(|user| (*user.id(), user))
            .collect();

        ids.iter()
            .map(|id| {
                found.get(id).cloned().ok_or_else(|| {
                    DomainError::reference_not_found(format!("User '{}' not found", id))
                })
            })
            .collect()
    }
}
