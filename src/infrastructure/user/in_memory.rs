//! In-memory user directory

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::user::{User, UserDirectory, UserId};
use crate::domain::DomainError;

/// Thread-safe in-memory user directory, for development and tests
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory pre-populated with users
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().map(|user| (*user.id(), user)).collect()),
        }
    }

    /// Registers or replaces a user
    pub fn insert(&self, user: User) -> Result<(), DomainError> {
        let mut users = self.users.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        users.insert(*user.id(), user);
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(users.get(id).cloned())
    }

    async fn find_users(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }
}
