//! User domain
//!
//! Users are owned by a separate part of the system; the team core only
//! resolves references to them through the [`UserDirectory`] trait.

mod directory;
mod entity;

pub use directory::UserDirectory;
pub use entity::{parse_user_ids, User, UserId};

#[cfg(test)]
pub use directory::mock::MockUserDirectory;
