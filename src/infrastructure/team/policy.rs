//! Cache behaviour of the team service

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What a write removes from the cache before re-priming the written team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidationStrategy {
    /// Only keys whose cached value can contain the written team
    #[default]
    Scoped,
    /// Every key in the cache
    FlushAll,
}

impl InvalidationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scoped => "scoped",
            Self::FlushAll => "flush_all",
        }
    }
}

/// Whether a lookup goes through the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupPolicy {
    /// Query the store every time
    #[default]
    Bypass,
    /// Serve from the cache, filling it on a miss
    ReadThrough,
}

#[derive(Debug, Clone, Default)]
pub struct TeamCachePolicy {
    pub invalidation: InvalidationStrategy,
    /// Applies to `get_teams_by_sport`
    pub sport_lookup: LookupPolicy,
    /// Applies to `get_list_of_teams`
    pub team_list_lookup: LookupPolicy,
    /// Expiry of cached entries; `None` keeps them until invalidated
    pub entry_ttl: Option<Duration>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let policy = TeamCachePolicy::default();

        assert_eq!(policy.invalidation, InvalidationStrategy::Scoped);
        assert_eq!(policy.sport_lookup, LookupPolicy::Bypass);
        assert_eq!(policy.team_list_lookup, LookupPolicy::Bypass);
        assert!(policy.entry_ttl.is_none());
    }

    #[test]
    fn test_deserialize() {
        let strategy: InvalidationStrategy = serde_json::from_str("\"flush_all\"").unwrap();
        assert_eq!(strategy, InvalidationStrategy::FlushAll);
        assert_eq!(strategy.as_str(), "flush_all");

        let lookup: LookupPolicy = serde_json::from_str("\"read_through\"").unwrap();
        assert_eq!(lookup, LookupPolicy::ReadThrough);
    }
}
