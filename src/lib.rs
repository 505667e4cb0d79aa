//! League Hub API
//!
//! Team management for a sports league:
//! - Team documents in an in-memory or PostgreSQL document store
//! - Read-through query cache (moka or Redis) with write invalidation
//! - Roster, manager and bracket validation against registered users

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::{
    auth::JwtSessionVerifier,
    cache::CacheFactory,
    storage::StorageFactory,
    team::TeamService,
};
use tracing::{info, warn};

/// Create the application state from the default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_config = config.storage.to_storage_config()?;
    info!(backend = %storage_config.storage_type(), "Initializing document store");

    let backends = StorageFactory::create(&storage_config)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize storage: {}", e))?;

    info!(backend = %config.cache.backend, "Initializing team cache");
    let cache = CacheFactory::new()
        .create(&config.cache.to_cache_config())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize cache: {}", e))?;

    let policy = config.team_cache_policy();
    info!(
        invalidation = policy.invalidation.as_str(),
        sport_lookup = ?policy.sport_lookup,
        team_list_lookup = ?policy.team_list_lookup,
        ttl = ?policy.entry_ttl,
        "Team cache policy"
    );

    let team_service = TeamService::new(backends.teams, cache, backends.users, policy);

    if config.uses_default_jwt_secret() {
        warn!("auth.jwt_secret is the built-in default; set APP__AUTH__JWT_SECRET in production");
    }

    Ok(AppState::new(
        Arc::new(team_service),
        Arc::new(JwtSessionVerifier::new(&config.auth.jwt_secret)),
        config.auth.clone(),
    ))
}
