//! Application state shared by the handlers

use std::sync::Arc;

use crate::config::AuthConfig;
use crate::infrastructure::auth::SessionVerifier;
use crate::infrastructure::team::TeamService;

/// Application state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub team_service: Arc<TeamService>,
    pub session: Arc<dyn SessionVerifier>,
    pub auth: AuthConfig,
}

impl AppState {
    pub fn new(
        team_service: Arc<TeamService>,
        session: Arc<dyn SessionVerifier>,
        auth: AuthConfig,
    ) -> Self {
        Self {
            team_service,
            session,
            auth,
        }
    }
}

#[cfg(test)]
pub mod test_support {
    //! In-memory state for router tests

    use std::sync::Arc;

    use jsonwebtoken::{encode, get_current_timestamp, EncodingKey, Header};

    use super::AppState;
    use crate::config::AuthConfig;
    use crate::domain::user::{User, UserId};
    use crate::infrastructure::auth::{JwtClaims, JwtSessionVerifier};
    use crate::infrastructure::cache::InMemoryCache;
    use crate::infrastructure::team::{InMemoryTeamStore, TeamCachePolicy, TeamService};
    use crate::infrastructure::user::InMemoryUserDirectory;

    pub const SECRET: &str = "router-test-secret";

    pub struct TestApp {
        pub state: AppState,
        pub manager: UserId,
        pub players: Vec<UserId>,
    }

    pub fn test_app() -> TestApp {
        let manager = User::new(UserId::generate(), "Maria", "Lopez");
        let players: Vec<User> = ["Ana", "Ben", "Cleo"]
            .into_iter()
            .map(|first| User::new(UserId::generate(), first, "Player"))
            .collect();

        let users = InMemoryUserDirectory::with_users(
            std::iter::once(manager.clone()).chain(players.iter().cloned()),
        );

        let service = TeamService::new(
            Arc::new(InMemoryTeamStore::new()),
            Arc::new(InMemoryCache::new()),
            Arc::new(users),
            TeamCachePolicy::default(),
        );

        let auth = AuthConfig {
            jwt_secret: SECRET.to_string(),
            ..Default::default()
        };

        TestApp {
            state: AppState::new(
                Arc::new(service),
                Arc::new(JwtSessionVerifier::new(SECRET)),
                auth,
            ),
            manager: *manager.id(),
            players: players.iter().map(|p| *p.id()).collect(),
        }
    }

    pub fn session_token(user: &UserId) -> String {
        let now = get_current_timestamp();
        let claims = JwtClaims {
            sub: user.to_string(),
            iat: now,
            exp: now + 3600,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }
}
