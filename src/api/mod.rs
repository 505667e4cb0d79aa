//! API layer - HTTP endpoints and middleware

pub mod brackets;
pub mod health;
pub mod middleware;
pub mod reference;
pub mod router;
pub mod state;
pub mod teams;
pub mod types;

pub use middleware::RequireSession;
pub use router::{create_router, create_router_with_metrics};
pub use state::AppState;
