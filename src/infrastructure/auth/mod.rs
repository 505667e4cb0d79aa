//! Authentication infrastructure module
//!
//! Only verifies session tokens; issuing them belongs to the sign-in flow.

mod jwt;

pub use jwt::{JwtClaims, JwtSessionVerifier, SessionVerifier};
