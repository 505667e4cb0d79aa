//! Session gate for mutating routes
//!
//! A request passes when it carries a valid session JWT, either as
//! `Authorization: Bearer <token>` or in the configured session cookie.
//! Anything else is redirected to the sign-in page with `303 See Other`.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::infrastructure::auth::JwtClaims;

/// Extractor that requires a signed-in session
#[derive(Debug, Clone)]
pub struct RequireSession(pub JwtClaims);

/// Redirect to the sign-in page
#[derive(Debug)]
pub struct SignInRedirect {
    location: String,
}

impl SignInRedirect {
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

impl IntoResponse for SignInRedirect {
    fn into_response(self) -> Response {
        (StatusCode::SEE_OTHER, [(header::LOCATION, self.location)]).into_response()
    }
}

impl FromRequestParts<AppState> for RequireSession {
    type Rejection = SignInRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let redirect = || SignInRedirect::to(state.auth.sign_in_path.clone());

        let token = extract_session_token(&parts.headers, &state.auth.cookie_name)
            .ok_or_else(|| {
                debug!(path = %parts.uri.path(), "No session token, redirecting to sign-in");
                redirect()
            })?;

        let claims = state.session.validate(&token).map_err(|e| {
            debug!(error = %e, "Rejected session token");
            redirect()
        })?;

        Ok(RequireSession(claims))
    }
}

/// Bearer token first, then the session cookie
pub fn extract_session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, token)| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer abc.def.ghi".parse().unwrap());

        assert_eq!(
            extract_session_token(&headers, "session").as_deref(),
            Some("abc.def.ghi")
        );
    }

    #[test]
    fn test_extract_cookie_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            "theme=dark; session=abc.def.ghi; other=1".parse().unwrap(),
        );

        assert_eq!(
            extract_session_token(&headers, "session").as_deref(),
            Some("abc.def.ghi")
        );
        assert!(extract_session_token(&headers, "sid").is_none());
    }

    #[test]
    fn test_bearer_takes_precedence() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer from-header".parse().unwrap());
        headers.insert(header::COOKIE, "session=from-cookie".parse().unwrap());

        assert_eq!(
            extract_session_token(&headers, "session").as_deref(),
            Some("from-header")
        );
    }

    #[test]
    fn test_basic_auth_is_not_a_session() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Basic dXNlcjpwYXNz".parse().unwrap());

        assert!(extract_session_token(&headers, "session").is_none());
    }

    #[test]
    fn test_redirect_response() {
        let response = SignInRedirect::to("/login").into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }
}
