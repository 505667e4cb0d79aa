//! Tournament bracket checks

use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireSession;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::team::Team;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateBracketRequest {
    pub team_ids: Vec<String>,
    pub bracket_size: usize,
    #[serde(default)]
    pub sport: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidateBracketResponse {
    pub valid: bool,
    pub teams: Vec<Team>,
}

/// POST /api/brackets/validate
pub async fn validate_bracket(
    State(state): State<AppState>,
    RequireSession(_): RequireSession,
    Json(request): Json<ValidateBracketRequest>,
) -> Result<Json<ValidateBracketResponse>, ApiError> {
    debug!(
        teams = request.team_ids.len(),
        bracket_size = request.bracket_size,
        "Validating bracket"
    );

    let teams = state
        .team_service
        .validate_bracket(
            request.team_ids.as_slice(),
            request.bracket_size,
            request.sport.as_deref(),
        )
        .await?;

    Ok(Json(ValidateBracketResponse { valid: true, teams }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserialization() {
        let request: ValidateBracketRequest =
            serde_json::from_str(r#"{ "teamIds": ["a", "b"], "bracketSize": 2 }"#).unwrap();

        assert_eq!(request.team_ids, vec!["a", "b"]);
        assert_eq!(request.bracket_size, 2);
        assert!(request.sport.is_none());
    }
}
