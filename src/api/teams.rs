//! Team endpoints

use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireSession;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::team::Team;
use crate::domain::user::User;
use crate::infrastructure::team::{CreateTeamRequest, EditTeamRequest};

/// Body of `POST /api/teams`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamApiRequest {
    pub name: String,
    pub sport: String,
    pub location: String,
    pub manager_id: String,
    #[serde(default)]
    pub player_ids: Vec<String>,
}

impl From<CreateTeamApiRequest> for CreateTeamRequest {
    fn from(request: CreateTeamApiRequest) -> Self {
        Self {
            name: request.name,
            sport: request.sport,
            location: request.location,
            manager_id: request.manager_id,
            player_ids: request.player_ids,
        }
    }
}

/// Body of `PATCH /api/teams/{id}`; absent fields stay as they are
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditTeamApiRequest {
    pub name: Option<String>,
    pub sport: Option<String>,
    pub location: Option<String>,
    pub manager_id: Option<String>,
    pub player_ids: Option<Vec<String>>,
    pub profile_picture: Option<String>,
}

impl From<EditTeamApiRequest> for EditTeamRequest {
    fn from(request: EditTeamApiRequest) -> Self {
        Self {
            name: request.name,
            sport: request.sport,
            location: request.location,
            manager_id: request.manager_id,
            player_ids: request.player_ids,
            profile_picture: request.profile_picture,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPlayerApiRequest {
    pub player_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListTeamsResponse {
    pub teams: Vec<Team>,
    pub total: usize,
}

impl From<Vec<Team>> for ListTeamsResponse {
    fn from(teams: Vec<Team>) -> Self {
        Self {
            total: teams.len(),
            teams,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListPlayersResponse {
    pub players: Vec<User>,
    pub total: usize,
}

/// GET /api/teams
pub async fn list_teams(
    State(state): State<AppState>,
) -> Result<Json<ListTeamsResponse>, ApiError> {
    let teams = state.team_service.get_all_teams().await?;
    Ok(Json(teams.into()))
}

/// GET /api/teams/{team_id}
pub async fn get_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<Team>, ApiError> {
    let team = state.team_service.get_team_by_id(&team_id).await?;
    Ok(Json(team))
}

/// GET /api/teams/{team_id}/players
pub async fn list_team_players(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<ListPlayersResponse>, ApiError> {
    let players = state.team_service.get_teams_players(&team_id).await?;

    Ok(Json(ListPlayersResponse {
        total: players.len(),
        players,
    }))
}

/// GET /api/teams/by-player/{player_id}
pub async fn list_teams_by_player(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<ListTeamsResponse>, ApiError> {
    let teams = state.team_service.get_teams_by_player(&player_id).await?;
    Ok(Json(teams.into()))
}

/// GET /api/teams/by-manager/{manager_id}
pub async fn list_teams_by_manager(
    State(state): State<AppState>,
    Path(manager_id): Path<String>,
) -> Result<Json<ListTeamsResponse>, ApiError> {
    let teams = state.team_service.get_teams_by_manager(&manager_id).await?;
    Ok(Json(teams.into()))
}

/// GET /api/teams/by-sport/{sport}
pub async fn list_teams_by_sport(
    State(state): State<AppState>,
    Path(sport): Path<String>,
) -> Result<Json<ListTeamsResponse>, ApiError> {
    let teams = state.team_service.get_teams_by_sport(&sport).await?;
    Ok(Json(teams.into()))
}

/// POST /api/teams
pub async fn create_team(
    State(state): State<AppState>,
    RequireSession(session): RequireSession,
    Json(request): Json<CreateTeamApiRequest>,
) -> Result<Json<Team>, ApiError> {
    debug!(user_id = %session.user_id(), name = %request.name, "Creating team");

    let team = state.team_service.create_team(request.into()).await?;
    Ok(Json(team))
}

/// PATCH /api/teams/{team_id}
pub async fn edit_team(
    State(state): State<AppState>,
    RequireSession(session): RequireSession,
    Path(team_id): Path<String>,
    Json(request): Json<EditTeamApiRequest>,
) -> Result<Json<Team>, ApiError> {
    debug!(user_id = %session.user_id(), team_id = %team_id, "Editing team");

    let team = state.team_service.edit_team(&team_id, request.into()).await?;
    Ok(Json(team))
}

/// POST /api/teams/{team_id}/toggle-active
pub async fn toggle_active(
    State(state): State<AppState>,
    RequireSession(_): RequireSession,
    Path(team_id): Path<String>,
) -> Result<Json<Team>, ApiError> {
    let team = state.team_service.toggle_active(&team_id).await?;
    Ok(Json(team))
}

/// POST /api/teams/{team_id}/players
pub async fn add_player(
    State(state): State<AppState>,
    RequireSession(_): RequireSession,
    Path(team_id): Path<String>,
    Json(request): Json<AddPlayerApiRequest>,
) -> Result<Json<Team>, ApiError> {
    let team = state
        .team_service
        .add_player(&team_id, &request.player_id)
        .await?;
    Ok(Json(team))
}

/// POST /api/teams/{team_id}/wins
pub async fn add_win(
    State(state): State<AppState>,
    RequireSession(_): RequireSession,
    Path(team_id): Path<String>,
) -> Result<Json<Team>, ApiError> {
    Ok(Json(state.team_service.add_win(&team_id).await?))
}

/// POST /api/teams/{team_id}/losses
pub async fn add_loss(
    State(state): State<AppState>,
    RequireSession(_): RequireSession,
    Path(team_id): Path<String>,
) -> Result<Json<Team>, ApiError> {
    Ok(Json(state.team_service.add_loss(&team_id).await?))
}

/// POST /api/teams/{team_id}/tournament-wins
pub async fn add_tournament_win(
    State(state): State<AppState>,
    RequireSession(_): RequireSession,
    Path(team_id): Path<String>,
) -> Result<Json<Team>, ApiError> {
    Ok(Json(state.team_service.add_tournament_win(&team_id).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_deserialization() {
        let json = r#"{
            "name": "Wolves",
            "sport": "soccer",
            "location": "usa",
            "managerId": "0d5d3f0e-7b8a-4c55-9d0e-0c4b1f1d2a3b"
        }"#;

        let request: CreateTeamApiRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.name, "Wolves");
        assert_eq!(request.manager_id, "0d5d3f0e-7b8a-4c55-9d0e-0c4b1f1d2a3b");
        assert!(request.player_ids.is_empty());
    }

    #[test]
    fn test_edit_request_partial() {
        let request: EditTeamApiRequest =
            serde_json::from_str(r#"{ "profilePicture": "https://img.example/w.png" }"#).unwrap();

        let edit: EditTeamRequest = request.into();
        assert_eq!(edit.profile_picture.as_deref(), Some("https://img.example/w.png"));
        assert!(edit.name.is_none());
        assert!(edit.player_ids.is_none());
    }

    #[test]
    fn test_edit_request_keeps_empty_string() {
        let request: EditTeamApiRequest = serde_json::from_str(r#"{ "name": "" }"#).unwrap();
        assert_eq!(request.name.as_deref(), Some(""));
    }

    #[test]
    fn test_add_player_request() {
        let request: AddPlayerApiRequest =
            serde_json::from_str(r#"{ "playerId": "abc" }"#).unwrap();
        assert_eq!(request.player_id, "abc");
    }
}
