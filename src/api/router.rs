use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::brackets;
use super::health;
use super::middleware::logging_middleware;
use super::reference;
use super::state::AppState;
use super::teams;
use crate::infrastructure::observability::{create_metrics_router, PrometheusMetrics};

/// Team and bracket routes under `/api`
fn create_api_router() -> Router<AppState> {
    Router::new()
        // Reference data
        .route("/sports", get(reference::list_sports))
        .route("/countries", get(reference::list_countries))
        // Teams
        .route("/teams", get(teams::list_teams).post(teams::create_team))
        .route(
            "/teams/{team_id}",
            get(teams::get_team).patch(teams::edit_team),
        )
        .route(
            "/teams/{team_id}/players",
            get(teams::list_team_players).post(teams::add_player),
        )
        .route("/teams/{team_id}/toggle-active", post(teams::toggle_active))
        .route("/teams/{team_id}/wins", post(teams::add_win))
        .route("/teams/{team_id}/losses", post(teams::add_loss))
        .route(
            "/teams/{team_id}/tournament-wins",
            post(teams::add_tournament_win),
        )
        .route("/teams/by-player/{player_id}", get(teams::list_teams_by_player))
        .route(
            "/teams/by-manager/{manager_id}",
            get(teams::list_teams_by_manager),
        )
        .route("/teams/by-sport/{sport}", get(teams::list_teams_by_sport))
        // Brackets
        .route("/brackets/validate", post(brackets::validate_bracket))
}

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .nest("/api", create_api_router())
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Full router plus the Prometheus scrape endpoint
pub fn create_router_with_metrics(
    state: AppState,
    metrics: PrometheusMetrics,
    metrics_path: &str,
) -> Router {
    create_router(state).merge(create_metrics_router(metrics, metrics_path))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::api::state::test_support::{session_token, test_app, TestApp};

    async fn send(
        app: &TestApp,
        method: Method,
        uri: &str,
        body: Option<Value>,
        signed_in: bool,
    ) -> (StatusCode, axum::http::HeaderMap, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if signed_in {
            builder = builder.header(
                header::AUTHORIZATION,
                format!("Bearer {}", session_token(&app.manager)),
            );
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = create_router(app.state.clone())
            .oneshot(request)
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, headers, body)
    }

    async fn create_wolves(app: &TestApp) -> String {
        let (status, _, body) = send(
            app,
            Method::POST,
            "/api/teams",
            Some(json!({
                "name": "Wolves",
                "sport": "soccer",
                "location": "usa",
                "managerId": app.manager.to_string(),
                "playerIds": [app.players[0].to_string()]
            })),
            true,
        )
        .await;

        assert_eq!(status, StatusCode::OK, "{body}");
        body["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app();
        let (status, _, body) = send(&app, Method::GET, "/health", None, false).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_ready() {
        let app = test_app();
        let (status, _, body) = send(&app, Method::GET, "/ready", None, false).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["checks"][0]["name"], "team_store");
    }

    #[tokio::test]
    async fn test_reference_data() {
        let app = test_app();

        let (_, _, sports) = send(&app, Method::GET, "/api/sports", None, false).await;
        assert_eq!(sports["sports"].as_array().unwrap().len(), 12);
        assert_eq!(sports["sports"][0], "Soccer");

        let (_, _, countries) = send(&app, Method::GET, "/api/countries", None, false).await;
        assert!(countries["countries"]
            .as_array()
            .unwrap()
            .contains(&json!("USA")));
    }

    #[tokio::test]
    async fn test_write_without_session_redirects() {
        let app = test_app();
        let (status, headers, _) = send(
            &app,
            Method::POST,
            "/api/teams",
            Some(json!({ "name": "Wolves" })),
            false,
        )
        .await;

        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers[header::LOCATION], "/login");
    }

    #[tokio::test]
    async fn test_forged_session_redirects() {
        let app = test_app();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/teams/00000000-0000-0000-0000-000000000000/wins")
            .header(header::COOKIE, "session=not.a.jwt")
            .body(Body::empty())
            .unwrap();

        let response = create_router(app.state.clone())
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn test_session_cookie_is_accepted() {
        let app = test_app();
        let id = create_wolves(&app).await;

        let request = Request::builder()
            .method(Method::POST)
            .uri(format!("/api/teams/{id}/wins"))
            .header(
                header::COOKIE,
                format!("session={}", session_token(&app.manager)),
            )
            .body(Body::empty())
            .unwrap();

        let response = create_router(app.state.clone())
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_team_lifecycle() {
        let app = test_app();
        let id = create_wolves(&app).await;

        let (status, _, team) =
            send(&app, Method::GET, &format!("/api/teams/{id}"), None, false).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(team["sport"], "Soccer");
        assert_eq!(team["location"], "USA");
        assert_eq!(team["numPlayers"], 1);
        assert_eq!(team["active"], true);

        send(&app, Method::POST, &format!("/api/teams/{id}/wins"), None, true).await;
        send(&app, Method::POST, &format!("/api/teams/{id}/losses"), None, true).await;
        let (_, _, team) = send(
            &app,
            Method::POST,
            &format!("/api/teams/{id}/tournament-wins"),
            None,
            true,
        )
        .await;
        assert_eq!(team["numWins"], 1);
        assert_eq!(team["numLosses"], 1);
        assert_eq!(team["numGames"], 2);
        assert_eq!(team["tournamentsWon"], 1);

        let (_, _, team) = send(
            &app,
            Method::PATCH,
            &format!("/api/teams/{id}"),
            Some(json!({ "name": "Timber Wolves" })),
            true,
        )
        .await;
        assert_eq!(team["name"], "Timber Wolves");

        let (_, _, team) = send(
            &app,
            Method::POST,
            &format!("/api/teams/{id}/players"),
            Some(json!({ "playerId": app.players[1].to_string() })),
            true,
        )
        .await;
        assert_eq!(team["numPlayers"], 2);

        let (_, _, players) = send(
            &app,
            Method::GET,
            &format!("/api/teams/{id}/players"),
            None,
            false,
        )
        .await;
        assert_eq!(players["total"], 2);
        assert_eq!(players["players"][1]["firstName"], "Ben");

        let (_, _, team) = send(
            &app,
            Method::POST,
            &format!("/api/teams/{id}/toggle-active"),
            None,
            true,
        )
        .await;
        assert_eq!(team["active"], false);

        let (_, _, listed) = send(
            &app,
            Method::GET,
            &format!("/api/teams/by-manager/{}", app.manager),
            None,
            false,
        )
        .await;
        assert_eq!(listed["total"], 1);
        assert_eq!(listed["teams"][0]["name"], "Timber Wolves");

        let (_, _, listed) = send(
            &app,
            Method::GET,
            &format!("/api/teams/by-player/{}", app.players[1]),
            None,
            false,
        )
        .await;
        assert_eq!(listed["total"], 1);

        let (_, _, listed) =
            send(&app, Method::GET, "/api/teams/by-sport/SOCCER", None, false).await;
        assert_eq!(listed["total"], 1);

        let (_, _, all) = send(&app, Method::GET, "/api/teams", None, false).await;
        assert_eq!(all["total"], 1);
    }

    #[tokio::test]
    async fn test_invalid_id_is_bad_request() {
        let app = test_app();
        let (status, _, body) =
            send(&app, Method::GET, "/api/teams/not-a-uuid", None, false).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["param"], "id");
    }

    #[tokio::test]
    async fn test_unknown_team_is_not_found() {
        let app = test_app();
        let (status, _, body) = send(
            &app,
            Method::GET,
            "/api/teams/00000000-0000-0000-0000-000000000000",
            None,
            false,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["type"], "not_found_error");
    }

    #[tokio::test]
    async fn test_unknown_manager_is_unprocessable() {
        let app = test_app();
        let (status, _, body) = send(
            &app,
            Method::POST,
            "/api/teams",
            Some(json!({
                "name": "Wolves",
                "sport": "Soccer",
                "location": "USA",
                "managerId": "00000000-0000-0000-0000-000000000000"
            })),
            true,
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "reference_not_found");
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let app = test_app();
        let (status, _, body) = send(
            &app,
            Method::POST,
            "/api/teams",
            Some(json!({ "name": "Wolves" })),
            true,
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "json_parse_error");
    }

    #[tokio::test]
    async fn test_validate_bracket() {
        let app = test_app();
        let id = create_wolves(&app).await;

        let (status, _, body) = send(
            &app,
            Method::POST,
            "/api/brackets/validate",
            Some(json!({ "teamIds": [id], "bracketSize": 1, "sport": "Soccer" })),
            true,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], true);
        assert_eq!(body["teams"][0]["id"], id.as_str());

        let (status, _, body) = send(
            &app,
            Method::POST,
            "/api/brackets/validate",
            Some(json!({ "teamIds": [id], "bracketSize": 2 })),
            true,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"]["message"],
            "Number of teams provided does not match bracket size"
        );

        let (status, _, body) = send(
            &app,
            Method::POST,
            "/api/brackets/validate",
            Some(json!({ "teamIds": [id], "bracketSize": 1, "sport": "Hockey" })),
            true,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"]["message"],
            "Wolves is a Soccer team and cannot be added to a Hockey tournament."
        );
    }
}
