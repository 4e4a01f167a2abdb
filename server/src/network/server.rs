//! HTTP game server.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use log::info;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use poolside_shared::API_PREFIX;

use super::handlers::{self, AppState};
use crate::config::ServerConfig;
use crate::world::GameWorld;

/// Build the full router around a world
pub fn router(world: Arc<GameWorld>) -> Router {
    let game = Router::new()
        .route("/state", get(handlers::game_state))
        .route("/player/position", post(handlers::update_position))
        .route("/player/:player_id", get(handlers::get_player))
        .route("/interact/:object_id", post(handlers::interact))
        .route("/objects", get(handlers::list_objects));

    let npcs = Router::new()
        .route("/", get(handlers::list_npcs))
        .route("/:npc_id", get(handlers::get_npc))
        .route("/:npc_id/talk", post(handlers::talk))
        .route("/:npc_id/respond", post(handlers::respond))
        .route("/:npc_id/reset", post(handlers::reset));

    Router::new()
        .nest(&format!("{}/game", API_PREFIX), game)
        .nest(&format!("{}/npcs", API_PREFIX), npcs)
        .route("/health", get(handlers::health))
        .layer(CorsLayer::permissive())
        .with_state(AppState::new(world))
}

/// Serve the API until the listener fails
pub async fn serve(config: &ServerConfig, world: Arc<GameWorld>) -> std::io::Result<()> {
    let addr = config.listen_addr();
    let listener = TcpListener::bind(addr).await?;
    info!("Pixel Poolside server listening on http://{}", addr);

    axum::serve(listener, router(world)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_router() -> Router {
        router(Arc::new(GameWorld::poolside().unwrap()))
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        session: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(session) = session {
            builder = builder.header("x-session-id", session);
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let resp = app.clone().oneshot(request).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_router();
        let (status, body) = send(&app, "GET", "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_talk_respond_scenario() {
        let app = test_router();

        let (status, body) = send(&app, "POST", "/api/npcs/lifeguard/talk", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["dialogue"]["id"], "greeting");
        assert_eq!(body["interactionCount"], 1);
        assert_eq!(body["npc"]["name"], "Marina");

        let (status, body) = send(
            &app,
            "POST",
            "/api/npcs/lifeguard/respond",
            None,
            Some(json!({"responseIndex": 0, "nextDialogue": "about_pool"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["dialogue"]["id"], "about_pool");

        let (status, body) = send(
            &app,
            "POST",
            "/api/npcs/lifeguard/respond",
            None,
            Some(json!({"responseIndex": 2, "nextDialogue": null})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["dialogue"].is_null());
        assert_eq!(body["message"], "Conversation ended");

        let (_, body) = send(&app, "POST", "/api/npcs/lifeguard/talk", None, None).await;
        assert_eq!(body["dialogue"]["id"], "greeting");
        assert_eq!(body["interactionCount"], 2);
    }

    #[tokio::test]
    async fn test_invalid_reply_is_bad_request() {
        let app = test_router();

        let (status, body) = send(
            &app,
            "POST",
            "/api/npcs/lifeguard/respond",
            None,
            Some(json!({"nextDialogue": "menu"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("menu"));

        let (_, body) = send(&app, "GET", "/api/npcs/lifeguard", None, None).await;
        assert_eq!(body["currentDialogue"], "greeting");
    }

    #[tokio::test]
    async fn test_sessions_do_not_share_cursor() {
        let app = test_router();

        send(
            &app,
            "POST",
            "/api/npcs/pool_chef/respond",
            Some("alice"),
            Some(json!({"nextDialogue": "specialty"})),
        )
        .await;

        let (_, body) = send(&app, "POST", "/api/npcs/pool_chef/talk", Some("alice"), None).await;
        assert_eq!(body["dialogue"]["id"], "specialty");

        let (_, body) = send(&app, "POST", "/api/npcs/pool_chef/talk", Some("bob"), None).await;
        assert_eq!(body["dialogue"]["id"], "greeting");
        assert_eq!(body["interactionCount"], 1);
    }

    #[tokio::test]
    async fn test_reset() {
        let app = test_router();
        send(&app, "POST", "/api/npcs/sunbather/talk", None, None).await;

        let (status, body) = send(&app, "POST", "/api/npcs/sunbather/reset", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "NPC dialogue reset");

        let (_, body) = send(&app, "GET", "/api/npcs/sunbather", None, None).await;
        assert_eq!(body["interactionCount"], 0);
        assert_eq!(body["currentDialogue"], "greeting");
    }

    #[tokio::test]
    async fn test_unknown_npc_is_not_found() {
        let app = test_router();
        for (method, uri) in [
            ("GET", "/api/npcs/ghost"),
            ("POST", "/api/npcs/ghost/talk"),
            ("POST", "/api/npcs/ghost/respond"),
            ("POST", "/api/npcs/ghost/reset"),
        ] {
            let (status, body) = send(&app, method, uri, None, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body["error"], "NPC not found");
        }
    }

    #[tokio::test]
    async fn test_respond_without_body_ends_conversation() {
        let app = test_router();
        send(
            &app,
            "POST",
            "/api/npcs/lifeguard/respond",
            None,
            Some(json!({"nextDialogue": "about_pool"})),
        )
        .await;

        let (status, body) = send(&app, "POST", "/api/npcs/lifeguard/respond", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["dialogue"].is_null());
        assert_eq!(body["message"], "Conversation ended");

        let (_, body) = send(&app, "GET", "/api/npcs/lifeguard", None, None).await;
        assert_eq!(body["currentDialogue"], "greeting");
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_bad_request() {
        let app = test_router();

        let (status, body) = send(
            &app,
            "POST",
            "/api/game/player/position",
            None,
            Some(json!({"playerId": "p", "x": "a"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, body) = send(
            &app,
            "POST",
            "/api/npcs/lifeguard/respond",
            None,
            Some(json!({"responseIndex": "first"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        // Unknown ids win over a bad body
        let (status, body) = send(
            &app,
            "POST",
            "/api/npcs/ghost/respond",
            None,
            Some(json!({"responseIndex": "first"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NPC not found");

        let (status, body) = send(&app, "POST", "/api/game/player/position", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Player ID is required");
    }

    #[tokio::test]
    async fn test_npc_list() {
        let app = test_router();
        let (status, body) = send(&app, "GET", "/api/npcs", None, None).await;
        assert_eq!(status, StatusCode::OK);

        let npcs = body.as_array().unwrap();
        assert_eq!(npcs.len(), 4);
        assert_eq!(npcs[0]["id"], "lifeguard");
        assert_eq!(npcs[1]["facing"], "left");
        assert!(npcs[0].get("dialogues").is_none());
    }

    #[tokio::test]
    async fn test_player_position_and_lookup() {
        let app = test_router();

        let (status, body) = send(
            &app,
            "POST",
            "/api/game/player/position",
            None,
            Some(json!({"playerId": "player_1", "x": 220, "y": 310})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["player"]["facing"], "down");

        let (status, body) = send(&app, "GET", "/api/game/player/player_1", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["x"], 220.0);
        assert_eq!(body["y"], 310.0);

        let (status, body) = send(
            &app,
            "POST",
            "/api/game/player/position",
            None,
            Some(json!({"x": 1, "y": 2})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Player ID is required");

        let (status, body) = send(&app, "GET", "/api/game/player/nobody", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Player not found");
    }

    #[tokio::test]
    async fn test_interactions() {
        let app = test_router();

        let (status, body) = send(
            &app,
            "POST",
            "/api/game/interact/umbrella1",
            None,
            Some(json!({"playerId": "player_1", "action": "examine"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["message"],
            "You examine the Beach Umbrella. A large umbrella providing shade from the sun"
        );
        assert_eq!(body["object"]["type"], "interactive");

        let (status, body) = send(
            &app,
            "POST",
            "/api/game/interact/lifebuoy",
            None,
            Some(json!({"playerId": "player_1", "action": "kick"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Object not found");

        let (status, body) = send(&app, "POST", "/api/game/interact/lifebuoy", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Object not found");

        let (status, body) = send(&app, "POST", "/api/game/interact/pool_ball", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "You interact with the Pool Ball");

        let (_, body) = send(
            &app,
            "POST",
            "/api/game/interact/pool_ball",
            None,
            Some(json!({"playerId": "player_1", "action": ""})),
        )
        .await;
        assert_eq!(body["message"], "You interact with the Pool Ball");
    }

    #[tokio::test]
    async fn test_game_state_snapshot() {
        let app = test_router();
        send(
            &app,
            "POST",
            "/api/game/player/position",
            None,
            Some(json!({"playerId": "p", "x": 5, "y": 6})),
        )
        .await;

        let (status, body) = send(&app, "GET", "/api/game/state", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["players"]["p"]["x"], 5.0);
        assert_eq!(body["interactiveObjects"].as_array().unwrap().len(), 3);

        let (_, body) = send(&app, "GET", "/api/game/objects", None, None).await;
        assert_eq!(body[0]["id"], "pool_ball");
    }
}
