//! HTTP request handlers.
//!
//! Thin wrappers: pull ids and bodies out of the request, call into
//! [`GameWorld`], wrap the result in JSON. Errors become responses through
//! `GameError`'s `IntoResponse`.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::HeaderMap,
    Json,
};
use serde::Serialize;

use poolside_shared::{
    Ack, InteractRequest, InteractResult, NpcRecord, NpcSummary, PlayerRecord, PositionUpdate,
    PositionUpdated, RespondRequest, RespondResult, TalkResult, WorldObject, WorldSnapshot,
    SESSION_HEADER,
};

use crate::error::GameResult;
use crate::world::{GameWorld, ReplyChoice, SessionId};

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub world: Arc<GameWorld>,
    pub version: &'static str,
}

impl AppState {
    pub fn new(world: Arc<GameWorld>) -> Self {
        Self {
            world,
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

fn session(headers: &HeaderMap) -> SessionId {
    SessionId::from_header(headers.get(SESSION_HEADER).and_then(|v| v.to_str().ok()))
}

/// Decode a JSON body. A request without a JSON content type reads as an
/// empty object; a body that does not parse is bad input.
fn json_body<T: Default>(body: Result<Json<T>, JsonRejection>) -> GameResult<T> {
    match body {
        Ok(Json(body)) => Ok(body),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(rejection) => Err(rejection.into()),
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: state.version,
    })
}

// =============================================================================
// Game
// =============================================================================

pub async fn game_state(State(state): State<AppState>) -> Json<WorldSnapshot> {
    Json(state.world.snapshot().await)
}

pub async fn update_position(
    State(state): State<AppState>,
    body: Result<Json<PositionUpdate>, JsonRejection>,
) -> GameResult<Json<PositionUpdated>> {
    let update = json_body(body)?;
    let player = state
        .world
        .update_player_position(update.player_id.as_deref(), update.x, update.y)
        .await?;

    Ok(Json(PositionUpdated {
        success: true,
        player,
    }))
}

pub async fn get_player(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> GameResult<Json<PlayerRecord>> {
    Ok(Json(state.world.player(&player_id).await?))
}

pub async fn interact(
    State(state): State<AppState>,
    Path(object_id): Path<String>,
    body: Result<Json<InteractRequest>, JsonRejection>,
) -> GameResult<Json<InteractResult>> {
    state.world.require_object(&object_id)?;
    let request = json_body(body)?;

    let result = state
        .world
        .interact(&object_id, request.action.as_deref())
        .await?;
    Ok(Json(result))
}

pub async fn list_objects(State(state): State<AppState>) -> Json<Vec<WorldObject>> {
    Json(state.world.objects().await)
}

// =============================================================================
// NPCs
// =============================================================================

pub async fn list_npcs(State(state): State<AppState>) -> Json<Vec<NpcSummary>> {
    Json(state.world.npc_summaries())
}

pub async fn get_npc(
    State(state): State<AppState>,
    Path(npc_id): Path<String>,
    headers: HeaderMap,
) -> GameResult<Json<NpcRecord>> {
    let record = state.world.npc_record(&npc_id, &session(&headers)).await?;
    Ok(Json(record))
}

pub async fn talk(
    State(state): State<AppState>,
    Path(npc_id): Path<String>,
    headers: HeaderMap,
) -> GameResult<Json<TalkResult>> {
    let result = state
        .world
        .begin_conversation(&npc_id, &session(&headers))
        .await?;
    Ok(Json(result))
}

pub async fn respond(
    State(state): State<AppState>,
    Path(npc_id): Path<String>,
    headers: HeaderMap,
    body: Result<Json<RespondRequest>, JsonRejection>,
) -> GameResult<Json<RespondResult>> {
    state.world.require_npc(&npc_id)?;
    let request = json_body(body)?;

    let choice = ReplyChoice {
        response_index: request.response_index,
        next: request.next_dialogue.as_deref(),
    };
    let result = state
        .world
        .advance_conversation(&npc_id, &session(&headers), choice)
        .await?;
    Ok(Json(result))
}

pub async fn reset(
    State(state): State<AppState>,
    Path(npc_id): Path<String>,
    headers: HeaderMap,
) -> GameResult<Json<Ack>> {
    state
        .world
        .reset_conversation(&npc_id, &session(&headers))
        .await?;

    Ok(Json(Ack {
        success: true,
        message: "NPC dialogue reset".to_string(),
    }))
}
