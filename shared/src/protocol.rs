//! HTTP protocol definitions shared between client and server.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::entities::{DialogueNode, NpcBrief, PlayerRecord, WorldObject};

/// Default server port
pub const DEFAULT_PORT: u16 = 3000;

/// Prefix every API route is mounted under
pub const API_PREFIX: &str = "/api";

/// Header carrying the conversation session id
pub const SESSION_HEADER: &str = "x-session-id";

/// Session used when a request carries no session header
pub const SHARED_SESSION: &str = "shared";

// =============================================================================
// Client -> Server Bodies
// =============================================================================

/// POST /game/player/position
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionUpdate {
    #[serde(default)]
    pub player_id: Option<String>,
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
}

/// POST /game/interact/:objectId
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractRequest {
    #[serde(default)]
    pub player_id: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
}

/// POST /npcs/:npcId/respond
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondRequest {
    /// Position of the chosen reply under the current node
    #[serde(default)]
    pub response_index: Option<usize>,
    /// Node the chosen reply leads to (absent = end conversation)
    #[serde(default)]
    pub next_dialogue: Option<String>,
}

// =============================================================================
// Server -> Client Bodies
// =============================================================================

/// Full world snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldSnapshot {
    pub players: HashMap<String, PlayerRecord>,
    pub interactive_objects: Vec<WorldObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionUpdated {
    pub success: bool,
    pub player: PlayerRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractResult {
    pub success: bool,
    pub message: String,
    pub object: WorldObject,
}

/// Reply to POST /npcs/:npcId/talk
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TalkResult {
    pub npc: NpcBrief,
    pub dialogue: DialogueNode,
    pub interaction_count: u32,
}

/// Reply to POST /npcs/:npcId/respond
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespondResult {
    pub success: bool,
    /// Next node to show, None once the conversation ended
    pub dialogue: Option<DialogueNode>,
    pub npc: NpcBrief,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Generic acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
    pub message: String,
}

/// Error body for every failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
