//! Shared entity definitions.

use serde::{Deserialize, Serialize};

/// Direction a sprite is facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

/// Kind of scripted world object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// Rolls away when kicked
    Kickable,
    /// Can be sat on
    Sittable,
    /// Can be examined
    Interactive,
}

/// A player reply offered under a dialogue node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueResponse {
    pub text: String,
    /// Node this reply leads to (None = end conversation)
    pub next_dialogue: Option<String>,
}

impl DialogueResponse {
    pub fn leads_to(text: impl Into<String>, next: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            next_dialogue: Some(next.into()),
        }
    }

    pub fn farewell(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            next_dialogue: None,
        }
    }

    pub fn ends_conversation(&self) -> bool {
        self.next_dialogue.is_none()
    }
}

/// One step of an NPC conversation.
///
/// `text` may carry asterisk-delimited emphasis; the client styles it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueNode {
    pub id: String,
    pub text: String,
    /// Ordered replies, addressed by index
    pub responses: Vec<DialogueResponse>,
}

/// NPC entry for the NPC list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcSummary {
    pub id: String,
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub sprite: String,
    pub facing: Facing,
    pub description: String,
}

/// Short NPC reference attached to dialogue replies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcBrief {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Full NPC record including its dialogue graph and the caller's
/// conversation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpcRecord {
    #[serde(flatten)]
    pub summary: NpcSummary,
    pub dialogues: Vec<DialogueNode>,
    pub current_dialogue: String,
    pub interaction_count: u32,
}

/// Scripted object in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldObject {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    pub x: f32,
    pub y: f32,
    pub sprite: String,
    pub name: String,
    pub description: String,
}

/// Last known state of a player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: String,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub facing: Facing,
    pub sprite: String,
}
