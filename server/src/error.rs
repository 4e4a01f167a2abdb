//! Error taxonomy for world operations.

use std::fmt;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{debug, error};
use poolside_shared::ErrorBody;
use thiserror::Error;

/// Kind of entity a lookup failed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Npc,
    Object,
    Player,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Npc => f.write_str("NPC"),
            Self::Object => f.write_str("Object"),
            Self::Player => f.write_str("Player"),
        }
    }
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("{kind} not found")]
    NotFound { kind: EntityKind, id: String },

    #[error("{0}")]
    InvalidInput(String),

    #[error("'{to}' is not a valid reply to '{from}'")]
    InvalidTransition {
        npc_id: String,
        from: String,
        to: String,
    },

    /// The conversation cursor points at a node the NPC does not have.
    /// Only a reset recovers from this.
    #[error("Dialogue not found")]
    DialogueMissing { npc_id: String, node_id: String },

    #[error("invalid dialogue graph for '{npc_id}': {reason}")]
    InvalidGraph { npc_id: String, reason: String },
}

pub type GameResult<T> = Result<T, GameError>;

impl GameError {
    pub fn npc_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: EntityKind::Npc,
            id: id.into(),
        }
    }

    pub fn object_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: EntityKind::Object,
            id: id.into(),
        }
    }

    pub fn player_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: EntityKind::Player,
            id: id.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidInput(_) | Self::InvalidTransition { .. } => StatusCode::BAD_REQUEST,
            Self::DialogueMissing { .. } | Self::InvalidGraph { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for GameError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for GameError {
    fn into_response(self) -> Response {
        match &self {
            Self::NotFound { kind, id } => debug!("{} '{}' not found", kind, id),
            Self::InvalidTransition { npc_id, from, to } => {
                debug!("Rejected reply {} -> {} for {}", from, to, npc_id)
            }
            Self::DialogueMissing { npc_id, node_id } => error!(
                "{} points at missing dialogue '{}', reset required",
                npc_id, node_id
            ),
            _ => {}
        }
        let status = self.status_code();
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
