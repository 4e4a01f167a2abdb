//! Server-side player entity.

use poolside_shared::{Facing, PlayerRecord};

/// Position given to a player created without coordinates
pub const FALLBACK_POSITION: [f32; 2] = [100.0, 300.0];

/// Sprite every player starts with
pub const DEFAULT_SPRITE: &str = "player.png";

/// Server-side player state
#[derive(Debug, Clone)]
pub struct ServerPlayer {
    pub id: String,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub facing: Facing,
    pub sprite: String,
}

impl ServerPlayer {
    /// Create a player seen for the first time
    pub fn new(id: &str, x: Option<f32>, y: Option<f32>) -> Self {
        Self {
            id: id.to_string(),
            x: Some(x.unwrap_or(FALLBACK_POSITION[0])),
            y: Some(y.unwrap_or(FALLBACK_POSITION[1])),
            facing: Facing::Down,
            sprite: DEFAULT_SPRITE.to_string(),
        }
    }

    /// Overwrite the stored coordinates with what the client reported.
    ///
    /// An omitted coordinate is stored as omitted, even right after
    /// creation when it replaces the fallback.
    pub fn set_position(&mut self, x: Option<f32>, y: Option<f32>) {
        self.x = x;
        self.y = y;
    }

    pub fn to_state(&self) -> PlayerRecord {
        PlayerRecord {
            id: self.id.clone(),
            x: self.x,
            y: self.y,
            facing: self.facing,
            sprite: self.sprite.clone(),
        }
    }
}
