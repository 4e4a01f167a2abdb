//! Scripted world objects and their interaction behavior.

use poolside_shared::{ObjectKind, WorldObject};
use rand::Rng;

/// Largest distance a kick moves an object along one axis
const KICK_RANGE: f32 = 50.0;

/// Action assumed when the client does not name one
pub const DEFAULT_ACTION: &str = "interact with";

/// Server-side object state
#[derive(Debug, Clone)]
pub struct ServerObject {
    pub id: String,
    pub kind: ObjectKind,
    pub position: [f32; 2],
    pub sprite: String,
    pub name: String,
    pub description: String,
}

impl ServerObject {
    pub fn new(
        id: &str,
        kind: ObjectKind,
        position: [f32; 2],
        sprite: &str,
        name: &str,
        description: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            kind,
            position,
            sprite: sprite.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    /// Apply `action` to this object and narrate what happened.
    ///
    /// Combinations without a dedicated behavior fall through to a generic
    /// message and leave the object untouched.
    pub fn interact<R: Rng + ?Sized>(&mut self, action: &str, rng: &mut R) -> String {
        match (self.kind, action) {
            (ObjectKind::Kickable, "kick") => {
                self.position[0] += rng.gen_range(-KICK_RANGE..KICK_RANGE);
                self.position[1] += rng.gen_range(-KICK_RANGE..KICK_RANGE);
                format!("You kick the {}! It rolls to a new spot.", self.name)
            }
            (ObjectKind::Sittable, "sit") => {
                format!("You sit on the {} and enjoy the poolside view.", self.name)
            }
            (ObjectKind::Interactive, _) => {
                format!("You examine the {}. {}", self.name, self.description)
            }
            _ => format!("You {} the {}", action, self.name),
        }
    }

    pub fn to_state(&self) -> WorldObject {
        WorldObject {
            id: self.id.clone(),
            kind: self.kind,
            x: self.position[0],
            y: self.position[1],
            sprite: self.sprite.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}
