//! Server-side entity definitions.

pub mod npc;
pub mod object;
pub mod player;

pub use npc::{ServerNpc, GREETING_NODE};
pub use object::{ServerObject, DEFAULT_ACTION};
pub use player::ServerPlayer;
