//! Game world management.
//!
//! `GameWorld` is built once at startup and shared by every request handler.
//! NPCs never change after load. Conversations, each object and the player
//! table sit behind their own locks, and no lock is held across an await.

mod conversations;
pub mod scene;

pub use conversations::{ConversationTracker, ReplyChoice, SessionId};

use std::collections::HashMap;
use std::time::{Duration, Instant};

use log::{debug, info};
use tokio::sync::{Mutex, RwLock};

use poolside_shared::{
    InteractResult, NpcRecord, NpcSummary, PlayerRecord, RespondResult, TalkResult, WorldObject,
    WorldSnapshot,
};

use crate::entities::{ServerNpc, ServerObject, ServerPlayer, DEFAULT_ACTION};
use crate::error::{GameError, GameResult};

/// An object and its lock; the id is readable without locking
struct ObjectSlot {
    id: String,
    state: Mutex<ServerObject>,
}

/// The game world containing all entities
pub struct GameWorld {
    npcs: Vec<ServerNpc>,
    conversations: Mutex<ConversationTracker>,
    objects: Vec<ObjectSlot>,
    players: RwLock<HashMap<String, ServerPlayer>>,
}

impl GameWorld {
    pub fn new(npcs: Vec<ServerNpc>, objects: Vec<ServerObject>) -> Self {
        let objects = objects
            .into_iter()
            .map(|object| ObjectSlot {
                id: object.id.clone(),
                state: Mutex::new(object),
            })
            .collect();

        Self {
            npcs,
            conversations: Mutex::new(ConversationTracker::new()),
            objects,
            players: RwLock::new(HashMap::new()),
        }
    }

    /// The default poolside scene
    pub fn poolside() -> GameResult<Self> {
        let world = Self::new(scene::poolside_npcs()?, scene::poolside_objects());
        info!(
            "Loaded poolside scene with {} NPCs and {} objects",
            world.npcs.len(),
            world.objects.len()
        );
        Ok(world)
    }

    fn npc(&self, npc_id: &str) -> GameResult<&ServerNpc> {
        self.npcs
            .iter()
            .find(|npc| npc.id == npc_id)
            .ok_or_else(|| GameError::npc_not_found(npc_id))
    }

    fn object(&self, object_id: &str) -> GameResult<&ObjectSlot> {
        self.objects
            .iter()
            .find(|slot| slot.id == object_id)
            .ok_or_else(|| GameError::object_not_found(object_id))
    }

    /// Fails with NotFound unless the NPC is in the scene
    pub fn require_npc(&self, npc_id: &str) -> GameResult<()> {
        self.npc(npc_id).map(|_| ())
    }

    pub fn require_object(&self, object_id: &str) -> GameResult<()> {
        self.object(object_id).map(|_| ())
    }

    // =========================================================================
    // NPCs and dialogue
    // =========================================================================

    pub fn npc_summaries(&self) -> Vec<NpcSummary> {
        self.npcs.iter().map(ServerNpc::summary).collect()
    }

    /// Full NPC record with the caller's conversation state
    pub async fn npc_record(&self, npc_id: &str, session: &SessionId) -> GameResult<NpcRecord> {
        let npc = self.npc(npc_id)?;
        let (current_dialogue, interaction_count) =
            self.conversations.lock().await.state(session, npc_id);

        Ok(NpcRecord {
            summary: npc.summary(),
            dialogues: npc.graph.nodes().to_vec(),
            current_dialogue,
            interaction_count,
        })
    }

    pub async fn begin_conversation(
        &self,
        npc_id: &str,
        session: &SessionId,
    ) -> GameResult<TalkResult> {
        let npc = self.npc(npc_id)?;
        let (dialogue, interaction_count) = self.conversations.lock().await.begin(session, npc)?;

        debug!(
            "Session {} talks to {} at '{}' (#{})",
            session, npc.id, dialogue.id, interaction_count
        );

        Ok(TalkResult {
            npc: npc.brief(),
            dialogue,
            interaction_count,
        })
    }

    pub async fn advance_conversation(
        &self,
        npc_id: &str,
        session: &SessionId,
        choice: ReplyChoice<'_>,
    ) -> GameResult<RespondResult> {
        let npc = self.npc(npc_id)?;
        let dialogue = self.conversations.lock().await.advance(session, npc, choice)?;

        let message = match &dialogue {
            Some(node) => {
                debug!("Session {} moved {} to '{}'", session, npc.id, node.id);
                None
            }
            None => {
                debug!("Session {} ended conversation with {}", session, npc.id);
                Some("Conversation ended".to_string())
            }
        };

        Ok(RespondResult {
            success: true,
            dialogue,
            npc: npc.brief(),
            message,
        })
    }

    pub async fn reset_conversation(&self, npc_id: &str, session: &SessionId) -> GameResult<()> {
        let npc = self.npc(npc_id)?;
        self.conversations.lock().await.reset(session, npc);
        info!("Session {} reset dialogue with {}", session, npc.id);
        Ok(())
    }

    /// Drop conversations nobody touched for `max_idle`
    pub async fn evict_idle_conversations(&self, max_idle: Duration) -> usize {
        let mut conversations = self.conversations.lock().await;
        let evicted = conversations.evict_idle(Instant::now(), max_idle);
        if evicted > 0 {
            debug!("{} conversations still active", conversations.len());
        }
        evicted
    }

    // =========================================================================
    // Objects
    // =========================================================================

    pub async fn objects(&self) -> Vec<WorldObject> {
        let mut objects = Vec::with_capacity(self.objects.len());
        for slot in &self.objects {
            objects.push(slot.state.lock().await.to_state());
        }
        objects
    }

    pub async fn interact(
        &self,
        object_id: &str,
        action: Option<&str>,
    ) -> GameResult<InteractResult> {
        let slot = self.object(object_id)?;
        let action = action
            .filter(|action| !action.is_empty())
            .unwrap_or(DEFAULT_ACTION);

        let mut object = slot.state.lock().await;
        let message = object.interact(action, &mut rand::thread_rng());
        debug!("{} -> {}: {}", action, object.id, message);

        Ok(InteractResult {
            success: true,
            message,
            object: object.to_state(),
        })
    }

    // =========================================================================
    // Players
    // =========================================================================

    /// Record a player's reported position, creating the player on first sight
    pub async fn update_player_position(
        &self,
        player_id: Option<&str>,
        x: Option<f32>,
        y: Option<f32>,
    ) -> GameResult<PlayerRecord> {
        let player_id = player_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| GameError::InvalidInput("Player ID is required".to_string()))?;

        let mut players = self.players.write().await;
        let player = players.entry(player_id.to_string()).or_insert_with(|| {
            info!("New player {}", player_id);
            ServerPlayer::new(player_id, x, y)
        });
        player.set_position(x, y);

        Ok(player.to_state())
    }

    pub async fn player(&self, player_id: &str) -> GameResult<PlayerRecord> {
        self.players
            .read()
            .await
            .get(player_id)
            .map(ServerPlayer::to_state)
            .ok_or_else(|| GameError::player_not_found(player_id))
    }

    pub async fn snapshot(&self) -> WorldSnapshot {
        let players = self
            .players
            .read()
            .await
            .iter()
            .map(|(id, player)| (id.clone(), player.to_state()))
            .collect();

        WorldSnapshot {
            players,
            interactive_objects: self.objects().await,
        }
    }
}
