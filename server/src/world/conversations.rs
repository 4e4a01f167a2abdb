//! Conversation progress per (session, NPC) pair.
//!
//! Each pair owns its own cursor into the NPC's dialogue graph and its own
//! interaction counter. Pairs are created on first contact and dropped by
//! [`ConversationTracker::evict_idle`] once they go quiet.

use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use poolside_shared::{DialogueNode, SHARED_SESSION};

use crate::entities::{ServerNpc, GREETING_NODE};
use crate::error::{GameError, GameResult};

/// Opaque client-chosen id scoping conversation state
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Session used by clients that do not send one
    pub fn shared() -> Self {
        Self(SHARED_SESSION.to_string())
    }

    /// Session named by a request header, falling back to the shared one
    pub fn from_header(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(id) if !id.is_empty() => Self::new(id),
            _ => Self::shared(),
        }
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A reply picked by the player
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplyChoice<'a> {
    /// Position of the reply under the current node, if the client sent it
    pub response_index: Option<usize>,
    /// Node the reply leads to; None ends the conversation
    pub next: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ConversationKey {
    session: SessionId,
    npc_id: String,
}

#[derive(Debug, Clone)]
struct Conversation {
    cursor: String,
    interaction_count: u32,
    last_seen: Instant,
}

impl Conversation {
    fn new(now: Instant) -> Self {
        Self {
            cursor: GREETING_NODE.to_string(),
            interaction_count: 0,
            last_seen: now,
        }
    }
}

#[derive(Debug, Default)]
pub struct ConversationTracker {
    conversations: HashMap<ConversationKey, Conversation>,
}

impl ConversationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live conversations
    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    fn entry(&mut self, session: &SessionId, npc_id: &str) -> &mut Conversation {
        let now = Instant::now();
        let key = ConversationKey {
            session: session.clone(),
            npc_id: npc_id.to_string(),
        };
        let conversation = self
            .conversations
            .entry(key)
            .or_insert_with(|| Conversation::new(now));
        conversation.last_seen = now;
        conversation
    }

    /// Open (or reopen) a conversation and return the node at the cursor.
    ///
    /// Bumps the interaction counter; the cursor itself does not move.
    pub fn begin(
        &mut self,
        session: &SessionId,
        npc: &ServerNpc,
    ) -> GameResult<(DialogueNode, u32)> {
        let conversation = self.entry(session, &npc.id);
        let node = npc
            .graph
            .node(&conversation.cursor)
            .ok_or_else(|| GameError::DialogueMissing {
                npc_id: npc.id.clone(),
                node_id: conversation.cursor.clone(),
            })?;

        conversation.interaction_count += 1;
        Ok((node.clone(), conversation.interaction_count))
    }

    /// Follow the player's reply.
    ///
    /// Returns the node the conversation moved to, or None when the reply
    /// ended it and the cursor went back to the greeting. A rejected reply
    /// leaves the cursor where it was.
    pub fn advance(
        &mut self,
        session: &SessionId,
        npc: &ServerNpc,
        choice: ReplyChoice<'_>,
    ) -> GameResult<Option<DialogueNode>> {
        let conversation = self.entry(session, &npc.id);
        let next = choice.next.filter(|id| !id.is_empty());

        let rejected = |from: &str| GameError::InvalidTransition {
            npc_id: npc.id.clone(),
            from: from.to_string(),
            to: next.unwrap_or("(end of conversation)").to_string(),
        };

        if let Some(index) = choice.response_index {
            let current = npc
                .graph
                .node(&conversation.cursor)
                .ok_or_else(|| GameError::DialogueMissing {
                    npc_id: npc.id.clone(),
                    node_id: conversation.cursor.clone(),
                })?;
            let response = current.responses.get(index).ok_or_else(|| {
                GameError::InvalidInput(format!(
                    "Response {} does not exist for '{}'",
                    index, current.id
                ))
            })?;
            if response.next_dialogue.as_deref() != next {
                return Err(rejected(&conversation.cursor));
            }
        }

        match next {
            Some(next) => {
                if !npc.graph.allows(&conversation.cursor, next) {
                    return Err(rejected(&conversation.cursor));
                }
                let node = npc
                    .graph
                    .node(next)
                    .ok_or_else(|| GameError::DialogueMissing {
                        npc_id: npc.id.clone(),
                        node_id: next.to_string(),
                    })?;
                conversation.cursor = next.to_string();
                Ok(Some(node.clone()))
            }
            None => {
                conversation.cursor = GREETING_NODE.to_string();
                Ok(None)
            }
        }
    }

    /// Put the conversation back to the greeting and zero its counter
    pub fn reset(&mut self, session: &SessionId, npc: &ServerNpc) {
        let conversation = self.entry(session, &npc.id);
        conversation.cursor = GREETING_NODE.to_string();
        conversation.interaction_count = 0;
    }

    /// Cursor and counter for a pair, defaults for one never seen.
    ///
    /// A read: it neither creates the pair nor keeps it from being evicted.
    pub fn state(&self, session: &SessionId, npc_id: &str) -> (String, u32) {
        let key = ConversationKey {
            session: session.clone(),
            npc_id: npc_id.to_string(),
        };
        match self.conversations.get(&key) {
            Some(c) => (c.cursor.clone(), c.interaction_count),
            None => (GREETING_NODE.to_string(), 0),
        }
    }

    /// Drop conversations idle for longer than `max_idle` as of `now`.
    /// Returns how many were dropped.
    pub fn evict_idle(&mut self, now: Instant, max_idle: Duration) -> usize {
        let before = self.conversations.len();
        self.conversations
            .retain(|_, c| now.saturating_duration_since(c.last_seen) <= max_idle);
        before - self.conversations.len()
    }
}
