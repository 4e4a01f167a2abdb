//! Server-side NPC entity and its dialogue graph.

use std::collections::{HashMap, HashSet};

use poolside_shared::{DialogueNode, Facing, NpcBrief, NpcSummary};

use crate::error::{GameError, GameResult};

/// Node every conversation starts from and returns to
pub const GREETING_NODE: &str = "greeting";

/// Validated dialogue graph of one NPC.
///
/// Built once at load time. Every reply's next node is known to exist, so a
/// cursor that only ever moves along `transitions` can never dangle.
#[derive(Debug)]
pub struct DialogueGraph {
    nodes: Vec<DialogueNode>,
    index: HashMap<String, usize>,
    transitions: HashMap<String, HashSet<String>>,
}

impl DialogueGraph {
    pub fn build(npc_id: &str, nodes: Vec<DialogueNode>) -> GameResult<Self> {
        let invalid = |reason: String| GameError::InvalidGraph {
            npc_id: npc_id.to_string(),
            reason,
        };

        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.id.clone(), i).is_some() {
                return Err(invalid(format!("duplicate node '{}'", node.id)));
            }
        }

        if !index.contains_key(GREETING_NODE) {
            return Err(invalid(format!("missing '{}' node", GREETING_NODE)));
        }

        let mut transitions = HashMap::with_capacity(nodes.len());
        for node in &nodes {
            let mut targets = HashSet::new();
            for response in &node.responses {
                if let Some(next) = &response.next_dialogue {
                    if !index.contains_key(next) {
                        return Err(invalid(format!(
                            "node '{}' replies into unknown node '{}'",
                            node.id, next
                        )));
                    }
                    targets.insert(next.clone());
                }
            }
            transitions.insert(node.id.clone(), targets);
        }

        Ok(Self {
            nodes,
            index,
            transitions,
        })
    }

    /// Look up a node by id
    pub fn node(&self, id: &str) -> Option<&DialogueNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Whether some reply of `from` leads to `to`
    pub fn allows(&self, from: &str, to: &str) -> bool {
        self.transitions
            .get(from)
            .is_some_and(|targets| targets.contains(to))
    }

    /// Nodes in authored order
    pub fn nodes(&self) -> &[DialogueNode] {
        &self.nodes
    }
}

/// Server-side NPC state.
///
/// Everything here is fixed after startup; conversation progress lives in
/// the world's conversation tracker.
#[derive(Debug)]
pub struct ServerNpc {
    pub id: String,
    pub name: String,
    pub position: [f32; 2],
    pub facing: Facing,
    pub sprite: String,
    pub description: String,
    pub graph: DialogueGraph,
}

impl ServerNpc {
    pub fn new(
        id: &str,
        name: &str,
        position: [f32; 2],
        facing: Facing,
        sprite: &str,
        description: &str,
        dialogues: Vec<DialogueNode>,
    ) -> GameResult<Self> {
        let graph = DialogueGraph::build(id, dialogues)?;
        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
            position,
            facing,
            sprite: sprite.to_string(),
            description: description.to_string(),
            graph,
        })
    }

    pub fn summary(&self) -> NpcSummary {
        NpcSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            x: self.position[0],
            y: self.position[1],
            sprite: self.sprite.clone(),
            facing: self.facing,
            description: self.description.clone(),
        }
    }

    pub fn brief(&self) -> NpcBrief {
        NpcBrief {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poolside_shared::DialogueResponse;

    fn node(id: &str, responses: Vec<DialogueResponse>) -> DialogueNode {
        DialogueNode {
            id: id.to_string(),
            text: format!("{} text", id),
            responses,
        }
    }

    #[test]
    fn test_transition_table() {
        let graph = DialogueGraph::build(
            "guard",
            vec![
                node(
                    "greeting",
                    vec![
                        DialogueResponse::leads_to("Tell me more", "more"),
                        DialogueResponse::farewell("Bye"),
                    ],
                ),
                node("more", vec![DialogueResponse::farewell("Thanks")]),
            ],
        )
        .unwrap();

        assert!(graph.allows("greeting", "more"));
        assert!(!graph.allows("more", "greeting"));
        assert!(!graph.allows("greeting", "greeting"));
        assert!(!graph.allows("unknown", "more"));
        assert_eq!(graph.node("more").unwrap().id, "more");
        assert!(graph.node("nowhere").is_none());
        assert_eq!(graph.nodes().len(), 2);
    }

    #[test]
    fn test_rejects_dangling_reply() {
        let result = DialogueGraph::build(
            "guard",
            vec![node(
                "greeting",
                vec![DialogueResponse::leads_to("Go", "nowhere")],
            )],
        );
        assert!(matches!(result, Err(GameError::InvalidGraph { .. })));
    }

    #[test]
    fn test_rejects_missing_greeting() {
        let result = DialogueGraph::build("guard", vec![node("hello", vec![])]);
        assert!(matches!(result, Err(GameError::InvalidGraph { .. })));
    }

    #[test]
    fn test_rejects_duplicate_nodes() {
        let result = DialogueGraph::build(
            "guard",
            vec![node("greeting", vec![]), node("greeting", vec![])],
        );
        assert!(matches!(result, Err(GameError::InvalidGraph { .. })));
    }
}
