//! Document model: nodes, edges, and the in-memory node store.
//!
//! This module defines what sits on a project's canvas (`Node`, `NodeType`,
//! `VisualStyle`), sparse edits (`NodePatch`), partial creation requests
//! (`NodeDraft`), and the ordered collection that owns the live nodes
//! (`NodeStore`). The stored form uses camelCase keys, positions as
//! `[x, y, z]` arrays, and ids that may have been written as numbers.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Deserializer, Serialize};

use crate::camera::Vec3;

/// Unique identifier for a node.
pub type NodeId = String;

/// Semantic category of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NodeType {
    #[default]
    #[serde(rename = "generic")]
    Generic,
    #[serde(rename = "node_person", alias = "person")]
    Person,
    #[serde(rename = "node_organization", alias = "organization")]
    Organization,
    #[serde(rename = "node_object", alias = "object")]
    Object,
    #[serde(rename = "node_concept", alias = "concept")]
    Concept,
    #[serde(rename = "node_location", alias = "location")]
    Location,
    #[serde(rename = "node_event", alias = "event")]
    Event,
}

impl NodeType {
    pub const ALL: [Self; 7] = [
        Self::Generic,
        Self::Person,
        Self::Organization,
        Self::Object,
        Self::Concept,
        Self::Location,
        Self::Event,
    ];

    /// Human-readable label shown in the type picker.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Generic => "Generic Note",
            Self::Person => "Person",
            Self::Organization => "Organization",
            Self::Object => "Object",
            Self::Concept => "Concept",
            Self::Location => "Location",
            Self::Event => "Event",
        }
    }
}

/// How a node's body is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualStyle {
    #[default]
    Default,
    Compact,
    Expanded,
    Postit,
}

impl VisualStyle {
    pub const ALL: [Self; 4] = [Self::Default, Self::Compact, Self::Expanded, Self::Postit];

    /// Human-readable label shown in the style picker.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Compact => "Compact",
            Self::Expanded => "Expanded",
            Self::Postit => "Post-it",
        }
    }
}

/// A node as held in memory and in local storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique identifier, time-based at creation.
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: NodeId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// World position; only `x` and `z` change while dragging.
    #[serde(default)]
    pub position: Vec3,
    #[serde(default)]
    pub node_type: NodeType,
    #[serde(default)]
    pub visual_style: VisualStyle,
    /// Image URL or data URL; renderers fall back to a default avatar.
    #[serde(default)]
    pub avatar: Option<String>,
    /// Milliseconds since the Unix epoch, used by the timeline.
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// Deserialize an id written either as a JSON string or a JSON number.
///
/// # Errors
///
/// Fails for any other JSON type.
pub fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<NodeId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// Fields supplied when creating a node. Missing fields get defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub position: Option<Vec3>,
    pub node_type: Option<NodeType>,
    pub visual_style: Option<VisualStyle>,
    pub avatar: Option<String>,
    pub timestamp: Option<i64>,
}

/// Title given to nodes created without one.
pub const DEFAULT_NODE_TITLE: &str = "New Node";

impl Node {
    /// Build a node from a draft, filling unspecified fields with defaults.
    ///
    /// `created_ms` becomes the timestamp when the draft has none.
    #[must_use]
    pub fn from_draft(id: NodeId, draft: NodeDraft, created_ms: i64) -> Self {
        Self {
            id,
            title: draft.title.unwrap_or_else(|| DEFAULT_NODE_TITLE.to_string()),
            description: draft.description.unwrap_or_default(),
            position: draft.position.unwrap_or_default(),
            node_type: draft.node_type.unwrap_or_default(),
            visual_style: draft.visual_style.unwrap_or_default(),
            avatar: draft.avatar,
            timestamp: Some(draft.timestamp.unwrap_or(created_ms)),
        }
    }
}

/// Sparse update for a node. Only present fields are applied.
///
/// `avatar` and `timestamp` are doubly optional so a patch can clear them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub position: Option<Vec3>,
    pub node_type: Option<NodeType>,
    pub visual_style: Option<VisualStyle>,
    pub avatar: Option<Option<String>>,
    pub timestamp: Option<Option<i64>>,
}

impl NodePatch {
    /// Patch that only moves the node.
    #[must_use]
    pub fn position(position: Vec3) -> Self {
        Self { position: Some(position), ..Default::default() }
    }

    /// True when the patch would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A directed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub from_node_id: NodeId,
    pub to_node_id: NodeId,
}

impl Edge {
    #[must_use]
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>) -> Self {
        Self { from_node_id: from.into(), to_node_id: to.into() }
    }

    /// Whether either endpoint is `id`.
    #[must_use]
    pub fn touches(&self, id: &str) -> bool {
        self.from_node_id == id || self.to_node_id == id
    }
}

/// Issues time-based node ids that never repeat within one generator.
///
/// Ids are decimal millisecond timestamps. When two requests land in the
/// same millisecond, or the clock goes backwards, the next free value after
/// the last issued one is used instead.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id at `now_ms`, skipping any value for which `taken` is true.
    pub fn next_id(&mut self, now_ms: i64, taken: impl Fn(&str) -> bool) -> NodeId {
        let mut candidate = now_ms.max(self.last.saturating_add(1));
        while taken(&candidate.to_string()) {
            candidate = candidate.saturating_add(1);
        }
        self.last = candidate;
        candidate.to_string()
    }
}

/// Milliseconds since the Unix epoch, or 0 if the clock is before it.
#[must_use]
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or_default()
}

/// Ordered in-memory collection of nodes.
///
/// Order is insertion order, which is also the order nodes are serialized in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeStore {
    nodes: Vec<Node>,
}

impl NodeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Append a node, or replace in place if one with the same `id` exists.
    pub fn insert(&mut self, node: Node) {
        if let Some(existing) = self.nodes.iter_mut().find(|n| n.id == node.id) {
            *existing = node;
        } else {
            self.nodes.push(node);
        }
    }

    /// Remove a node by id, returning it if it was present.
    pub fn remove(&mut self, id: &str) -> Option<Node> {
        let idx = self.nodes.iter().position(|n| n.id == id)?;
        Some(self.nodes.remove(idx))
    }

    /// Return a reference to a node by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Apply a patch to an existing node. Returns false if the node doesn't exist.
    pub fn apply_patch(&mut self, id: &str, patch: &NodePatch) -> bool {
        let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) else {
            return false;
        };
        if let Some(title) = &patch.title {
            node.title.clone_from(title);
        }
        if let Some(description) = &patch.description {
            node.description.clone_from(description);
        }
        if let Some(position) = patch.position {
            node.position = position;
        }
        if let Some(node_type) = patch.node_type {
            node.node_type = node_type;
        }
        if let Some(style) = patch.visual_style {
            node.visual_style = style;
        }
        if let Some(avatar) = &patch.avatar {
            node.avatar.clone_from(avatar);
        }
        if let Some(timestamp) = patch.timestamp {
            node.timestamp = timestamp;
        }
        true
    }

    /// Replace all nodes with a full snapshot.
    pub fn load_snapshot(&mut self, nodes: Vec<Node>) {
        self.nodes = nodes;
    }

    /// All nodes in collection order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of nodes currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the store contains no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
