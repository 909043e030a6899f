//! Node collection for one project view.
//!
//! DESIGN
//! ======
//! The view model is the single writer of a project's nodes. Every
//! mutation is followed by a full overwrite of the project's storage slot;
//! opening a different project replaces the in-memory collection with
//! whatever that slot holds. There is no merge step: two writers on the same
//! slot resolve as last write wins.
//!
//! Edges come from completed connect gestures and live only in memory.

#[cfg(test)]
#[path = "canvas_view_test.rs"]
mod canvas_view_test;

use canvas::doc::{Edge, IdGenerator, Node, NodeDraft, NodePatch, NodeStore, now_ms};
use tracing::{debug, info, warn};

use crate::storage::{KeyValueStore, StorageError, load_nodes, save_nodes};

/// Nodes and edges for the active project, persisted on every change.
pub struct CanvasViewModel {
    project_id: Option<String>,
    nodes: NodeStore,
    edges: Vec<Edge>,
    ids: IdGenerator,
    storage: Box<dyn KeyValueStore>,
    clock: fn() -> i64,
}

impl CanvasViewModel {
    #[must_use]
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        Self {
            project_id: None,
            nodes: NodeStore::new(),
            edges: Vec::new(),
            ids: IdGenerator::new(),
            storage,
            clock: now_ms,
        }
    }

    /// Replace the clock used for ids and default timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    // --- Project lifecycle ---

    /// Switch to `project_id`, loading its nodes over any in-memory state.
    ///
    /// Re-opening the current project does nothing.
    pub fn open_project(&mut self, project_id: &str) {
        if self.project_id.as_deref() == Some(project_id) {
            return;
        }
        let nodes = load_nodes(self.storage.as_ref(), project_id);
        info!(project_id, count = nodes.len(), "project nodes loaded");
        self.nodes.load_snapshot(nodes);
        self.edges.clear();
        self.project_id = Some(project_id.to_string());
    }

    #[must_use]
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    // --- Mutations ---
    //
    // Each mutation has a plain form that logs a failed save and a `try_`
    // form that returns it. Either way the in-memory change stays applied.
    // Positions must be finite: NaN and infinities serialize as `null`,
    // which would make the whole stored collection unreadable.

    /// Create a node from `draft`, append it, and persist.
    ///
    /// A non-finite draft position is replaced by the default origin.
    pub fn add_node(&mut self, draft: NodeDraft) -> Node {
        let node = self.insert_draft(draft);
        self.persist();
        node
    }

    /// [`Self::add_node`], reporting a failed save.
    ///
    /// # Errors
    ///
    /// Returns the [`StorageError`] from writing the collection; the node is
    /// still in memory.
    pub fn try_add_node(&mut self, draft: NodeDraft) -> Result<Node, StorageError> {
        let node = self.insert_draft(draft);
        self.try_persist()?;
        Ok(node)
    }

    /// Merge `patch` into node `id` and persist. Unknown ids and patches
    /// with a non-finite position are ignored.
    pub fn update_node(&mut self, id: &str, patch: &NodePatch) {
        if self.apply_patch(id, patch) {
            self.persist();
        }
    }

    /// [`Self::update_node`], reporting a failed save. Returns whether the
    /// patch was applied.
    ///
    /// # Errors
    ///
    /// Returns the [`StorageError`] from writing the collection.
    pub fn try_update_node(&mut self, id: &str, patch: &NodePatch) -> Result<bool, StorageError> {
        if !self.apply_patch(id, patch) {
            return Ok(false);
        }
        self.try_persist()?;
        Ok(true)
    }

    /// Remove node `id` and any edges touching it. Unknown ids are ignored.
    pub fn delete_node(&mut self, id: &str) {
        if self.remove_node(id) {
            self.persist();
        }
    }

    /// [`Self::delete_node`], reporting a failed save. Returns whether the
    /// node existed.
    ///
    /// # Errors
    ///
    /// Returns the [`StorageError`] from writing the collection.
    pub fn try_delete_node(&mut self, id: &str) -> Result<bool, StorageError> {
        if !self.remove_node(id) {
            return Ok(false);
        }
        self.try_persist()?;
        Ok(true)
    }

    fn insert_draft(&mut self, mut draft: NodeDraft) -> Node {
        if draft.position.is_some_and(|p| !p.is_finite()) {
            debug!(position = ?draft.position, "non-finite draft position replaced");
            draft.position = None;
        }
        let now = (self.clock)();
        let nodes = &self.nodes;
        let id = self.ids.next_id(now, |candidate| nodes.contains(candidate));
        let node = Node::from_draft(id, draft, now);
        debug!(id = %node.id, "node added");
        self.nodes.insert(node.clone());
        node
    }

    fn apply_patch(&mut self, id: &str, patch: &NodePatch) -> bool {
        if patch.is_empty() {
            return false;
        }
        if patch.position.is_some_and(|p| !p.is_finite()) {
            debug!(id, position = ?patch.position, "non-finite position ignored");
            return false;
        }
        if !self.nodes.apply_patch(id, patch) {
            debug!(id, "update for unknown node ignored");
            return false;
        }
        true
    }

    fn remove_node(&mut self, id: &str) -> bool {
        if self.nodes.remove(id).is_none() {
            debug!(id, "delete for unknown node ignored");
            return false;
        }
        self.edges.retain(|e| !e.touches(id));
        debug!(id, "node deleted");
        true
    }

    /// Record an edge between two existing, distinct nodes.
    ///
    /// Returns false (and records nothing) for unknown endpoints, self-loops,
    /// and duplicates.
    pub fn add_edge(&mut self, from: &str, to: &str) -> bool {
        if from == to || !self.nodes.contains(from) || !self.nodes.contains(to) {
            debug!(from, to, "edge rejected");
            return false;
        }
        let edge = Edge::new(from, to);
        if self.edges.contains(&edge) {
            return false;
        }
        self.edges.push(edge);
        true
    }

    /// Remove the edge `from -> to`, if recorded.
    pub fn remove_edge(&mut self, from: &str, to: &str) -> bool {
        let before = self.edges.len();
        self.edges.retain(|e| !(e.from_node_id == from && e.to_node_id == to));
        self.edges.len() != before
    }

    // --- Queries ---

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        self.nodes.nodes()
    }

    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[must_use]
    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    fn persist(&mut self) {
        if let Err(e) = self.try_persist() {
            warn!(project_id = ?self.project_id, error = %e, "failed to persist nodes");
        }
    }

    fn try_persist(&mut self) -> Result<(), StorageError> {
        let Some(project_id) = self.project_id.as_deref() else {
            debug!("no project open; nodes kept in memory only");
            return Ok(());
        };
        save_nodes(self.storage.as_mut(), project_id, self.nodes.nodes())
    }
}
