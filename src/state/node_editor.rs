//! Edit-in-place buffers for a node's title and description.
//!
//! Editing copies the node's text into local buffers; nothing reaches the
//! view model until blur, and then only the fields that actually changed.

#[cfg(test)]
#[path = "node_editor_test.rs"]
mod node_editor_test;

use canvas::doc::{Node, NodeId, NodePatch, NodeType, VisualStyle};

/// Local edit state for one node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeEditor {
    editing: Option<Editing>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Editing {
    id: NodeId,
    original_title: String,
    original_description: String,
    title: String,
    description: String,
}

impl NodeEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing `node`, discarding any unfinished edit.
    pub fn begin(&mut self, node: &Node) {
        self.editing = Some(Editing {
            id: node.id.clone(),
            original_title: node.title.clone(),
            original_description: node.description.clone(),
            title: node.title.clone(),
            description: node.description.clone(),
        });
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    #[must_use]
    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_ref().map(|e| e.id.as_str())
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.editing.as_ref().map(|e| e.title.as_str())
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.editing.as_ref().map(|e| e.description.as_str())
    }

    /// Ignored when not editing.
    pub fn set_title(&mut self, title: impl Into<String>) {
        if let Some(e) = self.editing.as_mut() {
            e.title = title.into();
        }
    }

    /// Ignored when not editing.
    pub fn set_description(&mut self, description: impl Into<String>) {
        if let Some(e) = self.editing.as_mut() {
            e.description = description.into();
        }
    }

    /// Finish editing. Returns the node id and a patch of changed fields,
    /// or `None` when nothing changed or no edit was in progress.
    pub fn blur(&mut self) -> Option<(NodeId, NodePatch)> {
        let e = self.editing.take()?;
        let mut patch = NodePatch::default();
        if e.title != e.original_title {
            patch.title = Some(e.title);
        }
        if e.description != e.original_description {
            patch.description = Some(e.description);
        }
        (!patch.is_empty()).then_some((e.id, patch))
    }

    /// Drop the edit without producing a patch.
    pub fn cancel(&mut self) {
        self.editing = None;
    }
}

/// Patch for a style picked from the node tooltip.
#[must_use]
pub fn style_patch(style: VisualStyle) -> NodePatch {
    NodePatch { visual_style: Some(style), ..Default::default() }
}

/// Patch for a type picked from the node tooltip.
#[must_use]
pub fn type_patch(node_type: NodeType) -> NodePatch {
    NodePatch { node_type: Some(node_type), ..Default::default() }
}
