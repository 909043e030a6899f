//! Input model: tools, mouse buttons, and the gesture state machine.
//!
//! `Tool` captures which interaction mode the toolbar has selected.
//! `InputState` is the gesture being tracked between pointer-down and
//! pointer-up, carrying the origin needed to recompute positions from
//! scratch on every move.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::camera::{Point, Vec3};
use crate::doc::NodeId;

/// Error returned when a tool name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    #[error("invalid tool: {0:?} (expected \"pan\" or \"select\")")]
    InvalidArgument(String),
}

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Orbit/pan the view; node gestures are disabled.
    #[default]
    Pan,
    /// Drag nodes and draw connections between them.
    Select,
}

impl Tool {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pan => "pan",
            Self::Select => "select",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tool {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pan" => Ok(Self::Pan),
            "select" => Ok(Self::Select),
            other => Err(ToolError::InvalidArgument(other.to_string())),
        }
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is moving a node across the ground plane.
    Dragging {
        /// Id of the node being dragged.
        id: NodeId,
        /// Screen position of the pointer-down.
        origin_screen: Point,
        /// Node position at pointer-down; every move is computed from here.
        origin_position: Vec3,
    },
    /// The user is drawing a connection out of a node.
    Connecting {
        /// Id of the node the connection starts from.
        source: NodeId,
        /// World position of the source node when the gesture began.
        anchor: Vec3,
        /// Latest pointer position, for drawing the preview line.
        cursor: Point,
    },
    /// The user is panning the view with the pan tool.
    Panning {
        /// Screen position of the previous pointer event.
        last_screen: Point,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Button whose release ends the current gesture.
    #[must_use]
    pub fn button(&self) -> Option<Button> {
        match self {
            Self::Idle => None,
            Self::Dragging { .. } | Self::Panning { .. } => Some(Button::Primary),
            Self::Connecting { .. } => Some(Button::Secondary),
        }
    }
}
