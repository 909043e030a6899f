use crate::camera::{Camera, Point, Vec3, screen_delta_to_world};
use crate::consts::HIT_RADIUS_PX;
use crate::doc::{Node, NodeId};
use crate::hit::hit_test;
use crate::input::{Button, InputState, Tool};
use crate::render::ConnectorLine;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Pointer cursor the host should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Grab,
    Grabbing,
    Crosshair,
}

/// Actions returned from input handlers for the owning view to process.
///
/// The controller never mutates nodes itself; the owner applies these.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A dragged node should now sit at `position`.
    NodeMoved { id: NodeId, position: Vec3 },
    /// A connection gesture began at `source`.
    ConnectionStarted { source: NodeId, anchor: Vec3 },
    /// A connection gesture ended on another node.
    ConnectionCompleted { source: NodeId, target: NodeId },
    /// A connection gesture ended anywhere else; no edge may be created.
    ConnectionAbandoned { source: NodeId },
    SetCursor(Cursor),
    RenderNeeded,
}

/// Tool-gated pointer state machine for node gestures.
///
/// Primary-button drags move nodes, secondary-button drags connect them,
/// and with the pan tool active a primary drag pans the camera instead.
/// Every gesture ends back in [`InputState::Idle`].
#[derive(Debug, Clone)]
pub struct NodeInteractionController {
    pub camera: Camera,
    pub tool: Tool,
    pub input: InputState,
    pub hit_radius_px: f64,
}

impl Default for NodeInteractionController {
    fn default() -> Self {
        Self { camera: Camera::default(), tool: Tool::default(), input: InputState::Idle, hit_radius_px: HIT_RADIUS_PX }
    }
}

impl NodeInteractionController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Configuration ---

    /// Update viewport dimensions in CSS pixels.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.camera.viewport_width = width;
        self.camera.viewport_height = height;
    }

    /// Sync the camera yaw (radians) from the renderer. Non-finite values
    /// are ignored.
    pub fn set_yaw(&mut self, yaw: f64) {
        if yaw.is_finite() {
            self.camera.yaw = yaw;
        }
    }

    /// Switch tools, aborting any gesture in progress.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        if tool == self.tool {
            return Vec::new();
        }
        let mut actions = self.cancel();
        self.tool = tool;
        actions.push(Action::SetCursor(idle_cursor(tool)));
        actions
    }

    /// Abort the current gesture and return to idle.
    pub fn cancel(&mut self) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::Idle => Vec::new(),
            InputState::Dragging { .. } | InputState::Panning { .. } => {
                vec![Action::SetCursor(idle_cursor(self.tool))]
            }
            InputState::Connecting { source, .. } => {
                vec![Action::ConnectionAbandoned { source }, Action::RenderNeeded]
            }
        }
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, nodes: &[Node]) -> Vec<Action> {
        if !self.input.is_idle() {
            return Vec::new();
        }

        if self.tool == Tool::Pan {
            if button == Button::Primary {
                self.input = InputState::Panning { last_screen: screen_pt };
                return vec![Action::SetCursor(Cursor::Grabbing)];
            }
            return Vec::new();
        }

        let Some(node) = hit_test(screen_pt, nodes, &self.camera, self.hit_radius_px) else {
            return Vec::new();
        };

        match button {
            Button::Primary => {
                self.input = InputState::Dragging {
                    id: node.id.clone(),
                    origin_screen: screen_pt,
                    origin_position: node.position,
                };
                vec![Action::SetCursor(Cursor::Grabbing)]
            }
            Button::Secondary => {
                self.input =
                    InputState::Connecting { source: node.id.clone(), anchor: node.position, cursor: screen_pt };
                vec![
                    Action::ConnectionStarted { source: node.id.clone(), anchor: node.position },
                    Action::SetCursor(Cursor::Crosshair),
                ]
            }
            Button::Middle => Vec::new(),
        }
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        match &mut self.input {
            InputState::Idle => Vec::new(),
            InputState::Dragging { id, origin_screen, origin_position } => {
                let position = drag_position(*origin_position, *origin_screen, screen_pt, self.camera.yaw);
                vec![Action::NodeMoved { id: id.clone(), position }]
            }
            InputState::Connecting { cursor, .. } => {
                *cursor = screen_pt;
                vec![Action::RenderNeeded]
            }
            InputState::Panning { last_screen } => {
                self.camera.pan_by(screen_pt.x - last_screen.x, screen_pt.y - last_screen.y);
                *last_screen = screen_pt;
                vec![Action::RenderNeeded]
            }
        }
    }

    /// End the current gesture. Releasing a button other than the one that
    /// started it is ignored.
    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, nodes: &[Node]) -> Vec<Action> {
        if self.input.button().is_some_and(|b| b != button) {
            return Vec::new();
        }
        match std::mem::take(&mut self.input) {
            InputState::Idle => Vec::new(),
            InputState::Dragging { id, origin_screen, origin_position } => {
                let mut actions = Vec::new();
                if screen_pt != origin_screen {
                    let position = drag_position(origin_position, origin_screen, screen_pt, self.camera.yaw);
                    actions.push(Action::NodeMoved { id, position });
                }
                actions.push(Action::SetCursor(idle_cursor(self.tool)));
                actions
            }
            InputState::Connecting { source, .. } => {
                let target = hit_test(screen_pt, nodes, &self.camera, self.hit_radius_px)
                    .filter(|n| n.id != source)
                    .map(|n| n.id.clone());
                let ended = match target {
                    Some(target) => Action::ConnectionCompleted { source, target },
                    None => Action::ConnectionAbandoned { source },
                };
                vec![ended, Action::SetCursor(idle_cursor(self.tool)), Action::RenderNeeded]
            }
            InputState::Panning { .. } => vec![Action::SetCursor(idle_cursor(self.tool))],
        }
    }

    /// The pointer left the canvas: drags stop, connections are abandoned.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.cancel()
    }

    // --- Queries ---

    /// Dashed preview line for an in-progress connection.
    #[must_use]
    pub fn connection_preview(&self) -> Option<ConnectorLine> {
        let InputState::Connecting { anchor, cursor, .. } = &self.input else {
            return None;
        };
        let start = self.camera.world_to_screen(*anchor);
        Some(ConnectorLine { start, end: *cursor, dashed: true, selected: false })
    }

    /// Id of the node being dragged, if any.
    #[must_use]
    pub fn dragging(&self) -> Option<&str> {
        match &self.input {
            InputState::Dragging { id, .. } => Some(id),
            _ => None,
        }
    }
}

/// Position for a drag, computed from the gesture origin. Falls back to the
/// origin when the result would not be finite.
fn drag_position(origin_position: Vec3, origin_screen: Point, screen_pt: Point, yaw: f64) -> Vec3 {
    let (dx, dz) = screen_delta_to_world(screen_pt.x - origin_screen.x, screen_pt.y - origin_screen.y, yaw);
    let moved = origin_position.offset_ground(dx, dz);
    if moved.is_finite() { moved } else { origin_position }
}

fn idle_cursor(tool: Tool) -> Cursor {
    match tool {
        Tool::Pan => Cursor::Default,
        Tool::Select => Cursor::Grab,
    }
}
