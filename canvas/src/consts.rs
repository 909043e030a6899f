//! Shared numeric constants for the canvas crate.

// ── Dragging ────────────────────────────────────────────────────

/// World units moved per screen pixel of pointer travel.
pub const WORLD_UNITS_PER_PX: f64 = 0.1;

// ── Hit-testing ─────────────────────────────────────────────────

/// Default screen-space radius in pixels within which a release lands on a node.
pub const HIT_RADIUS_PX: f64 = 24.0;

// ── Node bodies ─────────────────────────────────────────────────

/// Fallback avatar image for nodes without one.
pub const DEFAULT_AVATAR: &str = "/default-image.png";

/// Diameter of a compact (avatar-only) node in pixels.
pub const COMPACT_SIZE_PX: f64 = 40.0;

/// Edge length of a post-it node in pixels.
pub const POSTIT_SIZE_PX: f64 = 256.0;

/// Minimum width of a default or expanded node card in pixels.
pub const CARD_MIN_WIDTH_PX: f64 = 40.0;

/// Height of a default or expanded node card in pixels.
pub const CARD_HEIGHT_PX: f64 = 128.0;

// ── Connectors ──────────────────────────────────────────────────

/// Stroke color of an unselected connector.
pub const CONNECTOR_COLOR: &str = "#000";

/// Stroke color of a selected connector.
pub const CONNECTOR_SELECTED_COLOR: &str = "#3b82f6";
