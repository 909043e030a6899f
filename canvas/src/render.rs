//! Presentation descriptors for connectors and node bodies.
//!
//! Nothing here draws. Each type computes what a host renderer needs
//! (SVG path data, sizes, which slots are editable) so the presentation
//! rules can be tested without a browser.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::camera::Point;
use crate::consts::{
    CARD_HEIGHT_PX, CARD_MIN_WIDTH_PX, COMPACT_SIZE_PX, CONNECTOR_COLOR, CONNECTOR_SELECTED_COLOR, DEFAULT_AVATAR,
    POSTIT_SIZE_PX,
};
use crate::doc::{Node, VisualStyle};

// =============================================================
// Connector
// =============================================================

/// Arrowhead polygon, in marker units (10 x 7, tip at the right).
pub const ARROWHEAD_POINTS: &str = "0 0, 10 3.5, 0 7";

/// A curved directional edge between two screen points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectorLine {
    pub start: Point,
    pub end: Point,
    /// Dashed lines mark a connection still being drawn.
    pub dashed: bool,
    pub selected: bool,
}

impl ConnectorLine {
    #[must_use]
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end, dashed: false, selected: false }
    }

    /// SVG path data: a quadratic curve that leaves `start` horizontally,
    /// passes through the midpoint, and mirrors into `end`.
    #[must_use]
    pub fn path(&self) -> String {
        let mid_x = (self.start.x + self.end.x) / 2.0;
        let mid_y = (self.start.y + self.end.y) / 2.0;
        format!(
            "M {} {} Q {} {}, {} {} T {} {}",
            self.start.x, self.start.y, mid_x, self.start.y, mid_x, mid_y, self.end.x, self.end.y
        )
    }

    #[must_use]
    pub fn stroke(&self) -> &'static str {
        if self.selected { CONNECTOR_SELECTED_COLOR } else { CONNECTOR_COLOR }
    }

    #[must_use]
    pub fn stroke_width(&self) -> f64 {
        if self.selected { 3.0 } else { 2.0 }
    }

    /// SVG `stroke-dasharray` value.
    #[must_use]
    pub fn dash_array(&self) -> &'static str {
        if self.dashed { "5,5" } else { "none" }
    }
}

// =============================================================
// Node body
// =============================================================

/// Text size preset for node bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextSize {
    Small,
    #[default]
    Medium,
    Large,
    Huge,
}

/// Horizontal text alignment inside a node body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Background color preset for node bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeColor {
    #[default]
    White,
    Yellow,
    Green,
    Blue,
}

/// Presentation options that are not stored on the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContentOptions {
    pub editing: bool,
    pub focused: bool,
    pub text_size: TextSize,
    pub text_align: TextAlign,
    pub color: NodeColor,
}

/// Outline of a node body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyShape {
    /// Avatar-only circle.
    Circle,
    /// Square sticky note, slightly rotated.
    Note,
    /// Rounded card with a header row and a description.
    Card,
}

/// A text region of a node body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSlot {
    /// Read-only text.
    Text(String),
    /// Editable input seeded from local edit buffers.
    Input { placeholder: Option<&'static str> },
}

/// Everything a renderer needs to draw one node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeBody {
    pub shape: BodyShape,
    pub width: f64,
    pub height: f64,
    /// When true, `width` is a minimum and the body may grow with its text.
    pub grows: bool,
    pub avatar_src: String,
    /// Title and description slots; absent for avatar-only bodies.
    pub title: Option<TextSlot>,
    pub description: Option<TextSlot>,
    pub focused: bool,
    pub options: ContentOptions,
}

/// Avatar image for a node, falling back to the default image.
#[must_use]
pub fn avatar_src(node: &Node) -> &str {
    node.avatar.as_deref().filter(|s| !s.is_empty()).unwrap_or(DEFAULT_AVATAR)
}

/// Lay out a node's body for its visual style and edit state.
#[must_use]
pub fn node_body(node: &Node, options: ContentOptions) -> NodeBody {
    let avatar = avatar_src(node).to_string();
    let slots = |title_placeholder, description_placeholder| {
        if options.editing {
            (
                Some(TextSlot::Input { placeholder: title_placeholder }),
                Some(TextSlot::Input { placeholder: description_placeholder }),
            )
        } else {
            (Some(TextSlot::Text(node.title.clone())), Some(TextSlot::Text(node.description.clone())))
        }
    };

    match node.visual_style {
        VisualStyle::Compact => NodeBody {
            shape: BodyShape::Circle,
            width: COMPACT_SIZE_PX,
            height: COMPACT_SIZE_PX,
            grows: false,
            avatar_src: avatar,
            title: None,
            description: None,
            focused: options.focused,
            options,
        },
        VisualStyle::Postit => {
            let (title, description) = slots(Some("Title"), Some("Write your note here..."));
            NodeBody {
                shape: BodyShape::Note,
                width: POSTIT_SIZE_PX,
                height: POSTIT_SIZE_PX,
                grows: false,
                avatar_src: avatar,
                title,
                description,
                focused: options.focused,
                options,
            }
        }
        VisualStyle::Default | VisualStyle::Expanded => {
            let (title, description) = slots(None, None);
            NodeBody {
                shape: BodyShape::Card,
                width: CARD_MIN_WIDTH_PX,
                height: CARD_HEIGHT_PX,
                grows: true,
                avatar_src: avatar,
                title,
                description,
                focused: options.focused,
                options,
            }
        }
    }
}
