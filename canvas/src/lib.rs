//! Rendering-free interaction core for the investigation mind-map canvas.
//!
//! This crate owns the parts of the canvas that can be reasoned about
//! without a 3D scene: the node/edge data model, the projection of pointer
//! motion onto the ground plane, hit-testing, and the tool-gated gesture
//! state machine. The host view feeds it pointer events and applies the
//! [`engine::Action`]s it returns; the controller itself never writes nodes.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::NodeInteractionController`] and its actions |
//! | [`doc`] | Nodes, edges, patches, id generation, the ordered node store |
//! | [`camera`] | Yaw camera and screen/world conversions |
//! | [`input`] | Tools, buttons, and the gesture state enum |
//! | [`hit`] | Nearest-node hit-testing in screen space |
//! | [`render`] | Connector paths and node-body layout descriptors |
//! | [`consts`] | Shared numeric constants (drag scale, hit radius, sizes) |

pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod input;
pub mod render;
