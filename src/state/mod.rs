//! UI state owned by the host views.
//!
//! Each module models one component's state and the events it accepts.
//! [`workspace::ProjectWorkspace`] composes the project-scoped ones and is
//! the only writer of a project's nodes.

pub mod articles;
pub mod auth;
pub mod canvas_view;
pub mod chat;
pub mod dashboard;
pub mod debug;
pub mod node_editor;
pub mod toolbar;
pub mod views;
pub mod workspace;
