//! Collaborators behind the UI state.
//!
//! ARCHITECTURE
//! ============
//! The project backend is reached only through [`project_source`]; image
//! files only through [`upload`]. State modules depend on these, never the
//! other way around.

pub mod project_source;
pub mod upload;
