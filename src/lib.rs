//! Investigation workspace state: projects, reports, and the mind-map
//! node collection.
//!
//! The `canvas` crate supplies the node model and the gesture controller;
//! this crate owns everything around it: persistence of node collections,
//! the project views that apply controller actions, and the side panels.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`state`] | Toolbar, canvas view model, workspace, views, modals, panels, dashboard |
//! | [`storage`] | Key/value stores and the `project_<id>_nodes` slot |
//! | [`services`] | Project data hook and image upload |
//! | [`types`] | Project, report and user records |
//! | [`config`] | Environment configuration |

pub mod config;
pub mod services;
pub mod state;
pub mod storage;
pub mod types;
