//! Floating debug overlay.
//!
//! The panel renders to plain lines so the host UI only has to lay them out.
//! Sections appear in a fixed order: authentication, projects (signed-in
//! users only), free-form debug data, then the error log.

#[cfg(test)]
#[path = "debug_test.rs"]
mod debug_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::state::auth::AuthState;
use crate::types::Project;

pub const NO_PROJECTS: &str = "No projects found";
pub const NO_DEBUG_DATA: &str = "No debug data available";
pub const NO_ERRORS: &str = "No errors logged";

/// One captured error.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub message: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub stack: Option<String>,
}

impl ErrorEntry {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), ..Default::default() }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    fn matches(&self, query_lower: &str) -> bool {
        self.message.to_lowercase().contains(query_lower)
            || self.kind.as_deref().is_some_and(|k| k.to_lowercase().contains(query_lower))
    }
}

/// A titled block of the rendered panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DebugSection {
    pub heading: String,
    pub lines: Vec<String>,
}

impl DebugSection {
    fn new(heading: impl Into<String>, lines: Vec<String>) -> Self {
        Self { heading: heading.into(), lines }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DebugPanel {
    pub open: bool,
    pub show_node_debug: bool,
    data: Vec<(String, Value)>,
    errors: Vec<ErrorEntry>,
    queries: Vec<String>,
}

impl DebugPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn set_show_node_debug(&mut self, show: bool) {
        self.show_node_debug = show;
    }

    // --- Debug data ---

    /// Set entry `key`, replacing an existing value in place.
    pub fn set_data(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.data.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.data.push((key, value)),
        }
    }

    pub fn remove_data(&mut self, key: &str) {
        self.data.retain(|(k, _)| k != key);
    }

    // --- Error log ---

    pub fn log_error(&mut self, entry: ErrorEntry) {
        self.errors.push(entry);
    }

    /// Add a filter query. Blank queries are ignored.
    pub fn add_query(&mut self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return false;
        }
        self.queries.push(query.to_string());
        true
    }

    pub fn remove_query(&mut self, index: usize) {
        if index < self.queries.len() {
            self.queries.remove(index);
        }
    }

    #[must_use]
    pub fn queries(&self) -> &[String] {
        &self.queries
    }

    /// Errors matching any query; all errors when there are no queries.
    #[must_use]
    pub fn visible_errors(&self) -> Vec<&ErrorEntry> {
        if self.queries.is_empty() {
            return self.errors.iter().collect();
        }
        let queries: Vec<String> = self.queries.iter().map(|q| q.to_lowercase()).collect();
        self.errors.iter().filter(|e| queries.iter().any(|q| e.matches(q))).collect()
    }

    // --- Rendering ---

    /// Render the panel. Empty while closed.
    #[must_use]
    pub fn sections(&self, auth: &AuthState, projects: &[Project]) -> Vec<DebugSection> {
        if !self.open {
            return Vec::new();
        }
        let mut out = vec![auth_section(auth)];

        if auth.is_signed_in() {
            let lines = if projects.is_empty() {
                vec![NO_PROJECTS.to_string()]
            } else {
                projects.iter().map(|p| format!("{} (ID: {})", p.title, p.id)).collect()
            };
            out.push(DebugSection::new("Projects", lines));
        }

        if self.data.is_empty() {
            out.push(DebugSection::new("Debug Data", vec![NO_DEBUG_DATA.to_string()]));
        }
        for (key, value) in &self.data {
            let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
            out.push(DebugSection::new(key.clone(), pretty.lines().map(str::to_string).collect()));
        }

        out.push(self.error_section());
        out
    }

    fn error_section(&self) -> DebugSection {
        let visible = self.visible_errors();
        let mut lines = Vec::new();
        for e in &visible {
            lines.push(e.message.clone());
            if let Some(kind) = &e.kind {
                lines.push(format!("Type: {kind}"));
            }
            if let Some(stack) = &e.stack {
                lines.push(stack.clone());
            }
        }
        if visible.is_empty() {
            lines.push(NO_ERRORS.to_string());
        }
        DebugSection::new("Error Log", lines)
    }
}

fn auth_section(auth: &AuthState) -> DebugSection {
    let mut lines = vec![format!("Logged in: {}", if auth.is_signed_in() { "Yes" } else { "No" })];
    if let Some(user) = auth.user() {
        lines.push(format!("User ID: {}", user.id));
        lines.push(format!("Email: {}", user.email));
    }
    DebugSection::new("Authentication", lines)
}
