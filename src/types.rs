//! Records exchanged with the project data source.
//!
//! Field names follow the backend's snake_case rows. Ids arrive as either
//! strings or numbers and are normalized to strings.

use canvas::doc::id_from_string_or_number;
use serde::{Deserialize, Serialize};

/// Image shown for reports that have none.
pub const DEFAULT_REPORT_IMAGE: &str = "/default-image.png";

/// Image shown for projects that have none.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Authenticated user as exposed by the auth provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
}

/// A short document attached to a project.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_report_image")]
    pub image: String,
}

fn default_report_image() -> String {
    DEFAULT_REPORT_IMAGE.to_string()
}

impl Report {
    /// Title for lists and tooltips.
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() { "Untitled" } else { &self.title }
    }

    /// Two-letter uppercase avatar fallback.
    #[must_use]
    pub fn initials(&self) -> String {
        self.title.chars().take(2).collect::<String>().to_uppercase()
    }
}

/// An investigation: the container of reports and (separately stored) nodes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub owner_id: Option<String>,
    /// RFC 3339 timestamp from the backend.
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub reports: Vec<Report>,
}

impl Project {
    /// A blank project shell for an id with no backend record.
    #[must_use]
    pub fn placeholder(id: &str) -> Self {
        Self {
            id: id.to_string(),
            title: format!("Project {id}"),
            description: "This is a sample project description.".to_string(),
            image: None,
            owner_id: None,
            created_at: None,
            updated_at: None,
            reports: Vec::new(),
        }
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
