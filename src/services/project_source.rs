//! Project data hook.
//!
//! The backend is an external collaborator; the UI only needs "list the
//! projects, optionally filtered". Filters use the backend's
//! `column.eq.value` form.

#[cfg(test)]
#[path = "project_source_test.rs"]
mod project_source_test;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::types::Project;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("unsupported project filter: {0}")]
    InvalidFilter(String),
    #[error("project source read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("project source is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read access to the project collection.
#[async_trait::async_trait]
pub trait ProjectSource: Send + Sync {
    /// List projects, optionally narrowed by a `column.eq.value` filter.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidFilter`] for filters the source can't
    /// evaluate, or an I/O or decode error from the backing store.
    async fn list_projects(&self, filter: Option<&str>) -> Result<Vec<Project>, SourceError>;
}

/// Equality filter on one project column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EqFilter {
    pub column: String,
    pub value: String,
}

impl EqFilter {
    /// Parse `column.eq.value`. The value may itself contain dots.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidFilter`] when the operator is not `eq`
    /// or a part is missing.
    pub fn parse(filter: &str) -> Result<Self, SourceError> {
        let mut parts = filter.splitn(3, '.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(column), Some("eq"), Some(value)) if !column.is_empty() => {
                Ok(Self { column: column.to_string(), value: value.to_string() })
            }
            _ => Err(SourceError::InvalidFilter(filter.to_string())),
        }
    }

    fn matches(&self, project: &Project) -> Result<bool, SourceError> {
        let field = match self.column.as_str() {
            "id" => Some(project.id.as_str()),
            "owner_id" => project.owner_id.as_deref(),
            "title" => Some(project.title.as_str()),
            other => return Err(SourceError::InvalidFilter(format!("unknown column {other}"))),
        };
        Ok(field == Some(self.value.as_str()))
    }
}

fn apply_filter(projects: &[Project], filter: Option<&str>) -> Result<Vec<Project>, SourceError> {
    let Some(filter) = filter else {
        return Ok(projects.to_vec());
    };
    let filter = EqFilter::parse(filter)?;
    let mut out = Vec::new();
    for project in projects {
        if filter.matches(project)? {
            out.push(project.clone());
        }
    }
    debug!(column = %filter.column, matched = out.len(), "projects filtered");
    Ok(out)
}

// =============================================================================
// IN-MEMORY SOURCE
// =============================================================================

/// Fixed project list, used by tests and demos.
#[derive(Clone, Debug, Default)]
pub struct MemoryProjectSource {
    projects: Vec<Project>,
}

impl MemoryProjectSource {
    #[must_use]
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }
}

#[async_trait::async_trait]
impl ProjectSource for MemoryProjectSource {
    async fn list_projects(&self, filter: Option<&str>) -> Result<Vec<Project>, SourceError> {
        apply_filter(&self.projects, filter)
    }
}

// =============================================================================
// JSON FILE SOURCE
// =============================================================================

/// Projects exported as a JSON array, read fresh on every call.
///
/// A missing file reads as an empty list.
#[derive(Clone, Debug)]
pub struct JsonFileProjectSource {
    path: PathBuf,
}

impl JsonFileProjectSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl ProjectSource for JsonFileProjectSource {
    async fn list_projects(&self, filter: Option<&str>) -> Result<Vec<Project>, SourceError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let projects: Vec<Project> = serde_json::from_str(&raw)?;
        apply_filter(&projects, filter)
    }
}
