//! Investigation dashboard: project cards and their report strips.
//!
//! DESIGN
//! ======
//! Projects come from the injected [`ProjectSource`]; every edit after that
//! (report patch, image, rename, delete) is applied to the local copy only.
//! Cards are shared (`Arc<Mutex<_>>`) so an image upload can finish after the
//! card is gone without touching anything.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::services::project_source::{ProjectSource, SourceError};
use crate::services::upload::spawn_image_upload;
use crate::state::auth::AuthState;
use crate::types::{PLACEHOLDER_IMAGE, Project, Report};

pub const UNTITLED_INVESTIGATION: &str = "Untitled Investigation";
pub const NO_DESCRIPTION: &str = "No description available";
pub const NO_DATE: &str = "Date not available";
pub const NO_DATA: &str = "No data found";

/// `created_at` as `MMMM dd, yyyy`, or the fallback when missing/unparseable.
#[must_use]
pub fn format_created_at(created_at: Option<&str>) -> String {
    let fmt = format_description!("[month repr:long] [day], [year]");
    created_at
        .and_then(|raw| OffsetDateTime::parse(raw, &Rfc3339).ok())
        .and_then(|dt| dt.format(fmt).ok())
        .unwrap_or_else(|| NO_DATE.to_string())
}

/// Display strings for one card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardView {
    pub title: String,
    pub description: String,
    pub date: String,
    pub image: String,
}

// =============================================================================
// CARD
// =============================================================================

/// One project card with its own image state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvestigationCard {
    project: Project,
    image: String,
    pending: Option<Project>,
}

impl InvestigationCard {
    #[must_use]
    pub fn new(project: Project) -> Self {
        let image = project.image.clone().filter(|s| !s.is_empty()).unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());
        Self { project, image, pending: None }
    }

    #[must_use]
    pub fn shared(project: Project) -> Arc<Mutex<Self>> {
        Arc::new(Mutex::new(Self::new(project)))
    }

    #[must_use]
    pub fn project(&self) -> &Project {
        &self.project
    }

    #[must_use]
    pub fn view(&self) -> CardView {
        let p = &self.project;
        CardView {
            title: if p.title.is_empty() { UNTITLED_INVESTIGATION.to_string() } else { p.title.clone() },
            description: if p.description.is_empty() { NO_DESCRIPTION.to_string() } else { p.description.clone() },
            date: format_created_at(p.created_at.as_deref()),
            image: self.image.clone(),
        }
    }

    /// Set the card image and queue the patched project for the list.
    pub fn set_image(&mut self, image: String) {
        self.image.clone_from(&image);
        self.project.image = Some(image);
        self.pending = Some(self.project.clone());
    }

    /// Patched project waiting to be written back to the dashboard.
    pub fn take_update(&mut self) -> Option<Project> {
        self.pending.take()
    }

    /// Upload `path` into `card`. A card dropped before the read finishes is
    /// left alone.
    pub fn upload_image(card: &Arc<Mutex<Self>>, path: PathBuf) -> JoinHandle<()> {
        spawn_image_upload(Arc::downgrade(card), path, Self::set_image)
    }
}

// =============================================================================
// DASHBOARD
// =============================================================================

pub struct Dashboard {
    source: Arc<dyn ProjectSource>,
    projects: Vec<Project>,
    loaded: bool,
}

impl Dashboard {
    #[must_use]
    pub fn new(source: Arc<dyn ProjectSource>) -> Self {
        Self { source, projects: Vec::new(), loaded: false }
    }

    /// Fetch projects, limited to the user's own when signed in.
    ///
    /// # Errors
    ///
    /// Propagates the source's error; the previous list is kept.
    pub async fn load(&mut self, auth: &AuthState) -> Result<(), SourceError> {
        let filter = auth.owner_filter();
        let projects = self.source.list_projects(filter.as_deref()).await?;
        info!(count = projects.len(), filtered = filter.is_some(), "projects loaded");
        self.projects = projects;
        self.loaded = true;
        Ok(())
    }

    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    #[must_use]
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Placeholder to show instead of the list, if any.
    #[must_use]
    pub fn empty_message(&self) -> Option<&'static str> {
        (self.loaded && self.projects.is_empty()).then_some(NO_DATA)
    }

    /// Fresh cards for the current list.
    #[must_use]
    pub fn cards(&self) -> Vec<Arc<Mutex<InvestigationCard>>> {
        self.projects.iter().cloned().map(InvestigationCard::shared).collect()
    }

    // --- Local patches ---

    /// Replace the project with the same id. Unknown ids are ignored.
    pub fn update_project(&mut self, project: Project) -> bool {
        let Some(slot) = self.projects.iter_mut().find(|p| p.id == project.id) else {
            debug!(id = %project.id, "update for unknown project ignored");
            return false;
        };
        *slot = project;
        true
    }

    /// Replace one report inside a project.
    pub fn update_report(&mut self, project_id: &str, report: Report) -> bool {
        let Some(project) = self.projects.iter_mut().find(|p| p.id == project_id) else {
            return false;
        };
        let Some(slot) = project.reports.iter_mut().find(|r| r.id == report.id) else {
            debug!(project_id, report_id = %report.id, "update for unknown report ignored");
            return false;
        };
        *slot = report;
        true
    }

    /// Write back a card's pending image change.
    pub fn sync_card(&mut self, card: &Arc<Mutex<InvestigationCard>>) -> bool {
        let update = card.lock().unwrap_or_else(PoisonError::into_inner).take_update();
        update.is_some_and(|project| self.update_project(project))
    }

    pub fn rename_project(&mut self, id: &str, title: &str) -> bool {
        let Some(project) = self.projects.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        title.clone_into(&mut project.title);
        true
    }

    pub fn delete_project(&mut self, id: &str) -> bool {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        let removed = self.projects.len() != before;
        if removed {
            info!(id, "project removed from dashboard");
        }
        removed
    }
}
