//! Report (article) editing modal.
//!
//! SYSTEM CONTEXT
//! ==============
//! The modal collects a title and content, then hands the owning view a
//! complete [`Report`]: every field is a plain string, never missing, so
//! what reaches persistence is always serializable as-is.

#[cfg(test)]
#[path = "articles_test.rs"]
mod articles_test;

use canvas::doc::{IdGenerator, now_ms};

use crate::types::{DEFAULT_REPORT_IMAGE, Report};

/// Loose field values as typed into the modal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArticleDraft {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
}

impl From<&Report> for ArticleDraft {
    fn from(report: &Report) -> Self {
        Self {
            title: Some(report.title.clone()),
            content: Some(report.content.clone()),
            image: Some(report.image.clone()),
        }
    }
}

/// Build a new report from a draft under a fresh id.
#[must_use]
pub fn new_report(id: String, draft: ArticleDraft) -> Report {
    Report {
        id,
        title: draft.title.unwrap_or_default(),
        content: draft.content.unwrap_or_default(),
        image: draft.image.filter(|s| !s.is_empty()).unwrap_or_else(|| DEFAULT_REPORT_IMAGE.to_string()),
    }
}

/// Apply a draft to an existing report id, coercing every field to a value.
#[must_use]
pub fn edited_report(id: &str, draft: ArticleDraft) -> Report {
    new_report(id.to_string(), draft)
}

/// What the modal produced on save.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArticleSaved {
    Created(Report),
    Updated(Report),
}

impl ArticleSaved {
    #[must_use]
    pub fn report(&self) -> &Report {
        match self {
            Self::Created(r) | Self::Updated(r) => r,
        }
    }
}

/// Modal state: closed, creating, or editing an existing report.
#[derive(Clone, Debug, Default)]
pub struct ArticleModal {
    pub open: bool,
    editing_id: Option<String>,
    pub draft: ArticleDraft,
    ids: IdGenerator,
}

impl ArticleModal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open with empty fields for a new report.
    pub fn open_new(&mut self) {
        self.open = true;
        self.editing_id = None;
        self.draft = ArticleDraft { title: Some(String::new()), content: Some(String::new()), image: None };
    }

    /// Open pre-filled from `report`.
    pub fn open_edit(&mut self, report: &Report) {
        self.open = true;
        self.editing_id = Some(report.id.clone());
        self.draft = ArticleDraft::from(report);
    }

    #[must_use]
    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = Some(title.into());
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.draft.content = Some(content.into());
    }

    /// Save and close. Returns `None` when the modal wasn't open.
    pub fn save(&mut self) -> Option<ArticleSaved> {
        self.save_at(now_ms())
    }

    pub(crate) fn save_at(&mut self, now: i64) -> Option<ArticleSaved> {
        if !self.open {
            return None;
        }
        let draft = std::mem::take(&mut self.draft);
        let saved = match self.editing_id.take() {
            Some(id) => ArticleSaved::Updated(edited_report(&id, draft)),
            None => ArticleSaved::Created(new_report(self.ids.next_id(now, |_| false), draft)),
        };
        self.open = false;
        Some(saved)
    }

    /// Close without saving.
    pub fn close(&mut self) {
        self.open = false;
        self.editing_id = None;
        self.draft = ArticleDraft::default();
    }
}
