//! AI chat side panel.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each sent question schedules a simulated reply on the tokio runtime. The
//! reply task holds the panel's shared state and a session number taken at
//! send time; closing or reopening the panel bumps the session, so a reply
//! that fires afterwards finds a mismatch and is discarded instead of
//! landing in a transcript the user no longer sees.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::AppConfig;

pub const CHAT_TITLE: &str = "AI Conversation";
pub const CHAT_PLACEHOLDER: &str = "Type your message...";

/// Who wrote a transcript line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Author {
    User,
    Ai,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub author: Author,
    pub content: String,
}

impl ChatMessage {
    fn user(content: impl Into<String>) -> Self {
        Self { author: Author::User, content: content.into() }
    }

    fn ai(content: impl Into<String>) -> Self {
        Self { author: Author::Ai, content: content.into() }
    }
}

/// Keys the panel reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatKey {
    Enter,
    Escape,
}

/// Text of the simulated assistant answer to `question`.
#[must_use]
pub fn simulated_reply(question: &str) -> String {
    format!("Here's a response to \"{question}\"")
}

#[derive(Debug, Default)]
struct ChatInner {
    open: bool,
    session: u64,
    draft: String,
    messages: Vec<ChatMessage>,
}

/// Shared handle to the panel. Clones see the same state.
#[derive(Clone, Debug)]
pub struct ChatPanel {
    inner: Arc<Mutex<ChatInner>>,
    reply_delay: Duration,
}

impl ChatPanel {
    #[must_use]
    pub fn new(reply_delay: Duration) -> Self {
        Self { inner: Arc::new(Mutex::new(ChatInner::default())), reply_delay }
    }

    /// Panel using the configured reply delay.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.chat_reply_delay)
    }

    fn lock(&self) -> MutexGuard<'_, ChatInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Open the panel with a fresh transcript.
    ///
    /// With an initial question the transcript starts with it and a reply is
    /// scheduled. Must be called inside a tokio runtime when a question is
    /// given.
    pub fn open(&self, initial_question: Option<&str>) -> Option<JoinHandle<()>> {
        let session = {
            let mut inner = self.lock();
            inner.open = true;
            inner.session += 1;
            inner.draft.clear();
            inner.messages.clear();
            if let Some(q) = initial_question.filter(|q| !q.is_empty()) {
                inner.messages.push(ChatMessage::user(q));
            }
            inner.session
        };
        let question = initial_question.filter(|q| !q.is_empty())?;
        Some(self.schedule_reply(session, question.to_string()))
    }

    /// Close the panel. Pending replies are dropped when they fire.
    pub fn close(&self) {
        let mut inner = self.lock();
        if inner.open {
            inner.open = false;
            inner.session += 1;
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.lock().open
    }

    // =========================================================================
    // INPUT
    // =========================================================================

    pub fn set_draft(&self, text: impl Into<String>) {
        self.lock().draft = text.into();
    }

    #[must_use]
    pub fn draft(&self) -> String {
        self.lock().draft.clone()
    }

    /// The `+` button: clear the draft.
    pub fn clear_draft(&self) {
        self.lock().draft.clear();
    }

    /// Send the draft as typed. Whitespace-only drafts and a closed panel
    /// send nothing.
    pub fn send(&self) -> Option<JoinHandle<()>> {
        let (session, question) = {
            let mut inner = self.lock();
            if !inner.open {
                return None;
            }
            if inner.draft.trim().is_empty() {
                return None;
            }
            let question = std::mem::take(&mut inner.draft);
            inner.messages.push(ChatMessage::user(question.clone()));
            (inner.session, question)
        };
        Some(self.schedule_reply(session, question))
    }

    /// Keyboard surface: Enter sends, Escape closes.
    pub fn on_key(&self, key: ChatKey) -> Option<JoinHandle<()>> {
        match key {
            ChatKey::Enter => self.send(),
            ChatKey::Escape => {
                self.close();
                None
            }
        }
    }

    /// Visible transcript. Empty while closed.
    #[must_use]
    pub fn messages(&self) -> Vec<ChatMessage> {
        let inner = self.lock();
        if inner.open { inner.messages.clone() } else { Vec::new() }
    }

    fn schedule_reply(&self, session: u64, question: String) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        let delay = self.reply_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
            if !inner.open || inner.session != session {
                debug!(session, current = inner.session, "stale chat reply dropped");
                return;
            }
            inner.messages.push(ChatMessage::ai(simulated_reply(&question)));
        })
    }
}
