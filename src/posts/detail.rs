//! Post detail state: one issue, its comment thread and the reading controls.
//!
//! Opening a post restarts two independent loads keyed by the same issue
//! number. Each result carries the ticket it was requested with; anything
//! that does not match the current ticket is dropped, so content from a
//! previously opened post can never show up under the current one.

use std::sync::Arc;

use tracing::debug;

use super::comments::{CommentThread, CommentTicket};
use super::format;
use super::translate::{next_target, Translator};
use crate::api::Issue;

/// Identifies one issue request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailTicket {
    generation: u64,
    number: u64,
}

impl DetailTicket {
    pub fn number(&self) -> u64 {
        self.number
    }
}

/// The two fetches to run after [`PostDetail::open`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailRequests {
    pub number: u64,
    pub issue: DetailTicket,
    pub comments: CommentTicket,
}

/// What the detail view should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailDisplay {
    /// Nothing opened yet.
    Idle,
    Loading,
    /// The issue request failed.
    Failed,
    /// The issue does not exist.
    NotFound,
    Ready,
}

/// One post and its comments.
pub struct PostDetail {
    number: Option<u64>,
    issue: Option<Issue>,
    loading: bool,
    error: Option<String>,
    generation: u64,
    pending: Option<DetailTicket>,
    comments: CommentThread,
    scroll: u16,
    translation: Option<&'static str>,
    translator: Arc<dyn Translator>,
}

impl std::fmt::Debug for PostDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostDetail")
            .field("number", &self.number)
            .field("loading", &self.loading)
            .field("error", &self.error)
            .field("scroll", &self.scroll)
            .field("translation", &self.translation)
            .finish_non_exhaustive()
    }
}

impl PostDetail {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self {
            number: None,
            issue: None,
            loading: false,
            error: None,
            generation: 0,
            pending: None,
            comments: CommentThread::new(),
            scroll: 0,
            translation: None,
            translator,
        }
    }

    /// Show post `number`: clears the previous post and comments, scrolls to
    /// the top and restarts both loads.
    pub fn open(&mut self, number: u64) -> DetailRequests {
        debug!(number, "Opening post");
        self.generation += 1;
        let issue = DetailTicket {
            generation: self.generation,
            number,
        };
        self.number = Some(number);
        self.issue = None;
        self.error = None;
        self.loading = true;
        self.pending = Some(issue);
        self.scroll = 0;
        self.translation = None;

        let comments = self.comments.open(number);
        DetailRequests {
            number,
            issue,
            comments,
        }
    }

    /// Apply the issue result. `Ok(None)` means the issue does not exist.
    ///
    /// Returns `false` when the ticket is stale.
    pub fn apply_issue(&mut self, ticket: DetailTicket, result: Result<Option<Issue>, String>) -> bool {
        if self.pending != Some(ticket) {
            debug!(?ticket, "Dropping stale post result");
            return false;
        }
        self.pending = None;
        self.loading = false;
        match result {
            Ok(issue) => {
                self.issue = issue;
                self.error = None;
            }
            Err(message) => {
                self.issue = None;
                self.error = Some(message);
            }
        }
        true
    }

    /// Apply the comment thread result.
    pub fn apply_comments(
        &mut self,
        ticket: CommentTicket,
        result: Result<Vec<crate::api::Comment>, String>,
    ) -> bool {
        self.comments.apply(ticket, result)
    }

    /// Leave the post; pending results are ignored from now on.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.number = None;
        self.issue = None;
        self.error = None;
        self.loading = false;
        self.pending = None;
        self.scroll = 0;
        self.translation = None;
        self.comments.clear();
    }

    pub fn display(&self) -> DetailDisplay {
        match (&self.number, &self.issue) {
            (None, _) => DetailDisplay::Idle,
            (Some(_), Some(_)) => DetailDisplay::Ready,
            _ if self.loading => DetailDisplay::Loading,
            _ if self.error.is_some() => DetailDisplay::Failed,
            _ => DetailDisplay::NotFound,
        }
    }

    pub fn number(&self) -> Option<u64> {
        self.number
    }

    pub fn issue(&self) -> Option<&Issue> {
        self.issue.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn comments(&self) -> &CommentThread {
        &self.comments
    }

    /// The post date as shown in the header.
    pub fn formatted_date(&self) -> Option<String> {
        self.issue.as_ref().map(|i| format::long_date(&i.created_at))
    }

    /// The body to render, translated when a target is selected.
    pub fn body(&self) -> Option<String> {
        let issue = self.issue.as_ref()?;
        let body = issue.body_text();
        Some(match self.translation {
            Some(code) => self.translator.translate(body, code),
            None => body.to_string(),
        })
    }

    /// Current translation target, `None` for the original text.
    pub fn translation(&self) -> Option<&'static str> {
        self.translation
    }

    /// Step to the next translation target, wrapping back to the original.
    pub fn cycle_translation(&mut self) {
        self.translation = next_target(self.translation);
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn scroll_down(&mut self, lines: u16, max: u16) {
        self.scroll = self.scroll.saturating_add(lines).min(max);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }
}
