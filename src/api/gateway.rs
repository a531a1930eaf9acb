//! Issue gateway: the failure policy in front of the GitHub reads.
//!
//! Every failed read is logged, reported to the user as a transient warning
//! notice and degraded to an empty or absent result. Nothing is retried; the
//! user retries explicitly from the UI.
//!
//! The `try_*` methods apply the same reporting but still hand the error back,
//! so view-state controllers can tell "no posts" apart from "fetch failed".

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{error, instrument};

use super::error::Result;
use super::types::{Comment, Issue, IssueQuery, RepoRef};
use crate::ui::Notice;

/// Notice shown when the issue listing fails.
pub const LIST_ISSUES_FAILED: &str = "Failed to load issues. Please try again later.";

/// Notice shown when a single issue fails to load.
pub const GET_ISSUE_FAILED: &str = "Failed to load issue. Please try again later.";

/// Notice shown when a comment thread fails to load.
pub const LIST_COMMENTS_FAILED: &str = "Failed to load comments. Please try again later.";

/// The three read operations the blog is built on.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// List one page of issues.
    async fn list_issues(&self, query: &IssueQuery) -> Result<Vec<Issue>>;

    /// Get a single issue.
    async fn get_issue(&self, repo: &RepoRef, number: u64) -> Result<Issue>;

    /// List the comments on an issue.
    async fn list_comments(&self, repo: &RepoRef, number: u64) -> Result<Vec<Comment>>;
}

/// Sender half of the notice channel drained by the UI (or printed in CLI mode).
pub type NoticeSender = mpsc::UnboundedSender<Notice>;

/// Receiver half of the notice channel.
pub type NoticeReceiver = mpsc::UnboundedReceiver<Notice>;

/// Create a notice channel.
pub fn notice_channel() -> (NoticeSender, NoticeReceiver) {
    mpsc::unbounded_channel()
}

/// Read access to issues with uniform failure reporting.
#[derive(Clone)]
pub struct IssueGateway {
    source: Arc<dyn IssueSource>,
    notices: NoticeSender,
}

impl IssueGateway {
    /// Create a gateway over the given source, reporting failures to `notices`.
    pub fn new(source: Arc<dyn IssueSource>, notices: NoticeSender) -> Self {
        Self { source, notices }
    }

    /// List one page of issues; empty on failure.
    pub async fn list_issues(&self, query: &IssueQuery) -> Vec<Issue> {
        self.try_list_issues(query).await.unwrap_or_default()
    }

    /// Get a single issue; `None` on failure.
    pub async fn get_issue(&self, repo: &RepoRef, number: u64) -> Option<Issue> {
        self.try_get_issue(repo, number).await.ok()
    }

    /// List an issue's comments; empty on failure.
    pub async fn list_comments(&self, repo: &RepoRef, number: u64) -> Vec<Comment> {
        self.try_list_comments(repo, number).await.unwrap_or_default()
    }

    /// List one page of issues, reporting and returning any failure.
    #[instrument(skip(self), fields(repo = %query.repo, page = query.page))]
    pub async fn try_list_issues(&self, query: &IssueQuery) -> Result<Vec<Issue>> {
        self.source.list_issues(query).await.map_err(|e| {
            error!("Error fetching issues: {}", e);
            self.notify(LIST_ISSUES_FAILED);
            e
        })
    }

    /// Get a single issue, reporting and returning any failure.
    #[instrument(skip(self))]
    pub async fn try_get_issue(&self, repo: &RepoRef, number: u64) -> Result<Issue> {
        self.source.get_issue(repo, number).await.map_err(|e| {
            error!("Error fetching issue: {}", e);
            self.notify(GET_ISSUE_FAILED);
            e
        })
    }

    /// List an issue's comments, reporting and returning any failure.
    #[instrument(skip(self))]
    pub async fn try_list_comments(&self, repo: &RepoRef, number: u64) -> Result<Vec<Comment>> {
        self.source.list_comments(repo, number).await.map_err(|e| {
            error!("Error fetching comments: {}", e);
            self.notify(LIST_COMMENTS_FAILED);
            e
        })
    }

    fn notify(&self, message: &str) {
        // The receiver is gone only during shutdown.
        let _ = self.notices.send(Notice::warning(message));
    }
}
