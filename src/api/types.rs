//! GitHub API data types.
//!
//! Only the fields the blog views need are decoded; everything else in the
//! GitHub payload is ignored by serde.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default repository owner when none is configured.
pub const DEFAULT_OWNER: &str = "facebook";

/// Default repository name when none is configured.
pub const DEFAULT_REPO: &str = "react";

/// An `owner/repo` pair identifying the repository posts are read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    /// The repository owner (user or organization).
    pub owner: String,
    /// The repository name.
    pub repo: String,
}

impl RepoRef {
    /// Create a new repository reference, trimming surrounding whitespace.
    pub fn new(owner: impl AsRef<str>, repo: impl AsRef<str>) -> Self {
        Self {
            owner: owner.as_ref().trim().to_string(),
            repo: repo.as_ref().trim().to_string(),
        }
    }
}

impl Default for RepoRef {
    fn default() -> Self {
        Self::new(DEFAULT_OWNER, DEFAULT_REPO)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// The author of an issue or comment (GitHub's `user` object).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// The GitHub login.
    pub login: String,
    /// URL of the avatar image.
    #[serde(default)]
    pub avatar_url: String,
    /// URL of the user's profile page.
    #[serde(default)]
    pub html_url: String,
}

/// A label attached to an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// The label name.
    pub name: String,
    /// Hex color without the leading `#`.
    #[serde(default)]
    pub color: String,
}

/// A GitHub issue, shown as a blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Globally unique id, stable across list refreshes.
    pub id: u64,
    /// Repository-local number used for routing (`/post/{number}`).
    pub number: u64,
    /// The post title.
    pub title: String,
    /// Markdown body. GitHub sends `null` for empty bodies.
    #[serde(default)]
    pub body: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Link to the issue on github.com.
    pub html_url: String,
    /// The issue author.
    #[serde(rename = "user")]
    pub author: Author,
    /// Labels in the order GitHub returns them.
    #[serde(default)]
    pub labels: Vec<Label>,
    /// Number of comments on the issue.
    #[serde(rename = "comments", default)]
    pub comment_count: u32,
}

impl Issue {
    /// The markdown body, or an empty string when the issue has none.
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }
}

/// A comment on an issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Comment id.
    pub id: u64,
    /// Markdown body.
    #[serde(default)]
    pub body: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// The comment author.
    #[serde(rename = "user")]
    pub author: Author,
}

impl Comment {
    /// The markdown body, or an empty string when the comment has none.
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }
}

/// Trim each comma separated label and drop empty entries.
///
/// `None` when nothing is left, which means "no label filter".
pub fn normalize_labels(raw: &str) -> Option<String> {
    let labels = raw
        .split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(",");
    (!labels.is_empty()).then_some(labels)
}

/// Issue state filter for list requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IssueState {
    #[default]
    Open,
    Closed,
    All,
}

impl IssueState {
    /// The value GitHub expects in the `state` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
            IssueState::All => "all",
        }
    }
}

impl std::str::FromStr for IssueState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(IssueState::Open),
            "closed" => Ok(IssueState::Closed),
            "all" => Ok(IssueState::All),
            other => Err(format!("unknown issue state '{}' (expected open, closed or all)", other)),
        }
    }
}

/// Parameters for one page of the issue listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueQuery {
    /// Repository to list.
    pub repo: RepoRef,
    /// 1-based page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Issue state filter.
    pub state: IssueState,
    /// Comma separated label names, if filtering by label.
    pub labels: Option<String>,
}

impl IssueQuery {
    /// Create a query for open issues without a label filter.
    pub fn new(repo: RepoRef, page: u32, per_page: u32) -> Self {
        Self {
            repo,
            page: page.max(1),
            per_page,
            state: IssueState::Open,
            labels: None,
        }
    }

    /// Set the label filter, normalized with [`normalize_labels`].
    pub fn with_labels(mut self, labels: Option<String>) -> Self {
        self.labels = labels.as_deref().and_then(normalize_labels);
        self
    }

    /// Set the issue state filter.
    pub fn with_state(mut self, state: IssueState) -> Self {
        self.state = state;
        self
    }

    /// Render the query string (without the leading `?`).
    ///
    /// Results are always sorted newest first.
    pub fn query_string(&self) -> String {
        let labels = self
            .labels
            .as_deref()
            .map(|l| format!("&labels={}", urlencoding::encode(l)))
            .unwrap_or_default();
        format!(
            "state={}&page={}&per_page={}{}&sort=created&direction=desc",
            self.state.as_str(),
            self.page,
            self.per_page,
            labels
        )
    }
}
