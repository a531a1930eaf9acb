//! Async task management for non-blocking API operations.
//!
//! Reads run in background tasks so the UI keeps drawing while they are in
//! flight. Each result comes back as an [`ApiMessage`] carrying the ticket
//! the controller issued for the request; the main loop polls the channel
//! with `try_recv()` and hands the message to the app, which drops results
//! whose ticket is no longer current.

use tokio::sync::mpsc;

use crate::api::{Comment, Issue, IssueGateway, RepoRef};
use crate::posts::{CommentTicket, DetailTicket, ListRequest, ListTicket};

/// Messages sent from background tasks to the main event loop.
#[derive(Debug)]
pub enum ApiMessage {
    /// One page of the post list.
    PostsFetched {
        ticket: ListTicket,
        result: Result<Vec<Issue>, String>,
    },

    /// A single post. `Ok(None)` means the issue does not exist.
    PostFetched {
        ticket: DetailTicket,
        result: Result<Option<Issue>, String>,
    },

    /// The comment thread of a post.
    CommentsFetched {
        ticket: CommentTicket,
        result: Result<Vec<Comment>, String>,
    },
}

/// Spawns background reads against the issue gateway.
#[derive(Clone)]
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<ApiMessage>,
    gateway: IssueGateway,
}

impl TaskSpawner {
    /// Create a new TaskSpawner with the given channel sender.
    pub fn new(tx: mpsc::UnboundedSender<ApiMessage>, gateway: IssueGateway) -> Self {
        Self { tx, gateway }
    }

    /// Spawn a task to fetch one page of posts.
    pub fn spawn_fetch_posts(&self, request: ListRequest) {
        let tx = self.tx.clone();
        let gateway = self.gateway.clone();
        tokio::spawn(async move {
            let result = gateway
                .try_list_issues(&request.query)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(ApiMessage::PostsFetched {
                ticket: request.ticket,
                result,
            });
        });
    }

    /// Spawn a task to fetch a single post.
    pub fn spawn_fetch_post(&self, repo: RepoRef, ticket: DetailTicket) {
        let tx = self.tx.clone();
        let gateway = self.gateway.clone();
        tokio::spawn(async move {
            let result = match gateway.try_get_issue(&repo, ticket.number()).await {
                Ok(issue) => Ok(Some(issue)),
                Err(e) if e.is_not_found() => Ok(None),
                Err(e) => Err(e.to_string()),
            };
            let _ = tx.send(ApiMessage::PostFetched { ticket, result });
        });
    }

    /// Spawn a task to fetch a post's comments.
    pub fn spawn_fetch_comments(&self, repo: RepoRef, ticket: CommentTicket) {
        let tx = self.tx.clone();
        let gateway = self.gateway.clone();
        tokio::spawn(async move {
            let result = gateway
                .try_list_comments(&repo, ticket.number())
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(ApiMessage::CommentsFetched { ticket, result });
        });
    }
}

/// Create a new task channel and spawner.
///
/// Returns a tuple of (receiver, spawner). The receiver should be polled
/// in the main event loop, and the spawner should be used to spawn tasks.
pub fn create_task_channel(
    gateway: IssueGateway,
) -> (mpsc::UnboundedReceiver<ApiMessage>, TaskSpawner) {
    let (tx, rx) = mpsc::unbounded_channel();
    (rx, TaskSpawner::new(tx, gateway))
}
