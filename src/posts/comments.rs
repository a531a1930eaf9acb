//! Comment thread state for the post detail view.

use tracing::debug;

use crate::api::Comment;

/// Identifies one comment thread request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentTicket {
    generation: u64,
    number: u64,
}

impl CommentTicket {
    pub fn number(&self) -> u64 {
        self.number
    }
}

/// What the comment section should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentsDisplay {
    Loading,
    Failed,
    Empty,
    Ready,
}

/// The comments of one issue, loaded independently of the issue itself.
#[derive(Debug, Clone, Default)]
pub struct CommentThread {
    comments: Vec<Comment>,
    loading: bool,
    error: Option<String>,
    generation: u64,
    pending: Option<CommentTicket>,
}

impl CommentThread {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the current thread and start loading the one for `number`.
    pub fn open(&mut self, number: u64) -> CommentTicket {
        self.generation += 1;
        let ticket = CommentTicket {
            generation: self.generation,
            number,
        };
        self.comments.clear();
        self.error = None;
        self.loading = true;
        self.pending = Some(ticket);
        ticket
    }

    /// Apply a fetch result. Returns `false` when the ticket is stale.
    pub fn apply(&mut self, ticket: CommentTicket, result: Result<Vec<Comment>, String>) -> bool {
        if self.pending != Some(ticket) {
            debug!(?ticket, "Dropping stale comment result");
            return false;
        }
        self.pending = None;
        self.loading = false;
        match result {
            Ok(comments) => {
                self.comments = comments;
                self.error = None;
            }
            Err(message) => {
                self.comments.clear();
                self.error = Some(message);
            }
        }
        true
    }

    /// Forget the thread and ignore anything still in flight.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.pending = None;
        self.comments.clear();
        self.error = None;
        self.loading = false;
    }

    pub fn display(&self) -> CommentsDisplay {
        if self.loading {
            CommentsDisplay::Loading
        } else if self.error.is_some() {
            CommentsDisplay::Failed
        } else if self.comments.is_empty() {
            CommentsDisplay::Empty
        } else {
            CommentsDisplay::Ready
        }
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::comment;

    #[test]
    fn test_loading_then_ready() {
        let mut thread = CommentThread::new();
        let ticket = thread.open(5);
        assert_eq!(thread.display(), CommentsDisplay::Loading);

        assert!(thread.apply(ticket, Ok(vec![comment(1, "a"), comment(2, "b")])));
        assert_eq!(thread.display(), CommentsDisplay::Ready);
        assert_eq!(thread.comments()[1].body_text(), "b");
    }

    #[test]
    fn test_empty_and_failed_are_distinct() {
        let mut thread = CommentThread::new();
        let ticket = thread.open(5);
        thread.apply(ticket, Ok(Vec::new()));
        assert_eq!(thread.display(), CommentsDisplay::Empty);

        let ticket = thread.open(5);
        thread.apply(ticket, Err("nope".to_string()));
        assert_eq!(thread.display(), CommentsDisplay::Failed);
        assert_eq!(thread.error.as_deref(), Some("nope"));
    }

    #[test]
    fn test_stale_thread_is_ignored() {
        let mut thread = CommentThread::new();
        let five = thread.open(5);
        let seven = thread.open(7);

        assert!(!thread.apply(five, Ok(vec![comment(1, "on five")])));
        assert!(thread.comments().is_empty());
        assert!(thread.loading);

        assert!(thread.apply(seven, Ok(vec![comment(2, "on seven")])));
        assert_eq!(thread.comments()[0].body_text(), "on seven");
        assert_eq!(seven.number(), 7);
    }

    #[test]
    fn test_clear_ignores_in_flight() {
        let mut thread = CommentThread::new();
        let ticket = thread.open(5);
        thread.clear();
        assert!(!thread.apply(ticket, Ok(vec![comment(1, "late")])));
        assert_eq!(thread.display(), CommentsDisplay::Empty);
    }
}
