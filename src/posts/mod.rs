//! View state for the blog: the post list and the post detail.
//!
//! The controllers here are plain state machines. They hand out requests,
//! and the app runs those through [`crate::tasks`] and feeds the results back.

pub mod comments;
pub mod detail;
pub mod format;
pub mod list;
pub mod translate;

pub use comments::{CommentTicket, CommentsDisplay};
pub use detail::{DetailDisplay, DetailTicket, PostDetail};
pub use list::{ListDisplay, ListRequest, ListTicket, PostFilter, PostList, DEFAULT_PAGE_SIZE};
pub use translate::{MockTranslator, Translator};
