//! GitHub API client and types.
//!
//! This module provides the read-only interface to the GitHub REST API and
//! the gateway that applies the blog's failure policy on top of it.

pub mod auth;
mod client;
pub mod error;
mod gateway;
pub mod types;

pub use client::{GitHubClient, DEFAULT_API_BASE};
pub use gateway::{notice_channel, IssueGateway, NoticeReceiver};
pub use types::{Comment, Issue, IssueQuery, RepoRef};

#[cfg(test)]
pub(crate) use gateway::testing;
