//! Application settings.

use serde::{Deserialize, Serialize};

use crate::api::types::{DEFAULT_OWNER, DEFAULT_REPO};
use crate::api::DEFAULT_API_BASE;
use crate::i18n::Language;
use crate::posts::DEFAULT_PAGE_SIZE;

/// Largest page size GitHub accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Default UI tick rate in milliseconds.
pub const DEFAULT_TICK_RATE_MS: u64 = 100;

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Repository owner posts are read from.
    pub owner: String,
    /// Repository posts are read from.
    pub repo: String,
    /// Label filter applied on startup, comma separated.
    pub labels: Option<String>,
    /// UI language.
    pub language: Language,
    /// Posts fetched per page.
    pub page_size: u32,
    /// GitHub REST API base URL. Point at a GitHub Enterprise host or a mock server.
    pub api_base_url: String,
    /// How often the UI redraws while idle.
    pub tick_rate_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            owner: DEFAULT_OWNER.to_string(),
            repo: DEFAULT_REPO.to_string(),
            labels: None,
            language: Language::Pt,
            page_size: DEFAULT_PAGE_SIZE,
            api_base_url: DEFAULT_API_BASE.to_string(),
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
        }
    }
}
