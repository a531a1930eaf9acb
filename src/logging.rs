//! Tracing setup.
//!
//! The TUI owns stdout, so everything is written to a daily-rotated file
//! under the local data directory. `RUST_LOG` overrides the default filter,
//! e.g. `RUST_LOG=issue_blogger=debug` to see every request.

use std::path::PathBuf;

use anyhow::Context;
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

const DEFAULT_FILTER: &str = "issue_blogger=info,warn";

const LOG_FILE_PREFIX: &str = "issue-blogger.log";

/// Install the global subscriber.
///
/// Fails when the log directory cannot be created or a subscriber is
/// already installed; the caller carries on without logs.
pub fn init() -> anyhow::Result<()> {
    let dir = log_directory()?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let file_layer = fmt::layer()
        .with_writer(RollingFileAppender::new(Rotation::DAILY, &dir, LOG_FILE_PREFIX))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()?;

    info!(version = env!("CARGO_PKG_VERSION"), dir = %dir.display(), "Issue Blogger starting");
    Ok(())
}

/// `<local data dir>/issue-blogger/logs`, e.g. `~/.local/share/issue-blogger/logs` on Linux.
pub fn log_directory() -> anyhow::Result<PathBuf> {
    let base = dirs::data_local_dir().context("no local data directory on this system")?;
    Ok(base.join("issue-blogger").join("logs"))
}

pub fn shutdown() {
    info!("Issue Blogger shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directory_layout() {
        let dir = log_directory().unwrap();
        assert!(dir.ends_with("issue-blogger/logs"));
    }
}
