//! Command line interface.
//!
//! Without a subcommand the TUI starts. `list` and `show` print to stdout
//! for scripting; `auth` manages the stored GitHub token.

use clap::{Args, Parser, Subcommand};

use crate::api::types::IssueState;
use crate::config::Settings;
use crate::i18n::Language;
use crate::router::Route;

#[derive(Debug, Parser)]
#[command(name = "issue-blogger", version, about = "Read a repository's GitHub issues as a blog")]
pub struct Cli {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Path to open in the TUI, e.g. `/post/42`.
    #[arg(long, default_value = "/")]
    pub route: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Overrides for the configured repository and language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct SourceArgs {
    /// Repository owner.
    #[arg(long, global = true)]
    pub owner: Option<String>,

    /// Repository name.
    #[arg(long, global = true)]
    pub repo: Option<String>,

    /// Comma separated labels to filter by.
    #[arg(long, global = true)]
    pub labels: Option<String>,

    /// Interface language (pt or en).
    #[arg(long, global = true)]
    pub language: Option<Language>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print one page of posts.
    List {
        /// Page to print, starting at 1.
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Posts per page (1-100). Defaults to the configured page size.
        #[arg(long)]
        per_page: Option<u32>,

        /// Issue state: open, closed or all.
        #[arg(long, default_value = "open")]
        state: IssueState,
    },

    /// Print a post and its comments.
    Show {
        /// Issue number.
        number: u64,
    },

    /// Write the effective settings to the config file.
    Init,

    /// Manage the GitHub token in the OS keyring.
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum AuthAction {
    /// Store a personal access token.
    Set { token: String },
    /// Remove the stored token.
    Clear,
}

impl Cli {
    /// Apply command line overrides on top of the loaded settings.
    pub fn apply_to(&self, settings: &mut Settings) {
        let source = &self.source;
        if let Some(owner) = &source.owner {
            settings.owner = owner.clone();
        }
        if let Some(repo) = &source.repo {
            settings.repo = repo.clone();
        }
        if let Some(labels) = &source.labels {
            settings.labels = Some(labels.clone());
        }
        if let Some(language) = source.language {
            settings.language = language;
        }
        if let Some(Command::List {
            per_page: Some(per_page),
            ..
        }) = &self.command
        {
            settings.page_size = *per_page;
        }
    }

    /// The route the TUI starts on.
    pub fn start_route(&self) -> Route {
        Route::parse(&self.route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("issue-blogger").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_arguments_starts_tui_at_index() {
        let cli = parse(&[]);
        assert!(cli.command.is_none());
        assert_eq!(cli.start_route(), Route::Index);
        assert_eq!(cli.source, SourceArgs::default());
    }

    #[test]
    fn test_tui_overrides() {
        let cli = parse(&[
            "--owner", "rust-lang", "--repo", "rust", "--labels", "blog", "--language", "en",
            "--route", "/post/12",
        ]);
        let mut settings = Settings::default();
        cli.apply_to(&mut settings);

        assert_eq!(settings.owner, "rust-lang");
        assert_eq!(settings.repo, "rust");
        assert_eq!(settings.labels.as_deref(), Some("blog"));
        assert_eq!(settings.language, Language::En);
        assert_eq!(cli.start_route(), Route::Post(12));
    }

    #[test]
    fn test_bad_route_is_not_found() {
        assert_eq!(parse(&["--route", "/post/abc"]).start_route(), Route::NotFound);
    }

    #[test]
    fn test_list_subcommand() {
        let cli = parse(&["list", "--page", "2", "--per-page", "5", "--owner", "tokio-rs"]);
        assert_eq!(
            cli.command,
            Some(Command::List {
                page: 2,
                per_page: Some(5),
                state: IssueState::Open,
            })
        );
        let mut settings = Settings::default();
        cli.apply_to(&mut settings);
        assert_eq!(settings.page_size, 5);
        assert_eq!(settings.owner, "tokio-rs");
    }

    #[test]
    fn test_list_defaults_to_first_page() {
        let cli = parse(&["list"]);
        assert_eq!(
            cli.command,
            Some(Command::List {
                page: 1,
                per_page: None,
                state: IssueState::Open,
            })
        );
    }

    #[test]
    fn test_list_state() {
        let cli = parse(&["list", "--state", "closed"]);
        assert!(matches!(
            cli.command,
            Some(Command::List {
                state: IssueState::Closed,
                ..
            })
        ));
        assert!(Cli::try_parse_from(["issue-blogger", "list", "--state", "merged"]).is_err());
    }

    #[test]
    fn test_show_init_and_auth_subcommands() {
        assert_eq!(parse(&["show", "42"]).command, Some(Command::Show { number: 42 }));
        assert_eq!(parse(&["init", "--repo", "docs"]).command, Some(Command::Init));
        assert_eq!(
            parse(&["auth", "set", "ghp_x"]).command,
            Some(Command::Auth {
                action: AuthAction::Set {
                    token: "ghp_x".to_string()
                }
            })
        );
        assert_eq!(
            parse(&["auth", "clear"]).command,
            Some(Command::Auth {
                action: AuthAction::Clear
            })
        );
    }

    #[test]
    fn test_rejects_unknown_language() {
        let result = Cli::try_parse_from(["issue-blogger", "--language", "fr"]);
        assert!(result.is_err());
    }
}
