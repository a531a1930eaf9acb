//! Issue Blogger - read a GitHub repository's issues as a blog.
//!
//! Without a subcommand this starts the TUI. `list` and `show` print the
//! same content as plain text.

mod api;
mod app;
mod cli;
mod config;
mod error;
mod events;
mod i18n;
mod logging;
mod posts;
mod prefs;
mod print;
mod router;
mod storage;
mod tasks;
mod ui;

use std::io::{self, Stdout};
use std::sync::Arc;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info, warn};

use crate::api::{auth, notice_channel, GitHubClient, IssueGateway, IssueQuery, NoticeReceiver};
use crate::app::{App, Effect};
use crate::cli::{AuthAction, Cli, Command};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::events::EventHandler;
use crate::posts::{MockTranslator, PostFilter};
use crate::prefs::{system_theme, Preferences};
use crate::storage::{FileStorage, MemoryStorage, Storage};
use crate::tasks::{create_task_channel, TaskSpawner};
use crate::ui::Notice;

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let result = run(cli).await;
    logging::shutdown();

    if let Err(e) = result {
        error!("Fatal error: {}", e);
        eprintln!("Error: {}", e.user_message());
        if let Some(action) = e.suggested_action() {
            eprintln!("{}", action);
        }
        if let Ok(dir) = logging::log_directory() {
            eprintln!("Logs: {}", dir.display());
        }
        std::process::exit(1);
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    if let Some(Command::Auth { action }) = &cli.command {
        return run_auth(action);
    }

    let mut config = Config::load()?;
    cli.apply_to(&mut config.settings);
    config.validate()?;

    if let Some(Command::Init) = &cli.command {
        config.save()?;
        println!("Wrote {}", Config::config_path()?.display());
        return Ok(());
    }

    let token = auth::resolve_token();
    match &token {
        Some(token) => info!(source = ?token.source(), "Using GitHub token"),
        None => info!("No GitHub token, requests are anonymous"),
    }
    let client = GitHubClient::new(&config.settings.api_base_url, token)?;
    let (notice_tx, notices) = notice_channel();
    let gateway = IssueGateway::new(Arc::new(client), notice_tx);
    let settings = &config.settings;

    match &cli.command {
        Some(Command::List { page, state, .. }) => {
            let query = IssueQuery::new(config.repo_ref(), *page, settings.page_size)
                .with_labels(settings.labels.clone())
                .with_state(*state);
            let output = print::list_page(&gateway, &query, settings.language).await;
            print!("{}", output);
            report_notices(notices);
            Ok(())
        }
        Some(Command::Show { number }) => {
            let output = print::show_post(&gateway, &config.repo_ref(), *number, settings.language).await;
            print!("{}", output);
            report_notices(notices);
            Ok(())
        }
        _ => run_tui(&cli, &config, gateway, notices),
    }
}

fn run_auth(action: &AuthAction) -> Result<()> {
    match action {
        AuthAction::Set { token } => {
            auth::store_token(token)?;
            println!("Token stored in the system keyring.");
        }
        AuthAction::Clear => {
            auth::delete_token()?;
            println!("Token removed from the system keyring.");
        }
    }
    Ok(())
}

/// Print gateway warnings collected during a CLI read.
fn report_notices(mut notices: NoticeReceiver) {
    while let Ok(notice) = notices.try_recv() {
        eprintln!("{}", notice);
    }
}

fn open_storage() -> Box<dyn Storage> {
    match FileStorage::open_default() {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            warn!("Preferences will not persist: {}", e);
            Box::new(MemoryStorage::new())
        }
    }
}

fn run_tui(cli: &Cli, config: &Config, gateway: IssueGateway, notices: NoticeReceiver) -> Result<()> {
    let settings = &config.settings;
    let prefs = Preferences::load(open_storage(), settings.language, system_theme());
    let filter = PostFilter::new(config.repo_ref(), settings.labels.as_deref());
    let (rx, spawner) = create_task_channel(gateway);
    let mut app = App::new(
        prefs,
        filter,
        settings.page_size,
        Arc::new(MockTranslator),
        cli.start_route(),
    );
    let events = EventHandler::with_tick_rate(settings.tick_rate_ms);

    info!(route = %app.route(), "Starting TUI");
    let mut guard = TerminalGuard::init()?;
    run_loop(guard.terminal_mut(), &mut app, &events, &spawner, rx, notices)
}

fn run_loop(
    terminal: &mut Tui,
    app: &mut App,
    events: &EventHandler,
    spawner: &TaskSpawner,
    mut rx: tokio::sync::mpsc::UnboundedReceiver<tasks::ApiMessage>,
    mut notices: NoticeReceiver,
) -> Result<()> {
    loop {
        for effect in app.take_effects() {
            dispatch(effect, app, spawner);
        }

        terminal
            .draw(|frame| app.view(frame))
            .map_err(|e| AppError::terminal(e.to_string()))?;

        let event = events.next()?;
        app.update(event);

        while let Ok(message) = rx.try_recv() {
            app.handle_message(message);
        }
        while let Ok(notice) = notices.try_recv() {
            app.notify(notice);
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}

fn dispatch(effect: Effect, app: &mut App, spawner: &TaskSpawner) {
    match effect {
        Effect::FetchPosts(request) => spawner.spawn_fetch_posts(request),
        Effect::FetchPost { repo, ticket } => spawner.spawn_fetch_post(repo, ticket),
        Effect::FetchComments { repo, ticket } => spawner.spawn_fetch_comments(repo, ticket),
        Effect::OpenUrl(url) => {
            if let Err(e) = open::that(&url) {
                warn!(url = %url, "Failed to open browser: {}", e);
                app.notify(Notice::error(format!("Could not open {}", url)));
            }
        }
    }
}

/// Raw mode and the alternate screen for the lifetime of the TUI.
struct TerminalGuard {
    terminal: Tui,
}

impl TerminalGuard {
    fn init() -> Result<Self> {
        enable_raw_mode().map_err(|e| AppError::terminal(e.to_string()))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }

    fn terminal_mut(&mut self) -> &mut Tui {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}
