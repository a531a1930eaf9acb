//! Main application state and event loop.
//!
//! This module implements The Elm Architecture (TEA) pattern for predictable
//! state management in the TUI application. [`App::update`] handles terminal
//! events, [`App::handle_message`] applies the results of background reads
//! and [`App::view`] draws the current state. Anything that needs I/O is
//! queued as an [`Effect`] for the main loop to run.

use std::sync::Arc;

use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::{debug, info, trace};

use crate::api::RepoRef;
use crate::events::{Event, KeyContext};
use crate::posts::{CommentTicket, DetailTicket, ListRequest, PostDetail, PostFilter, PostList, Translator};
use crate::prefs::{Preferences, Theme};
use crate::router::{History, Route};
use crate::tasks::ApiMessage;
use crate::ui::{
    handle_not_found_input, render_context_help, render_not_found, DetailAction, DetailView,
    HelpAction, HelpView, ListAction, ListView, LoadingIndicator, Notice, NoticeStack,
    NotFoundAction, Palette, SearchForm, SearchFormAction, ViewContext,
};

/// Work the main loop performs on behalf of the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch one page of posts.
    FetchPosts(ListRequest),
    /// Fetch one post.
    FetchPost { repo: RepoRef, ticket: DetailTicket },
    /// Fetch a post's comments.
    FetchComments { repo: RepoRef, ticket: CommentTicket },
    /// Open a URL in the system browser.
    OpenUrl(String),
}

/// Where key presses go on the post list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Content,
    Search,
}

/// The main application struct that holds all state.
pub struct App {
    prefs: Preferences,
    history: History,
    list: PostList,
    list_view: ListView,
    detail: PostDetail,
    detail_view: DetailView,
    search: SearchForm,
    focus: Focus,
    help: HelpView,
    help_visible: bool,
    notices: NoticeStack,
    loading: LoadingIndicator,
    effects: Vec<Effect>,
    should_quit: bool,
}

impl App {
    /// Create the app and queue the initial loads for `start`.
    pub fn new(
        prefs: Preferences,
        filter: PostFilter,
        page_size: u32,
        translator: Arc<dyn Translator>,
        start: Route,
    ) -> Self {
        debug!(route = %start, repo = %filter.repo, "Creating application");
        let search = SearchForm::new(&filter);
        let mut app = Self {
            prefs,
            history: History::new(Route::Index),
            list: PostList::new(filter, page_size),
            list_view: ListView::new(),
            detail: PostDetail::new(translator),
            detail_view: DetailView::new(),
            search,
            focus: Focus::Content,
            help: HelpView::new(),
            help_visible: false,
            notices: NoticeStack::new(),
            loading: LoadingIndicator::new(),
            effects: Vec::new(),
            should_quit: false,
        };

        let request = app.list.reload();
        app.effects.push(Effect::FetchPosts(request));
        if start != Route::Index {
            app.navigate(start);
        }
        app
    }

    /// Drain the queued effects.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn route(&self) -> Route {
        self.history.current()
    }

    #[cfg(test)]
    pub fn focus(&self) -> Focus {
        self.focus
    }

    #[cfg(test)]
    pub fn is_help_visible(&self) -> bool {
        self.help_visible
    }

    #[cfg(test)]
    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    #[cfg(test)]
    pub fn list(&self) -> &PostList {
        &self.list
    }

    #[cfg(test)]
    pub fn detail(&self) -> &PostDetail {
        &self.detail
    }

    #[cfg(test)]
    pub fn notices(&self) -> &NoticeStack {
        &self.notices
    }

    /// Show a toast.
    pub fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Update the application state based on an event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => {
                self.loading.tick();
                self.notices.tick();
            }
        }
    }

    /// Apply the result of a background read. Stale results are dropped by
    /// the controllers.
    pub fn handle_message(&mut self, message: ApiMessage) {
        match message {
            ApiMessage::PostsFetched { ticket, result } => {
                if !self.list.apply(ticket, result) {
                    trace!(page = ticket.page(), "Dropped stale post page");
                }
            }
            ApiMessage::PostFetched { ticket, result } => {
                if !self.detail.apply_issue(ticket, result) {
                    trace!(number = ticket.number(), "Dropped stale post");
                }
            }
            ApiMessage::CommentsFetched { ticket, result } => {
                if !self.detail.apply_comments(ticket, result) {
                    trace!(number = ticket.number(), "Dropped stale comments");
                }
            }
        }
    }

    /// Go to `route`, starting whatever loads it needs.
    pub fn navigate(&mut self, route: Route) {
        debug!(route = %route, "Navigating");
        self.history.push(route);
        self.enter_current_route();
    }

    fn go_back(&mut self) {
        let route = self.history.back();
        debug!(route = %route, "Navigating back");
        self.enter_current_route();
    }

    fn enter_current_route(&mut self) {
        self.focus = Focus::Content;
        match self.history.current() {
            Route::Post(number) => {
                if self.detail.number() == Some(number) && self.detail.issue().is_some() {
                    return;
                }
                let requests = self.detail.open(number);
                let repo = self.list.filter().repo.clone();
                self.effects.push(Effect::FetchPost {
                    repo: repo.clone(),
                    ticket: requests.issue,
                });
                self.effects.push(Effect::FetchComments {
                    repo,
                    ticket: requests.comments,
                });
            }
            Route::Index | Route::NotFound => self.detail.clear(),
        }
    }

    fn context(&self) -> KeyContext {
        if self.help_visible {
            return KeyContext::Help;
        }
        match self.history.current() {
            Route::Index if self.focus == Focus::Search => KeyContext::SearchForm,
            Route::Index => KeyContext::PostList,
            Route::Post(_) => KeyContext::PostDetail,
            Route::NotFound => KeyContext::NotFound,
        }
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key_event.code, key_event.modifiers) {
            self.should_quit = true;
            return;
        }

        if self.help_visible {
            if let Some(HelpAction::Close) = self.help.handle_input(key_event) {
                self.help_visible = false;
            }
            return;
        }

        if self.focus == Focus::Search {
            self.handle_search_key(key_event);
            return;
        }

        if self.handle_global_key(key_event) {
            return;
        }

        match self.history.current() {
            Route::Index => {
                if let Some(action) = self.list_view.handle_input(key_event, &mut self.list) {
                    self.handle_list_action(action);
                }
            }
            Route::Post(_) => {
                if let Some(action) = self.detail_view.handle_input(key_event, &mut self.detail) {
                    self.handle_detail_action(action);
                }
            }
            Route::NotFound => {
                if let Some(NotFoundAction::Home) = handle_not_found_input(key_event) {
                    self.navigate(Route::Index);
                }
            }
        }
    }

    /// Keys that mean the same thing on every screen. Returns true if handled.
    fn handle_global_key(&mut self, key_event: KeyEvent) -> bool {
        let KeyCode::Char(c) = key_event.code else {
            return false;
        };
        if key_event.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return false;
        }

        match c {
            'q' => {
                if matches!(self.history.current(), Route::Post(_)) {
                    self.go_back();
                } else {
                    self.should_quit = true;
                }
            }
            '?' => {
                self.help.reset_scroll();
                self.help_visible = true;
            }
            't' => {
                self.prefs.toggle_theme();
                info!(theme = self.prefs.theme().as_str(), "Theme changed");
            }
            '+' | '=' => self.prefs.increase_font_scale(),
            '-' => self.prefs.decrease_font_scale(),
            '0' => self.prefs.reset_font_scale(),
            'L' => {
                let language = self.prefs.language().toggled();
                self.prefs.set_language(language);
                info!(%language, "Language changed");
            }
            _ => return false,
        }
        true
    }

    fn handle_search_key(&mut self, key_event: KeyEvent) {
        match self.search.handle_key(key_event) {
            SearchFormAction::None => {}
            SearchFormAction::Cancel => {
                self.search.reset(self.list.filter());
                self.focus = Focus::Content;
            }
            SearchFormAction::Submit(filter) => {
                self.focus = Focus::Content;
                if &filter == self.list.filter() {
                    return;
                }
                info!(repo = %filter.repo, labels = ?filter.labels, "Searching posts");
                self.search.reset(&filter);
                self.list_view.reset();
                let request = self.list.set_filter(filter);
                self.effects.push(Effect::FetchPosts(request));
            }
        }
    }

    fn handle_list_action(&mut self, action: ListAction) {
        match action {
            ListAction::Open(number) => self.navigate(Route::Post(number)),
            ListAction::LoadMore => {
                if let Some(request) = self.list.load_more() {
                    self.effects.push(Effect::FetchPosts(request));
                }
            }
            ListAction::Retry => {
                self.list_view.reset();
                let request = self.list.reload();
                self.effects.push(Effect::FetchPosts(request));
            }
            ListAction::Search => {
                self.search.reset(self.list.filter());
                self.focus = Focus::Search;
            }
        }
    }

    fn handle_detail_action(&mut self, action: DetailAction) {
        match action {
            DetailAction::Back => self.go_back(),
            DetailAction::Home => self.navigate(Route::Index),
            DetailAction::OpenUrl(url) => self.effects.push(Effect::OpenUrl(url)),
        }
    }

    /// Render the application UI.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let palette = Palette::for_theme(self.prefs.theme());
        frame.render_widget(Block::default().style(palette.base()), area);

        let [header, content, footer] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_header(frame, header, &palette);

        let width = self.prefs.document().reading_width(content.width);
        let column = Rect {
            x: content.x + (content.width - width) / 2,
            width,
            ..content
        };

        let ctx = ViewContext {
            prefs: &self.prefs,
            palette,
            spinner: &self.loading,
            now: Utc::now(),
        };

        match self.history.current() {
            Route::Index => {
                let [search_area, list_area] =
                    Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).areas(column);
                self.search.render(
                    frame,
                    search_area,
                    self.focus == Focus::Search,
                    &self.prefs,
                    &palette,
                );
                self.list_view.render(frame, list_area, &self.list, &ctx);
            }
            Route::Post(_) => self.detail_view.render(frame, column, &self.detail, &ctx),
            Route::NotFound => {
                render_not_found(frame, column, &self.history.current().path(), &ctx)
            }
        }

        if self.help_visible {
            self.help.render(frame, area, &ctx);
        }

        render_context_help(frame, footer, self.context(), &palette);
        self.notices.render(frame, area, &palette);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let prefs = &self.prefs;
        let theme = match prefs.theme() {
            Theme::Light => prefs.t("controls", "light"),
            Theme::Dark => prefs.t("controls", "dark"),
        };
        let status = format!(
            "{}: {}  {}: {}%  {}: {}",
            prefs.t("controls", "theme"),
            theme,
            prefs.t("controls", "fontSize"),
            prefs.font_scale(),
            prefs.t("controls", "language"),
            prefs.language().code().to_uppercase(),
        );

        let [title_area, status_area] = Layout::horizontal([
            Constraint::Min(10),
            Constraint::Length(status.chars().count() as u16 + 1),
        ])
        .areas(area);

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(palette.border(false));
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!(" {}", prefs.t_section("header")),
                palette.title().fg(palette.accent),
            )))
            .block(block.clone()),
            title_area,
        );
        frame.render_widget(
            Paragraph::new(Line::styled(status, palette.muted())).block(block),
            status_area,
        );
    }
}
