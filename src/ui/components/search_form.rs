//! Owner / repository / labels form above the post list.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use super::input::TextInput;
use crate::api::RepoRef;
use crate::posts::PostFilter;
use crate::prefs::Preferences;
use crate::ui::theme::Palette;

/// Which field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    Owner,
    Repo,
    Labels,
}

impl SearchField {
    fn next(self) -> Self {
        match self {
            SearchField::Owner => SearchField::Repo,
            SearchField::Repo => SearchField::Labels,
            SearchField::Labels => SearchField::Owner,
        }
    }

    fn previous(self) -> Self {
        match self {
            SearchField::Owner => SearchField::Labels,
            SearchField::Repo => SearchField::Owner,
            SearchField::Labels => SearchField::Repo,
        }
    }
}

/// Result of a key press in the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFormAction {
    None,
    Submit(PostFilter),
    Cancel,
}

/// Three text fields that produce a [`PostFilter`].
#[derive(Debug, Clone, Default)]
pub struct SearchForm {
    owner: TextInput,
    repo: TextInput,
    labels: TextInput,
    focus: SearchField,
    /// Filter the form was last synced with; blank fields fall back to it.
    current: PostFilter,
}

impl SearchForm {
    pub fn new(filter: &PostFilter) -> Self {
        let mut form = Self::default();
        form.reset(filter);
        form
    }

    /// Refill the fields from `filter` and focus the first one.
    pub fn reset(&mut self, filter: &PostFilter) {
        self.owner.set_value(filter.repo.owner.clone());
        self.repo.set_value(filter.repo.repo.clone());
        self.labels
            .set_value(filter.labels.clone().unwrap_or_default());
        self.focus = SearchField::Owner;
        self.current = filter.clone();
    }

    pub fn focus(&self) -> SearchField {
        self.focus
    }

    /// The filter the fields currently describe.
    pub fn filter(&self) -> PostFilter {
        let owner = non_blank(self.owner.value()).unwrap_or(&self.current.repo.owner);
        let repo = non_blank(self.repo.value()).unwrap_or(&self.current.repo.repo);
        PostFilter::new(RepoRef::new(owner, repo), Some(self.labels.value()))
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> SearchFormAction {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => SearchFormAction::Cancel,
            (KeyCode::Enter, _) => SearchFormAction::Submit(self.filter()),
            (KeyCode::Tab, _) | (KeyCode::Down, _) => {
                self.focus = self.focus.next();
                SearchFormAction::None
            }
            (KeyCode::BackTab, _) | (KeyCode::Up, _) => {
                self.focus = self.focus.previous();
                SearchFormAction::None
            }
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => SearchFormAction::Cancel,
            _ => {
                self.focused_input_mut().handle_input(key);
                SearchFormAction::None
            }
        }
    }

    fn focused_input_mut(&mut self) -> &mut TextInput {
        match self.focus {
            SearchField::Owner => &mut self.owner,
            SearchField::Repo => &mut self.repo,
            SearchField::Labels => &mut self.labels,
        }
    }

    /// Render the three fields side by side. Needs a height of 3.
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        active: bool,
        prefs: &Preferences,
        palette: &Palette,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Percentage(30),
                Constraint::Percentage(40),
            ])
            .split(area);

        let fields = [
            (&self.owner, "owner", SearchField::Owner),
            (&self.repo, "repo", SearchField::Repo),
            (&self.labels, "labels", SearchField::Labels),
        ];
        for ((input, key, field), chunk) in fields.into_iter().zip(chunks.iter()) {
            let placeholder = prefs.t("search", key);
            let label = placeholder
                .split(" (")
                .next()
                .unwrap_or(placeholder.as_str())
                .to_string();
            input.render(
                frame,
                *chunk,
                &label,
                &placeholder,
                active && self.focus == field,
                palette,
            );
        }
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
