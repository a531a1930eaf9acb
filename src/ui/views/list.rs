//! Post list view: one card per post, newest first.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::ViewContext;
use crate::api::Issue;
use crate::posts::{format, ListDisplay, PostList};

/// Rows taken by one card, borders included.
const CARD_HEIGHT: u16 = 6;

/// Actions that can be returned from the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    /// Open the post with this number.
    Open(u64),
    /// Fetch the next page.
    LoadMore,
    /// Reload from page 1.
    Retry,
    /// Focus the search form.
    Search,
}

/// The post list view. Selection lives in [`PostList`]; the view only
/// tracks which card is at the top of the viewport.
#[derive(Debug, Default)]
pub struct ListView {
    offset: usize,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scroll back to the first card, e.g. after the filter changed.
    pub fn reset(&mut self) {
        self.offset = 0;
    }

    pub fn handle_input(&mut self, key: KeyEvent, list: &mut PostList) -> Option<ListAction> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                list.select_next();
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                list.select_previous();
                None
            }
            (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => {
                list.select_first();
                None
            }
            (KeyCode::Char('G'), _) | (KeyCode::End, _) => {
                list.select_last();
                None
            }
            (KeyCode::Enter, _) => list.selected().map(|issue| ListAction::Open(issue.number)),
            (KeyCode::Char('m'), KeyModifiers::NONE) => {
                list.can_load_more().then_some(ListAction::LoadMore)
            }
            (KeyCode::Char('r'), KeyModifiers::NONE) => {
                if list.is_loading() {
                    None
                } else if list.items().is_empty() {
                    Some(ListAction::Retry)
                } else if list.error().is_some() {
                    // A failed later page is retried in place.
                    list.can_load_more().then_some(ListAction::LoadMore)
                } else {
                    Some(ListAction::Retry)
                }
            }
            (KeyCode::Char('/'), KeyModifiers::NONE) => Some(ListAction::Search),
            _ => None,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, list: &PostList, ctx: &ViewContext) {
        let [title_area, body_area] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).areas(area);

        let title = Line::from(vec![
            Span::styled(format!("{} ", ctx.t("posts", "title")), ctx.palette.title()),
            Span::styled(list.filter().repo.to_string(), ctx.palette.accent()),
            Span::styled(
                list.filter()
                    .labels
                    .as_deref()
                    .map(|l| format!("  [{}]", l))
                    .unwrap_or_default(),
                ctx.palette.muted(),
            ),
        ]);
        frame.render_widget(Paragraph::new(title), title_area);

        match list.display() {
            ListDisplay::Loading => {
                ctx.spinner
                    .render(frame, body_area, &ctx.t("posts", "loading"), ctx.palette.muted());
            }
            ListDisplay::Failed => {
                let lines = vec![
                    Line::styled(ctx.t("posts", "error"), ctx.palette.error()),
                    Line::default(),
                    Line::from(vec![
                        Span::styled("[r] ", ctx.palette.accent()),
                        Span::styled(ctx.t("posts", "tryAgain"), ctx.palette.base()),
                    ]),
                ];
                frame.render_widget(
                    Paragraph::new(lines)
                        .alignment(Alignment::Center)
                        .wrap(Wrap { trim: true }),
                    body_area,
                );
            }
            ListDisplay::Empty => {
                frame.render_widget(
                    Paragraph::new(ctx.t("posts", "noResults"))
                        .style(ctx.palette.muted())
                        .alignment(Alignment::Center),
                    body_area,
                );
            }
            ListDisplay::Ready => self.render_cards(frame, body_area, list, ctx),
        }
    }

    fn render_cards(&mut self, frame: &mut Frame, area: Rect, list: &PostList, ctx: &ViewContext) {
        let [cards_area, footer_area] =
            Layout::vertical([Constraint::Min(CARD_HEIGHT), Constraint::Length(1)]).areas(area);

        let visible = usize::from((cards_area.height / CARD_HEIGHT).max(1));
        let selected = list.selected_index();
        if selected < self.offset {
            self.offset = selected;
        } else if selected >= self.offset + visible {
            self.offset = selected + 1 - visible;
        }

        let items = list.items().iter().enumerate().skip(self.offset).take(visible);
        for (row, (index, issue)) in items.enumerate() {
            let y = cards_area.y + row as u16 * CARD_HEIGHT;
            if y + CARD_HEIGHT > cards_area.y + cards_area.height {
                break;
            }
            let card = Rect::new(cards_area.x, y, cards_area.width, CARD_HEIGHT);
            render_card(frame, card, issue, index == selected, ctx);
        }

        let footer = if list.is_loading() {
            Line::styled(ctx.spinner.text(&ctx.t("posts", "loading")), ctx.palette.muted())
        } else if list.error().is_some() {
            Line::from(vec![
                Span::styled(ctx.t("posts", "error"), ctx.palette.error()),
                Span::styled("  [r] ", ctx.palette.accent()),
                Span::styled(ctx.t("posts", "tryAgain"), ctx.palette.base()),
            ])
        } else if list.can_load_more() {
            Line::from(vec![
                Span::styled("[m] ", ctx.palette.accent()),
                Span::styled(ctx.t("posts", "loadMore"), ctx.palette.base()),
            ])
        } else {
            Line::default()
        };
        frame.render_widget(
            Paragraph::new(footer).alignment(Alignment::Center),
            footer_area,
        );
    }
}

fn render_card(frame: &mut Frame, area: Rect, issue: &Issue, selected: bool, ctx: &ViewContext) {
    let palette = &ctx.palette;
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(selected));
    if selected {
        block = block.style(Style::default().bg(palette.highlight));
    }

    let title_style = if selected {
        palette.title().fg(palette.accent)
    } else {
        palette.title()
    };

    let meta = format!(
        "#{} · {} · {} · {} {}",
        issue.number,
        format::relative_time(&issue.created_at, &ctx.now),
        issue.author.login,
        issue.comment_count,
        ctx.t("detail", "comments").to_lowercase(),
    );

    let preview = match format::preview(issue.body_text()) {
        Some(text) => Span::styled(
            text.split_whitespace().collect::<Vec<_>>().join(" "),
            palette.base(),
        ),
        None => Span::styled(
            ctx.t("posts", "noContent"),
            palette.muted().add_modifier(Modifier::ITALIC),
        ),
    };

    let (labels, hidden) = format::card_labels(issue.labels.iter().map(|l| l.name.as_str()));
    let mut label_spans: Vec<Span> = labels
        .into_iter()
        .flat_map(|name| {
            [
                Span::styled(format!("[{}]", name), Style::default().fg(palette.badge)),
                Span::raw(" "),
            ]
        })
        .collect();
    if hidden > 0 {
        label_spans.push(Span::styled(
            format!("+{} {}", hidden, ctx.t("posts", "more")),
            palette.muted(),
        ));
    }

    let lines = vec![
        Line::styled(issue.title.clone(), title_style),
        Line::styled(meta, palette.muted()),
        Line::from(preview),
        Line::from(label_spans),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::api::testing::issue;
    use crate::api::types::Label;
    use crate::i18n::Language;
    use crate::posts::PostFilter;
    use crate::prefs::{Preferences, Theme};
    use crate::storage::MemoryStorage;
    use crate::ui::buffer_to_string;
    use crate::ui::components::LoadingIndicator;
    use crate::ui::theme::Palette;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn loaded(count: u64, page_size: u32) -> PostList {
        let mut list = PostList::new(PostFilter::default(), page_size);
        let request = list.reload();
        let items = (1..=count).rev().map(issue).collect();
        assert!(list.apply(request.ticket, Ok(items)));
        list
    }

    fn draw(list: &PostList, language: Language) -> String {
        let prefs = Preferences::load(Box::new(MemoryStorage::new()), language, Theme::Light);
        let spinner = LoadingIndicator::new();
        let ctx = ViewContext {
            prefs: &prefs,
            palette: Palette::LIGHT,
            spinner: &spinner,
            now: Utc::now(),
        };
        let mut view = ListView::new();
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal
            .draw(|frame| view.render(frame, frame.area(), list, &ctx))
            .unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn test_enter_opens_selected_post() {
        let mut list = loaded(3, 10);
        let mut view = ListView::new();
        view.handle_input(key('j'), &mut list);
        let action = view.handle_input(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), &mut list);
        assert_eq!(action, Some(ListAction::Open(2)));
    }

    #[test]
    fn test_load_more_only_when_available() {
        let mut view = ListView::new();
        let mut full = loaded(10, 10);
        assert_eq!(view.handle_input(key('m'), &mut full), Some(ListAction::LoadMore));

        let mut short = loaded(4, 10);
        assert_eq!(view.handle_input(key('m'), &mut short), None);
    }

    #[test]
    fn test_retry_after_failed_first_page() {
        let mut list = PostList::new(PostFilter::default(), 10);
        let request = list.reload();
        list.apply(request.ticket, Err("boom".to_string()));
        let mut view = ListView::new();
        assert_eq!(view.handle_input(key('r'), &mut list), Some(ListAction::Retry));
    }

    #[test]
    fn test_retry_after_failed_load_more_continues() {
        let mut list = loaded(10, 10);
        let request = list.load_more().unwrap();
        list.apply(request.ticket, Err("boom".to_string()));
        let mut view = ListView::new();
        assert_eq!(view.handle_input(key('r'), &mut list), Some(ListAction::LoadMore));
    }

    #[test]
    fn test_slash_opens_search() {
        let mut list = loaded(1, 10);
        let mut view = ListView::new();
        assert_eq!(view.handle_input(key('/'), &mut list), Some(ListAction::Search));
    }

    #[test]
    fn test_renders_cards_in_portuguese() {
        let output = draw(&loaded(2, 10), Language::Pt);
        assert!(output.contains("Posts do Blog de facebook/react"));
        assert!(output.contains("Post 2"));
        assert!(output.contains("Body of post 2"));
        assert!(output.contains("[blog]"));
        assert!(!output.contains("Carregar Mais"));
    }

    #[test]
    fn test_renders_load_more_when_page_is_full() {
        let output = draw(&loaded(10, 10), Language::En);
        assert!(output.contains("[m] Load More"));
    }

    #[test]
    fn test_renders_empty_and_failed_states() {
        let mut list = PostList::new(PostFilter::default(), 10);
        let request = list.reload();
        list.apply(request.ticket, Ok(Vec::new()));
        assert!(draw(&list, Language::En).contains("No posts found"));

        let request = list.reload();
        list.apply(request.ticket, Err("boom".to_string()));
        let output = draw(&list, Language::En);
        assert!(output.contains("Failed to load posts"));
        assert!(output.contains("Try Again"));
    }

    #[test]
    fn test_card_shows_placeholder_and_hidden_labels() {
        let mut post = issue(1);
        post.body = None;
        post.created_at = Utc::now() - Duration::days(3);
        post.labels = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|name| Label {
                name: name.to_string(),
                color: String::new(),
            })
            .collect();

        let mut list = PostList::new(PostFilter::default(), 10);
        let request = list.reload();
        list.apply(request.ticket, Ok(vec![post]));

        let output = draw(&list, Language::En);
        assert!(output.contains("No content available"));
        assert!(output.contains("+2 more"));
        assert!(output.contains("3 days ago"));
        assert!(!output.contains("[d]"));
    }
}
