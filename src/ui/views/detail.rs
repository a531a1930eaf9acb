//! Post detail view: header, translated body and the comment thread.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
    Frame,
};

use super::ViewContext;
use crate::api::{Comment, Issue};
use crate::posts::{format, CommentsDisplay, DetailDisplay, PostDetail};
use crate::ui::markdown;

/// Actions that can be returned from the detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailAction {
    /// Go to the previous route.
    Back,
    /// Go to the post list.
    Home,
    /// Open a URL in the browser.
    OpenUrl(String),
}

/// The post detail view.
///
/// Remembers the height of the last render so scrolling can be clamped to
/// the content.
#[derive(Debug, Default)]
pub struct DetailView {
    content_height: u16,
    visible_height: u16,
}

impl DetailView {
    pub fn new() -> Self {
        Self::default()
    }

    fn max_scroll(&self) -> u16 {
        self.content_height.saturating_sub(self.visible_height)
    }

    pub fn handle_input(&mut self, key: KeyEvent, detail: &mut PostDetail) -> Option<DetailAction> {
        let page = self.visible_height.saturating_sub(2).max(1);
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) | (KeyCode::Backspace, _) | (KeyCode::Char('h'), KeyModifiers::NONE) => {
                Some(DetailAction::Back)
            }
            (KeyCode::Enter, _)
                if matches!(detail.display(), DetailDisplay::Failed | DetailDisplay::NotFound) =>
            {
                Some(DetailAction::Home)
            }
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                detail.scroll_down(1, self.max_scroll());
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                detail.scroll_up(1);
                None
            }
            (KeyCode::Char('d'), KeyModifiers::CONTROL) | (KeyCode::PageDown, _) | (KeyCode::Char(' '), _) => {
                detail.scroll_down(page, self.max_scroll());
                None
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) | (KeyCode::PageUp, _) => {
                detail.scroll_up(page);
                None
            }
            (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => {
                detail.scroll_to_top();
                None
            }
            (KeyCode::Char('G'), _) | (KeyCode::End, _) => {
                detail.scroll_down(u16::MAX, self.max_scroll());
                None
            }
            (KeyCode::Char('T'), _) => {
                if detail.issue().is_some() {
                    detail.cycle_translation();
                }
                None
            }
            (KeyCode::Char('o'), KeyModifiers::NONE) => detail
                .issue()
                .map(|issue| DetailAction::OpenUrl(issue.html_url.clone())),
            _ => None,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, detail: &PostDetail, ctx: &ViewContext) {
        match detail.display() {
            DetailDisplay::Idle => {}
            DetailDisplay::Loading => {
                ctx.spinner
                    .render(frame, area, &ctx.t("posts", "loading"), ctx.palette.muted());
            }
            DetailDisplay::Failed => {
                let mut lines = vec![Line::styled(
                    ctx.t("detail", "errorTitle"),
                    ctx.palette.error().add_modifier(Modifier::BOLD),
                )];
                if let Some(error) = detail.error() {
                    lines.push(Line::styled(error.to_string(), ctx.palette.muted()));
                }
                lines.push(Line::default());
                lines.push(home_hint(ctx));
                render_centered(frame, area, lines);
            }
            DetailDisplay::NotFound => {
                let lines = vec![
                    Line::styled(ctx.t("detail", "notFound"), ctx.palette.title()),
                    Line::default(),
                    home_hint(ctx),
                ];
                render_centered(frame, area, lines);
            }
            DetailDisplay::Ready => self.render_post(frame, area, detail, ctx),
        }
    }

    fn render_post(&mut self, frame: &mut Frame, area: Rect, detail: &PostDetail, ctx: &ViewContext) {
        let Some(issue) = detail.issue() else {
            return;
        };

        let mut lines = header_lines(issue, detail, ctx);
        lines.push(Line::default());
        let body = detail.body().unwrap_or_default();
        lines.extend(markdown_lines(&body, ctx));
        lines.push(Line::default());
        lines.push(Line::styled("─".repeat(usize::from(area.width)), ctx.palette.muted()));
        lines.extend(comment_lines(detail, ctx));

        self.visible_height = area.height;
        self.content_height = wrapped_height(&lines, area.width.saturating_sub(1));

        let scroll = detail.scroll().min(self.max_scroll());
        let paragraph = Paragraph::new(lines)
            .style(ctx.palette.base())
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0));
        let text_area = Rect {
            width: area.width.saturating_sub(1),
            ..area
        };
        frame.render_widget(paragraph, text_area);

        if self.content_height > self.visible_height {
            let mut state = ScrollbarState::new(usize::from(self.max_scroll()))
                .position(usize::from(scroll));
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                area,
                &mut state,
            );
        }
    }
}

fn header_lines(issue: &Issue, detail: &PostDetail, ctx: &ViewContext) -> Vec<Line<'static>> {
    let palette = &ctx.palette;
    let mut lines = vec![
        Line::styled(
            issue.title.clone(),
            palette.title().fg(palette.accent),
        ),
        Line::from(vec![
            Span::styled(detail.formatted_date().unwrap_or_default(), palette.muted()),
            Span::styled(" · ", palette.muted()),
            Span::styled(format!("@{}", issue.author.login), palette.base()),
            Span::styled(" · ", palette.muted()),
            Span::styled("[o] ", palette.accent()),
            Span::styled(ctx.t("detail", "viewOnGithub"), palette.accent()),
        ]),
    ];

    if !issue.labels.is_empty() {
        let spans: Vec<Span> = issue
            .labels
            .iter()
            .flat_map(|label| {
                [
                    Span::styled(format!("[{}]", label.name), Style::default().fg(palette.badge)),
                    Span::raw(" "),
                ]
            })
            .collect();
        lines.push(Line::from(spans));
    }

    let translation = match detail.translation() {
        Some(code) => code.to_uppercase(),
        None => ctx.t("detail", "original"),
    };
    lines.push(Line::from(vec![
        Span::styled("[T] ", palette.accent()),
        Span::styled(
            format!("{}: {}", ctx.t("controls", "translate"), translation),
            palette.muted(),
        ),
    ]));
    lines
}

fn markdown_lines(body: &str, ctx: &ViewContext) -> Vec<Line<'static>> {
    let rendered = markdown::render(body, &ctx.palette);
    let mut lines = rendered.lines;
    if !rendered.links.is_empty() {
        lines.push(Line::default());
        for (i, link) in rendered.links.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("[{}] ", i + 1), ctx.palette.accent()),
                Span::styled(link.clone(), ctx.palette.muted()),
            ]));
        }
    }
    lines
}

fn comment_lines(detail: &PostDetail, ctx: &ViewContext) -> Vec<Line<'static>> {
    let palette = &ctx.palette;
    let thread = detail.comments();
    let mut lines = vec![Line::styled(
        format!("{} ({})", ctx.t("detail", "comments"), thread.comments().len()),
        palette.title(),
    )];
    lines.push(Line::default());

    match thread.display() {
        CommentsDisplay::Loading => {
            lines.push(Line::styled(
                ctx.spinner.text(&ctx.t("posts", "loading")),
                palette.muted(),
            ));
        }
        CommentsDisplay::Failed => {
            lines.push(Line::styled(ctx.t("comments", "error"), palette.error()));
        }
        CommentsDisplay::Empty => {
            lines.push(Line::styled(ctx.t("comments", "none"), palette.base()));
            lines.push(Line::styled(ctx.t("comments", "beFirst"), palette.muted()));
        }
        CommentsDisplay::Ready => {
            for comment in thread.comments() {
                lines.extend(single_comment(comment, ctx));
                lines.push(Line::default());
            }
        }
    }
    lines
}

fn single_comment(comment: &Comment, ctx: &ViewContext) -> Vec<Line<'static>> {
    let palette = &ctx.palette;
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!(" {} ", format::initials(&comment.author.login)),
            Style::default()
                .fg(palette.bg)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(comment.author.login.clone(), palette.title()),
        Span::styled(
            format!(" · {}", format::relative_time(&comment.created_at, &ctx.now)),
            palette.muted(),
        ),
    ])];
    for line in markdown_lines(comment.body_text(), ctx) {
        let mut spans = vec![Span::raw("  ")];
        spans.extend(line.spans);
        lines.push(Line::from(spans));
    }
    lines
}

fn home_hint(ctx: &ViewContext) -> Line<'static> {
    Line::from(vec![
        Span::styled("[Enter] ", ctx.palette.accent()),
        Span::styled(ctx.t("detail", "returnHome"), ctx.palette.base()),
        Span::styled("  [Esc] ", ctx.palette.accent()),
        Span::styled(ctx.t("detail", "back"), ctx.palette.base()),
    ])
}

fn render_centered(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let top = area.height.saturating_sub(lines.len() as u16) / 3;
    let inner = Rect {
        y: area.y + top,
        height: area.height.saturating_sub(top),
        ..area
    };
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}

/// Rows the lines take once wrapped to `width` columns.
fn wrapped_height(lines: &[Line<'_>], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = lines
        .iter()
        .map(|line| line.width().max(1).div_ceil(width))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}
