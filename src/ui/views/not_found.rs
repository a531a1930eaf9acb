//! The page shown for routes that match nothing.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::ViewContext;

/// Actions that can be returned from the not-found page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundAction {
    Home,
}

/// Enter, Esc or Backspace go back to the post list.
pub fn handle_not_found_input(key: KeyEvent) -> Option<NotFoundAction> {
    match key.code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Backspace => Some(NotFoundAction::Home),
        _ => None,
    }
}

pub fn render_not_found(frame: &mut Frame, area: Rect, path: &str, ctx: &ViewContext) {
    let lines = vec![
        Line::styled("404", ctx.palette.title().fg(ctx.palette.accent)),
        Line::styled(ctx.t("notFound", "title"), ctx.palette.title()),
        Line::styled(ctx.t("notFound", "message"), ctx.palette.muted()),
        Line::styled(path.to_string(), ctx.palette.muted()),
        Line::default(),
        Line::from(vec![
            Span::styled("[Enter] ", ctx.palette.accent()),
            Span::styled(ctx.t("detail", "returnHome"), ctx.palette.base()),
        ]),
    ];

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
