//! Help overlay listing every keyboard shortcut.
//!
//! Opened with '?' and closed with '?', 'q' or Escape. Scrolls when the
//! terminal is too short to show everything.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

use super::ViewContext;
use crate::events::{get_keybindings_grouped, KeyContext, Keybinding};

/// Actions that can be returned from the help view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpAction {
    Close,
}

/// The help overlay.
pub struct HelpView {
    grouped_bindings: Vec<(KeyContext, Vec<Keybinding>)>,
    scroll: usize,
    total_lines: usize,
    /// Updated on render.
    visible_height: usize,
}

impl HelpView {
    pub fn new() -> Self {
        let grouped_bindings = get_keybindings_grouped();
        // Header and blank line per group, one per binding, a blank after
        // each group, and the footer.
        let total_lines = grouped_bindings
            .iter()
            .map(|(_, bindings)| bindings.len() + 3)
            .sum::<usize>()
            + 1;

        Self {
            grouped_bindings,
            scroll: 0,
            total_lines,
            visible_height: 0,
        }
    }

    pub fn reset_scroll(&mut self) {
        self.scroll = 0;
    }

    fn max_scroll(&self) -> usize {
        self.total_lines.saturating_sub(self.visible_height)
    }

    pub fn handle_input(&mut self, key_event: KeyEvent) -> Option<HelpAction> {
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('?'), _) | (KeyCode::Char('q'), KeyModifiers::NONE) | (KeyCode::Esc, _) => {
                Some(HelpAction::Close)
            }
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.scroll = (self.scroll + 1).min(self.max_scroll());
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            (KeyCode::Char('g'), KeyModifiers::NONE) => {
                self.scroll = 0;
                None
            }
            (KeyCode::Char('G'), _) => {
                self.scroll = self.max_scroll();
                None
            }
            // Swallow everything else while the overlay is open.
            _ => None,
        }
    }

    /// Render centered over `area`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &ViewContext) {
        let width = 64.min(area.width.saturating_sub(4));
        let height = (self.total_lines as u16 + 2).min(area.height.saturating_sub(2));
        let popup = Rect::new(
            area.x + (area.width.saturating_sub(width)) / 2,
            area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        );

        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(format!(" {} ", ctx.prefs.t("help", "title")))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(ctx.palette.border(true))
            .style(ctx.palette.base());

        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        self.visible_height = inner.height as usize;
        self.scroll = self.scroll.min(self.max_scroll());

        let paragraph = Paragraph::new(self.build_content_lines(ctx)).scroll((self.scroll as u16, 0));
        frame.render_widget(paragraph, inner);

        if self.total_lines > self.visible_height {
            let mut state = ScrollbarState::new(self.max_scroll()).position(self.scroll);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                popup,
                &mut state,
            );
        }
    }

    fn build_content_lines(&self, ctx: &ViewContext) -> Vec<Line<'static>> {
        let palette = &ctx.palette;
        let mut lines = Vec::with_capacity(self.total_lines);

        for (context, bindings) in &self.grouped_bindings {
            lines.push(Line::styled(
                format!("── {} ──", context.display()),
                palette.title(),
            ));
            lines.push(Line::default());
            for binding in bindings {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{:>14}", binding.key),
                        Style::default()
                            .fg(palette.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(binding.description, palette.base()),
                ]));
            }
            lines.push(Line::default());
        }

        lines.push(Line::styled("[?/q/Esc]", palette.muted()));
        lines
    }
}

impl Default for HelpView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::i18n::Language;
    use crate::prefs::{Preferences, Theme};
    use crate::storage::MemoryStorage;
    use crate::ui::components::LoadingIndicator;
    use crate::ui::theme::Palette;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_close_keys() {
        let mut view = HelpView::new();
        assert_eq!(view.handle_input(key('?')), Some(HelpAction::Close));
        assert_eq!(view.handle_input(key('q')), Some(HelpAction::Close));
        assert_eq!(
            view.handle_input(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            Some(HelpAction::Close)
        );
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut view = HelpView::new();
        view.visible_height = 10;
        for _ in 0..200 {
            view.handle_input(key('j'));
        }
        assert_eq!(view.scroll, view.max_scroll());
        for _ in 0..200 {
            view.handle_input(key('k'));
        }
        assert_eq!(view.scroll, 0);
    }

    #[test]
    fn test_line_count_matches_content() {
        let prefs = Preferences::load(Box::new(MemoryStorage::new()), Language::En, Theme::Light);
        let spinner = LoadingIndicator::new();
        let ctx = ViewContext {
            prefs: &prefs,
            palette: Palette::LIGHT,
            spinner: &spinner,
            now: Utc::now(),
        };
        let view = HelpView::new();
        assert_eq!(view.build_content_lines(&ctx).len(), view.total_lines);
    }
}
