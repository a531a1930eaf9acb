//! Contextual help bar component.
//!
//! Displays context-sensitive keyboard shortcut hints at the bottom of the screen.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::events::{get_context_hints, KeyContext};
use crate::ui::theme::Palette;

/// Render a contextual help bar with hints for the given context.
pub fn render_context_help(frame: &mut Frame, area: Rect, context: KeyContext, palette: &Palette) {
    let hints = get_context_hints(context);

    let spans = parse_hints_to_spans(hints, palette.accent(), palette.muted());
    let paragraph = Paragraph::new(Line::from(spans)).style(palette.base());

    frame.render_widget(paragraph, area);
}

/// Parse hint text into styled spans.
///
/// Bracketed keys get `key_style`; everything else gets `text_style`.
pub(crate) fn parse_hints_to_spans(
    hints: &str,
    key_style: Style,
    text_style: Style,
) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut in_bracket = false;

    for c in hints.chars() {
        match c {
            '[' => {
                if !current.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut current), text_style));
                }
                in_bracket = true;
                current.push(c);
            }
            ']' => {
                current.push(c);
                if in_bracket {
                    spans.push(Span::styled(std::mem::take(&mut current), key_style));
                    in_bracket = false;
                }
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        spans.push(Span::styled(current, text_style));
    }

    spans
}
