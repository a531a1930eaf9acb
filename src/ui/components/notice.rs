//! Transient notices drawn in the bottom-right corner.
//!
//! The gateway sends a [`Notice`] for every failed read. The app drains the
//! channel into a [`NoticeStack`] and expires entries on tick.

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::ui::theme::Palette;

/// How long a notice stays on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

/// Notices kept at once; older ones are dropped.
const STACK_LIMIT: usize = 3;

const STACK_WIDTH: u16 = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Warning,
    Error,
}

impl NoticeLevel {
    fn marker(&self) -> &'static str {
        match self {
            NoticeLevel::Warning => "!",
            NoticeLevel::Error => "x",
        }
    }

    fn style(&self, palette: &Palette) -> Style {
        match self {
            NoticeLevel::Warning => Style::default().fg(palette.warning),
            NoticeLevel::Error => Style::default().fg(palette.error),
        }
    }
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        })
    }
}

/// One message for the user.
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    shown_at: Instant,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self::at(NoticeLevel::Warning, message, Instant::now())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::at(NoticeLevel::Error, message, Instant::now())
    }

    fn at(level: NoticeLevel, message: impl Into<String>, shown_at: Instant) -> Self {
        Self {
            level,
            message: message.into(),
            shown_at,
        }
    }

    fn expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= NOTICE_TTL
    }
}

/// Printed form, used by the CLI subcommands.
impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)
    }
}

/// The notices currently on screen, oldest first.
#[derive(Debug, Default)]
pub struct NoticeStack {
    notices: VecDeque<Notice>,
}

impl NoticeStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a notice. Repeating the newest one restarts its timer instead
    /// of stacking a duplicate.
    pub fn push(&mut self, notice: Notice) {
        if let Some(last) = self.notices.back_mut() {
            if last.level == notice.level && last.message == notice.message {
                last.shown_at = notice.shown_at;
                return;
            }
        }
        self.notices.push_back(notice);
        if self.notices.len() > STACK_LIMIT {
            self.notices.pop_front();
        }
    }

    pub fn tick(&mut self) {
        self.expire(Instant::now());
    }

    fn expire(&mut self, now: Instant) {
        self.notices.retain(|n| !n.expired_at(now));
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        if self.notices.is_empty() {
            return;
        }

        let width = STACK_WIDTH.min(area.width.saturating_sub(2));
        let text_width = usize::from(width.saturating_sub(4)).max(1);

        let lines: Vec<Line> = self
            .notices
            .iter()
            .map(|notice| {
                let style = notice.level.style(palette);
                Line::from(vec![
                    Span::styled(format!("{} ", notice.level.marker()), style.add_modifier(Modifier::BOLD)),
                    Span::styled(notice.message.as_str(), style),
                ])
            })
            .collect();
        let rows: usize = self
            .notices
            .iter()
            .map(|n| (n.message.chars().count() + 2).div_ceil(text_width))
            .sum();

        let height = (rows as u16 + 2).min(area.height);
        let rect = Rect::new(
            area.x + area.width.saturating_sub(width + 1),
            area.y + area.height.saturating_sub(height + 1),
            width,
            height,
        );

        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .style(palette.base())
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(palette.border(false)),
                ),
            rect,
        );
    }
}
