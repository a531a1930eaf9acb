//! Loading spinner.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

/// Spinner animation frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// An animated spinner with a message, advanced on every tick.
#[derive(Debug, Clone, Default)]
pub struct LoadingIndicator {
    frame: usize,
}

impl LoadingIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the animation by one frame.
    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % SPINNER_FRAMES.len();
    }

    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.frame % SPINNER_FRAMES.len()]
    }

    /// Spinner followed by `message`, for embedding in other widgets.
    pub fn text(&self, message: &str) -> String {
        format!("{} {}", self.spinner_frame(), message)
    }

    /// Render the spinner and message centered in `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect, message: &str, style: Style) {
        let paragraph = Paragraph::new(self.text(message))
            .style(style)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }
}
