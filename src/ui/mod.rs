//! User interface components and views.
//!
//! This module contains all TUI rendering logic, including views for different
//! screens and reusable UI components.

pub mod components;
pub mod markdown;
pub mod theme;
pub mod views;

pub use components::{
    render_context_help, LoadingIndicator, Notice, NoticeStack, SearchForm, SearchFormAction,
};
pub use theme::Palette;
pub use views::{
    handle_not_found_input, render_not_found, DetailAction, DetailView, HelpAction, HelpView,
    ListAction, ListView, NotFoundAction, ViewContext,
};

/// Flatten a rendered buffer into text, one line per row, trailing spaces trimmed.
#[cfg(test)]
pub(crate) fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let width = usize::from(buffer.area.width.max(1));
    buffer
        .content
        .chunks(width)
        .map(|row| {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
