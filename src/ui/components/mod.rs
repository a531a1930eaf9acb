//! Reusable UI components.

mod help_bar;
mod input;
mod loading;
mod notice;
mod search_form;

pub use help_bar::render_context_help;
pub use loading::LoadingIndicator;
pub use notice::{Notice, NoticeStack};
pub use search_form::{SearchForm, SearchFormAction};
