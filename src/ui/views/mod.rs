//! Application views (screens).

mod detail;
mod help;
mod list;
mod not_found;

use chrono::{DateTime, Utc};

pub use detail::{DetailAction, DetailView};
pub use help::{HelpAction, HelpView};
pub use list::{ListAction, ListView};
pub use not_found::{handle_not_found_input, render_not_found, NotFoundAction};

use crate::prefs::Preferences;
use crate::ui::components::LoadingIndicator;
use crate::ui::theme::Palette;

/// Everything a view needs besides its own state.
pub struct ViewContext<'a> {
    pub prefs: &'a Preferences,
    pub palette: Palette,
    pub spinner: &'a LoadingIndicator,
    /// Reference point for relative dates.
    pub now: DateTime<Utc>,
}

impl ViewContext<'_> {
    pub fn t(&self, section: &str, key: &str) -> String {
        self.prefs.t(section, key)
    }
}
