//! Global reader preferences: language, font scale and theme.
//!
//! The store is owned by the app and passed by reference into every view.
//! Every mutation goes through a method here so the side effects stay in
//! one place: font-scale changes update the document's base scale, theme
//! changes flip the document's dark flag and are written to storage.

use tracing::{debug, warn};

use crate::i18n::{self, Language};
use crate::storage::Storage;

/// Storage key the theme is persisted under.
pub const THEME_KEY: &str = "theme";

/// Smallest font scale, in percent.
pub const MIN_FONT_SCALE: u16 = 80;

/// Largest font scale, in percent.
pub const MAX_FONT_SCALE: u16 = 150;

/// Default font scale, in percent.
pub const DEFAULT_FONT_SCALE: u16 = 100;

/// Font scale step, in percent.
pub const FONT_SCALE_STEP: u16 = 10;

/// Color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The persisted form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse the persisted form. Anything else is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// The opposite theme.
    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }
}

/// The render root the preferences act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Document {
    /// Global base scale in percent.
    pub base_scale: u16,
    /// Whether the dark palette is active.
    pub dark: bool,
}

impl Document {
    /// Width of the reading column for a terminal `width` columns wide.
    ///
    /// Larger scales give a narrower column, never wider than the terminal.
    pub fn reading_width(&self, width: u16) -> u16 {
        let scaled = u32::from(width) * 100 / u32::from(self.base_scale.max(1));
        (scaled as u16).min(width)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self {
            base_scale: DEFAULT_FONT_SCALE,
            dark: false,
        }
    }
}

/// Language, font scale and theme, plus the storage the theme lives in.
pub struct Preferences {
    language: Language,
    font_scale: u16,
    theme: Theme,
    document: Document,
    storage: Box<dyn Storage>,
}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences")
            .field("language", &self.language)
            .field("font_scale", &self.font_scale)
            .field("theme", &self.theme)
            .field("document", &self.document)
            .finish()
    }
}

impl Preferences {
    /// Load preferences.
    ///
    /// The theme comes from storage when it holds a valid value, otherwise
    /// from `system_theme`. The resolved theme is written back so storage
    /// always matches memory.
    pub fn load(storage: Box<dyn Storage>, language: Language, system_theme: Theme) -> Self {
        let theme = storage
            .get(THEME_KEY)
            .and_then(|value| Theme::parse(&value))
            .unwrap_or(system_theme);

        let mut prefs = Self {
            language,
            font_scale: DEFAULT_FONT_SCALE,
            theme,
            document: Document {
                base_scale: DEFAULT_FONT_SCALE,
                dark: theme.is_dark(),
            },
            storage,
        };
        prefs.persist_theme();
        debug!(?theme, %language, "Loaded preferences");
        prefs
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn font_scale(&self) -> u16 {
        self.font_scale
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Switch the UI language.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Grow the font scale by one step, up to the maximum.
    pub fn increase_font_scale(&mut self) {
        self.set_font_scale(self.font_scale.saturating_add(FONT_SCALE_STEP));
    }

    /// Shrink the font scale by one step, down to the minimum.
    pub fn decrease_font_scale(&mut self) {
        self.set_font_scale(self.font_scale.saturating_sub(FONT_SCALE_STEP));
    }

    /// Back to the default scale.
    pub fn reset_font_scale(&mut self) {
        self.set_font_scale(DEFAULT_FONT_SCALE);
    }

    fn set_font_scale(&mut self, scale: u16) {
        self.font_scale = scale.clamp(MIN_FONT_SCALE, MAX_FONT_SCALE);
        self.document.base_scale = self.font_scale;
    }

    /// Switch between light and dark, persisting the new theme.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.document.dark = self.theme.is_dark();
        self.persist_theme();
    }

    fn persist_theme(&mut self) {
        if let Err(e) = self.storage.set(THEME_KEY, self.theme.as_str()) {
            warn!("Failed to persist theme: {}", e);
        }
    }

    /// Label lookup in the current language.
    pub fn t(&self, section: &str, key: &str) -> String {
        i18n::t(self.language, section, key)
    }

    /// Section-level label lookup in the current language.
    pub fn t_section(&self, section: &str) -> String {
        i18n::t_section(self.language, section)
    }
}

/// The terminal's preferred theme, from the `COLORFGBG` environment variable.
pub fn system_theme() -> Theme {
    theme_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

/// Derive a theme from a `COLORFGBG` value such as `"15;0"`.
///
/// The last field is the background color index; 0-6 and 8 are dark.
pub fn theme_from_colorfgbg(value: Option<&str>) -> Theme {
    let background = value
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());

    match background {
        Some(0..=6) | Some(8) => Theme::Dark,
        _ => Theme::Light,
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;
    use crate::storage::{MemoryStorage, StorageError};
    use std::sync::{Arc, Mutex};

    /// Storage that shares its map with the test so writes can be inspected.
    #[derive(Clone, Default)]
    struct SharedStorage(Arc<Mutex<MemoryStorage>>);

    impl Storage for SharedStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.0.lock().unwrap().get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            self.0.lock().unwrap().set(key, value)
        }
    }

    fn prefs() -> Preferences {
        Preferences::load(Box::new(MemoryStorage::new()), Language::Pt, Theme::Light)
    }

    #[test]
    fn test_font_scale_clamps_high() {
        let mut prefs = prefs();
        for _ in 0..10 {
            prefs.increase_font_scale();
        }
        assert_eq!(prefs.font_scale(), MAX_FONT_SCALE);
        assert_eq!(prefs.document().base_scale, MAX_FONT_SCALE);
    }

    #[test]
    fn test_font_scale_clamps_low() {
        let mut prefs = prefs();
        for _ in 0..10 {
            prefs.decrease_font_scale();
        }
        assert_eq!(prefs.font_scale(), MIN_FONT_SCALE);
    }

    #[test]
    fn test_font_scale_reset() {
        let mut prefs = prefs();
        prefs.increase_font_scale();
        prefs.increase_font_scale();
        assert_eq!(prefs.font_scale(), 120);
        prefs.reset_font_scale();
        assert_eq!(prefs.font_scale(), DEFAULT_FONT_SCALE);
        assert_eq!(prefs.document().base_scale, DEFAULT_FONT_SCALE);
    }

    #[test]
    fn test_toggle_theme_is_involution_and_persisted() {
        let storage = SharedStorage::default();
        let mut prefs =
            Preferences::load(Box::new(storage.clone()), Language::En, Theme::Light);

        assert_eq!(storage.get(THEME_KEY).as_deref(), Some("light"));

        prefs.toggle_theme();
        assert_eq!(prefs.theme(), Theme::Dark);
        assert!(prefs.document().dark);
        assert_eq!(storage.get(THEME_KEY).as_deref(), Some("dark"));

        prefs.toggle_theme();
        assert_eq!(prefs.theme(), Theme::Light);
        assert!(!prefs.document().dark);
        assert_eq!(storage.get(THEME_KEY).as_deref(), Some("light"));
    }

    #[test]
    fn test_persisted_theme_wins_over_system() {
        let storage = MemoryStorage::with_entry(THEME_KEY, "dark");
        let prefs = Preferences::load(Box::new(storage), Language::Pt, Theme::Light);
        assert_eq!(prefs.theme(), Theme::Dark);
    }

    #[test]
    fn test_invalid_persisted_theme_falls_back_to_system() {
        let storage = MemoryStorage::with_entry(THEME_KEY, "sepia");
        let prefs = Preferences::load(Box::new(storage), Language::Pt, Theme::Dark);
        assert_eq!(prefs.theme(), Theme::Dark);
    }

    #[test]
    fn test_font_scale_not_persisted() {
        let storage = SharedStorage::default();
        let mut prefs = Preferences::load(Box::new(storage.clone()), Language::Pt, Theme::Light);
        prefs.increase_font_scale();
        assert_eq!(storage.0.lock().unwrap().get("fontScale"), None);
        assert_eq!(storage.0.lock().unwrap().get("font_scale"), None);
    }

    #[test]
    fn test_set_language_changes_labels() {
        let mut prefs = prefs();
        assert_eq!(prefs.t("search", "button"), "Buscar");
        prefs.set_language(Language::En);
        assert_eq!(prefs.t("search", "button"), "Search");
        assert_eq!(prefs.t_section("header"), "My Personal Blog");
    }

    #[test]
    fn test_reading_width_shrinks_with_scale() {
        let mut doc = Document::default();
        assert_eq!(doc.reading_width(120), 120);
        doc.base_scale = 150;
        assert_eq!(doc.reading_width(120), 80);
        doc.base_scale = 80;
        assert_eq!(doc.reading_width(120), 120);
    }

    #[test]
    fn test_theme_from_colorfgbg() {
        assert_eq!(theme_from_colorfgbg(Some("15;0")), Theme::Dark);
        assert_eq!(theme_from_colorfgbg(Some("0;default;15")), Theme::Light);
        assert_eq!(theme_from_colorfgbg(Some("garbage")), Theme::Light);
        assert_eq!(theme_from_colorfgbg(None), Theme::Light);
    }

    #[test]
    #[serial]
    fn test_system_theme_reads_colorfgbg() {
        std::env::set_var("COLORFGBG", "15;0");
        let dark = system_theme();
        std::env::set_var("COLORFGBG", "0;15");
        let light = system_theme();
        std::env::remove_var("COLORFGBG");

        assert_eq!(dark, Theme::Dark);
        assert_eq!(light, Theme::Light);
    }
}
