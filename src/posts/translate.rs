//! Post body translation.
//!
//! Translation is a capability behind [`Translator`]. The only shipped
//! implementation is [`MockTranslator`], which marks the text with the target
//! language code and never leaves the process.

/// Languages offered in the detail view, in cycle order.
pub const TRANSLATION_TARGETS: [&str; 5] = ["en", "pt", "es", "fr", "de"];

/// Translates markdown text into a target language.
pub trait Translator: Send + Sync {
    /// Translate `text` into `language` (a lowercase ISO 639-1 code).
    fn translate(&self, text: &str, language: &str) -> String;
}

/// Local stand-in that prefixes the text with `[CODE]`.
///
/// English is the source language of most issues and is returned unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockTranslator;

impl Translator for MockTranslator {
    fn translate(&self, text: &str, language: &str) -> String {
        if language.eq_ignore_ascii_case("en") {
            return text.to_string();
        }
        format!("[{}] {}", language.to_uppercase(), text)
    }
}

/// The target after `current` in [`TRANSLATION_TARGETS`]; `None` wraps back to
/// the original text.
pub fn next_target(current: Option<&str>) -> Option<&'static str> {
    match current {
        None => TRANSLATION_TARGETS.first().copied(),
        Some(code) => {
            let index = TRANSLATION_TARGETS.iter().position(|t| *t == code)?;
            TRANSLATION_TARGETS.get(index + 1).copied()
        }
    }
}
