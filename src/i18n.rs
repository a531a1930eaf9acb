//! UI label lookup for the two supported languages.
//!
//! Labels live in a static table keyed by section, optional key and
//! language. Lookups never fail: a missing path yields a placeholder naming
//! the path, so a gap in the table shows up on screen instead of crashing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A supported UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Portuguese, the default.
    #[default]
    Pt,
    /// English.
    En,
}

impl Language {
    /// All supported languages.
    #[cfg(test)]
    pub const ALL: [Language; 2] = [Language::Pt, Language::En];

    /// The language code used in lookup paths.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Pt => "pt",
            Language::En => "en",
        }
    }

    /// The other language.
    pub fn toggled(&self) -> Self {
        match self {
            Language::Pt => Language::En,
            Language::En => Language::Pt,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pt" => Ok(Language::Pt),
            "en" => Ok(Language::En),
            other => Err(format!("unsupported language '{}' (expected pt or en)", other)),
        }
    }
}

/// A top-level section of the label table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Header,
    Search,
    Posts,
    Detail,
    Comments,
    Controls,
    NotFound,
    Help,
}

impl Section {
    /// Resolve a section from its table name.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "header" => Section::Header,
            "search" => Section::Search,
            "posts" => Section::Posts,
            "detail" => Section::Detail,
            "comments" => Section::Comments,
            "controls" => Section::Controls,
            "notFound" => Section::NotFound,
            "help" => Section::Help,
            _ => return None,
        })
    }
}

/// The result of a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    /// The path resolved to a label.
    Found(&'static str),
    /// Nothing at this dotted path.
    Missing(String),
}

impl Label {
    /// Whether the lookup resolved.
    #[cfg(test)]
    pub fn is_found(&self) -> bool {
        matches!(self, Label::Found(_))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Found(text) => f.write_str(text),
            Label::Missing(path) => write!(f, "[Missing translation: {}]", path),
        }
    }
}

/// Look up `section.key.language`, or `section.language` when `key` is `None`.
pub fn lookup(language: Language, section: &str, key: Option<&str>) -> Label {
    let found = Section::from_name(section).and_then(|s| entry(s, key, language));
    match found {
        Some(text) => Label::Found(text),
        None => {
            let path = match key {
                Some(key) => format!("{}.{}.{}", section, key, language.code()),
                None => format!("{}.{}", section, language.code()),
            };
            Label::Missing(path)
        }
    }
}

/// Translate a three-level path.
pub fn t(language: Language, section: &str, key: &str) -> String {
    lookup(language, section, Some(key)).to_string()
}

/// Translate a single-string section such as the site title.
pub fn t_section(language: Language, section: &str) -> String {
    lookup(language, section, None).to_string()
}

/// The static label table.
fn entry(section: Section, key: Option<&str>, language: Language) -> Option<&'static str> {
    use Language::{En, Pt};

    let pair: (&'static str, &'static str) = match (section, key) {
        (Section::Header, None) => ("My Personal Blog", "Meu Blog Pessoal"),

        (Section::Search, Some("owner")) => ("Owner (e.g. facebook)", "Proprietário (ex: facebook)"),
        (Section::Search, Some("repo")) => ("Repository (e.g. react)", "Repositório (ex: react)"),
        (Section::Search, Some("labels")) => (
            "Filter by labels (comma separated)",
            "Filtrar por etiquetas (separadas por vírgula)",
        ),
        (Section::Search, Some("button")) => ("Search", "Buscar"),

        (Section::Posts, Some("title")) => ("Blog Posts from", "Posts do Blog de"),
        (Section::Posts, Some("loadMore")) => ("Load More", "Carregar Mais"),
        (Section::Posts, Some("loading")) => ("Loading...", "Carregando..."),
        (Section::Posts, Some("noResults")) => ("No posts found", "Nenhum post encontrado"),
        (Section::Posts, Some("tryAgain")) => ("Try Again", "Tentar Novamente"),
        (Section::Posts, Some("error")) => (
            "Failed to load posts. Please try again later.",
            "Falha ao carregar posts. Por favor, tente novamente mais tarde.",
        ),
        (Section::Posts, Some("noContent")) => ("No content available", "Nenhum conteúdo disponível"),
        (Section::Posts, Some("more")) => ("more", "mais"),

        (Section::Detail, Some("back")) => ("Back", "Voltar"),
        (Section::Detail, Some("comments")) => ("Comments", "Comentários"),
        (Section::Detail, Some("viewOnGithub")) => ("View on GitHub", "Ver no GitHub"),
        (Section::Detail, Some("errorTitle")) => ("Error Loading Post", "Erro ao Carregar Post"),
        (Section::Detail, Some("notFound")) => ("Post not found", "Post não encontrado"),
        (Section::Detail, Some("returnHome")) => ("Return to Home", "Voltar ao Início"),
        (Section::Detail, Some("original")) => ("Original", "Original"),

        (Section::Comments, Some("none")) => ("No Comments Yet", "Nenhum Comentário Ainda"),
        (Section::Comments, Some("beFirst")) => (
            "Be the first to comment on this issue on GitHub.",
            "Seja o primeiro a comentar nesta issue no GitHub.",
        ),
        (Section::Comments, Some("error")) => (
            "Failed to load comments. Please try again later.",
            "Falha ao carregar comentários. Por favor, tente novamente mais tarde.",
        ),

        (Section::Controls, Some("theme")) => ("Theme", "Tema"),
        (Section::Controls, Some("light")) => ("light", "claro"),
        (Section::Controls, Some("dark")) => ("dark", "escuro"),
        (Section::Controls, Some("fontSize")) => ("Font", "Fonte"),
        (Section::Controls, Some("language")) => ("Language", "Idioma"),
        (Section::Controls, Some("translate")) => ("Translate", "Traduzir"),

        (Section::NotFound, Some("title")) => ("Page not found", "Página não encontrada"),
        (Section::NotFound, Some("message")) => (
            "The page you are looking for does not exist.",
            "A página que você procura não existe.",
        ),

        (Section::Help, Some("title")) => ("Keyboard shortcuts", "Atalhos de teclado"),

        _ => return None,
    };

    Some(match language {
        En => pair.0,
        Pt => pair.1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_button_in_both_languages() {
        assert_eq!(t(Language::Pt, "search", "button"), "Buscar");
        assert_eq!(t(Language::En, "search", "button"), "Search");
    }

    #[test]
    fn test_section_level_lookup() {
        assert_eq!(t_section(Language::Pt, "header"), "Meu Blog Pessoal");
        assert_eq!(t_section(Language::En, "header"), "My Personal Blog");
    }

    #[test]
    fn test_missing_section_placeholder_names_path() {
        let text = t(Language::Pt, "nonexistent", "key");
        assert!(text.contains("nonexistent"));
        assert!(text.contains("key"));
        assert_eq!(text, "[Missing translation: nonexistent.key.pt]");
    }

    #[test]
    fn test_missing_key_in_known_section() {
        let label = lookup(Language::En, "posts", Some("bogus"));
        assert!(!label.is_found());
        assert_eq!(label.to_string(), "[Missing translation: posts.bogus.en]");
    }

    #[test]
    fn test_three_level_section_without_key_is_missing() {
        let text = t_section(Language::En, "search");
        assert_eq!(text, "[Missing translation: search.en]");
    }

    #[test]
    fn test_every_seed_label_exists_in_both_languages() {
        let paths = [
            ("search", "owner"),
            ("search", "repo"),
            ("search", "labels"),
            ("search", "button"),
            ("posts", "title"),
            ("posts", "loadMore"),
            ("posts", "loading"),
            ("posts", "noResults"),
            ("posts", "tryAgain"),
            ("posts", "error"),
        ];
        for language in Language::ALL {
            for (section, key) in paths {
                assert!(
                    lookup(language, section, Some(key)).is_found(),
                    "{}.{}.{}",
                    section,
                    key,
                    language
                );
            }
        }
    }

    #[test]
    fn test_language_parse_and_toggle() {
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
        assert!("es".parse::<Language>().is_err());
        assert_eq!(Language::Pt.toggled(), Language::En);
        assert_eq!(Language::default(), Language::Pt);
    }
}
