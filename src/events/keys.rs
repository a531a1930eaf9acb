//! Key hints for the contextual help bar.

/// Where keyboard focus currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    /// Browsing the post list.
    PostList,
    /// Typing in the owner/repo/labels form.
    SearchForm,
    /// Reading a post.
    PostDetail,
    /// The not-found page.
    NotFound,
    /// The help overlay.
    Help,
}

impl KeyContext {
    /// Heading used in the help overlay.
    pub fn display(&self) -> &'static str {
        match self {
            KeyContext::PostList => "Post list",
            KeyContext::SearchForm => "Search",
            KeyContext::PostDetail => "Post",
            KeyContext::NotFound => "Not found",
            KeyContext::Help => "General",
        }
    }
}

/// One entry of the help overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    pub key: &'static str,
    pub description: &'static str,
}

const fn bind(key: &'static str, description: &'static str) -> Keybinding {
    Keybinding { key, description }
}

/// Every binding, grouped by the context it applies in.
pub fn get_keybindings_grouped() -> Vec<(KeyContext, Vec<Keybinding>)> {
    vec![
        (
            KeyContext::PostList,
            vec![
                bind("j / k", "Select next / previous post"),
                bind("g / G", "First / last post"),
                bind("Enter", "Read the selected post"),
                bind("m", "Load more posts"),
                bind("r", "Try again after a failed load"),
                bind("/", "Change owner, repository or labels"),
            ],
        ),
        (
            KeyContext::SearchForm,
            vec![
                bind("Tab / S-Tab", "Next / previous field"),
                bind("Enter", "Search"),
                bind("Esc", "Cancel"),
            ],
        ),
        (
            KeyContext::PostDetail,
            vec![
                bind("j / k", "Scroll down / up"),
                bind("PgDn / PgUp", "Scroll by a page"),
                bind("g / G", "Top / bottom"),
                bind("T", "Cycle translation"),
                bind("o", "Open the issue on GitHub"),
                bind("Esc", "Back"),
            ],
        ),
        (
            KeyContext::Help,
            vec![
                bind("t", "Toggle light / dark theme"),
                bind("+ / - / 0", "Font size up / down / reset"),
                bind("L", "Switch language (pt / en)"),
                bind("?", "Toggle this help"),
                bind("q / Ctrl-C", "Quit"),
            ],
        ),
    ]
}

/// The one-line hint string for a context. Keys are in brackets.
pub fn get_context_hints(context: KeyContext) -> &'static str {
    match context {
        KeyContext::PostList => {
            "[j/k] navigate  [Enter] open  [m] load more  [r] retry  [/] search  [t] theme  [+/-/0] font  [L] language  [?] help  [q] quit"
        }
        KeyContext::SearchForm => "[Tab] next field  [Enter] search  [Esc] cancel",
        KeyContext::PostDetail => {
            "[j/k] scroll  [g/G] top/bottom  [T] translate  [o] open on GitHub  [Esc] back  [t] theme  [+/-/0] font  [?] help"
        }
        KeyContext::NotFound => "[Enter/Esc] home  [q] quit",
        KeyContext::Help => "[Esc/?] close",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_context_has_hints() {
        for context in [
            KeyContext::PostList,
            KeyContext::SearchForm,
            KeyContext::PostDetail,
            KeyContext::NotFound,
            KeyContext::Help,
        ] {
            assert!(get_context_hints(context).starts_with('['));
        }
    }

    #[test]
    fn test_grouped_bindings_cover_main_contexts() {
        let grouped = get_keybindings_grouped();
        let contexts: Vec<KeyContext> = grouped.iter().map(|(c, _)| *c).collect();
        assert!(contexts.contains(&KeyContext::PostList));
        assert!(contexts.contains(&KeyContext::PostDetail));
        assert!(grouped.iter().all(|(_, b)| !b.is_empty()));
    }
}
