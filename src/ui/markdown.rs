//! Markdown to terminal lines.
//!
//! Post and comment bodies are GitHub-flavored markdown. They are rendered
//! into styled ratatui lines for the TUI and into plain text for the print
//! subcommands. Links are collected and shown as numbered references.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use super::theme::Palette;

/// Rendered markdown.
#[derive(Debug, Default)]
pub struct RenderedMarkdown {
    pub lines: Vec<Line<'static>>,
    /// Link targets, referenced in the text as `[1]`, `[2]`, ...
    pub links: Vec<String>,
}

/// Render markdown with the given palette.
pub fn render(input: &str, palette: &Palette) -> RenderedMarkdown {
    let options = Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TABLES
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(input, options);

    let mut state = RenderState::new(*palette);
    for event in parser {
        state.handle(event);
    }

    let links = std::mem::take(&mut state.links);
    RenderedMarkdown {
        lines: state.finish(),
        links,
    }
}

/// Render markdown to plain text, with a link reference list appended.
pub fn to_plain_text(input: &str) -> String {
    let rendered = render(input, &Palette::LIGHT);
    let mut text = rendered
        .lines
        .iter()
        .map(line_text)
        .collect::<Vec<_>>()
        .join("\n");

    if !rendered.links.is_empty() {
        text.push('\n');
        for (i, link) in rendered.links.iter().enumerate() {
            text.push_str(&format!("\n[{}] {}", i + 1, link));
        }
    }
    text
}

/// The unstyled text of a line.
pub fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

struct RenderState {
    palette: Palette,
    lines: Vec<Vec<Span<'static>>>,
    style_stack: Vec<Style>,
    links: Vec<String>,
    active_link: Option<usize>,
    /// One entry per open list: the next item number for ordered lists.
    lists: Vec<Option<u64>>,
    blockquote_depth: usize,
}

impl RenderState {
    fn new(palette: Palette) -> Self {
        Self {
            palette,
            lines: vec![Vec::new()],
            style_stack: vec![Style::default()],
            links: Vec::new(),
            active_link: None,
            lists: Vec::new(),
            blockquote_depth: 0,
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.push_text(text.as_ref()),
            Event::Code(text) => {
                let style = Style::default().fg(self.palette.code);
                self.push_span(Span::styled(format!("`{}`", text), style));
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                self.push_span(Span::styled(html.trim_end().to_string(), self.palette.muted()));
            }
            Event::SoftBreak => self.push_text(" "),
            Event::HardBreak => self.new_line(),
            Event::Rule => {
                self.ensure_blank_line();
                self.push_span(Span::styled("─".repeat(40), self.palette.muted()));
                self.new_line();
            }
            Event::TaskListMarker(checked) => {
                self.push_text(if checked { "[x] " } else { "[ ] " });
            }
            _ => {}
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.ensure_blank_line();
                let style = self.heading_style(level);
                self.style_stack.push(style);
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::BlockQuote(_) => {
                self.ensure_blank_line();
                self.blockquote_depth += 1;
                self.push_span(Span::styled("│ ", self.palette.muted()));
                self.push_style(self.palette.muted());
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.ensure_blank_line();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                if self.last_line_has_content() {
                    self.new_line();
                }
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{}. ", n);
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.push_text(&format!("{}{}", indent, marker));
            }
            Tag::CodeBlock(_) => {
                self.ensure_blank_line();
                self.push_style(Style::default().fg(self.palette.code));
            }
            Tag::Link { dest_url, .. } | Tag::Image { dest_url, .. } => {
                self.links.push(dest_url.to_string());
                self.active_link = Some(self.links.len());
                self.push_style(
                    Style::default()
                        .fg(self.palette.accent)
                        .add_modifier(Modifier::UNDERLINED),
                );
            }
            Tag::Paragraph => {
                if self.lists.is_empty() {
                    self.ensure_blank_line();
                }
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                self.pop_style();
                self.new_line();
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::BlockQuote(_) => {
                self.pop_style();
                self.blockquote_depth = self.blockquote_depth.saturating_sub(1);
                self.new_line();
            }
            TagEnd::List(_) => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.new_line();
                }
            }
            TagEnd::CodeBlock => {
                self.pop_style();
                self.trim_trailing_empty();
                self.new_line();
            }
            TagEnd::Link | TagEnd::Image => {
                self.pop_style();
                if let Some(index) = self.active_link.take() {
                    self.push_span(Span::styled(format!("[{}]", index), self.palette.accent()));
                }
            }
            TagEnd::Paragraph => {
                if self.lists.is_empty() {
                    self.new_line();
                }
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.trim_trailing_empty();
        self.lines.into_iter().map(Line::from).collect()
    }

    fn trim_trailing_empty(&mut self) {
        while self.lines.len() > 1 && self.lines.last().is_some_and(|l| is_blank(l)) {
            self.lines.pop();
        }
    }

    fn last_line_has_content(&self) -> bool {
        self.lines.last().is_some_and(|l| !is_blank(l))
    }

    fn ensure_blank_line(&mut self) {
        if self.last_line_has_content() {
            self.new_line();
        }
        if self.lines.len() > 1 && !is_blank(&self.lines[self.lines.len() - 2]) {
            self.new_line();
        }
    }

    fn new_line(&mut self) {
        self.lines.push(Vec::new());
        if self.blockquote_depth > 0 {
            let prefix = "│ ".repeat(self.blockquote_depth);
            self.push_span(Span::styled(prefix, self.palette.muted()));
        }
    }

    fn push_style(&mut self, style: Style) {
        let merged = self.current_style().patch(style);
        self.style_stack.push(merged);
    }

    fn pop_style(&mut self) {
        if self.style_stack.len() > 1 {
            self.style_stack.pop();
        }
    }

    fn current_style(&self) -> Style {
        self.style_stack.last().copied().unwrap_or_default()
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let style = self.current_style();
        // Code blocks arrive as one text event with embedded newlines.
        let mut parts = text.split('\n').peekable();
        while let Some(part) = parts.next() {
            if !part.is_empty() {
                self.push_span(Span::styled(part.to_string(), style));
            }
            if parts.peek().is_some() {
                self.new_line();
            }
        }
    }

    fn push_span(&mut self, span: Span<'static>) {
        match self.lines.last_mut() {
            Some(line) => line.push(span),
            None => self.lines.push(vec![span]),
        }
    }

    fn heading_style(&self, level: HeadingLevel) -> Style {
        let style = Style::default().add_modifier(Modifier::BOLD);
        match level {
            HeadingLevel::H1 | HeadingLevel::H2 => style.fg(self.palette.accent),
            _ => style.fg(self.palette.fg),
        }
    }
}

/// A line with nothing but blockquote bars on it.
fn is_blank(line: &[Span<'_>]) -> bool {
    line.iter()
        .all(|s| s.content.chars().all(|c| c == '│' || c == ' '))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(markdown: &str) -> String {
        render(markdown, &Palette::DARK)
            .lines
            .iter()
            .map(line_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_heading_and_list() {
        let text = text_of("# Title\n\n- one\n- two");
        assert!(text.contains("Title"));
        assert!(text.contains("• one"));
        assert!(text.contains("• two"));
    }

    #[test]
    fn test_ordered_list_numbers() {
        let text = text_of("3. three\n4. four");
        assert!(text.contains("3. three"));
        assert!(text.contains("4. four"));
    }

    #[test]
    fn test_links_are_numbered() {
        let rendered = render("See [docs](https://example.com) and [blog](https://b.io)", &Palette::LIGHT);
        assert_eq!(rendered.links, vec!["https://example.com", "https://b.io"]);
        let text = line_text(&rendered.lines[0]);
        assert!(text.contains("docs[1]"));
        assert!(text.contains("blog[2]"));
    }

    #[test]
    fn test_code_block_keeps_lines() {
        let text = text_of("```rust\nfn main() {}\nlet x = 1;\n```");
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines.contains(&"fn main() {}"));
        assert!(lines.contains(&"let x = 1;"));
    }

    #[test]
    fn test_blockquote_is_prefixed() {
        let text = text_of("> quoted");
        assert_eq!(text, "│ quoted");
    }

    #[test]
    fn test_empty_input() {
        let rendered = render("", &Palette::LIGHT);
        assert_eq!(rendered.lines.len(), 1);
        assert!(rendered.links.is_empty());
    }

    #[test]
    fn test_plain_text_lists_links() {
        let text = to_plain_text("Read **this** [post](https://x.dev)");
        assert!(text.starts_with("Read this post[1]"));
        assert!(text.ends_with("[1] https://x.dev"));
    }
}
