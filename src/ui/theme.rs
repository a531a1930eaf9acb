//! Color palettes for the light and dark themes.

use ratatui::style::{Color, Modifier, Style};

use crate::prefs::Theme;

/// Colors used by every view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Primary text.
    pub fg: Color,
    /// Screen background.
    pub bg: Color,
    /// Secondary text: dates, authors, placeholders.
    pub muted: Color,
    /// Titles, links and key hints.
    pub accent: Color,
    /// Background of the selected card.
    pub highlight: Color,
    /// Card and panel borders.
    pub border: Color,
    /// Label badges.
    pub badge: Color,
    /// Warning notices.
    pub warning: Color,
    /// Error text.
    pub error: Color,
    /// Inline code and code blocks.
    pub code: Color,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        fg: Color::Rgb(30, 34, 40),
        bg: Color::Rgb(250, 250, 248),
        muted: Color::Rgb(110, 118, 129),
        accent: Color::Rgb(9, 105, 218),
        highlight: Color::Rgb(221, 234, 250),
        border: Color::Rgb(208, 215, 222),
        badge: Color::Rgb(130, 80, 223),
        warning: Color::Rgb(154, 103, 0),
        error: Color::Rgb(207, 34, 46),
        code: Color::Rgb(17, 99, 41),
    };

    pub const DARK: Palette = Palette {
        fg: Color::Rgb(226, 231, 238),
        bg: Color::Rgb(13, 17, 23),
        muted: Color::Rgb(119, 131, 149),
        accent: Color::Rgb(88, 166, 255),
        highlight: Color::Rgb(33, 45, 63),
        border: Color::Rgb(48, 54, 61),
        badge: Color::Rgb(212, 171, 255),
        warning: Color::Rgb(210, 153, 34),
        error: Color::Rgb(248, 81, 73),
        code: Color::Rgb(129, 199, 132),
    };

    /// The palette for a theme.
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::LIGHT,
            Theme::Dark => Self::DARK,
        }
    }

    /// Base style: foreground on background.
    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.fg).add_modifier(Modifier::BOLD)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.border)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_differ_by_theme() {
        assert_eq!(Palette::for_theme(Theme::Light), Palette::LIGHT);
        assert_eq!(Palette::for_theme(Theme::Dark), Palette::DARK);
        assert_ne!(Palette::LIGHT.bg, Palette::DARK.bg);
    }
}
