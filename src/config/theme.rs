use ratatui::style::{Color, Modifier, Style};

use crate::prefs::ThemeMode;

/// Colour palette and the derived styles every component draws with
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub colors: Palette,
    pub notifications: ToastPalette,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub primary: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub muted: Color,
    pub border: Color,
}

/// Foreground/background pairs per toast level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastPalette {
    pub info: (Color, Color),
    pub success: (Color, Color),
    pub warning: (Color, Color),
    pub error: (Color, Color),
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        let background = Color::Rgb(0x1a, 0x1b, 0x26);
        let foreground = Color::Rgb(0xc0, 0xca, 0xf5);
        Self {
            name: "dark",
            colors: Palette {
                background,
                foreground,
                primary: Color::Rgb(0x7a, 0xa2, 0xf7),
                accent: Color::Rgb(0xbb, 0x9a, 0xf7),
                success: Color::Rgb(0x9e, 0xce, 0x6a),
                warning: Color::Rgb(0xe0, 0xaf, 0x68),
                error: Color::Rgb(0xf7, 0x76, 0x8e),
                muted: Color::Rgb(0x56, 0x5f, 0x89),
                border: Color::Rgb(0x3b, 0x42, 0x61),
            },
            notifications: ToastPalette {
                info: (foreground, Color::Rgb(0x24, 0x28, 0x3b)),
                success: (background, Color::Rgb(0x9e, 0xce, 0x6a)),
                warning: (background, Color::Rgb(0xe0, 0xaf, 0x68)),
                error: (foreground, Color::Rgb(0xf7, 0x76, 0x8e)),
            },
        }
    }

    pub fn light() -> Self {
        let background = Color::Rgb(0xf5, 0xf5, 0xf7);
        Self {
            name: "light",
            colors: Palette {
                background,
                foreground: Color::Rgb(0x34, 0x3b, 0x58),
                primary: Color::Rgb(0x34, 0x54, 0x8a),
                accent: Color::Rgb(0x5a, 0x4a, 0x78),
                success: Color::Rgb(0x33, 0x63, 0x5c),
                warning: Color::Rgb(0x8f, 0x5e, 0x15),
                error: Color::Rgb(0x8c, 0x43, 0x51),
                muted: Color::Rgb(0x96, 0x99, 0xa3),
                border: Color::Rgb(0xc4, 0xc8, 0xda),
            },
            notifications: ToastPalette {
                info: (Color::Rgb(0x34, 0x3b, 0x58), Color::Rgb(0xe1, 0xe2, 0xe7)),
                success: (background, Color::Rgb(0x33, 0x63, 0x5c)),
                warning: (background, Color::Rgb(0x8f, 0x5e, 0x15)),
                error: (background, Color::Rgb(0x8c, 0x43, 0x51)),
            },
        }
    }

    /// Palette for a preference mode; a terminal has no system
    /// appearance to follow, so `System` means dark.
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark | ThemeMode::System => Self::dark(),
        }
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.colors.primary).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.colors.border)
        }
    }

    pub fn title_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.colors.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.colors.muted)
        }
    }

    pub fn selection_style(&self) -> Style {
        Style::default().fg(self.colors.background).bg(self.colors.primary)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.colors.foreground)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.colors.muted)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.colors.success)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.colors.warning)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.colors.error)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.colors.accent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ThemeMode::Dark, "dark")]
    #[case(ThemeMode::Light, "light")]
    #[case(ThemeMode::System, "dark")]
    fn test_theme_for_mode(#[case] mode: ThemeMode, #[case] name: &str) {
        assert_eq!(Theme::for_mode(mode).name, name);
    }

    #[test]
    fn test_palettes_differ() {
        assert_ne!(Theme::dark().colors, Theme::light().colors);
        assert_ne!(Theme::dark().notifications, Theme::light().notifications);
    }

    #[test]
    fn test_focus_changes_border_and_title() {
        let theme = Theme::dark();
        assert_eq!(theme.border_style(true).fg, Some(theme.colors.primary));
        assert!(theme.border_style(true).add_modifier.contains(Modifier::BOLD));
        assert_eq!(theme.border_style(false).fg, Some(theme.colors.border));
        assert_eq!(theme.title_style(false).fg, Some(theme.colors.muted));
    }

    #[test]
    fn test_selection_is_readable() {
        let theme = Theme::light();
        let style = theme.selection_style();
        assert_eq!(style.bg, Some(theme.colors.primary));
        assert_ne!(style.fg, style.bg);
    }
}
