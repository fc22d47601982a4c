use crate::domain::{Theme, parse_hex_color};
use ratatui::style::Color;

/// Presentation palette re-derived from the persisted theme record whenever
/// it changes: blue user segment, purple path, and the bright ANSI slots for
/// the semantic roles.
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub cursor: Color,
    pub prompt_user: Color,
    pub prompt_path: Color,
    pub success: Color,
    pub warn: Color,
    pub error: Color,
    pub dim: Color,
    pub accent: Color,
}

impl Palette {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            background: color(&theme.background, Color::Black),
            foreground: color(&theme.foreground, Color::White),
            cursor: color(&theme.cursor_color, Color::White),
            prompt_user: color(&theme.bright_blue, Color::Blue),
            prompt_path: color(&theme.bright_purple, Color::Magenta),
            success: color(&theme.bright_green, Color::Green),
            warn: color(&theme.bright_yellow, Color::Yellow),
            error: color(&theme.bright_red, Color::Red),
            dim: color(&theme.bright_black, Color::DarkGray),
            accent: color(&theme.bright_cyan, Color::Cyan),
        }
    }
}

fn color(hex: &str, fallback: Color) -> Color {
    match parse_hex_color(hex) {
        Some((r, g, b)) => Color::Rgb(r, g, b),
        None => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builtin_themes;

    #[test]
    fn builtin_palettes_resolve_to_rgb() {
        for theme in builtin_themes() {
            let palette = Palette::from_theme(&theme);
            assert!(matches!(palette.background, Color::Rgb(..)), "{}", theme.name);
            assert!(matches!(palette.foreground, Color::Rgb(..)), "{}", theme.name);
        }
    }

    #[test]
    fn malformed_colors_fall_back_instead_of_panicking() {
        let mut theme = builtin_themes().remove(0);
        theme.background = "not-a-color".to_string();
        let palette = Palette::from_theme(&theme);
        assert_eq!(palette.background, Color::Black);
    }
}
