use serde::{Deserialize, Serialize};

/// A complete named color scheme: the sixteen ANSI slots plus foreground,
/// background and cursor color, each as a `#rrggbb` string. Selecting a theme
/// replaces the whole persisted record; there are no merge semantics.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub name: String,
    pub black: String,
    pub red: String,
    pub green: String,
    pub yellow: String,
    pub blue: String,
    pub purple: String,
    pub cyan: String,
    pub white: String,
    pub bright_black: String,
    pub bright_red: String,
    pub bright_green: String,
    pub bright_yellow: String,
    pub bright_blue: String,
    pub bright_purple: String,
    pub bright_cyan: String,
    pub bright_white: String,
    pub foreground: String,
    pub background: String,
    pub cursor_color: String,
}

/// Case-insensitive substring match over theme names, first hit wins.
pub fn find_theme<'a>(themes: &'a [Theme], query: &str) -> Option<&'a Theme> {
    let query = query.to_lowercase();
    themes
        .iter()
        .find(|theme| theme.name.to_lowercase().contains(&query))
}

pub fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let digits = value.strip_prefix('#').unwrap_or(value);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}

fn theme(
    name: &str,
    ansi: [&str; 16],
    foreground: &str,
    background: &str,
    cursor_color: &str,
) -> Theme {
    Theme {
        name: name.to_string(),
        black: ansi[0].to_string(),
        red: ansi[1].to_string(),
        green: ansi[2].to_string(),
        yellow: ansi[3].to_string(),
        blue: ansi[4].to_string(),
        purple: ansi[5].to_string(),
        cyan: ansi[6].to_string(),
        white: ansi[7].to_string(),
        bright_black: ansi[8].to_string(),
        bright_red: ansi[9].to_string(),
        bright_green: ansi[10].to_string(),
        bright_yellow: ansi[11].to_string(),
        bright_blue: ansi[12].to_string(),
        bright_purple: ansi[13].to_string(),
        bright_cyan: ansi[14].to_string(),
        bright_white: ansi[15].to_string(),
        foreground: foreground.to_string(),
        background: background.to_string(),
        cursor_color: cursor_color.to_string(),
    }
}

/// The shipped theme table. The first entry is the default scheme applied
/// when nothing is persisted or the persisted record fails to parse.
pub fn builtin_themes() -> Vec<Theme> {
    vec![
        theme(
            "gruvbox-dark",
            [
                "#282828", "#cc241d", "#98971a", "#d79921", "#458588", "#b16286", "#689d6a",
                "#a89984", "#928374", "#fb4934", "#b8bb26", "#fabd2f", "#83a598", "#d3869b",
                "#8ec07c", "#ebdbb2",
            ],
            "#ebdbb2",
            "#282828",
            "#b8bb26",
        ),
        theme(
            "synthwave",
            [
                "#262335", "#fe4450", "#72f1b8", "#fede5d", "#03edf9", "#ff7edb", "#03edf9",
                "#ffffff", "#495495", "#fe4450", "#72f1b8", "#f3e70f", "#03edf9", "#ff7edb",
                "#03edf9", "#ffffff",
            ],
            "#ffffff",
            "#262335",
            "#03edf9",
        ),
        theme(
            "nord",
            [
                "#3b4252", "#bf616a", "#a3be8c", "#ebcb8b", "#81a1c1", "#b48ead", "#88c0d0",
                "#e5e9f0", "#4c566a", "#bf616a", "#a3be8c", "#ebcb8b", "#81a1c1", "#b48ead",
                "#8fbcbb", "#eceff4",
            ],
            "#d8dee9",
            "#2e3440",
            "#d8dee9",
        ),
        theme(
            "dracula",
            [
                "#21222c", "#ff5555", "#50fa7b", "#f1fa8c", "#bd93f9", "#ff79c6", "#8be9fd",
                "#f8f8f2", "#6272a4", "#ff6e6e", "#69ff94", "#ffffa5", "#d6acff", "#ff92df",
                "#a4ffff", "#ffffff",
            ],
            "#f8f8f2",
            "#282a36",
            "#f8f8f2",
        ),
        theme(
            "solarized-dark",
            [
                "#073642", "#dc322f", "#859900", "#b58900", "#268bd2", "#d33682", "#2aa198",
                "#eee8d5", "#586e75", "#cb4b16", "#859900", "#657b83", "#839496", "#6c71c4",
                "#93a1a1", "#fdf6e3",
            ],
            "#839496",
            "#002b36",
            "#839496",
        ),
        theme(
            "matrix",
            [
                "#0d0208", "#008f11", "#00ff41", "#00ff41", "#003b00", "#008f11", "#00ff41",
                "#00ff41", "#003b00", "#008f11", "#00ff41", "#00ff41", "#008f11", "#008f11",
                "#00ff41", "#e8ffe8",
            ],
            "#00ff41",
            "#0d0208",
            "#00ff41",
        ),
    ]
}

pub fn default_theme() -> Theme {
    builtin_themes()
        .into_iter()
        .next()
        .unwrap_or_else(|| theme("fallback", ["#000000"; 16], "#ffffff", "#000000", "#ffffff"))
}
