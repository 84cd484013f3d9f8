use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

pub const DEFAULT_THEME: &str = "sushi-bar";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub text_correct: String,
    pub text_incorrect: String,
    pub text_incorrect_bg: String,
    pub text_pending: String,
    pub text_cursor_bg: String,
    pub text_cursor_fg: String,
    pub accent: String,
    pub accent_dim: String,
    pub border: String,
    pub border_focused: String,
    pub header_bg: String,
    pub header_fg: String,
    #[serde(default = "default_belt")]
    pub belt: String,
    pub bar_filled: String,
    pub bar_empty: String,
    pub error: String,
    pub warning: String,
    pub success: String,
}

fn default_belt() -> String {
    "#d49b54".to_string()
}

impl Theme {
    /// User themes in `<config_dir>/sushida/themes/` shadow the bundled ones.
    pub fn load(name: &str) -> Option<Self> {
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("sushida")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path) {
                match toml::from_str::<Theme>(&content) {
                    Ok(theme) => return Some(theme),
                    Err(e) => log::warn!("ignoring {}: {e}", user_theme_path.display()),
                }
            }
        }

        let filename = format!("{name}.toml");
        if let Some(file) = ThemeAssets::get(&filename) {
            if let Ok(content) = std::str::from_utf8(file.data.as_ref()) {
                if let Ok(theme) = toml::from_str::<Theme>(content) {
                    return Some(theme);
                }
            }
        }

        None
    }

    pub fn available_themes() -> Vec<String> {
        let mut names: Vec<String> = ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect();
        names.sort();
        names
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load(DEFAULT_THEME).unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#1c1b19".to_string(),
            fg: "#efe6d5".to_string(),
            text_correct: "#4caf50".to_string(),
            text_incorrect: "#f44336".to_string(),
            text_incorrect_bg: "#3b1f1d".to_string(),
            text_pending: "#8a8172".to_string(),
            text_cursor_bg: "#efe6d5".to_string(),
            text_cursor_fg: "#1c1b19".to_string(),
            accent: "#e8a33d".to_string(),
            accent_dim: "#5a4630".to_string(),
            border: "#5a4630".to_string(),
            border_focused: "#e8a33d".to_string(),
            header_bg: "#b2c077".to_string(),
            header_fg: "#333333".to_string(),
            belt: default_belt(),
            bar_filled: "#d32f2f".to_string(),
            bar_empty: "#2b2925".to_string(),
            error: "#f44336".to_string(),
            warning: "#f5c518".to_string(),
            success: "#4caf50".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 && hex.is_ascii() {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::White
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn text_correct(&self) -> Color { Self::parse_color(&self.text_correct) }
    pub fn text_incorrect(&self) -> Color { Self::parse_color(&self.text_incorrect) }
    pub fn text_incorrect_bg(&self) -> Color { Self::parse_color(&self.text_incorrect_bg) }
    pub fn text_pending(&self) -> Color { Self::parse_color(&self.text_pending) }
    pub fn text_cursor_bg(&self) -> Color { Self::parse_color(&self.text_cursor_bg) }
    pub fn text_cursor_fg(&self) -> Color { Self::parse_color(&self.text_cursor_fg) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn accent_dim(&self) -> Color { Self::parse_color(&self.accent_dim) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn border_focused(&self) -> Color { Self::parse_color(&self.border_focused) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn belt(&self) -> Color { Self::parse_color(&self.belt) }
    pub fn bar_filled(&self) -> Color { Self::parse_color(&self.bar_filled) }
    pub fn bar_empty(&self) -> Color { Self::parse_color(&self.bar_empty) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
    pub fn success(&self) -> Color { Self::parse_color(&self.success) }
}
