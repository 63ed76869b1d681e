//! Color themes for the test and progress screens.
//!
//! A theme is a TOML file with a `name` and a `[colors]` table of `#rrggbb`
//! (or named) colors. Files in `<config_dir>/typeline/themes/` shadow the
//! bundled set under `assets/themes/`.

use std::fs;
use std::path::PathBuf;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Deserializer};
use tracing::warn;

pub const DEFAULT_THEME: &str = "catppuccin-mocha";

#[derive(Embed)]
#[folder = "assets/themes/"]
struct BundledThemes;

#[derive(Clone, Debug, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: Palette,
}

/// Every color the widgets draw with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Palette {
    #[serde(deserialize_with = "color")]
    pub bg: Color,
    #[serde(deserialize_with = "color")]
    pub fg: Color,
    #[serde(deserialize_with = "color")]
    pub text_correct: Color,
    #[serde(deserialize_with = "color")]
    pub text_incorrect: Color,
    #[serde(deserialize_with = "color")]
    pub text_incorrect_bg: Color,
    #[serde(deserialize_with = "color")]
    pub text_pending: Color,
    #[serde(deserialize_with = "color")]
    pub text_cursor_bg: Color,
    #[serde(deserialize_with = "color")]
    pub text_cursor_fg: Color,
    /// Preview line right after the current one.
    #[serde(deserialize_with = "color")]
    pub queue_near: Color,
    #[serde(deserialize_with = "color")]
    pub queue_far: Color,
    #[serde(deserialize_with = "color")]
    pub accent: Color,
    #[serde(deserialize_with = "color")]
    pub border: Color,
    #[serde(deserialize_with = "color")]
    pub header_bg: Color,
    #[serde(deserialize_with = "color")]
    pub header_fg: Color,
    #[serde(deserialize_with = "color")]
    pub error: Color,
    #[serde(deserialize_with = "color")]
    pub success: Color,
}

fn color<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
    let raw = String::deserialize(deserializer)?;
    raw.parse::<Color>()
        .map_err(|_| serde::de::Error::custom(format!("invalid color {raw:?}")))
}

impl Theme {
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn user_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("typeline").join("themes"))
    }

    /// User theme first, bundled second. A file that fails to parse is
    /// logged and skipped.
    pub fn load(name: &str) -> Option<Self> {
        let file_name = format!("{name}.toml");
        let user = Self::user_dir().and_then(|dir| fs::read_to_string(dir.join(&file_name)).ok());
        let bundled = BundledThemes::get(&file_name)
            .and_then(|file| String::from_utf8(file.data.into_owned()).ok());

        user.into_iter()
            .chain(bundled)
            .find_map(|content| match Self::parse(&content) {
                Ok(theme) => Some(theme),
                Err(err) => {
                    warn!(theme = name, error = %err, "skipping invalid theme file");
                    None
                }
            })
    }

    pub fn bundled_names() -> Vec<String> {
        BundledThemes::iter()
            .filter_map(|file| file.strip_suffix(".toml").map(str::to_string))
            .collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load(DEFAULT_THEME).unwrap_or_else(|| Self {
            name: DEFAULT_THEME.to_string(),
            colors: Palette::default(),
        })
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            bg: Color::Rgb(0x1e, 0x1e, 0x2e),
            fg: Color::Rgb(0xcd, 0xd6, 0xf4),
            text_correct: Color::Rgb(0xa6, 0xe3, 0xa1),
            text_incorrect: Color::Rgb(0xf3, 0x8b, 0xa8),
            text_incorrect_bg: Color::Rgb(0x45, 0x27, 0x3a),
            text_pending: Color::Rgb(0x7f, 0x84, 0x9c),
            text_cursor_bg: Color::Rgb(0xf5, 0xe0, 0xdc),
            text_cursor_fg: Color::Rgb(0x1e, 0x1e, 0x2e),
            queue_near: Color::Rgb(0x6c, 0x70, 0x86),
            queue_far: Color::Rgb(0x45, 0x47, 0x5a),
            accent: Color::Rgb(0x89, 0xb4, 0xfa),
            border: Color::Rgb(0x45, 0x47, 0x5a),
            header_bg: Color::Rgb(0x31, 0x32, 0x44),
            header_fg: Color::Rgb(0xcd, 0xd6, 0xf4),
            error: Color::Rgb(0xf3, 0x8b, 0xa8),
            success: Color::Rgb(0xa6, 0xe3, 0xa1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_themes_parse() {
        let names = Theme::bundled_names();
        assert!(names.contains(&DEFAULT_THEME.to_string()));
        for name in names {
            let theme = Theme::load(&name).unwrap_or_else(|| panic!("theme {name} failed to load"));
            assert_eq!(theme.name, name);
        }
    }

    #[test]
    fn test_bundled_default_matches_fallback_palette() {
        let theme = Theme::load(DEFAULT_THEME).unwrap();
        assert_eq!(theme.colors, Palette::default());
    }

    #[test]
    fn test_bad_color_is_a_parse_error() {
        let content = include_str!("../../assets/themes/gruvbox-dark.toml")
            .replace("#fb4934", "not-a-color");
        let err = Theme::parse(&content).unwrap_err();
        assert!(err.to_string().contains("not-a-color"));
    }

    #[test]
    fn test_unknown_theme_is_none() {
        assert!(Theme::load("no-such-theme-anywhere").is_none());
    }
}
