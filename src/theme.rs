//! Theme loading: btop-style `theme[key]="value"` and hex → ratatui Color.

use ratatui::style::Color;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Pit colours. Translucent colours are pre-blended over the arena background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub arena_bg: Color,
    pub arena_border: Color,
    pub block_fill: Color,
    pub block_stroke: Color,
    /// Shading for the columns scanned under the piece.
    pub collision_area: Color,
    /// Landing preview.
    pub ghost_body: Color,
    /// Dotted cell grid.
    pub grid_line: Color,
    /// Sidebar labels.
    pub title: Color,
    /// Sidebar values.
    pub main_fg: Color,
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            arena_bg: Color::Rgb(0xD1, 0xD8, 0x78),
            arena_border: Color::Rgb(0x8A, 0x91, 0x31),
            block_fill: Color::Rgb(0x8A, 0x90, 0x38),
            block_stroke: Color::Rgb(0x3C, 0x40, 0x29),
            collision_area: Color::Rgb(0xDB, 0xAD, 0x60),
            ghost_body: Color::Rgb(0x75, 0xEF, 0xC9),
            grid_line: Color::Rgb(0xBC, 0xC2, 0x6C),
            title: Color::Rgb(0x8A, 0x91, 0x31),
            main_fg: Color::Rgb(0xD1, 0xD8, 0x78),
        }
    }
}

impl Theme {
    /// Load theme from a btop-style file. Missing path or file gives the defaults;
    /// keys absent from the file keep their default colour.
    pub fn load(path: Option<&Path>) -> Result<Self, ThemeError> {
        let path = match path {
            Some(p) if p.exists() => p,
            _ => return Ok(Self::default()),
        };
        let s = std::fs::read_to_string(path)?;
        Self::from_map(&parse_theme_file(&s))
    }

    fn from_map(map: &HashMap<String, String>) -> Result<Self, ThemeError> {
        let mut theme = Self::default();
        let slots: [(&str, &mut Color); 9] = [
            ("arena_bg", &mut theme.arena_bg),
            ("arena_border", &mut theme.arena_border),
            ("block_fill", &mut theme.block_fill),
            ("block_stroke", &mut theme.block_stroke),
            ("collision_area", &mut theme.collision_area),
            ("ghost_body", &mut theme.ghost_body),
            ("grid_line", &mut theme.grid_line),
            ("title", &mut theme.title),
            ("main_fg", &mut theme.main_fg),
        ];
        for (key, slot) in slots {
            if let Some(value) = map.get(key) {
                *slot = parse_hex(value)?;
            }
        }
        Ok(theme)
    }
}

/// Parse btop-style theme file into key -> value map.
fn parse_theme_file(s: &str) -> HashMap<String, String> {
    s.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let rest = line.strip_prefix("theme[")?;
            let (key, rest) = rest.split_once(']')?;
            let (_, value) = rest.split_once('=')?;
            let value = value.trim().trim_matches('"').trim_matches('\'');
            (!value.is_empty()).then(|| (key.trim().to_string(), value.to_string()))
        })
        .collect()
}

/// Parse hex colour "#RRGGBB" or "#RGB" into ratatui Color.
pub fn parse_hex(s: &str) -> Result<Color, ThemeError> {
    let hex = s.trim().trim_start_matches('#');
    let invalid = || ThemeError::InvalidHex(s.to_string());
    let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
    if !hex.is_ascii() {
        return Err(invalid());
    }
    match hex.len() {
        6 => Ok(Color::Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => Ok(Color::Rgb(
            channel(&hex[0..1])? * 17,
            channel(&hex[1..2])? * 17,
            channel(&hex[2..3])? * 17,
        )),
        _ => Err(invalid()),
    }
}
