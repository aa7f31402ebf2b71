//! Color themes for the agenda UI.
//!
//! Provides:
//! - Theme struct covering grid, card, and modal colors
//! - Built-in presets (openapi, catppuccin-mocha, nord)
//! - Hex color parsing for config overrides

use ratatui::style::Color;
use thiserror::Error;

/// Theme colors for the UI.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Main background color
    pub background: Color,
    /// Primary text color
    pub foreground: Color,
    /// Background of the selected card
    pub selection_bg: Color,
    /// Text color on the selected card
    pub selection_fg: Color,
    /// Accent color (session titles, active borders)
    pub accent: Color,
    /// Dimmed text (times, bylines)
    pub dimmed: Color,
    /// More dimmed text (categories, hints)
    pub dimmed_alt: Color,
    /// Membership badge background (TSC / OAI pills)
    pub badge_bg: Color,
    /// Membership badge text
    pub badge_fg: Color,
    /// Dimmed area behind the open modal
    pub backdrop: Color,
    /// Section and panel borders
    pub border: Color,
    /// Unavailable navigation controls
    pub disabled: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::openapi()
    }
}

impl Theme {
    /// Default theme, green-on-black like the conference site.
    pub fn openapi() -> Self {
        Self {
            background: Color::Rgb(9, 11, 13),        // #090b0d
            foreground: Color::Rgb(235, 240, 243),    // #ebf0f3
            selection_bg: Color::Rgb(26, 46, 26),     // #1a2e1a
            selection_fg: Color::Rgb(235, 240, 243),  // #ebf0f3
            accent: Color::Rgb(125, 216, 88),         // #7dd858 (primary green)
            dimmed: Color::Rgb(156, 163, 175),        // #9ca3af
            dimmed_alt: Color::Rgb(107, 114, 128),    // #6b7280
            badge_bg: Color::Rgb(63, 122, 31),        // #3f7a1f (dark green)
            badge_fg: Color::Rgb(9, 11, 13),          // #090b0d
            backdrop: Color::Rgb(18, 22, 26),         // #12161a
            border: Color::Rgb(55, 65, 81),           // #374151
            disabled: Color::Rgb(75, 85, 99),         // #4b5563
        }
    }

    /// Catppuccin Mocha theme
    pub fn catppuccin_mocha() -> Self {
        Self {
            background: Color::Rgb(30, 30, 46),       // #1e1e2e (base)
            foreground: Color::Rgb(205, 214, 244),    // #cdd6f4 (text)
            selection_bg: Color::Rgb(49, 50, 68),     // #313244 (surface0)
            selection_fg: Color::Rgb(205, 214, 244),  // #cdd6f4 (text)
            accent: Color::Rgb(166, 227, 161),        // #a6e3a1 (green)
            dimmed: Color::Rgb(166, 173, 200),        // #a6adc8 (subtext0)
            dimmed_alt: Color::Rgb(147, 153, 178),    // #9399b2 (overlay2)
            badge_bg: Color::Rgb(166, 227, 161),      // #a6e3a1 (green)
            badge_fg: Color::Rgb(30, 30, 46),         // #1e1e2e (base)
            backdrop: Color::Rgb(24, 24, 37),         // #181825 (mantle)
            border: Color::Rgb(69, 71, 90),           // #45475a (surface1)
            disabled: Color::Rgb(88, 91, 112),        // #585b70 (surface2)
        }
    }

    /// Nord theme
    pub fn nord() -> Self {
        Self {
            background: Color::Rgb(46, 52, 64),       // #2e3440 (nord0)
            foreground: Color::Rgb(236, 239, 244),    // #eceff4 (nord6)
            selection_bg: Color::Rgb(67, 76, 94),     // #434c5e (nord2)
            selection_fg: Color::Rgb(236, 239, 244),  // #eceff4 (nord6)
            accent: Color::Rgb(163, 190, 140),        // #a3be8c (nord14)
            dimmed: Color::Rgb(216, 222, 233),        // #d8dee9 (nord4)
            dimmed_alt: Color::Rgb(76, 86, 106),      // #4c566a (nord3)
            badge_bg: Color::Rgb(163, 190, 140),      // #a3be8c (nord14)
            badge_fg: Color::Rgb(46, 52, 64),         // #2e3440 (nord0)
            backdrop: Color::Rgb(37, 42, 52),         // #252a34
            border: Color::Rgb(76, 86, 106),          // #4c566a (nord3)
            disabled: Color::Rgb(97, 110, 136),       // #616e88
        }
    }

    /// Load theme from preset name
    pub fn from_preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "openapi" | "default" => Some(Self::openapi()),
            "catppuccin-mocha" | "catppuccin_mocha" | "catppuccin" => {
                Some(Self::catppuccin_mocha())
            }
            "nord" => Some(Self::nord()),
            _ => None,
        }
    }
}

/// Parse hex color string to Color
/// Supports: #rrggbb, #rgb, rrggbb, rgb
pub fn parse_hex_color(s: &str) -> Result<Color, ColorError> {
    let s = s.trim().trim_start_matches('#');

    match s.len() {
        // #rgb -> #rrggbb
        3 => {
            let r = u8::from_str_radix(&s[0..1], 16).map_err(|_| ColorError::InvalidHex)?;
            let g = u8::from_str_radix(&s[1..2], 16).map_err(|_| ColorError::InvalidHex)?;
            let b = u8::from_str_radix(&s[2..3], 16).map_err(|_| ColorError::InvalidHex)?;
            Ok(Color::Rgb(r * 17, g * 17, b * 17))
        }
        // #rrggbb
        6 => {
            let r = u8::from_str_radix(&s[0..2], 16).map_err(|_| ColorError::InvalidHex)?;
            let g = u8::from_str_radix(&s[2..4], 16).map_err(|_| ColorError::InvalidHex)?;
            let b = u8::from_str_radix(&s[4..6], 16).map_err(|_| ColorError::InvalidHex)?;
            Ok(Color::Rgb(r, g, b))
        }
        // #rrggbbaa (alpha ignored)
        8 => {
            let r = u8::from_str_radix(&s[0..2], 16).map_err(|_| ColorError::InvalidHex)?;
            let g = u8::from_str_radix(&s[2..4], 16).map_err(|_| ColorError::InvalidHex)?;
            let b = u8::from_str_radix(&s[4..6], 16).map_err(|_| ColorError::InvalidHex)?;
            Ok(Color::Rgb(r, g, b))
        }
        _ => Err(ColorError::InvalidLength),
    }
}

/// Color parsing error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    #[error("invalid color length (expected 3, 6, or 8 hex chars)")]
    InvalidLength,
    #[error("invalid hex character")]
    InvalidHex,
}
