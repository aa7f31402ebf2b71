use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ui::modal::SWIPE_THRESHOLD;
use crate::ui::theme::{parse_hex_color, Theme};
use crate::ui::CardDisplayConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Agenda JSON to load when --agenda is not given
    pub agenda_path: Option<String>,
    pub appearance: AppearanceConfig,
    pub behavior: BehaviorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Theme preset name ("openapi", "catppuccin-mocha", "nord")
    pub theme: String,
    /// Per-color hex overrides applied on top of the preset
    pub colors: ColorOverrides,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorOverrides {
    pub background: Option<String>,
    pub foreground: Option<String>,
    pub accent: Option<String>,
    pub dimmed: Option<String>,
    pub border: Option<String>,
    pub backdrop: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Horizontal drag distance (cells) that counts as a swipe
    pub swipe_threshold: u16,
    /// Show the category next to the session time on cards
    pub show_category: bool,
    /// Show speaker lines on cards
    pub show_speakers: bool,
    /// Lines reserved for wrapped card titles
    pub title_lines: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            agenda_path: None,
            appearance: AppearanceConfig::default(),
            behavior: BehaviorConfig::default(),
        }
    }
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            theme: "openapi".to_string(),
            colors: ColorOverrides::default(),
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: SWIPE_THRESHOLD,
            show_category: true,
            show_speakers: true,
            title_lines: 2,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let path = Path::new(expanded.as_ref());

        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            tracing::info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Default config file location.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("agenda-tui")
            .join("config.toml")
    }

    /// Preset theme with any configured color overrides applied.
    pub fn resolve_theme(&self) -> Theme {
        let mut theme = Theme::from_preset(&self.appearance.theme).unwrap_or_else(|| {
            tracing::warn!(
                "Unknown theme preset '{}', using default",
                self.appearance.theme
            );
            Theme::default()
        });

        let colors = &self.appearance.colors;
        apply_color(&mut theme.background, &colors.background);
        apply_color(&mut theme.foreground, &colors.foreground);
        apply_color(&mut theme.accent, &colors.accent);
        apply_color(&mut theme.dimmed, &colors.dimmed);
        apply_color(&mut theme.border, &colors.border);
        apply_color(&mut theme.backdrop, &colors.backdrop);
        theme
    }

    pub fn card_display_config(&self) -> CardDisplayConfig {
        CardDisplayConfig {
            show_category: self.behavior.show_category,
            show_speakers: self.behavior.show_speakers,
            title_lines: self.behavior.title_lines.clamp(1, 4),
        }
    }
}

fn apply_color(slot: &mut ratatui::style::Color, value: &Option<String>) {
    if let Some(hex) = value {
        match parse_hex_color(hex) {
            Ok(color) => *slot = color,
            Err(e) => tracing::warn!("Ignoring invalid color '{}': {}", hex, e),
        }
    }
}
