//! Configuration for the staged progress widget
//!
//! Stored as TOML. Every field has a default, so a partial file (or none at
//! all) is valid:
//!
//! ```toml
//! animation_duration_ms = 450
//! canvas_height = 18.0
//! line_width = 4.0
//! label_gap = 4.0
//! easing = "ease_in_out"
//! inactive_color = "#9E9E9E"
//! active_color = "#2196F3"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::error::StageError;
use super::staged_progress::{
    color::{parse_hex_color, to_hex_color},
    Easing, Palette, RenderStyle, DEFAULT_ACTIVE_COLOR, DEFAULT_ANIMATION_DURATION,
    DEFAULT_CANVAS_HEIGHT, DEFAULT_INACTIVE_COLOR, DEFAULT_LABEL_GAP, DEFAULT_LINE_WIDTH,
};

const CONFIG_FILE_NAME: &str = "config.toml";

/// Tunable appearance and timing of the widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StagedProgressConfig {
    /// Transition duration in milliseconds
    pub animation_duration_ms: u64,
    /// Height of the line-and-marker canvas
    pub canvas_height: f32,
    pub line_width: f32,
    /// Space between canvas and labels
    pub label_gap: f32,
    pub easing: Easing,
    /// `#RRGGBB` or `#RRGGBBAA`
    pub inactive_color: String,
    /// Fallback color for stages without their own
    pub active_color: String,
}

impl Default for StagedProgressConfig {
    fn default() -> Self {
        Self {
            animation_duration_ms: DEFAULT_ANIMATION_DURATION.as_millis() as u64,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            line_width: DEFAULT_LINE_WIDTH,
            label_gap: DEFAULT_LABEL_GAP,
            easing: Easing::default(),
            inactive_color: to_hex_color(DEFAULT_INACTIVE_COLOR),
            active_color: to_hex_color(DEFAULT_ACTIVE_COLOR),
        }
    }
}

impl StagedProgressConfig {
    /// Standard config location, e.g. `~/.config/stage-progress/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "", "stage-progress")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        debug!("Loaded staged progress config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Write the config as TOML, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;

        debug!("Saved staged progress config to {}", path.display());
        Ok(())
    }

    /// Check colors parse and dimensions are usable
    pub fn validate(&self) -> Result<(), StageError> {
        parse_hex_color(&self.inactive_color)?;
        parse_hex_color(&self.active_color)?;

        let dimensions = [
            ("canvas_height", self.canvas_height),
            ("line_width", self.line_width),
            ("label_gap", self.label_gap),
        ];
        for (name, value) in dimensions {
            if !value.is_finite() || value < 0.0 {
                return Err(StageError::InvalidDimension { name, value });
            }
        }
        Ok(())
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    /// Palette from the configured colors; unparseable colors use defaults
    pub fn palette(&self) -> Palette {
        Palette {
            inactive: color_or_default(&self.inactive_color, DEFAULT_INACTIVE_COLOR),
            active: color_or_default(&self.active_color, DEFAULT_ACTIVE_COLOR),
        }
    }

    pub fn render_style(&self) -> RenderStyle {
        RenderStyle {
            canvas_height: self.canvas_height,
            line_width: self.line_width,
            label_gap: self.label_gap,
        }
    }
}

fn color_or_default(value: &str, default: egui::Color32) -> egui::Color32 {
    parse_hex_color(value).unwrap_or_else(|e| {
        warn!("{}, using {}", e, to_hex_color(default));
        default
    })
}
