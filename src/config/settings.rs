//! User settings and preferences for Pressmark
//!
//! This module defines the `Settings` struct that holds all
//! user-configurable options, with serde support for JSON persistence.

use serde::{Deserialize, Serialize};

use crate::render::FormatMode;

// ─────────────────────────────────────────────────────────────────────────────
// Theme Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Available color themes for the editor chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

impl Theme {
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::System => "System",
        }
    }

    pub fn all() -> &'static [Theme] {
        &[Theme::Light, Theme::Dark, Theme::System]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Window Size Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Window dimensions and position, restored across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: f32,
    pub height: f32,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub maximized: bool,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            x: None,
            y: None,
            maximized: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────────────────────────────────────

/// All user-configurable options.
///
/// Unknown fields in the stored JSON are ignored and missing fields fall
/// back to their defaults, so settings survive version changes in both
/// directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Chrome theme
    pub theme: Theme,
    /// Editor font size in points
    pub font_size: f32,
    /// Whether the panes scroll-sync by default
    pub sync_scroll: bool,
    /// Render profile selected at startup
    pub format_mode: FormatMode,
    /// Style-override sheet source edited in the style editor pane
    pub style_overrides: String,
    /// Window geometry from the last session
    pub window_size: WindowSize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            font_size: 14.0,
            sync_scroll: true,
            format_mode: FormatMode::Platform,
            style_overrides: String::new(),
            window_size: WindowSize::default(),
        }
    }
}

impl Settings {
    pub const MIN_FONT_SIZE: f32 = 8.0;
    pub const MAX_FONT_SIZE: f32 = 32.0;

    /// Parse settings from JSON and clamp out-of-range values.
    pub fn from_json_sanitized(json: &str) -> serde_json::Result<Self> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    /// Clamp numeric fields into their valid ranges.
    pub fn sanitize(&mut self) {
        self.font_size = self.font_size.clamp(Self::MIN_FONT_SIZE, Self::MAX_FONT_SIZE);
        if !self.window_size.width.is_finite() || self.window_size.width < 400.0 {
            self.window_size.width = WindowSize::default().width;
        }
        if !self.window_size.height.is_finite() || self.window_size.height < 300.0 {
            self.window_size.height = WindowSize::default().height;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
