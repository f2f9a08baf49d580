//! Configuration types for Storeshot compositing.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file; every field has a default, so an empty file is a valid
//! configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`StyleConfig`] - Device frame style, color and corner radius.
//! - [`TextConfig`] - Font family and heading shadow.
//! - [`AssetConfig`] - Where bitmap frame assets are looked up on disk.
//!
//! # Example
//!
//! ```
//! # use storeshot::{config::AppConfig, frame::FrameStyle};
//! let config = AppConfig::default();
//! assert_eq!(config.style().frame_style(), FrameStyle::Realistic);
//! assert_eq!(config.text().font_family(), "sans-serif");
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use storeshot_core::color::Color;

use crate::frame::FrameStyle;

const DEFAULT_FRAME_COLOR: &str = "#1c1c1e";
const DEFAULT_FONT_FAMILY: &str = "sans-serif";

/// Top-level configuration combining style, text and asset settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Device frame section.
    #[serde(default)]
    style: StyleConfig,

    /// Text section.
    #[serde(default)]
    text: TextConfig,

    /// Frame asset section.
    #[serde(default)]
    assets: AssetConfig,
}

impl AppConfig {
    pub fn new(style: StyleConfig, text: TextConfig, assets: AssetConfig) -> Self {
        Self {
            style,
            text,
            assets,
        }
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn text(&self) -> &TextConfig {
        &self.text
    }

    pub fn assets(&self) -> &AssetConfig {
        &self.assets
    }
}

/// Device frame styling.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    frame_style: FrameStyle,

    /// Body color as a hex string.
    #[serde(default = "default_frame_color")]
    frame_color: String,

    /// Body corner radius in pixels; the device-type default when unset.
    #[serde(default)]
    corner_radius: Option<f32>,
}

fn default_frame_color() -> String {
    DEFAULT_FRAME_COLOR.to_string()
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            frame_style: FrameStyle::default(),
            frame_color: default_frame_color(),
            corner_radius: None,
        }
    }
}

impl StyleConfig {
    pub fn new(frame_style: FrameStyle, frame_color: impl Into<String>) -> Self {
        Self {
            frame_style,
            frame_color: frame_color.into(),
            corner_radius: None,
        }
    }

    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = Some(radius);
        self
    }

    pub fn frame_style(&self) -> FrameStyle {
        self.frame_style
    }

    /// Returns the parsed frame [`Color`]; unparseable values resolve to black.
    pub fn frame_color(&self) -> Color {
        Color::from_hex_or_black(&self.frame_color)
    }

    /// Negative radii are ignored.
    pub fn corner_radius(&self) -> Option<f32> {
        self.corner_radius.filter(|radius| *radius >= 0.0)
    }
}

/// Text styling.
#[derive(Debug, Clone, Deserialize)]
pub struct TextConfig {
    #[serde(default = "default_font_family")]
    font_family: String,

    /// Draws the heading with a soft shadow in every layout, not only in
    /// full bleed.
    #[serde(default)]
    heading_shadow: bool,
}

fn default_font_family() -> String {
    DEFAULT_FONT_FAMILY.to_string()
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            heading_shadow: false,
        }
    }
}

impl TextConfig {
    pub fn new(font_family: impl Into<String>, heading_shadow: bool) -> Self {
        Self {
            font_family: font_family.into(),
            heading_shadow,
        }
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn heading_shadow(&self) -> bool {
        self.heading_shadow
    }
}

/// Frame asset lookup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetConfig {
    /// Directory holding `<device-id>_<style>.png` frame images.
    #[serde(default)]
    resources_dir: Option<PathBuf>,
}

impl AssetConfig {
    pub fn new(resources_dir: impl Into<PathBuf>) -> Self {
        Self {
            resources_dir: Some(resources_dir.into()),
        }
    }

    pub fn resources_dir(&self) -> Option<&Path> {
        self.resources_dir.as_deref()
    }
}
