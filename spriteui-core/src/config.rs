// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use spriteui_theme::Color;

use crate::error::UiError;
use crate::input::KeyRepeat;

/// Window manager configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Width of the render resolution everything is laid out in.
    pub render_width: u32,
    /// Height of the render resolution everything is laid out in.
    pub render_height: u32,
    /// Initial window width. The render resolution is letterboxed into it.
    pub window_width: u32,
    /// Initial window height.
    pub window_height: u32,
    /// Maximum seconds between two left clicks that form a double click.
    pub double_click_time: f32,
    /// Seconds a key must be held before it repeats.
    pub key_repeat_trigger: f32,
    /// Seconds between repeats of a held key.
    pub key_repeat_interval: f32,
    /// Color the final render target is cleared with every frame.
    #[serde(with = "spriteui_theme::serde_color")]
    pub clear_color: Color,
    /// Directories searched for textures and sounds, in order.
    pub content_paths: Vec<PathBuf>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            render_width: 800,
            render_height: 600,
            window_width: 800,
            window_height: 600,
            double_click_time: 1.0,
            key_repeat_trigger: 0.4,
            key_repeat_interval: 0.03,
            clear_color: Color::BLACK,
            content_paths: vec![PathBuf::from("Content")],
        }
    }
}

impl UiConfig {
    /// Use a render resolution and an equally sized window.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.render_width = width;
        self.render_height = height;
        self.window_width = width;
        self.window_height = height;
        self
    }

    /// Load a configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, UiError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|err| UiError::LayoutParse {
            details: format!("{}: {}", path.display(), err),
        })?;
        Self::from_toml(&content)
    }

    /// Load a configuration from TOML content. Missing keys keep their defaults.
    pub fn from_toml(content: &str) -> Result<Self, UiError> {
        toml::from_str(content).map_err(|err| UiError::LayoutParse {
            details: err.to_string(),
        })
    }

    /// The double-click window.
    pub fn double_click_duration(&self) -> Duration {
        millis(self.double_click_time)
    }

    /// A key repeat timer with the configured timings.
    pub fn key_repeat(&self) -> KeyRepeat {
        KeyRepeat::new(
            millis(self.key_repeat_trigger),
            millis(self.key_repeat_interval),
        )
    }
}

fn millis(seconds: f32) -> Duration {
    Duration::from_millis((seconds.max(0.0) * 1000.0).round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = UiConfig::default();
        assert_eq!(config.double_click_duration(), Duration::from_secs(1));
        assert_eq!(config.key_repeat(), KeyRepeat::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = UiConfig::from_toml("render_width = 320\nclear_color = \"1,2,3\"").unwrap();
        assert_eq!(config.render_width, 320);
        assert_eq!(config.render_height, 600);
        assert_eq!(config.clear_color, Color::rgb(1, 2, 3));
    }
}
