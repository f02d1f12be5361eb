// SPDX-License-Identifier: MIT OR Apache-2.0

//! # UI Settings
//!
//! Default colors, fonts and animation rates shared by every widget.
//!
//! ```rust
//! use spriteui_theme::settings::UiSettings;
//!
//! let settings = UiSettings::from_toml(r#"
//! text_color = "255,255,255"
//! default_alpha_rate = 0.02
//! "#).unwrap();
//!
//! assert_eq!(settings.text_color.to_string(), "255,255,255,255");
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::ThemeError;

/// Settings that widgets fall back to when a value is not set explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Regular text.
    #[serde(with = "crate::serde_color")]
    pub text_color: Color,
    /// Less important text, such as hints.
    #[serde(with = "crate::serde_color")]
    pub subtle_text_color: Color,
    /// Highlight color for hovered items.
    #[serde(with = "crate::serde_color")]
    pub alt_color: Color,
    /// Text on buttons.
    #[serde(with = "crate::serde_color")]
    pub button_text_color: Color,
    /// Text on hovered buttons.
    #[serde(with = "crate::serde_color")]
    pub button_hover_color: Color,
    /// Text of disabled or unselectable items.
    #[serde(with = "crate::serde_color")]
    pub disabled_item_color: Color,
    /// Background of the selected list item.
    #[serde(with = "crate::serde_color")]
    pub focus_color: Color,
    /// Fill of panels without a background texture.
    #[serde(with = "crate::serde_color")]
    pub panel_background_color: Color,
    /// Fill of text boxes, list boxes and drop-downs.
    #[serde(with = "crate::serde_color")]
    pub background_color: Color,
    /// Borders drawn around panels and input controls.
    #[serde(with = "crate::serde_color")]
    pub panel_border_color: Color,
    /// Shadow drawn behind label text.
    #[serde(with = "crate::serde_color")]
    pub text_shadow_color: Color,
    /// Default font index used by text widgets.
    pub default_font_index: usize,
    /// Alpha change per second for hover fades on buttons.
    pub default_alpha_rate: f32,
    /// Alpha change per second for checkbox check fades.
    pub checkbox_alpha_rate: f32,
    /// Texture name used for checked checkboxes.
    pub checked_texture: String,
    /// Texture name used for unchecked checkboxes.
    pub unchecked_texture: String,
    /// Extra vertical space between list box items.
    pub list_item_spacing: i32,
    /// Thickness of scrollbars created by compound widgets.
    pub scroll_bar_thickness: i32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            text_color: Color::rgb(196, 196, 196),
            subtle_text_color: Color::rgb(128, 128, 128),
            alt_color: Color::rgb(255, 255, 255),
            button_text_color: Color::rgb(196, 196, 196),
            button_hover_color: Color::rgb(255, 255, 255),
            disabled_item_color: Color::rgb(169, 169, 169),
            focus_color: Color::rgb(64, 64, 64),
            panel_background_color: Color::rgba(0, 0, 0, 196),
            background_color: Color::rgb(0, 0, 0),
            panel_border_color: Color::rgb(196, 196, 196),
            text_shadow_color: Color::rgb(0, 0, 0),
            default_font_index: 0,
            default_alpha_rate: 3.0,
            checkbox_alpha_rate: 6.0,
            checked_texture: "checkBoxChecked.png".to_string(),
            unchecked_texture: "checkBoxClear.png".to_string(),
            list_item_spacing: 4,
            scroll_bar_thickness: 14,
        }
    }
}

impl UiSettings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ThemeError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ThemeError::SettingsFileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load settings from a TOML file, falling back to the defaults on any error.
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_file(path) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("{}, using default UI settings", err);
                Self::default()
            },
        }
    }

    /// Load settings from TOML content. Missing keys keep their default values.
    pub fn from_toml(content: &str) -> Result<Self, ThemeError> {
        toml::from_str(content).map_err(|err| ThemeError::SettingsParseError {
            details: err.to_string(),
        })
    }

    /// Serialize the settings back to TOML.
    pub fn to_toml(&self) -> Result<String, ThemeError> {
        toml::to_string(self).map_err(|err| ThemeError::SettingsParseError {
            details: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_keep_defaults() {
        let settings = UiSettings::from_toml("list_item_spacing = 8").unwrap();
        assert_eq!(settings.list_item_spacing, 8);
        assert_eq!(settings.text_color, UiSettings::default().text_color);
    }

    #[test]
    fn test_bad_color_is_an_error() {
        let result = UiSettings::from_toml("text_color = \"1,2\"");
        assert!(matches!(result, Err(ThemeError::SettingsParseError { .. })));
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut settings = UiSettings::default();
        settings.focus_color = Color::rgba(1, 2, 3, 4);
        let text = settings.to_toml().unwrap();
        assert_eq!(UiSettings::from_toml(&text).unwrap(), settings);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = UiSettings::from_file_or_default("/nonexistent/spriteui/settings.toml");
        assert_eq!(settings, UiSettings::default());
    }
}
