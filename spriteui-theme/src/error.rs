// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Theme Error Types
//!
//! Errors for color parsing and settings loading. Callers that prefer a
//! fallback over an error use [Color::parse_or](crate::color::Color::parse_or)
//! or [UiSettings::from_file_or_default](crate::settings::UiSettings::from_file_or_default).

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading styling data.
#[derive(Error, Debug)]
pub enum ThemeError {
    /// A color string did not have 3 or 4 byte components.
    #[error("Invalid color '{value}': {details}")]
    InvalidColor {
        /// The string that failed to parse.
        value: String,
        /// What was wrong with it.
        details: String,
    },

    /// Settings file was not found.
    #[error("Settings file not found: {path:?}")]
    SettingsFileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Settings content could not be parsed.
    #[error("Failed to parse settings: {details}")]
    SettingsParseError {
        /// Details about the parse error.
        details: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
