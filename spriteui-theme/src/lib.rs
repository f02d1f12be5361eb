// SPDX-License-Identifier: MIT OR Apache-2.0
#![warn(missing_docs)]

//! # spriteui Colors & Settings
//!
//! Shared styling vocabulary for the spriteui toolkit:
//!
//! - **[Color](color::Color)**: 8-bit RGBA color with the `"r,g,b[,a]"` string form
//!   used by layout files.
//! - **[UiSettings](settings::UiSettings)**: default colors and animation rates
//!   that widgets fall back to, loadable from TOML.
//! - **[ThemeError](error::ThemeError)**: errors raised while parsing colors or settings.
//!
//! ```rust
//! use spriteui_theme::color::Color;
//!
//! let color = Color::parse("10,20,30").unwrap();
//! assert_eq!(color.to_string(), "10,20,30,255");
//! ```

/// Contains the [Color](color::Color) type and color string parsing.
pub mod color;

/// Contains the [ThemeError](error::ThemeError) type.
pub mod error;

/// Serde adapter that reads and writes colors as `"r,g,b[,a]"` strings.
pub mod serde_color;

/// Contains the [UiSettings](settings::UiSettings) structure.
pub mod settings;

pub use color::Color;
pub use error::ThemeError;
pub use settings::UiSettings;
