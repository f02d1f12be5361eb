// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::str::FromStr;

use crate::error::ThemeError;

/// An 8-bit RGBA color.
///
/// Multiplying by alpha scales every channel, matching how sprite batches
/// expect premultiplied tint colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Opaque gray.
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    /// Color of the texture handed out when a texture cannot be loaded.
    pub const PLACEHOLDER: Color = Color::rgb(255, 54, 244);

    /// Create an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color with an explicit alpha channel.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Scale all four channels by `alpha` (clamped to `0.0..=1.0`).
    pub fn multiply_alpha(self, alpha: f32) -> Self {
        let alpha = alpha.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f32 * alpha).round() as u8;
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
            a: scale(self.a),
        }
    }

    /// Parse a color from a comma-separated list of 3 or 4 byte components.
    ///
    /// A missing alpha component defaults to 255.
    pub fn parse(value: &str) -> Result<Self, ThemeError> {
        let invalid = |details: &str| ThemeError::InvalidColor {
            value: value.to_string(),
            details: details.to_string(),
        };

        let mut components = [255u8; 4];
        let parts: Vec<&str> = value.split(',').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 4 {
            return Err(invalid("expected 3 or 4 comma-separated components"));
        }

        for (slot, part) in components.iter_mut().zip(parts.iter()) {
            *slot = part
                .parse::<u8>()
                .map_err(|_| invalid("components must be integers between 0 and 255"))?;
        }

        Ok(Self::rgba(
            components[0],
            components[1],
            components[2],
            components[3],
        ))
    }

    /// Parse a color, returning `default` if the string is malformed.
    pub fn parse_or(value: &str, default: Color) -> Self {
        match Self::parse(value) {
            Ok(color) => color,
            Err(err) => {
                log::warn!("{}, using default color {}", err, default);
                default
            },
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Color {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_appends_full_alpha() {
        let color = Color::parse("10,20,30").unwrap();
        assert_eq!(color, Color::rgba(10, 20, 30, 255));
        assert_eq!(color.to_string(), "10,20,30,255");
    }

    #[test]
    fn test_parse_with_alpha_and_whitespace() {
        let color: Color = " 1, 2 ,3,4".parse().unwrap();
        assert_eq!(color, Color::rgba(1, 2, 3, 4));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Color::parse("1,2").is_err());
        assert!(Color::parse("1,2,3,4,5").is_err());
        assert!(Color::parse("1,2,300").is_err());
        assert!(Color::parse("red").is_err());
    }

    #[test]
    fn test_parse_or_falls_back() {
        assert_eq!(Color::parse_or("nope", Color::BLACK), Color::BLACK);
        assert_eq!(Color::parse_or("9,9,9", Color::BLACK), Color::rgb(9, 9, 9));
    }

    #[test]
    fn test_multiply_alpha() {
        let half = Color::rgba(200, 100, 50, 255).multiply_alpha(0.5);
        assert_eq!(half, Color::rgba(100, 50, 25, 128));
        assert_eq!(Color::WHITE.multiply_alpha(2.0), Color::WHITE);
    }
}
