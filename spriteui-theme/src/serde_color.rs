// SPDX-License-Identifier: MIT OR Apache-2.0

//! Custom serialization helpers for [Color].
//!
//! Use with `#[serde(with = "spriteui_theme::serde_color")]`.

use serde::{Deserialize, Deserializer, Serializer};

use crate::color::Color;

/// Serialize a Color as an `"r,g,b,a"` string.
pub fn serialize<S>(color: &Color, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&color.to_string())
}

/// Deserialize a Color from an `"r,g,b[,a]"` string.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value = String::deserialize(deserializer)?;
    Color::parse(&value).map_err(Error::custom)
}
