// SPDX-License-Identifier: MIT OR Apache-2.0

use std::str::FromStr;

use spriteui_theme::Color;

use crate::control::ControlId;
use crate::geometry::Point;
use crate::window_manager::WindowManager;

/// Parse a boolean attribute value. Accepts `true`/`yes`/`1` and `false`/`no`/`0`.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Parse a `"x,y"` attribute value.
pub fn parse_pair(value: &str) -> Option<Point> {
    let (x, y) = value.split_once(',')?;
    Some(Point::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Option<T> {
    let parsed = value.trim().parse().ok();
    if parsed.is_none() {
        log::warn!("Malformed value '{}' for attribute {}", value, key);
    }
    parsed
}

impl WindowManager {
    /// Apply a key/value attribute to a control.
    ///
    /// The common vocabulary (position, size, border distances, visibility,
    /// colors, ordering, input flags) is handled here; other keys go to the
    /// control's behavior. Unknown keys are ignored and malformed values are
    /// logged and skipped.
    pub fn apply_attribute(&mut self, id: ControlId, key: &str, value: &str) {
        if !self.exists(id) {
            return;
        }

        match key {
            "X" => {
                if let Some(x) = parse_number(key, value) {
                    self.set_x(id, x);
                }
            },
            "Y" => {
                if let Some(y) = parse_number(key, value) {
                    self.set_y(id, y);
                }
            },
            "Width" => {
                if let Some(width) = parse_number(key, value) {
                    self.set_width(id, width);
                }
            },
            "Height" => {
                if let Some(height) = parse_number(key, value) {
                    self.set_height(id, height);
                }
            },
            "Location" => match parse_pair(value) {
                Some(location) => self.set_location(id, location),
                None => log::warn!("Malformed value '{}' for attribute {}", value, key),
            },
            "Size" => match parse_pair(value) {
                Some(size) => self.set_size(id, size.x, size.y),
                None => log::warn!("Malformed value '{}' for attribute {}", value, key),
            },
            "DistanceFromRightBorder" => {
                if let Some(distance) = parse_number::<i32>(key, value) {
                    let parent_width = self.parent_size(id).x;
                    self.set_x(id, parent_width - self.width(id) - distance);
                }
            },
            "DistanceFromBottomBorder" => {
                if let Some(distance) = parse_number::<i32>(key, value) {
                    let parent_height = self.parent_size(id).y;
                    self.set_y(id, parent_height - self.height(id) - distance);
                }
            },
            "FillWidth" => {
                if let Some(distance) = parse_number::<i32>(key, value) {
                    let parent_width = self.parent_size(id).x;
                    self.set_width(id, parent_width - self.x(id) - distance);
                }
            },
            "FillHeight" => {
                if let Some(distance) = parse_number::<i32>(key, value) {
                    let parent_height = self.parent_size(id).y;
                    self.set_height(id, parent_height - self.y(id) - distance);
                }
            },
            "Text" => self.set_text(id, value.replace('@', "\n")),
            "Visible" | "Enabled" | "InputEnabled" | "InputPassthrough" => {
                let Some(flag) = parse_bool(value) else {
                    log::warn!("Malformed value '{}' for attribute {}", value, key);
                    return;
                };
                match key {
                    "Visible" => self.set_visible(id, flag),
                    "Enabled" => self.set_enabled(id, flag),
                    "InputEnabled" => self.set_input_enabled(id, flag),
                    _ => self.set_input_passthrough(id, flag),
                }
            },
            "DrawOrder" => {
                if let Some(order) = parse_number(key, value) {
                    self.set_draw_order(id, order);
                }
            },
            "UpdateOrder" => {
                if let Some(order) = parse_number(key, value) {
                    self.set_update_order(id, order);
                }
            },
            "RemapColor" => {
                let color = Color::parse_or(value, self.remap_color(id));
                self.set_remap_color(id, color);
            },
            "Alpha" => {
                if let Some(alpha) = parse_number(key, value) {
                    self.set_alpha(id, alpha);
                }
            },
            _ => {
                let handled = self
                    .with_behavior(id, |behavior, wm| behavior.apply_attribute(wm, id, key, value))
                    .unwrap_or(false);
                if !handled {
                    log::trace!("Ignoring attribute {} on control {}", key, self.node_name(id));
                }
            },
        }
    }
}
