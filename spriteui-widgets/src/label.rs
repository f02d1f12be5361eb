// SPDX-License-Identifier: MIT OR Apache-2.0

use bitflags::bitflags;
use spriteui_core::control::{ControlBehavior, ControlEvent, ControlId};
use spriteui_core::error::UiError;
use spriteui_core::geometry::{point, Point};
use spriteui_core::window_manager::{parse_bool, parse_pair};
use spriteui_core::WindowManager;
use spriteui_theme::Color;

bitflags! {
    /// Which side of the anchor point the text extends to.
    ///
    /// `LEFT` places the text left of the anchor point, `RIGHT` to the
    /// right of it, `HORIZONTAL_CENTER` centers it. The vertical flags
    /// work the same way with `TOP` above and `BOTTOM` below.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TextAnchor: u8 {
        /// Text ends at the anchor point.
        const LEFT = 1;
        /// Text starts at the anchor point.
        const RIGHT = 1 << 1;
        /// Text is horizontally centered on the anchor point.
        const HORIZONTAL_CENTER = 1 << 2;
        /// Text ends above the anchor point.
        const TOP = 1 << 3;
        /// Text starts at the anchor point vertically.
        const BOTTOM = 1 << 4;
        /// Text is vertically centered on the anchor point.
        const VERTICAL_CENTER = 1 << 5;
        /// Centered on both axes.
        const CENTER = Self::HORIZONTAL_CENTER.bits() | Self::VERTICAL_CENTER.bits();
    }
}

impl Default for TextAnchor {
    fn default() -> Self {
        TextAnchor::RIGHT | TextAnchor::BOTTOM
    }
}

/// A single piece of text that sizes itself to fit.
///
/// When an anchor point is set the label moves itself so that the text
/// keeps its [TextAnchor] relation to that point whenever the text changes.
#[derive(Debug, Clone, Default)]
pub struct Label {
    font_index: Option<usize>,
    text_color: Option<Color>,
    draw_shadow: bool,
    anchor_point: Option<Point>,
    text_anchor: TextAnchor,
}

impl Label {
    /// Create a label using the default font and text color.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font.
    pub fn with_font_index(mut self, font_index: usize) -> Self {
        self.font_index = Some(font_index);
        self
    }

    /// Set the text color.
    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = Some(color);
        self
    }

    /// Draw a shadow behind the text.
    pub fn with_shadow(mut self, shadow: bool) -> Self {
        self.draw_shadow = shadow;
        self
    }

    /// Keep the text anchored to a point of the parent.
    pub fn with_anchor(mut self, anchor_point: Point, text_anchor: TextAnchor) -> Self {
        self.anchor_point = Some(anchor_point);
        self.text_anchor = text_anchor;
        self
    }

    /// The anchor point, if any.
    pub fn anchor_point(&self) -> Option<Point> {
        self.anchor_point
    }

    /// Set the anchor point and reposition the label.
    pub fn set_anchor(&mut self, wm: &mut WindowManager, id: ControlId, anchor_point: Point, text_anchor: TextAnchor) {
        self.anchor_point = Some(anchor_point);
        self.text_anchor = text_anchor;
        self.refresh(wm, id);
    }

    fn font(&self, wm: &WindowManager) -> usize {
        self.font_index.unwrap_or(wm.settings().default_font_index)
    }

    /// Fit the label's size to its text and apply the anchor.
    pub fn refresh(&self, wm: &mut WindowManager, id: ControlId) {
        let size = wm.renderer().measure_string(wm.text(id), self.font(wm));
        let (width, height) = (size.x.ceil() as i32, size.y.ceil() as i32);
        wm.set_size(id, width, height);

        let Some(anchor) = self.anchor_point else {
            return;
        };

        let x = if self.text_anchor.contains(TextAnchor::LEFT) {
            anchor.x - width
        } else if self.text_anchor.contains(TextAnchor::HORIZONTAL_CENTER) {
            anchor.x - width / 2
        } else {
            anchor.x
        };
        let y = if self.text_anchor.contains(TextAnchor::TOP) {
            anchor.y - height
        } else if self.text_anchor.contains(TextAnchor::VERTICAL_CENTER) {
            anchor.y - height / 2
        } else {
            anchor.y
        };
        wm.set_location(id, point(x, y));
    }
}

impl ControlBehavior for Label {
    fn type_name(&self) -> &'static str {
        "Label"
    }

    fn initialize(&mut self, wm: &mut WindowManager, id: ControlId) -> Result<(), UiError> {
        wm.set_input_enabled(id, false);
        self.refresh(wm, id);
        wm.on(id, ControlEvent::TextChanged, |wm, id| {
            if let Some(label) = wm.behavior::<Label>(id).cloned() {
                label.refresh(wm, id);
            }
        });
        Ok(())
    }

    fn draw(&mut self, wm: &mut WindowManager, id: ControlId) -> Result<(), UiError> {
        let text = wm.text(id).to_string();
        if text.is_empty() {
            return Ok(());
        }

        let font = self.font(wm);
        let position = wm.render_point(id);
        let color = wm.color_with_alpha(id, self.text_color.unwrap_or(wm.settings().text_color));
        if self.draw_shadow {
            let shadow = wm.color_with_alpha(id, wm.settings().text_shadow_color);
            wm.renderer_mut()
                .draw_string_with_shadow(&text, font, position, color, shadow);
        } else {
            wm.renderer_mut().draw_string(&text, font, position, color);
        }
        Ok(())
    }

    fn apply_attribute(&mut self, wm: &mut WindowManager, id: ControlId, key: &str, value: &str) -> bool {
        match key {
            "FontIndex" => match value.trim().parse() {
                Ok(index) => self.font_index = Some(index),
                Err(_) => log::warn!("Invalid font index '{}'", value),
            },
            "TextColor" => self.text_color = Some(Color::parse_or(value, wm.settings().text_color)),
            "TextShadow" => self.draw_shadow = parse_bool(value).unwrap_or(self.draw_shadow),
            "AnchorPoint" => match parse_pair(value) {
                Some(anchor) => self.anchor_point = Some(anchor),
                None => log::warn!("Invalid anchor point '{}'", value),
            },
            "TextAnchor" => self.text_anchor = parse_text_anchor(value),
            _ => return false,
        }
        self.refresh(wm, id);
        true
    }
}

/// Parse anchor flags written as `LEFT|VERTICAL_CENTER`.
fn parse_text_anchor(value: &str) -> TextAnchor {
    let mut anchor = TextAnchor::empty();
    for part in value.split(['|', ',']) {
        match TextAnchor::from_name(part.trim()) {
            Some(flag) => anchor |= flag,
            None => log::warn!("Unknown text anchor '{}'", part),
        }
    }
    anchor
}

#[cfg(test)]
mod tests {
    use super::*;
    use spriteui_core::control::Control;
    use spriteui_core::geometry::Rectangle;

    #[test]
    fn test_label_fits_its_text() {
        let (mut wm, log) = WindowManager::headless(200, 200);
        let id = wm.create(Control::new(Label::new()).with_text("Hello"));
        wm.add_control(id).unwrap();
        assert_eq!(wm.client_rectangle(id).size(), point(40, 16));

        wm.set_text(id, "Hi");
        assert_eq!(wm.width(id), 16);

        wm.draw().unwrap();
        assert_eq!(log.drawn_strings(), ["Hi"]);
    }

    #[test]
    fn test_anchor_keeps_text_in_place() {
        let (mut wm, _log) = WindowManager::headless(200, 200);
        let label = Label::new().with_anchor(point(100, 50), TextAnchor::LEFT | TextAnchor::VERTICAL_CENTER);
        let id = wm.create(Control::new(label).with_text("abcd"));
        wm.add_control(id).unwrap();
        assert_eq!(wm.client_rectangle(id), Rectangle::new(68, 42, 32, 16));

        wm.set_text(id, "ab");
        assert_eq!(wm.client_rectangle(id), Rectangle::new(84, 42, 16, 16));
    }

    #[test]
    fn test_text_anchor_attribute() {
        assert_eq!(parse_text_anchor("HORIZONTAL_CENTER|TOP"), TextAnchor::HORIZONTAL_CENTER | TextAnchor::TOP);
        assert_eq!(parse_text_anchor("CENTER"), TextAnchor::CENTER);
    }
}
