// SPDX-License-Identifier: MIT OR Apache-2.0

use spriteui_core::control::{ControlBehavior, ControlEvent, ControlId};
use spriteui_core::error::UiError;
use spriteui_core::geometry::{point, Rectangle};
use spriteui_core::graphics::Texture;
use spriteui_core::window_manager::parse_bool;
use spriteui_core::WindowManager;
use spriteui_theme::Color;

const TEXT_PADDING: i32 = 3;

/// A checkbox with a label to its right.
///
/// Clicking toggles the checked state unless checking is disallowed. The
/// checked texture cross-fades over the clear one. Changes raise
/// [ControlEvent::CheckedChanged].
///
/// ```rust
/// use spriteui_core::control::Control;
/// use spriteui_widgets::checkbox::CheckBox;
///
/// let checkbox = Control::new(CheckBox::new().with_checked(true)).with_text("Fullscreen");
/// ```
#[derive(Debug, Clone)]
pub struct CheckBox {
    checked: bool,
    allow_checking: bool,
    checked_alpha: f32,
    alpha_rate: Option<f32>,
    font_index: Option<usize>,
    text_color: Option<Color>,
    checked_texture: Option<Texture>,
    clear_texture: Option<Texture>,
}

impl CheckBox {
    /// Create an unchecked checkbox.
    pub fn new() -> Self {
        Self {
            checked: false,
            allow_checking: true,
            checked_alpha: 0.0,
            alpha_rate: None,
            font_index: None,
            text_color: None,
            checked_texture: None,
            clear_texture: None,
        }
    }

    /// Set the initial checked state.
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self.checked_alpha = if checked { 1.0 } else { 0.0 };
        self
    }

    /// Set whether clicking toggles the state.
    pub fn with_allow_checking(mut self, allow: bool) -> Self {
        self.allow_checking = allow;
        self
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

    /// Set how fast the check mark fades, in alpha per second.
    pub fn with_alpha_rate(mut self, rate: f32) -> Self {
        self.alpha_rate = Some(rate);
        self
    }

    /// If the box is checked.
    pub fn checked(&self) -> bool {
        self.checked
    }

    /// If clicking toggles the state.
    pub fn allow_checking(&self) -> bool {
        self.allow_checking
    }

    /// Set whether clicking toggles the state.
    pub fn set_allow_checking(&mut self, allow: bool) {
        self.allow_checking = allow;
    }

    /// Set the checked state, raising [ControlEvent::CheckedChanged] if it changed.
    pub fn set_checked(&mut self, wm: &mut WindowManager, id: ControlId, checked: bool) {
        if self.checked == checked {
            return;
        }
        self.checked = checked;
        wm.raise_event(id, ControlEvent::CheckedChanged);
    }

    fn box_size(&self) -> (i32, i32) {
        self.clear_texture
            .as_ref()
            .map_or((16, 16), |texture| (texture.width() as i32, texture.height() as i32))
    }

    fn refresh_size(&self, wm: &mut WindowManager, id: ControlId) {
        let (box_width, box_height) = self.box_size();
        let font = self.font_index.unwrap_or(wm.settings().default_font_index);
        let text = wm.text(id);
        let (width, height) = if text.is_empty() {
            (box_width, box_height)
        } else {
            let size = wm.renderer().measure_string(text, font);
            (
                box_width + TEXT_PADDING + size.x.ceil() as i32,
                box_height.max(size.y.ceil() as i32),
            )
        };
        wm.set_size(id, width, height);
    }
}

impl Default for CheckBox {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlBehavior for CheckBox {
    fn type_name(&self) -> &'static str {
        "CheckBox"
    }

    fn initialize(&mut self, wm: &mut WindowManager, id: ControlId) -> Result<(), UiError> {
        let checked = wm.settings().checked_texture.clone();
        let clear = wm.settings().unchecked_texture.clone();
        self.checked_texture = Some(wm.load_texture(&checked));
        self.clear_texture = Some(wm.load_texture(&clear));
        self.refresh_size(wm, id);
        wm.on(id, ControlEvent::TextChanged, |wm, id| {
            if let Some(checkbox) = wm.behavior::<CheckBox>(id).cloned() {
                checkbox.refresh_size(wm, id);
            }
        });
        Ok(())
    }

    fn update(&mut self, wm: &mut WindowManager, _id: ControlId) {
        let rate = self.alpha_rate.unwrap_or(wm.settings().checkbox_alpha_rate);
        let step = rate * wm.frame_time().elapsed_secs();
        self.checked_alpha = if self.checked {
            (self.checked_alpha + step).min(1.0)
        } else {
            (self.checked_alpha - step).max(0.0)
        };
    }

    fn on_left_click(&mut self, wm: &mut WindowManager, id: ControlId) {
        if self.allow_checking {
            let checked = !self.checked;
            self.set_checked(wm, id, checked);
        }
    }

    fn draw(&mut self, wm: &mut WindowManager, id: ControlId) -> Result<(), UiError> {
        let rectangle = wm.render_rectangle(id);
        let (box_width, box_height) = self.box_size();
        let box_y = rectangle.y + (rectangle.height - box_height) / 2;
        let box_rectangle = Rectangle::new(rectangle.x, box_y, box_width, box_height);
        let remap = wm.remap_color(id);

        if let Some(texture) = &self.clear_texture {
            let color = wm.color_with_alpha(id, remap.multiply_alpha(1.0 - self.checked_alpha));
            wm.renderer_mut().draw_texture(texture, box_rectangle, color);
        }
        if let Some(texture) = &self.checked_texture {
            let color = wm.color_with_alpha(id, remap.multiply_alpha(self.checked_alpha));
            wm.renderer_mut().draw_texture(texture, box_rectangle, color);
        }

        let text = wm.text(id).to_string();
        if !text.is_empty() {
            let font = self.font_index.unwrap_or(wm.settings().default_font_index);
            let color = if wm.enabled(id) && self.allow_checking {
                self.text_color.unwrap_or(wm.settings().text_color)
            } else {
                wm.settings().disabled_item_color
            };
            let color = wm.color_with_alpha(id, color);
            let text_height = wm.renderer().measure_string(&text, font).y as i32;
            let position = point(
                rectangle.x + box_width + TEXT_PADDING,
                rectangle.y + (rectangle.height - text_height) / 2,
            );
            wm.renderer_mut().draw_string(&text, font, position, color);
        }
        Ok(())
    }

    fn apply_attribute(&mut self, wm: &mut WindowManager, id: ControlId, key: &str, value: &str) -> bool {
        match key {
            "Checked" => {
                if let Some(checked) = parse_bool(value) {
                    self.set_checked(wm, id, checked);
                    self.checked_alpha = if checked { 1.0 } else { 0.0 };
                }
            },
            "AllowChecking" => self.allow_checking = parse_bool(value).unwrap_or(self.allow_checking),
            "TextColor" => self.text_color = Some(Color::parse_or(value, wm.settings().text_color)),
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spriteui_core::control::Control;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;

    fn click(wm: &mut WindowManager) {
        wm.cursor_mut().set_left_down(true);
        wm.update(Duration::from_millis(16));
        wm.cursor_mut().set_left_down(false);
        wm.update(Duration::from_millis(16));
    }

    #[test]
    fn test_click_toggles_and_raises() {
        let (mut wm, _log) = WindowManager::headless(200, 200);
        let id = wm.create(Control::new(CheckBox::new()).with_text("Music"));
        wm.add_control(id).unwrap();

        let changes = Rc::new(Cell::new(0));
        let counter = changes.clone();
        wm.on(id, ControlEvent::CheckedChanged, move |_, _| counter.set(counter.get() + 1));

        wm.cursor_mut().set_location(point(4, 4));
        click(&mut wm);
        assert!(wm.behavior::<CheckBox>(id).unwrap().checked());
        click(&mut wm);
        assert!(!wm.behavior::<CheckBox>(id).unwrap().checked());
        assert_eq!(changes.get(), 2);
    }

    #[test]
    fn test_disallowed_checking_ignores_clicks() {
        let (mut wm, _log) = WindowManager::headless(200, 200);
        let id = wm.create(Control::new(CheckBox::new().with_allow_checking(false)));
        wm.add_control(id).unwrap();

        wm.cursor_mut().set_location(point(2, 2));
        click(&mut wm);
        assert!(!wm.behavior::<CheckBox>(id).unwrap().checked());
    }

    #[test]
    fn test_size_includes_text() {
        let (mut wm, _log) = WindowManager::headless(200, 200);
        let id = wm.create(Control::new(CheckBox::new()).with_text("abc"));
        wm.add_control(id).unwrap();
        let (box_width, box_height) = wm.behavior::<CheckBox>(id).unwrap().box_size();
        assert_eq!(
            wm.client_rectangle(id).size(),
            point(box_width + TEXT_PADDING + 24, box_height.max(16))
        );
    }
}
