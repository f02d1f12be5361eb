// SPDX-License-Identifier: MIT OR Apache-2.0

use spriteui_core::control::{Capabilities, ControlBehavior, ControlEvent, ControlId};
use spriteui_core::error::UiError;
use spriteui_core::geometry::{point, Rectangle};
use spriteui_core::input::KeyRepeat;
use spriteui_core::window::KeyCode;
use spriteui_core::WindowManager;
use spriteui_theme::Color;

const TEXT_BORDER_DISTANCE: i32 = 3;
const CARET_BLINK_MILLIS: u128 = 500;

fn byte_index(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map_or(text.len(), |(index, _)| index)
}

fn char_slice(text: &str, start: usize, end: usize) -> &str {
    &text[byte_index(text, start)..byte_index(text, end)]
}

/// A single line text input.
///
/// Typed characters are inserted at the caret while the text box is the
/// selected control. Left, right, backspace and delete repeat while held;
/// home and end jump to either end and enter raises
/// [ControlEvent::EnterPressed]. When the text does not fit, the visible
/// window scrolls to keep the caret in view.
#[derive(Debug, Clone)]
pub struct TextBox {
    max_length: Option<usize>,
    font_index: Option<usize>,
    text_color: Option<Color>,
    caret: usize,
    view_start: usize,
    key_left: KeyRepeat,
    key_right: KeyRepeat,
    key_backspace: KeyRepeat,
    key_delete: KeyRepeat,
}

impl TextBox {
    /// Create an empty text box without a length limit.
    pub fn new() -> Self {
        Self {
            max_length: None,
            font_index: None,
            text_color: None,
            caret: 0,
            view_start: 0,
            key_left: KeyRepeat::default(),
            key_right: KeyRepeat::default(),
            key_backspace: KeyRepeat::default(),
            key_delete: KeyRepeat::default(),
        }
    }

    /// Limit the text to `max_length` characters.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
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

    /// The length limit in characters.
    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// The caret position in characters.
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// The first visible character.
    pub fn view_start(&self) -> usize {
        self.view_start
    }

    fn font(&self, wm: &WindowManager) -> usize {
        self.font_index.unwrap_or(wm.settings().default_font_index)
    }

    /// Replace the text and move the caret to its end.
    pub fn set_text(&mut self, wm: &mut WindowManager, id: ControlId, text: &str) -> Result<(), UiError> {
        let length = text.chars().count();
        if let Some(max_length) = self.max_length.filter(|max| length > *max) {
            return Err(UiError::TextTooLong {
                name: wm.name(id).to_string(),
                length,
                max_length,
            });
        }
        wm.set_text(id, text);
        self.caret = length;
        self.fix_view(wm, id);
        Ok(())
    }

    /// Insert a character at the caret. Returns `false` if the text is full.
    pub fn insert(&mut self, wm: &mut WindowManager, id: ControlId, character: char) -> bool {
        let mut text = wm.text(id).to_string();
        let length = text.chars().count();
        if self.max_length.is_some_and(|max| length >= max) {
            return false;
        }
        let caret = self.caret.min(length);
        text.insert(byte_index(&text, caret), character);
        wm.set_text(id, text);
        self.caret = caret + 1;
        self.fix_view(wm, id);
        true
    }

    fn backspace(&mut self, wm: &mut WindowManager, id: ControlId) {
        if self.caret == 0 {
            return;
        }
        let mut text = wm.text(id).to_string();
        let start = byte_index(&text, self.caret - 1);
        text.remove(start);
        wm.set_text(id, text);
        self.caret -= 1;
        self.fix_view(wm, id);
    }

    fn delete(&mut self, wm: &mut WindowManager, id: ControlId) {
        let mut text = wm.text(id).to_string();
        if self.caret >= text.chars().count() {
            return;
        }
        let start = byte_index(&text, self.caret);
        text.remove(start);
        wm.set_text(id, text);
        self.fix_view(wm, id);
    }

    fn move_caret(&mut self, wm: &WindowManager, id: ControlId, caret: usize) {
        self.caret = caret.min(wm.text(id).chars().count());
        self.fix_view(wm, id);
    }

    /// Scroll the visible window so the caret stays inside it.
    fn fix_view(&mut self, wm: &WindowManager, id: ControlId) {
        let text = wm.text(id);
        let length = text.chars().count();
        self.caret = self.caret.min(length);
        self.view_start = self.view_start.min(self.caret);

        let available = (wm.width(id) - TEXT_BORDER_DISTANCE * 2) as f32;
        let font = self.font(wm);
        while self.view_start < self.caret
            && wm
                .renderer()
                .measure_string(char_slice(text, self.view_start, self.caret), font)
                .x
                > available
        {
            self.view_start += 1;
        }
    }

    /// The part of the text that fits in the box.
    pub fn visible_text<'a>(&self, wm: &'a WindowManager, id: ControlId) -> &'a str {
        let text = wm.text(id);
        let length = text.chars().count();
        let start = self.view_start.min(length);
        let available = (wm.width(id) - TEXT_BORDER_DISTANCE * 2) as f32;
        let font = self.font(wm);

        let mut end = start;
        while end < length
            && wm
                .renderer()
                .measure_string(char_slice(text, start, end + 1), font)
                .x
                <= available
        {
            end += 1;
        }
        char_slice(text, start, end)
    }

    fn handle_keys(&mut self, wm: &mut WindowManager, id: ControlId) {
        let elapsed = wm.elapsed();
        let keyboard = wm.keyboard();
        let left = keyboard.is_key_down(KeyCode::ArrowLeft);
        let right = keyboard.is_key_down(KeyCode::ArrowRight);
        let backspace = keyboard.is_key_down(KeyCode::Backspace);
        let delete = keyboard.is_key_down(KeyCode::Delete);
        let pressed = keyboard.pressed_keys().to_vec();

        for _ in 0..self.key_left.update(left, elapsed) {
            self.move_caret(wm, id, self.caret.saturating_sub(1));
        }
        for _ in 0..self.key_right.update(right, elapsed) {
            self.move_caret(wm, id, self.caret + 1);
        }
        for _ in 0..self.key_backspace.update(backspace, elapsed) {
            self.backspace(wm, id);
        }
        for _ in 0..self.key_delete.update(delete, elapsed) {
            self.delete(wm, id);
        }

        for key in pressed {
            match key {
                KeyCode::Home => self.move_caret(wm, id, 0),
                KeyCode::End => self.move_caret(wm, id, usize::MAX),
                KeyCode::Enter | KeyCode::NumpadEnter => wm.raise_event(id, ControlEvent::EnterPressed),
                _ => {},
            }
        }
    }

    fn reset_keys(&mut self) {
        self.key_left.reset();
        self.key_right.reset();
        self.key_backspace.reset();
        self.key_delete.reset();
    }
}

impl Default for TextBox {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlBehavior for TextBox {
    fn type_name(&self) -> &'static str {
        "TextBox"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::TEXT_EDITABLE | Capabilities::SELECTABLE
    }

    fn initialize(&mut self, wm: &mut WindowManager, id: ControlId) -> Result<(), UiError> {
        let length = wm.text(id).chars().count();
        if let Some(max_length) = self.max_length.filter(|max| length > *max) {
            return Err(UiError::TextTooLong {
                name: wm.name(id).to_string(),
                length,
                max_length,
            });
        }
        self.caret = length;
        self.fix_view(wm, id);
        Ok(())
    }

    fn update(&mut self, wm: &mut WindowManager, id: ControlId) {
        if wm.is_selected(id) && wm.enabled(id) {
            self.handle_keys(wm, id);
        }
    }

    fn on_selected_changed(&mut self, _wm: &mut WindowManager, _id: ControlId, selected: bool) {
        if !selected {
            self.reset_keys();
        }
    }

    fn on_character_input(&mut self, wm: &mut WindowManager, id: ControlId, character: char) -> bool {
        if character.is_control() {
            return false;
        }
        self.insert(wm, id, character)
    }

    fn on_client_rectangle_updated(&mut self, wm: &mut WindowManager, id: ControlId) {
        self.fix_view(wm, id);
    }

    fn draw(&mut self, wm: &mut WindowManager, id: ControlId) -> Result<(), UiError> {
        let rectangle = wm.render_rectangle(id);
        let font = self.font(wm);
        let settings = wm.settings().clone();
        let selected = wm.is_selected(id);

        let background = wm.color_with_alpha(id, settings.background_color);
        wm.renderer_mut().fill_rectangle(rectangle, background);

        let text = self.visible_text(wm, id).to_string();
        let text_height = wm.renderer().measure_string("A", font).y as i32;
        let y = rectangle.y + (rectangle.height - text_height) / 2;
        if !text.is_empty() {
            let color = if wm.enabled(id) {
                self.text_color.unwrap_or(settings.text_color)
            } else {
                settings.disabled_item_color
            };
            let color = wm.color_with_alpha(id, color);
            wm.renderer_mut()
                .draw_string(&text, font, point(rectangle.x + TEXT_BORDER_DISTANCE, y), color);
        }

        let blink_on = (wm.frame_time().total.as_millis() / CARET_BLINK_MILLIS) % 2 == 0;
        if selected && blink_on {
            let before_caret = char_slice(wm.text(id), self.view_start, self.caret).to_string();
            let x = wm.renderer().measure_string(&before_caret, font).x as i32;
            let caret = Rectangle::new(rectangle.x + TEXT_BORDER_DISTANCE + x, y, 1, text_height);
            let color = wm.color_with_alpha(id, settings.text_color);
            wm.renderer_mut().fill_rectangle(caret, color);
        }

        let border = if selected {
            settings.focus_color
        } else {
            settings.panel_border_color
        };
        let border = wm.color_with_alpha(id, border);
        wm.renderer_mut().draw_rectangle(rectangle, border, 1);
        Ok(())
    }

    fn apply_attribute(&mut self, wm: &mut WindowManager, id: ControlId, key: &str, value: &str) -> bool {
        match key {
            "MaxLength" => match value.trim().parse() {
                Ok(max) => self.max_length = Some(max),
                Err(_) => log::warn!("Invalid max length '{}'", value),
            },
            "TextColor" => self.text_color = Some(Color::parse_or(value, wm.settings().text_color)),
            "FontIndex" => match value.trim().parse() {
                Ok(index) => self.font_index = Some(index),
                Err(_) => log::warn!("Invalid font index '{}'", value),
            },
            _ => return false,
        }
        self.fix_view(wm, id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_slices_respect_multibyte_text() {
        let text = "añb€";
        assert_eq!(byte_index(text, 2), 3);
        assert_eq!(char_slice(text, 1, 3), "ñb");
        assert_eq!(char_slice(text, 3, 9), "€");
    }
}
