// SPDX-License-Identifier: MIT OR Apache-2.0

use spriteui_core::control::{ControlBehavior, ControlId};
use spriteui_core::error::UiError;
use spriteui_core::geometry::point;
use spriteui_core::graphics::Texture;
use spriteui_core::WindowManager;
use spriteui_theme::Color;

use crate::panel::draw_border;

/// A clickable button with text and an optional idle/hover texture pair.
///
/// The hover texture fades in while the cursor is over the button. Clicks
/// are reported through the usual
/// [ControlEvent::LeftClick](spriteui_core::control::ControlEvent::LeftClick).
///
/// ```rust
/// use spriteui_core::control::{Control, ControlEvent};
/// use spriteui_core::WindowManager;
/// use spriteui_widgets::button::Button;
///
/// let (mut wm, _log) = WindowManager::headless(320, 240);
/// let ok = wm.create(Control::new(Button::new()).with_text("OK").with_size(80, 20));
/// wm.on(ok, ControlEvent::LeftClick, |wm, id| wm.set_text(id, "Clicked"));
/// wm.add_control(ok).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Button {
    idle_texture_name: Option<String>,
    hover_texture_name: Option<String>,
    idle_texture: Option<Texture>,
    hover_texture: Option<Texture>,
    font_index: Option<usize>,
    text_color: Option<Color>,
    hover_text_color: Option<Color>,
    alpha_rate: Option<f32>,
    hover_alpha: f32,
}

impl Button {
    /// Create a button drawn with the default colors.
    pub fn new() -> Self {
        Self {
            idle_texture_name: None,
            hover_texture_name: None,
            idle_texture: None,
            hover_texture: None,
            font_index: None,
            text_color: None,
            hover_text_color: None,
            alpha_rate: None,
            hover_alpha: 0.0,
        }
    }

    /// Use textures for the idle and hovered states. They are loaded on initialization.
    pub fn with_textures(mut self, idle: impl Into<String>, hover: impl Into<String>) -> Self {
        self.idle_texture_name = Some(idle.into());
        self.hover_texture_name = Some(hover.into());
        self
    }

    /// Set the font.
    pub fn with_font_index(mut self, font_index: usize) -> Self {
        self.font_index = Some(font_index);
        self
    }

    /// Set the text colors of the idle and hovered states.
    pub fn with_text_colors(mut self, idle: Color, hover: Color) -> Self {
        self.text_color = Some(idle);
        self.hover_text_color = Some(hover);
        self
    }

    /// Set how fast the hover state fades, in alpha per second.
    pub fn with_alpha_rate(mut self, rate: f32) -> Self {
        self.alpha_rate = Some(rate);
        self
    }

    /// Opacity of the hover state, between 0 and 1.
    pub fn hover_alpha(&self) -> f32 {
        self.hover_alpha
    }
}

impl Default for Button {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlBehavior for Button {
    fn type_name(&self) -> &'static str {
        "Button"
    }

    fn initialize(&mut self, wm: &mut WindowManager, _id: ControlId) -> Result<(), UiError> {
        if let Some(name) = &self.idle_texture_name {
            self.idle_texture = Some(wm.load_texture(name));
        }
        if let Some(name) = &self.hover_texture_name {
            self.hover_texture = Some(wm.load_texture(name));
        }
        Ok(())
    }

    fn update(&mut self, wm: &mut WindowManager, id: ControlId) {
        let rate = self.alpha_rate.unwrap_or(wm.settings().default_alpha_rate);
        let step = rate * wm.frame_time().elapsed_secs();
        let hovered = wm.is_cursor_over(id) && wm.enabled(id);
        self.hover_alpha = if hovered {
            (self.hover_alpha + step).min(1.0)
        } else {
            (self.hover_alpha - step).max(0.0)
        };
    }

    fn draw(&mut self, wm: &mut WindowManager, id: ControlId) -> Result<(), UiError> {
        let rectangle = wm.render_rectangle(id);
        let remap = wm.remap_color(id);

        match (&self.idle_texture, &self.hover_texture) {
            (Some(idle), hover) => {
                let color = wm.color_with_alpha(id, remap);
                wm.renderer_mut().draw_texture(idle, rectangle, color);
                if let Some(hover) = hover {
                    let color = wm.color_with_alpha(id, remap.multiply_alpha(self.hover_alpha));
                    wm.renderer_mut().draw_texture(hover, rectangle, color);
                }
            },
            (None, _) => {
                let background = wm.color_with_alpha(id, wm.settings().background_color);
                wm.renderer_mut().fill_rectangle(rectangle, background);
                let hover = wm.settings().alt_color.multiply_alpha(self.hover_alpha * 0.5);
                let hover = wm.color_with_alpha(id, hover);
                wm.renderer_mut().fill_rectangle(rectangle, hover);
                let border = wm.settings().panel_border_color;
                draw_border(wm, id, border);
            },
        }

        let text = wm.text(id).to_string();
        if !text.is_empty() {
            let font = self.font_index.unwrap_or(wm.settings().default_font_index);
            let settings = wm.settings();
            let color = if !wm.enabled(id) {
                settings.disabled_item_color
            } else if self.hover_alpha > 0.5 {
                self.hover_text_color.unwrap_or(settings.button_hover_color)
            } else {
                self.text_color.unwrap_or(settings.button_text_color)
            };
            let color = wm.color_with_alpha(id, color);
            let size = wm.renderer().measure_string(&text, font);
            let position = point(
                rectangle.x + (rectangle.width - size.x as i32) / 2,
                rectangle.y + (rectangle.height - size.y as i32) / 2,
            );
            wm.renderer_mut().draw_string(&text, font, position, color);
        }
        Ok(())
    }

    fn apply_attribute(&mut self, wm: &mut WindowManager, _id: ControlId, key: &str, value: &str) -> bool {
        match key {
            "IdleTexture" => {
                self.idle_texture_name = Some(value.to_string());
                self.idle_texture = Some(wm.load_texture(value));
            },
            "HoverTexture" => {
                self.hover_texture_name = Some(value.to_string());
                self.hover_texture = Some(wm.load_texture(value));
            },
            "FontIndex" => match value.trim().parse() {
                Ok(index) => self.font_index = Some(index),
                Err(_) => log::warn!("Invalid font index '{}'", value),
            },
            "TextColor" => self.text_color = Some(Color::parse_or(value, wm.settings().button_text_color)),
            "HoverTextColor" => {
                self.hover_text_color = Some(Color::parse_or(value, wm.settings().button_hover_color))
            },
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spriteui_core::control::Control;
    use std::time::Duration;

    #[test]
    fn test_hover_fades_in_and_out() {
        let (mut wm, _log) = WindowManager::headless(200, 200);
        let id = wm.create(
            Control::new(Button::new().with_alpha_rate(2.0)).with_client_rectangle(10, 10, 50, 20),
        );
        wm.add_control(id).unwrap();

        wm.cursor_mut().set_location(point(20, 20));
        for _ in 0..3 {
            wm.update(Duration::from_millis(250));
        }
        let alpha = wm.behavior::<Button>(id).unwrap().hover_alpha();
        assert!((alpha - 1.0).abs() < 1e-4, "{alpha}");

        wm.cursor_mut().set_location(point(150, 150));
        wm.update(Duration::from_millis(250));
        wm.update(Duration::from_millis(250));
        let alpha = wm.behavior::<Button>(id).unwrap().hover_alpha();
        assert!((alpha - 0.5).abs() < 1e-4, "{alpha}");
    }
}
