// SPDX-License-Identifier: MIT OR Apache-2.0

use spriteui_core::control::{ControlBehavior, ControlId};
use spriteui_core::error::UiError;
use spriteui_core::geometry::Rectangle;
use spriteui_core::graphics::Texture;
use spriteui_core::window_manager::parse_bool;
use spriteui_core::WindowManager;
use spriteui_theme::Color;

/// How a panel draws its background texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelBackgroundImageDrawMode {
    /// Repeat the texture over the whole panel.
    Tiled,
    /// Draw the texture once, centered, at its natural size.
    Centered,
    /// Stretch the texture over the whole panel.
    #[default]
    Stretched,
}

impl PanelBackgroundImageDrawMode {
    /// Parse the attribute form (`Tiled`, `Centered` or `Stretched`).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tiled" => Some(Self::Tiled),
            "centered" => Some(Self::Centered),
            "stretched" => Some(Self::Stretched),
            _ => None,
        }
    }
}

/// A rectangular container with an optional background and border.
///
/// Without a background texture the panel is filled with
/// [UiSettings::panel_background_color](spriteui_theme::UiSettings::panel_background_color)
/// unless a background color is given explicitly.
///
/// ```rust
/// use spriteui_core::control::Control;
/// use spriteui_widgets::panel::{Panel, PanelBackgroundImageDrawMode};
///
/// let panel = Control::new(
///     Panel::new()
///         .with_background_texture("panelBg.png")
///         .with_draw_mode(PanelBackgroundImageDrawMode::Tiled),
/// )
/// .with_size(200, 120);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Panel {
    background_texture_name: Option<String>,
    background_texture: Option<Texture>,
    background_color: Option<Color>,
    border_color: Option<Color>,
    draw_mode: PanelBackgroundImageDrawMode,
    draw_border: bool,
}

impl Panel {
    /// Create a panel drawn with the default colors and a border.
    pub fn new() -> Self {
        Self {
            draw_border: true,
            ..Default::default()
        }
    }

    /// Create a panel that draws nothing itself.
    pub fn transparent() -> Self {
        Self::new()
            .with_background_color(Color::TRANSPARENT)
            .with_draw_border(false)
    }

    /// Use the named texture as background. It is loaded on initialization.
    pub fn with_background_texture(mut self, name: impl Into<String>) -> Self {
        self.background_texture_name = Some(name.into());
        self
    }

    /// Set the fill color used when there is no background texture.
    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    /// Set the border color.
    pub fn with_border_color(mut self, color: Color) -> Self {
        self.border_color = Some(color);
        self
    }

    /// Set how the background texture is drawn.
    pub fn with_draw_mode(mut self, mode: PanelBackgroundImageDrawMode) -> Self {
        self.draw_mode = mode;
        self
    }

    /// Set whether a one pixel border is drawn.
    pub fn with_draw_border(mut self, draw_border: bool) -> Self {
        self.draw_border = draw_border;
        self
    }

    /// Replace the background texture.
    pub fn set_background_texture(&mut self, texture: Option<Texture>) {
        self.background_texture = texture;
    }

    /// The background texture, once loaded.
    pub fn background_texture(&self) -> Option<&Texture> {
        self.background_texture.as_ref()
    }

    /// How the background texture is drawn.
    pub fn draw_mode(&self) -> PanelBackgroundImageDrawMode {
        self.draw_mode
    }

    /// Draw the background and border of a panel-like control.
    pub fn draw_panel(&self, wm: &mut WindowManager, id: ControlId) {
        let rectangle = wm.render_rectangle(id);

        match &self.background_texture {
            Some(texture) => {
                let color = wm.color_with_alpha(id, wm.remap_color(id));
                draw_texture_with_mode(wm, texture, rectangle, self.draw_mode, color);
            },
            None => {
                let fill = self
                    .background_color
                    .unwrap_or(wm.settings().panel_background_color);
                if fill.a > 0 {
                    let color = wm.color_with_alpha(id, fill);
                    wm.renderer_mut().fill_rectangle(rectangle, color);
                }
            },
        }

        if self.draw_border {
            let border = self
                .border_color
                .unwrap_or(wm.settings().panel_border_color);
            draw_border(wm, id, border);
        }
    }
}

/// Draw a one pixel border around a control.
pub fn draw_border(wm: &mut WindowManager, id: ControlId, color: Color) {
    let rectangle = wm.render_rectangle(id);
    let color = wm.color_with_alpha(id, color);
    wm.renderer_mut().draw_rectangle(rectangle, color, 1);
}

/// Fill a control with a color.
pub fn fill_background(wm: &mut WindowManager, id: ControlId, color: Color) {
    let rectangle = wm.render_rectangle(id);
    let color = wm.color_with_alpha(id, color);
    wm.renderer_mut().fill_rectangle(rectangle, color);
}

/// Draw a texture into `area` the way `mode` describes.
pub fn draw_texture_with_mode(
    wm: &mut WindowManager,
    texture: &Texture,
    area: Rectangle,
    mode: PanelBackgroundImageDrawMode,
    color: Color,
) {
    let (tex_width, tex_height) = (texture.width() as i32, texture.height() as i32);
    if tex_width == 0 || tex_height == 0 {
        return;
    }

    match mode {
        PanelBackgroundImageDrawMode::Stretched => {
            wm.renderer_mut().draw_texture(texture, area, color);
        },
        PanelBackgroundImageDrawMode::Centered => {
            let x = area.x + (area.width - tex_width) / 2;
            let y = area.y + (area.height - tex_height) / 2;
            wm.renderer_mut()
                .draw_texture(texture, Rectangle::new(x, y, tex_width, tex_height), color);
        },
        PanelBackgroundImageDrawMode::Tiled => {
            let mut y = 0;
            while y < area.height {
                let height = tex_height.min(area.height - y);
                let mut x = 0;
                while x < area.width {
                    let width = tex_width.min(area.width - x);
                    wm.renderer_mut().draw_texture_part(
                        texture,
                        Rectangle::new(0, 0, width, height),
                        Rectangle::new(area.x + x, area.y + y, width, height),
                        color,
                    );
                    x += tex_width;
                }
                y += tex_height;
            }
        },
    }
}

impl ControlBehavior for Panel {
    fn type_name(&self) -> &'static str {
        "Panel"
    }

    fn initialize(&mut self, wm: &mut WindowManager, _id: ControlId) -> Result<(), UiError> {
        if let Some(name) = &self.background_texture_name {
            self.background_texture = Some(wm.load_texture(name));
        }
        Ok(())
    }

    fn draw(&mut self, wm: &mut WindowManager, id: ControlId) -> Result<(), UiError> {
        self.draw_panel(wm, id);
        Ok(())
    }

    fn apply_attribute(&mut self, wm: &mut WindowManager, _id: ControlId, key: &str, value: &str) -> bool {
        match key {
            "BackgroundTexture" => {
                self.background_texture_name = Some(value.to_string());
                self.background_texture = Some(wm.load_texture(value));
            },
            "DrawMode" => match PanelBackgroundImageDrawMode::parse(value) {
                Some(mode) => self.draw_mode = mode,
                None => log::warn!("Unknown panel draw mode '{}'", value),
            },
            "DrawBorder" => self.draw_border = parse_bool(value).unwrap_or(self.draw_border),
            "BorderColor" => {
                self.border_color = Some(Color::parse_or(value, wm.settings().panel_border_color))
            },
            "BackgroundColor" => {
                self.background_color = Some(Color::parse_or(value, wm.settings().panel_background_color))
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
    use spriteui_core::graphics::headless::DrawCommand;

    #[test]
    fn test_tiled_background_is_clipped_to_the_panel() {
        let (mut wm, log) = WindowManager::headless(100, 100);
        let texture = wm.create_solid_texture(Color::WHITE, 16, 16);
        let texture_id = texture.id();
        let mut panel = Panel::new()
            .with_draw_mode(PanelBackgroundImageDrawMode::Tiled)
            .with_draw_border(false);
        panel.set_background_texture(Some(texture));
        let id = wm.create(Control::new(panel).with_size(40, 20));
        wm.add_control(id).unwrap();

        wm.draw().unwrap();

        let destinations = log.texture_destinations(texture_id);
        assert_eq!(destinations.len(), 6);
        assert!(destinations.contains(&Rectangle::new(32, 16, 8, 4)));
        let partial = log.commands().into_iter().any(|command| {
            matches!(command, DrawCommand::DrawTexture { source: Some(source), .. } if source == Rectangle::new(0, 0, 8, 4))
        });
        assert!(partial);
    }

    #[test]
    fn test_draw_mode_attribute() {
        let (mut wm, _log) = WindowManager::headless(100, 100);
        let id = wm.create(Control::new(Panel::new()));
        wm.apply_attribute(id, "DrawMode", "Centered");
        wm.apply_attribute(id, "DrawBorder", "no");

        let panel = wm.behavior::<Panel>(id).unwrap();
        assert_eq!(panel.draw_mode(), PanelBackgroundImageDrawMode::Centered);
        assert!(!panel.draw_border);
    }
}
