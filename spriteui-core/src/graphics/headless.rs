// SPDX-License-Identifier: MIT OR Apache-2.0

//! A [RenderBackend] without a GPU.
//!
//! Every call is appended to a shared [CommandLog], which tests and tools can
//! inspect after a frame. Text is measured with a fixed glyph size.

use std::sync::{Arc, Mutex, PoisonError};

use nalgebra::Vector2;
use spriteui_theme::Color;

use crate::geometry::Rectangle;
use crate::graphics::{RenderBackend, RenderTarget, SpriteBatchSettings, Texture};

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A texture was created.
    CreateTexture {
        /// Texture id.
        id: u64,
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
    /// A render target was created.
    CreateRenderTarget {
        /// Target id.
        id: u64,
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
    /// A render target (or the back buffer for `None`) was bound.
    BindRenderTarget(Option<u64>),
    /// The bound target was cleared.
    Clear(Color),
    /// A batch was started.
    Begin(SpriteBatchSettings),
    /// A batch was flushed.
    End,
    /// A texture was drawn into a rectangle.
    DrawTexture {
        /// Texture id.
        texture: u64,
        /// Source rectangle.
        source: Option<Rectangle>,
        /// Destination rectangle.
        destination: Rectangle,
        /// Tint.
        color: Color,
    },
    /// A texture was drawn with a transform.
    DrawTextureTransformed {
        /// Texture id.
        texture: u64,
        /// Position.
        position: Vector2<f32>,
        /// Rotation in radians.
        rotation: f32,
        /// Scale.
        scale: Vector2<f32>,
        /// Tint.
        color: Color,
    },
    /// A string was drawn.
    DrawString {
        /// The text.
        text: String,
        /// Font index.
        font_index: usize,
        /// Position.
        position: Vector2<f32>,
        /// Color.
        color: Color,
    },
}

/// Shared, cloneable log of [DrawCommand]s.
#[derive(Debug, Clone, Default)]
pub struct CommandLog {
    commands: Arc<Mutex<Vec<DrawCommand>>>,
}

impl CommandLog {
    fn push(&self, command: DrawCommand) {
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(command);
    }

    /// A snapshot of every recorded command.
    pub fn commands(&self) -> Vec<DrawCommand> {
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Forget all recorded commands.
    pub fn clear(&self) {
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Recorded strings, in draw order.
    pub fn drawn_strings(&self) -> Vec<String> {
        self.commands()
            .into_iter()
            .filter_map(|command| match command {
                DrawCommand::DrawString { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    /// Destination rectangles of every texture draw using `texture`.
    pub fn texture_destinations(&self, texture: u64) -> Vec<Rectangle> {
        self.commands()
            .into_iter()
            .filter_map(|command| match command {
                DrawCommand::DrawTexture {
                    texture: id,
                    destination,
                    ..
                } if id == texture => Some(destination),
                _ => None,
            })
            .collect()
    }
}

/// A backend that records calls instead of drawing.
#[derive(Debug)]
pub struct HeadlessBackend {
    log: CommandLog,
    next_id: u64,
    glyph_size: Vector2<f32>,
}

impl HeadlessBackend {
    /// Create a backend with 8x16 glyphs.
    pub fn new() -> Self {
        Self {
            log: CommandLog::default(),
            next_id: 1,
            glyph_size: Vector2::new(8.0, 16.0),
        }
    }

    /// Use a different fixed glyph size for text measurement.
    pub fn with_glyph_size(mut self, width: f32, height: f32) -> Self {
        self.glyph_size = Vector2::new(width, height);
        self
    }

    /// A handle to the command log. Clones share the same log.
    pub fn log(&self) -> CommandLog {
        self.log.clone()
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for HeadlessBackend {
    fn create_texture(&mut self, width: u32, height: u32, _pixels: &[Color]) -> Texture {
        let id = self.next_id();
        self.log.push(DrawCommand::CreateTexture { id, width, height });
        Texture::new(id, width, height)
    }

    fn create_render_target(&mut self, width: u32, height: u32) -> RenderTarget {
        let id = self.next_id();
        self.log
            .push(DrawCommand::CreateRenderTarget { id, width, height });
        RenderTarget::new(id, width, height)
    }

    fn bind_render_target(&mut self, target: Option<&RenderTarget>) {
        self.log
            .push(DrawCommand::BindRenderTarget(target.map(RenderTarget::id)));
    }

    fn clear(&mut self, color: Color) {
        self.log.push(DrawCommand::Clear(color));
    }

    fn begin(&mut self, settings: &SpriteBatchSettings) {
        self.log.push(DrawCommand::Begin(*settings));
    }

    fn end(&mut self) {
        self.log.push(DrawCommand::End);
    }

    fn draw_texture(
        &mut self,
        texture: &Texture,
        source: Option<Rectangle>,
        destination: Rectangle,
        color: Color,
    ) {
        self.log.push(DrawCommand::DrawTexture {
            texture: texture.id(),
            source,
            destination,
            color,
        });
    }

    fn draw_texture_transformed(
        &mut self,
        texture: &Texture,
        _source: Option<Rectangle>,
        position: Vector2<f32>,
        rotation: f32,
        _origin: Vector2<f32>,
        scale: Vector2<f32>,
        color: Color,
    ) {
        self.log.push(DrawCommand::DrawTextureTransformed {
            texture: texture.id(),
            position,
            rotation,
            scale,
            color,
        });
    }

    fn draw_string(
        &mut self,
        text: &str,
        font_index: usize,
        position: Vector2<f32>,
        color: Color,
        _scale: f32,
    ) {
        self.log.push(DrawCommand::DrawString {
            text: text.to_string(),
            font_index,
            position,
            color,
        });
    }

    fn measure_string(&self, text: &str, _font_index: usize) -> Vector2<f32> {
        let lines = text.split('\n');
        let mut width = 0usize;
        let mut count = 0usize;
        for line in lines {
            width = width.max(line.chars().count());
            count += 1;
        }

        Vector2::new(
            width as f32 * self.glyph_size.x,
            count as f32 * self.glyph_size.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_uses_fixed_glyphs() {
        let backend = HeadlessBackend::new();
        assert_eq!(backend.measure_string("abcd", 0), Vector2::new(32.0, 16.0));
        assert_eq!(backend.measure_string("ab\nabc", 0), Vector2::new(24.0, 32.0));
    }

    #[test]
    fn test_log_is_shared_between_clones() {
        let mut backend = HeadlessBackend::new();
        let log = backend.log();
        backend.clear(Color::BLACK);
        assert_eq!(log.commands(), vec![DrawCommand::Clear(Color::BLACK)]);
        log.clear();
        assert!(backend.log().commands().is_empty());
    }
}
