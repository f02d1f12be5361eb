// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::{Mutex, PoisonError};

use nalgebra::Vector2;
use spriteui_theme::Color;

use crate::geometry::{Point, Rectangle};
use crate::graphics::pool::RenderTargetPool;
use crate::graphics::target_stack::RenderTargetStack;
use crate::graphics::text::{wrap_lines, WrapOptions};
use crate::graphics::{GraphicsError, RenderBackend, RenderTarget, SpriteBatchSettings, Texture};

/// Drawing front end handed to every control.
///
/// Owns the backend, the render target stack, the render target pool, the
/// final render-resolution target and the shared scratch target that detached
/// controls are drawn through when scaled.
pub struct Renderer {
    backend: Box<dyn RenderBackend>,
    stack: RenderTargetStack,
    pool: Mutex<RenderTargetPool>,
    final_target: RenderTarget,
    detached_target: Option<RenderTarget>,
    white_pixel: Texture,
}

impl Renderer {
    /// Create a renderer drawing at `width` x `height` render resolution.
    pub fn new(mut backend: Box<dyn RenderBackend>, width: u32, height: u32) -> Self {
        let white_pixel = backend.create_texture(1, 1, &[Color::WHITE]);
        let final_target = backend.create_render_target(width.max(1), height.max(1));
        let stack = RenderTargetStack::new(Some(final_target.clone()), SpriteBatchSettings::default());

        Self {
            backend,
            stack,
            pool: Mutex::new(RenderTargetPool::new()),
            final_target,
            detached_target: None,
            white_pixel,
        }
    }

    /// The backend, for creating textures.
    pub fn backend_mut(&mut self) -> &mut dyn RenderBackend {
        self.backend.as_mut()
    }

    /// The render resolution.
    pub fn render_resolution(&self) -> (u32, u32) {
        (self.final_target.width(), self.final_target.height())
    }

    /// Change the render resolution. Only valid between frames.
    pub fn set_render_resolution(&mut self, width: u32, height: u32) -> Result<(), GraphicsError> {
        let target = self.backend.create_render_target(width.max(1), height.max(1));
        self.stack.set_final_target(Some(target.clone()))?;
        self.final_target = target;
        Ok(())
    }

    /// Number of render targets pushed on top of the final target.
    pub fn render_target_depth(&self) -> usize {
        self.stack.depth()
    }

    /// The render target drawn to right now.
    pub fn current_render_target(&self) -> Option<&RenderTarget> {
        self.stack.current_target()
    }

    /// Bind the final target, clear it and start the first batch.
    pub fn begin_frame(&mut self, clear_color: Color) {
        self.stack.begin(self.backend.as_mut());
        self.backend.clear(clear_color);
    }

    /// Finish the frame and present the final target into `destination` on the back buffer.
    pub fn end_frame(&mut self, destination: Rectangle) -> Result<(), GraphicsError> {
        if self.stack.depth() != 0 {
            let depth = self.stack.depth();
            log::error!("Frame ended with {} render target(s) still pushed", depth);
            return Err(GraphicsError::UnbalancedRenderTargetStack { depth });
        }

        self.backend.end();
        self.backend.bind_render_target(None);
        self.backend.clear(Color::BLACK);
        self.backend.begin(&SpriteBatchSettings::default());
        self.backend.draw_texture(
            self.final_target.as_texture(),
            None,
            destination,
            Color::WHITE,
        );
        self.backend.end();
        Ok(())
    }

    /// Push a render target. Without `settings`, the current settings carry over.
    pub fn push_render_target(&mut self, target: RenderTarget, settings: Option<SpriteBatchSettings>) {
        self.stack.push(self.backend.as_mut(), target, settings);
    }

    /// Pop back to the previous render target.
    pub fn pop_render_target(&mut self) -> Result<(), GraphicsError> {
        self.stack.pop(self.backend.as_mut())
    }

    /// Restart the batch on the current target with different settings.
    pub fn push_settings(&mut self, settings: SpriteBatchSettings) {
        self.stack.push_settings(self.backend.as_mut(), settings);
    }

    /// Undo the last [push_settings](Self::push_settings).
    pub fn pop_settings(&mut self) -> Result<(), GraphicsError> {
        self.stack.pop_settings(self.backend.as_mut())
    }

    /// Get a pooled render target of at least `width` x `height`.
    pub fn acquire_render_target(&mut self, width: u32, height: u32) -> RenderTarget {
        let mut pool = self.pool.lock().unwrap_or_else(PoisonError::into_inner);
        pool.acquire(self.backend.as_mut(), width, height)
    }

    /// Hand a render target back to the pool.
    pub fn release_render_target(&self, target: RenderTarget) {
        self.pool
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .release(target);
    }

    /// Number of render targets waiting in the pool.
    pub fn pooled_render_targets(&self) -> usize {
        self.pool.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// The scratch target shared by all scaled detached controls, grown to
    /// at least `width` x `height`.
    ///
    /// Only one detached control may draw through it at a time.
    pub fn detached_render_target(&mut self, width: u32, height: u32) -> RenderTarget {
        if let Some(target) = self.detached_target.as_ref().filter(|t| t.fits(width, height)) {
            return target.clone();
        }

        let (old_w, old_h) = self
            .detached_target
            .as_ref()
            .map(|t| (t.width(), t.height()))
            .unwrap_or((0, 0));
        let target = self
            .backend
            .create_render_target(width.max(old_w), height.max(old_h));
        log::debug!(
            "Detached control render target resized to {}x{}",
            target.width(),
            target.height()
        );
        self.detached_target = Some(target.clone());
        target
    }

    /// Clear the bound target.
    pub fn clear(&mut self, color: Color) {
        self.backend.clear(color);
    }

    /// Draw a whole texture stretched into `destination`.
    pub fn draw_texture(&mut self, texture: &Texture, destination: Rectangle, color: Color) {
        self.backend.draw_texture(texture, None, destination, color);
    }

    /// Draw the `source` part of a texture stretched into `destination`.
    pub fn draw_texture_part(
        &mut self,
        texture: &Texture,
        source: Rectangle,
        destination: Rectangle,
        color: Color,
    ) {
        self.backend
            .draw_texture(texture, Some(source), destination, color);
    }

    /// Draw the `source` part of a render target into `destination`.
    pub fn draw_render_target(
        &mut self,
        target: &RenderTarget,
        source: Rectangle,
        destination: Rectangle,
        color: Color,
    ) {
        self.draw_texture_part(target.as_texture(), source, destination, color);
    }

    /// Fill a rectangle with a solid color.
    pub fn fill_rectangle(&mut self, rectangle: Rectangle, color: Color) {
        let pixel = self.white_pixel.clone();
        self.backend.draw_texture(&pixel, None, rectangle, color);
    }

    /// Draw the outline of a rectangle, `thickness` pixels wide, inside its bounds.
    pub fn draw_rectangle(&mut self, rectangle: Rectangle, color: Color, thickness: i32) {
        let Rectangle {
            x,
            y,
            width,
            height,
        } = rectangle;
        let t = thickness.min(width).min(height).max(0);
        if t == 0 {
            return;
        }

        self.fill_rectangle(Rectangle::new(x, y, width, t), color);
        self.fill_rectangle(Rectangle::new(x, y + height - t, width, t), color);
        self.fill_rectangle(Rectangle::new(x, y + t, t, height - t * 2), color);
        self.fill_rectangle(Rectangle::new(x + width - t, y + t, t, height - t * 2), color);
    }

    /// Draw a line as a rotated quad.
    pub fn draw_line(&mut self, start: Vector2<f32>, end: Vector2<f32>, color: Color, thickness: f32) {
        let delta = end - start;
        let rotation = delta.y.atan2(delta.x);
        let pixel = self.white_pixel.clone();

        self.backend.draw_texture_transformed(
            &pixel,
            None,
            start,
            rotation,
            Vector2::new(0.0, 0.5),
            Vector2::new(delta.norm(), thickness),
            color,
        );
    }

    /// Draw a string at its natural size.
    pub fn draw_string(&mut self, text: &str, font_index: usize, position: Point, color: Color) {
        self.draw_string_scaled(text, font_index, position, color, 1.0);
    }

    /// Draw a string with a scale factor.
    pub fn draw_string_scaled(
        &mut self,
        text: &str,
        font_index: usize,
        position: Point,
        color: Color,
        scale: f32,
    ) {
        let position = Vector2::new(position.x as f32, position.y as f32);
        self.backend
            .draw_string(text, font_index, position, color, scale);
    }

    /// Draw a string with a one-pixel shadow down and to the right.
    pub fn draw_string_with_shadow(
        &mut self,
        text: &str,
        font_index: usize,
        position: Point,
        color: Color,
        shadow_color: Color,
    ) {
        self.draw_string(text, font_index, position + Point::new(1, 1), shadow_color);
        self.draw_string(text, font_index, position, color);
    }

    /// Measure a string.
    pub fn measure_string(&self, text: &str, font_index: usize) -> Vector2<f32> {
        self.backend.measure_string(text, font_index)
    }

    /// Wrap text into lines that fit `max_width` pixels with the given font.
    pub fn wrap_text(
        &self,
        text: &str,
        font_index: usize,
        max_width: i32,
        options: WrapOptions,
    ) -> Vec<String> {
        wrap_lines(text, max_width as f32, options, |line| {
            self.backend.measure_string(line, font_index).x
        })
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("stack", &self.stack)
            .field("final_target", &self.final_target)
            .field("detached_target", &self.detached_target)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::headless::{CommandLog, DrawCommand, HeadlessBackend};

    fn renderer() -> (Renderer, CommandLog) {
        let backend = HeadlessBackend::new();
        let log = backend.log();
        (Renderer::new(Box::new(backend), 320, 200), log)
    }

    #[test]
    fn test_end_frame_rejects_outstanding_push() {
        let (mut renderer, _) = renderer();
        renderer.begin_frame(Color::BLACK);
        let target = renderer.acquire_render_target(10, 10);
        renderer.push_render_target(target, None);

        assert_eq!(
            renderer.end_frame(Rectangle::new(0, 0, 320, 200)),
            Err(GraphicsError::UnbalancedRenderTargetStack { depth: 1 })
        );
    }

    #[test]
    fn test_outline_stays_inside_bounds() {
        let (mut renderer, log) = renderer();
        log.clear();
        renderer.draw_rectangle(Rectangle::new(10, 10, 20, 10), Color::WHITE, 2);

        let fills: Vec<Rectangle> = log
            .commands()
            .into_iter()
            .filter_map(|c| match c {
                DrawCommand::DrawTexture { destination, .. } => Some(destination),
                _ => None,
            })
            .collect();
        assert_eq!(
            fills,
            vec![
                Rectangle::new(10, 10, 20, 2),
                Rectangle::new(10, 18, 20, 2),
                Rectangle::new(10, 12, 2, 6),
                Rectangle::new(28, 12, 2, 6),
            ]
        );
    }

    #[test]
    fn test_shadow_is_drawn_first() {
        let (mut renderer, log) = renderer();
        log.clear();
        renderer.draw_string_with_shadow("hi", 0, Point::new(5, 5), Color::WHITE, Color::BLACK);

        let commands = log.commands();
        assert!(matches!(
            &commands[0],
            DrawCommand::DrawString { color, position, .. } if *color == Color::BLACK && position.x == 6.0
        ));
        assert!(matches!(
            &commands[1],
            DrawCommand::DrawString { color, .. } if *color == Color::WHITE
        ));
    }

    #[test]
    fn test_detached_target_grows_but_is_reused() {
        let (mut renderer, _) = renderer();
        let a = renderer.detached_render_target(50, 20);
        let b = renderer.detached_render_target(40, 10);
        assert_eq!(a, b);

        let c = renderer.detached_render_target(30, 60);
        assert_ne!(a, c);
        assert_eq!((c.width(), c.height()), (50, 60));
    }

    #[test]
    fn test_wrap_text_uses_backend_measurement() {
        let (renderer, _) = renderer();
        let lines = renderer.wrap_text("aa bb cc", 0, 32, WrapOptions::default());
        assert_eq!(lines, vec!["aa", "bb", "cc"]);
    }
}
