// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rendering abstraction.
//!
//! Controls never talk to a GPU directly. They draw through the [Renderer](renderer::Renderer),
//! which composes its primitives out of the small [RenderBackend] trait. A real application
//! plugs its sprite batch in as the backend; tests use the [HeadlessBackend](headless::HeadlessBackend).

use nalgebra::Vector2;
use spriteui_theme::Color;
use thiserror::Error;

use crate::geometry::Rectangle;

/// A backend that records draw calls instead of rasterizing them.
pub mod headless;

/// Best-fit pool of reusable render targets.
pub mod pool;

/// The drawing-primitives front end used by controls.
pub mod renderer;

/// Linked-list stack of bound render targets.
pub mod target_stack;

/// Word wrapping for text drawn through the renderer.
pub mod text;

/// Handle to a GPU texture owned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Texture {
    id: u64,
    width: u32,
    height: u32,
}

impl Texture {
    /// Create a texture handle. Only backends should call this.
    pub fn new(id: u64, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }

    /// Backend-specific identifier.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The full texture area as a rectangle at the origin.
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(0, 0, self.width as i32, self.height as i32)
    }
}

/// Handle to an offscreen image buffer that can be bound for drawing and
/// then drawn like a texture.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderTarget {
    texture: Texture,
}

impl RenderTarget {
    /// Create a render target handle. Only backends should call this.
    pub fn new(id: u64, width: u32, height: u32) -> Self {
        Self {
            texture: Texture::new(id, width, height),
        }
    }

    /// Backend-specific identifier.
    pub fn id(&self) -> u64 {
        self.texture.id
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.texture.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.texture.height
    }

    /// If this target is at least `width` x `height`.
    pub fn fits(&self, width: u32, height: u32) -> bool {
        self.width() >= width && self.height() >= height
    }

    /// View the target as a texture for drawing it back.
    pub fn as_texture(&self) -> &Texture {
        &self.texture
    }
}

/// How sprites are ordered inside one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpriteSortMode {
    /// Draw in submission order when the batch ends.
    #[default]
    Deferred,
    /// Draw every sprite immediately.
    Immediate,
    /// Group sprites by texture.
    Texture,
}

/// How sprites are blended onto the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendState {
    /// Premultiplied alpha blending.
    #[default]
    AlphaBlend,
    /// Straight alpha blending.
    NonPremultiplied,
    /// Additive blending.
    Additive,
    /// No blending.
    Opaque,
}

/// How textures are sampled when scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplerState {
    /// Smooth sampling, clamped at the edges.
    #[default]
    LinearClamp,
    /// Nearest-neighbor sampling, clamped at the edges.
    PointClamp,
    /// Smooth sampling, repeated at the edges.
    LinearWrap,
    /// Nearest-neighbor sampling, repeated at the edges.
    PointWrap,
}

/// The sprite batch settings in effect while a render target is bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpriteBatchSettings {
    /// Sprite ordering.
    pub sort_mode: SpriteSortMode,
    /// Blending.
    pub blend_state: BlendState,
    /// Texture sampling.
    pub sampler_state: SamplerState,
}

impl SpriteBatchSettings {
    /// Default settings with nearest-neighbor sampling.
    pub fn point_sampled() -> Self {
        Self::default().with_sampler_state(SamplerState::PointClamp)
    }

    /// Replace the sampler state.
    pub fn with_sampler_state(mut self, sampler_state: SamplerState) -> Self {
        self.sampler_state = sampler_state;
        self
    }

    /// Replace the blend state.
    pub fn with_blend_state(mut self, blend_state: BlendState) -> Self {
        self.blend_state = blend_state;
        self
    }
}

/// The low-level sprite batch interface an application provides.
///
/// Calls arrive in the order a sprite batch expects: `bind_render_target`,
/// `begin`, any number of draws, `end`.
pub trait RenderBackend {
    /// Upload a texture from row-major pixels.
    fn create_texture(&mut self, width: u32, height: u32, pixels: &[Color]) -> Texture;

    /// Allocate an offscreen render target.
    fn create_render_target(&mut self, width: u32, height: u32) -> RenderTarget;

    /// Bind a render target, or the back buffer for `None`.
    fn bind_render_target(&mut self, target: Option<&RenderTarget>);

    /// Clear the bound target.
    fn clear(&mut self, color: Color);

    /// Start a sprite batch.
    fn begin(&mut self, settings: &SpriteBatchSettings);

    /// Flush the current sprite batch.
    fn end(&mut self);

    /// Draw (a part of) a texture stretched into `destination`.
    fn draw_texture(
        &mut self,
        texture: &Texture,
        source: Option<Rectangle>,
        destination: Rectangle,
        color: Color,
    );

    /// Draw a texture rotated around `origin` and scaled by `scale`.
    #[allow(clippy::too_many_arguments)]
    fn draw_texture_transformed(
        &mut self,
        texture: &Texture,
        source: Option<Rectangle>,
        position: Vector2<f32>,
        rotation: f32,
        origin: Vector2<f32>,
        scale: Vector2<f32>,
        color: Color,
    );

    /// Draw a string with the font at `font_index`.
    fn draw_string(
        &mut self,
        text: &str,
        font_index: usize,
        position: Vector2<f32>,
        color: Color,
        scale: f32,
    );

    /// Measure a string drawn with the font at `font_index`.
    fn measure_string(&self, text: &str, font_index: usize) -> Vector2<f32>;
}

/// Errors raised by the render-target stack.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphicsError {
    /// A pop was requested while only the root context remained.
    ///
    /// Usually a control with a unique render target was drawn twice
    /// without the matching pop in between.
    #[error("No render context left to pop; push/pop calls are mismatched")]
    NoRenderContextLeft,

    /// A frame ended while render targets were still pushed.
    #[error("Frame ended with {depth} render target(s) still pushed")]
    UnbalancedRenderTargetStack {
        /// Number of outstanding pushes.
        depth: usize,
    },

    /// A settings pop was requested without a matching push.
    #[error("No sprite batch settings left to pop")]
    NoSettingsLeft,
}
