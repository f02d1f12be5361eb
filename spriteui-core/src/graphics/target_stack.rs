// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::graphics::{GraphicsError, RenderBackend, RenderTarget, SpriteBatchSettings};

/// One bound render target together with the settings it was pushed with.
#[derive(Debug)]
struct RenderContext {
    target: Option<RenderTarget>,
    settings: SpriteBatchSettings,
    /// Settings replaced by [RenderTargetStack::push_settings] while this context is current.
    saved_settings: Vec<SpriteBatchSettings>,
    previous: Option<Box<RenderContext>>,
}

/// Stack of render contexts.
///
/// The root context holds the final target (`None` is the back buffer) and
/// can never be popped. Every push and pop flushes the running batch, so
/// sprites always land on the target that was bound when they were drawn.
#[derive(Debug)]
pub struct RenderTargetStack {
    current: Box<RenderContext>,
    depth: usize,
}

impl RenderTargetStack {
    /// Create a stack whose root context draws into `final_target`.
    pub fn new(final_target: Option<RenderTarget>, settings: SpriteBatchSettings) -> Self {
        Self {
            current: Box::new(RenderContext {
                target: final_target,
                settings,
                saved_settings: Vec::new(),
                previous: None,
            }),
            depth: 0,
        }
    }

    /// The target drawn to right now.
    pub fn current_target(&self) -> Option<&RenderTarget> {
        self.current.target.as_ref()
    }

    /// The sprite batch settings in effect right now.
    pub fn current_settings(&self) -> SpriteBatchSettings {
        self.current.settings
    }

    /// Number of contexts pushed on top of the root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Replace the root target. Only valid while nothing is pushed.
    pub fn set_final_target(&mut self, target: Option<RenderTarget>) -> Result<(), GraphicsError> {
        if self.depth != 0 {
            return Err(GraphicsError::UnbalancedRenderTargetStack { depth: self.depth });
        }

        self.current.target = target;
        Ok(())
    }

    /// Bind the current context and start a batch with its settings.
    pub fn begin(&self, backend: &mut dyn RenderBackend) {
        backend.bind_render_target(self.current.target.as_ref());
        backend.begin(&self.current.settings);
    }

    /// Flush, bind `target` and start a new batch.
    ///
    /// Without explicit `settings` the new context inherits the current ones.
    pub fn push(
        &mut self,
        backend: &mut dyn RenderBackend,
        target: RenderTarget,
        settings: Option<SpriteBatchSettings>,
    ) {
        backend.end();

        let settings = settings.unwrap_or(self.current.settings);
        let previous = std::mem::replace(
            &mut self.current,
            Box::new(RenderContext {
                target: Some(target),
                settings,
                saved_settings: Vec::new(),
                previous: None,
            }),
        );
        self.current.previous = Some(previous);
        self.depth += 1;

        self.begin(backend);
    }

    /// Flush and return to the previous context and its settings.
    pub fn pop(&mut self, backend: &mut dyn RenderBackend) -> Result<(), GraphicsError> {
        let Some(previous) = self.current.previous.take() else {
            return Err(GraphicsError::NoRenderContextLeft);
        };

        backend.end();
        self.current = previous;
        self.depth -= 1;
        self.begin(backend);
        Ok(())
    }

    /// Flush and restart the batch on the same target with different settings.
    pub fn push_settings(&mut self, backend: &mut dyn RenderBackend, settings: SpriteBatchSettings) {
        backend.end();
        let saved = std::mem::replace(&mut self.current.settings, settings);
        self.current.saved_settings.push(saved);
        backend.begin(&self.current.settings);
    }

    /// Undo the last [push_settings](Self::push_settings) of the current context.
    pub fn pop_settings(&mut self, backend: &mut dyn RenderBackend) -> Result<(), GraphicsError> {
        let Some(saved) = self.current.saved_settings.pop() else {
            return Err(GraphicsError::NoSettingsLeft);
        };

        backend.end();
        self.current.settings = saved;
        backend.begin(&self.current.settings);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::headless::{DrawCommand, HeadlessBackend};
    use crate::graphics::SamplerState;

    #[test]
    fn test_balanced_push_pop_restores_target() {
        let mut backend = HeadlessBackend::new();
        let root = backend.create_render_target(800, 600);
        let a = backend.create_render_target(10, 10);
        let b = backend.create_render_target(20, 20);
        let mut stack = RenderTargetStack::new(Some(root.clone()), SpriteBatchSettings::default());

        stack.push(&mut backend, a, None);
        stack.push(&mut backend, b.clone(), None);
        assert_eq!(stack.current_target(), Some(&b));
        assert_eq!(stack.depth(), 2);

        stack.pop(&mut backend).unwrap();
        stack.pop(&mut backend).unwrap();
        assert_eq!(stack.current_target(), Some(&root));
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_pop_past_root_fails() {
        let mut backend = HeadlessBackend::new();
        let a = backend.create_render_target(10, 10);
        let b = backend.create_render_target(10, 10);
        let mut stack = RenderTargetStack::new(None, SpriteBatchSettings::default());

        stack.push(&mut backend, a, None);
        stack.push(&mut backend, b, None);
        stack.pop(&mut backend).unwrap();
        stack.pop(&mut backend).unwrap();
        assert_eq!(stack.pop(&mut backend), Err(GraphicsError::NoRenderContextLeft));
        assert_eq!(stack.current_target(), None);
    }

    #[test]
    fn test_pop_restores_settings_of_previous_context() {
        let mut backend = HeadlessBackend::new();
        let a = backend.create_render_target(10, 10);
        let mut stack = RenderTargetStack::new(None, SpriteBatchSettings::default());

        stack.push(&mut backend, a, Some(SpriteBatchSettings::point_sampled()));
        assert_eq!(stack.current_settings().sampler_state, SamplerState::PointClamp);
        stack.pop(&mut backend).unwrap();
        assert_eq!(stack.current_settings(), SpriteBatchSettings::default());

        let commands = backend.log().commands();
        assert_eq!(
            commands.last(),
            Some(&DrawCommand::Begin(SpriteBatchSettings::default()))
        );
    }

    #[test]
    fn test_settings_stack() {
        let mut backend = HeadlessBackend::new();
        let mut stack = RenderTargetStack::new(None, SpriteBatchSettings::default());

        stack.push_settings(&mut backend, SpriteBatchSettings::point_sampled());
        assert_eq!(stack.current_settings().sampler_state, SamplerState::PointClamp);
        stack.pop_settings(&mut backend).unwrap();
        assert_eq!(stack.current_settings().sampler_state, SamplerState::LinearClamp);
        assert_eq!(stack.pop_settings(&mut backend), Err(GraphicsError::NoSettingsLeft));
    }
}
