// SPDX-License-Identifier: MIT OR Apache-2.0

//! The root of the UI.
//!
//! The [WindowManager] owns every control, the input devices, the renderer
//! and the assets, and drives the update and draw passes. It is also the
//! context handed to every [ControlBehavior] hook, so controls reach the
//! rest of the tree exclusively through it.

use std::time::Duration;

use nalgebra::Vector2;
use spriteui_theme::{Color, UiSettings};
use winit::event::{Ime, WindowEvent};

use crate::assets::{AssetProvider, ContentLoader, Sound};
use crate::callbacks::CallbackQueue;
use crate::control::tree::ControlTree;
use crate::control::{ChildList, ControlBehavior, ControlEvent, ControlId};
use crate::config::UiConfig;
use crate::geometry::Rectangle;
use crate::graphics::headless::{CommandLog, HeadlessBackend};
use crate::graphics::renderer::Renderer;
use crate::graphics::{RenderBackend, Texture};
use crate::input::keyboard::{KeyPressHandler, KeySubscribers};
use crate::input::{Cursor, InputContext, KeyPressEvent, Keyboard, SubscriptionId};
use crate::time::FrameTime;

mod attributes;
mod draw;
mod geometry;
mod structure;
mod update;

pub use attributes::{parse_bool, parse_pair};

/// Owns and drives the control tree.
pub struct WindowManager {
    pub(crate) tree: ControlTree,
    pub(crate) roots: ChildList,
    pub(crate) detached: Vec<ControlId>,
    pub(crate) input: InputContext,
    cursor: Cursor,
    keyboard: Keyboard,
    key_subscribers: KeySubscribers,
    pending_characters: Vec<char>,
    renderer: Renderer,
    assets: Box<dyn AssetProvider>,
    settings: UiSettings,
    config: UiConfig,
    time: FrameTime,
    callbacks: CallbackQueue,
    window_size: (u32, u32),
}

impl WindowManager {
    /// Create a window manager drawing through `backend`.
    pub fn new(backend: Box<dyn RenderBackend>, assets: Box<dyn AssetProvider>, config: UiConfig) -> Self {
        let renderer = Renderer::new(backend, config.render_width, config.render_height);
        Self {
            tree: ControlTree::default(),
            roots: ChildList::default(),
            detached: Vec::new(),
            input: InputContext::default(),
            cursor: Cursor::new(),
            keyboard: Keyboard::new(),
            key_subscribers: KeySubscribers::default(),
            pending_characters: Vec::new(),
            renderer,
            assets,
            settings: UiSettings::default(),
            window_size: (config.window_width, config.window_height),
            config,
            time: FrameTime::default(),
            callbacks: CallbackQueue::new(),
        }
    }

    /// Create a window manager on a [HeadlessBackend] with a render resolution
    /// and window of `width` x `height`. Returns the backend's command log.
    pub fn headless(width: u32, height: u32) -> (Self, CommandLog) {
        let backend = HeadlessBackend::new();
        let log = backend.log();
        let config = UiConfig::default().with_resolution(width, height);
        let wm = Self::new(Box::new(backend), Box::new(ContentLoader::new()), config);
        (wm, log)
    }

    /// Replace the UI settings.
    pub fn with_settings(mut self, settings: UiSettings) -> Self {
        self.settings = settings;
        self
    }

    /// The UI settings.
    pub fn settings(&self) -> &UiSettings {
        &self.settings
    }

    /// Mutable UI settings.
    pub fn settings_mut(&mut self) -> &mut UiSettings {
        &mut self.settings
    }

    /// The configuration.
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Timing of the current update.
    pub fn frame_time(&self) -> FrameTime {
        self.time
    }

    /// Time since the previous update.
    pub fn elapsed(&self) -> Duration {
        self.time.elapsed
    }

    /// The cursor.
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// The cursor, for feeding input.
    pub fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    /// The keyboard.
    pub fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    /// The keyboard, for feeding input.
    pub fn keyboard_mut(&mut self) -> &mut Keyboard {
        &mut self.keyboard
    }

    /// The renderer.
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// The renderer, for drawing.
    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    /// This frame's input state.
    pub fn input_context(&self) -> InputContext {
        self.input
    }

    /// The render resolution.
    pub fn render_resolution(&self) -> (u32, u32) {
        self.renderer.render_resolution()
    }

    /// Change the render resolution. Only valid between frames.
    pub fn set_render_resolution(&mut self, width: u32, height: u32) -> Result<(), crate::error::UiError> {
        self.renderer.set_render_resolution(width, height)?;
        Ok(())
    }

    /// The window size in pixels.
    pub fn window_size(&self) -> (u32, u32) {
        self.window_size
    }

    /// Record a new window size.
    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_size = (width, height);
    }

    /// Scale and offset mapping the render resolution into the window,
    /// preserving its aspect ratio.
    pub fn letterbox(&self) -> (f64, Vector2<f64>) {
        let (rw, rh) = self.render_resolution();
        let (ww, wh) = self.window_size;
        if rw == 0 || rh == 0 || ww == 0 || wh == 0 {
            return (1.0, Vector2::zeros());
        }

        let scale = (ww as f64 / rw as f64).min(wh as f64 / rh as f64);
        let offset = Vector2::new(
            (ww as f64 - rw as f64 * scale) / 2.0,
            (wh as f64 - rh as f64 * scale) / 2.0,
        );
        (scale, offset)
    }

    /// Where the final render target lands in the window.
    pub fn letterbox_rectangle(&self) -> Rectangle {
        let (rw, rh) = self.render_resolution();
        let (scale, offset) = self.letterbox();
        Rectangle::new(
            offset.x.round() as i32,
            offset.y.round() as i32,
            (rw as f64 * scale).round() as i32,
            (rh as f64 * scale).round() as i32,
        )
    }

    /// Feed a winit window event into the input devices.
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor
                    .handle_cursor_moved(Vector2::new(position.x, position.y));
            },
            WindowEvent::CursorLeft { .. } => self.cursor.handle_cursor_left(),
            WindowEvent::MouseInput { state, button, .. } => {
                self.cursor.handle_mouse_input(*button, *state);
            },
            WindowEvent::MouseWheel { delta, .. } => self.cursor.handle_mouse_wheel(*delta),
            WindowEvent::ModifiersChanged(modifiers) => {
                self.keyboard.set_modifiers(modifiers.state());
            },
            WindowEvent::KeyboardInput { event, .. } => {
                self.keyboard.handle_key_event(event);
                if event.state.is_pressed() {
                    if let Some(text) = &event.text {
                        for character in text.chars() {
                            self.push_character(character);
                        }
                    }
                }
            },
            WindowEvent::Ime(Ime::Commit(text)) => {
                for character in text.chars() {
                    self.push_character(character);
                }
            },
            WindowEvent::Resized(size) => self.set_window_size(size.width, size.height),
            _ => {},
        }
    }

    /// Queue a typed character for the selected control.
    pub fn push_character(&mut self, character: char) {
        if !character.is_control() {
            self.pending_characters.push(character);
        }
    }

    /// Subscribe to key presses. Subscribers run in subscription order until
    /// one returns `true`.
    pub fn subscribe_key_press<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&mut WindowManager, &KeyPressEvent) -> bool + 'static,
    {
        let handler: KeyPressHandler = Box::new(handler);
        self.key_subscribers.subscribe(handler)
    }

    /// Remove a key press subscription. Returns `false` if it did not exist.
    pub fn unsubscribe_key_press(&mut self, id: SubscriptionId) -> bool {
        self.key_subscribers.unsubscribe(id)
    }

    /// A handle to the root callback queue, drained at the start of every update.
    pub fn root_callbacks(&self) -> CallbackQueue {
        self.callbacks.clone()
    }

    /// A handle to a control's callback queue, drained when the control updates.
    pub fn callback_queue(&self, id: ControlId) -> Option<CallbackQueue> {
        self.tree.get(id).map(|node| node.callbacks.clone())
    }

    /// Load a texture through the asset provider.
    pub fn load_texture(&mut self, name: &str) -> Texture {
        self.assets.load_texture(self.renderer.backend_mut(), name)
    }

    /// Load a sound through the asset provider.
    pub fn load_sound(&mut self, name: &str) -> Option<Sound> {
        self.assets.load_sound(name)
    }

    /// Create a texture filled with one color.
    pub fn create_solid_texture(&mut self, color: Color, width: u32, height: u32) -> Texture {
        self.assets
            .create_solid_texture(self.renderer.backend_mut(), color, width, height)
    }

    /// Subscribe to an event of a control.
    pub fn on<F>(&mut self, id: ControlId, event: ControlEvent, handler: F)
    where
        F: FnMut(&mut WindowManager, ControlId) + 'static,
    {
        if let Some(node) = self.tree.get_mut(id) {
            node.handlers.push((event, Box::new(handler)));
        }
    }

    /// Raise an event on a control.
    ///
    /// If the control's behavior hook is running or its handlers are firing,
    /// the event is delivered after they finish.
    pub fn raise_event(&mut self, id: ControlId, event: ControlEvent) {
        let Some(node) = self.tree.get_mut(id).filter(|node| !node.killed) else {
            return;
        };

        if node.behavior.is_none() || node.firing_events {
            node.pending_events.push(event);
            return;
        }

        self.fire_event(id, event);
        self.flush_pending_events(id);
    }

    fn fire_event(&mut self, id: ControlId, event: ControlEvent) {
        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        if !node.handlers.iter().any(|(e, _)| *e == event) {
            return;
        }

        node.firing_events = true;
        let mut handlers = std::mem::take(&mut node.handlers);
        for (_, handler) in handlers.iter_mut().filter(|(e, _)| *e == event) {
            handler(self, id);
        }

        if let Some(node) = self.tree.get_mut(id) {
            node.firing_events = false;
            let added = std::mem::replace(&mut node.handlers, handlers);
            node.handlers.extend(added);
        }
    }

    pub(crate) fn flush_pending_events(&mut self, id: ControlId) {
        loop {
            let Some(node) = self.tree.get_mut(id) else {
                return;
            };
            if node.behavior.is_none() || node.firing_events || node.pending_events.is_empty() {
                return;
            }

            let event = node.pending_events.remove(0);
            self.fire_event(id, event);
        }
    }

    /// Run `f` with the behavior of a control taken out of the tree.
    ///
    /// Returns `None` if the control does not exist, is killed, or its
    /// behavior is already in use further up the call stack.
    pub fn with_behavior<R, F>(&mut self, id: ControlId, f: F) -> Option<R>
    where
        F: FnOnce(&mut dyn ControlBehavior, &mut WindowManager) -> R,
    {
        let node = self.tree.get_mut(id)?;
        if node.killed {
            return None;
        }
        let mut behavior = node.behavior.take()?;

        let result = f(behavior.as_mut(), self);

        match self.tree.get_mut(id) {
            Some(node) if !node.killed => node.behavior = Some(behavior),
            Some(node) => {
                // Killed from inside its own hook, so on_kill could not run yet.
                node.behavior = Some(behavior);
                self.notify_killed(id);
            },
            None => behavior.on_kill(self, id),
        }

        self.flush_pending_events(id);
        Some(result)
    }

    fn notify_killed(&mut self, id: ControlId) {
        let Some(mut behavior) = self.tree.get_mut(id).and_then(|n| n.behavior.take()) else {
            return;
        };
        behavior.on_kill(self, id);
        if let Some(node) = self.tree.get_mut(id) {
            node.behavior = Some(behavior);
        }
    }

    /// Run `f` with the behavior of a control downcast to `T`.
    pub fn with_behavior_as<T, R, F>(&mut self, id: ControlId, f: F) -> Option<R>
    where
        T: ControlBehavior,
        F: FnOnce(&mut T, &mut WindowManager) -> R,
    {
        self.with_behavior(id, |behavior, wm| {
            behavior
                .as_any_mut()
                .downcast_mut::<T>()
                .map(|behavior| f(behavior, wm))
        })
        .flatten()
    }

    /// The behavior of a control as `T`.
    pub fn behavior<T: ControlBehavior>(&self, id: ControlId) -> Option<&T> {
        let behavior = self.tree.get(id)?.behavior.as_ref()?;
        (**behavior).as_any().downcast_ref::<T>()
    }

    /// The behavior of a control as mutable `T`.
    pub fn behavior_mut<T: ControlBehavior>(&mut self, id: ControlId) -> Option<&mut T> {
        let behavior = self.tree.get_mut(id)?.behavior.as_mut()?;
        (**behavior).as_any_mut().downcast_mut::<T>()
    }

    /// The type name of a control's behavior.
    pub fn type_name(&self, id: ControlId) -> Option<&'static str> {
        self.tree.get(id).map(|node| node.type_name())
    }
}

impl std::fmt::Debug for WindowManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowManager")
            .field("controls", &self.tree.len())
            .field("roots", &self.roots.children())
            .field("detached", &self.detached)
            .field("input", &self.input)
            .field("renderer", &self.renderer)
            .finish_non_exhaustive()
    }
}
