// SPDX-License-Identifier: MIT OR Apache-2.0

//! The control node.
//!
//! A [Control] is built disconnected, handed to
//! [WindowManager::create](crate::window_manager::WindowManager::create) and
//! from then on addressed through its [ControlId].

use std::time::Duration;

use spriteui_theme::Color;

use crate::callbacks::CallbackQueue;
use crate::geometry::{Point, Rectangle};
use crate::graphics::RenderTarget;

mod behavior;
mod children;
mod events;
mod id;
pub(crate) mod tree;

pub use behavior::{AsAny, BoxedBehavior, Capabilities, ControlBehavior, PlainControl};
pub(crate) use children::ChildList;
pub use children::ParentRef;
pub use events::{ControlEvent, EventHandler};
pub use id::ControlId;

/// How a control is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    /// Draw straight into the render target of the parent.
    #[default]
    Normal,
    /// Draw into a private render target that is then drawn into the parent's.
    /// Required for clipping and for scaling.
    UniqueRenderTarget,
}

/// One node of the UI tree.
pub struct Control {
    pub(crate) name: String,
    pub(crate) text: String,
    pub(crate) rectangle: Rectangle,
    pub(crate) remap_color: Color,
    pub(crate) alpha: f32,

    pub(crate) enabled: bool,
    pub(crate) visible: bool,
    pub(crate) input_enabled: bool,
    pub(crate) input_passthrough: bool,
    pub(crate) focused: bool,
    pub(crate) exclusive_input_capture: bool,

    pub(crate) draw_mode: DrawMode,
    pub(crate) scaling: i32,
    pub(crate) initial_scaling: i32,
    pub(crate) detached: bool,
    pub(crate) render_target: Option<RenderTarget>,
    pub(crate) free_render_target_when_hidden: bool,
    pub(crate) suppress_size_change: bool,

    pub(crate) initialized: bool,
    pub(crate) killed: bool,

    pub(crate) parent: Option<ParentRef>,
    pub(crate) pending_parent: Option<ParentRef>,
    pub(crate) children: ChildList,
    pub(crate) update_order: i32,
    pub(crate) draw_order: i32,
    pub(crate) auto_update_child_order: bool,

    pub(crate) cursor_on_control: bool,
    pub(crate) ignore_input_remaining: Duration,
    pub(crate) time_since_left_click: Duration,

    pub(crate) handlers: Vec<(ControlEvent, EventHandler)>,
    pub(crate) firing_events: bool,
    pub(crate) pending_events: Vec<ControlEvent>,
    pub(crate) callbacks: CallbackQueue,

    pub(crate) behavior: Option<BoxedBehavior>,
}

impl Control {
    /// Create a control with the given behavior.
    pub fn new(behavior: impl ControlBehavior + 'static) -> Self {
        Self::from_boxed(Box::new(behavior))
    }

    /// Create a control from an already boxed behavior.
    pub fn from_boxed(behavior: BoxedBehavior) -> Self {
        Self {
            name: String::new(),
            text: String::new(),
            rectangle: Rectangle::default(),
            remap_color: Color::WHITE,
            alpha: 1.0,
            enabled: true,
            visible: true,
            input_enabled: true,
            input_passthrough: false,
            focused: false,
            exclusive_input_capture: false,
            draw_mode: DrawMode::Normal,
            scaling: 1,
            initial_scaling: 1,
            detached: false,
            render_target: None,
            free_render_target_when_hidden: false,
            suppress_size_change: false,
            initialized: false,
            killed: false,
            parent: None,
            pending_parent: None,
            children: ChildList::default(),
            update_order: 0,
            draw_order: 0,
            auto_update_child_order: true,
            cursor_on_control: false,
            ignore_input_remaining: Duration::ZERO,
            time_since_left_click: Duration::MAX,
            handlers: Vec::new(),
            firing_events: false,
            pending_events: Vec::new(),
            callbacks: CallbackQueue::new(),
            behavior: Some(behavior),
        }
    }

    /// Set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set position and size.
    pub fn with_client_rectangle(mut self, x: i32, y: i32, width: i32, height: i32) -> Self {
        self.rectangle = Rectangle::new(x, y, width, height);
        self
    }

    /// Set the position.
    pub fn with_location(mut self, location: Point) -> Self {
        self.rectangle.x = location.x;
        self.rectangle.y = location.y;
        self
    }

    /// Set the size.
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.rectangle.width = width;
        self.rectangle.height = height;
        self
    }

    /// Set the tint color.
    pub fn with_remap_color(mut self, color: Color) -> Self {
        self.remap_color = color;
        self
    }

    /// Set the alpha.
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Set the draw mode. Can only be changed before initialization.
    pub fn with_draw_mode(mut self, draw_mode: DrawMode) -> Self {
        self.draw_mode = draw_mode;
        self
    }

    /// Set scaling. Only valid together with [DrawMode::UniqueRenderTarget].
    pub fn with_scaling(mut self, scaling: i32) -> Self {
        self.scaling = scaling.max(1);
        self
    }

    /// Set whether the control reacts to the cursor.
    pub fn with_input_enabled(mut self, input_enabled: bool) -> Self {
        self.input_enabled = input_enabled;
        self
    }

    /// Let siblings below claim the cursor unless a child of this control has claimed it.
    pub fn with_input_passthrough(mut self, input_passthrough: bool) -> Self {
        self.input_passthrough = input_passthrough;
        self
    }

    /// Set visibility.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Set the enabled state.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the update order among siblings. Higher values update first.
    pub fn with_update_order(mut self, order: i32) -> Self {
        self.update_order = order;
        self
    }

    /// Set the draw order among siblings. Higher values draw later, on top.
    pub fn with_draw_order(mut self, order: i32) -> Self {
        self.draw_order = order;
        self
    }

    /// Release the unique render target to the pool while hidden.
    pub fn with_free_render_target_when_hidden(mut self, free: bool) -> Self {
        self.free_render_target_when_hidden = free;
        self
    }

    /// The type name of the behavior.
    pub fn type_name(&self) -> &'static str {
        self.behavior
            .as_ref()
            .map(|b| b.type_name())
            .unwrap_or("Control")
    }

    /// The name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for Control {
    fn default() -> Self {
        Self::new(PlainControl)
    }
}

impl std::fmt::Debug for Control {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Control")
            .field("type", &self.type_name())
            .field("name", &self.name)
            .field("rectangle", &self.rectangle)
            .field("visible", &self.visible)
            .field("enabled", &self.enabled)
            .field("parent", &self.parent)
            .finish_non_exhaustive()
    }
}
