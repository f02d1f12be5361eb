// SPDX-License-Identifier: MIT OR Apache-2.0

use std::any::Any;

use bitflags::bitflags;

use crate::control::ControlId;
use crate::error::UiError;
use crate::window_manager::WindowManager;

bitflags! {
    /// Optional interfaces a behavior advertises to the rest of the tree.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u8 {
        /// Reacts to scrolling input.
        const SCROLLABLE = 1;
        /// Consumes keyboard text input while selected.
        const TEXT_EDITABLE = 1 << 1;
        /// Can become the selected control.
        const SELECTABLE = 1 << 2;
    }
}

/// Upcast helper so behaviors can be downcast to their concrete type.
pub trait AsAny: Any {
    /// View as [Any].
    fn as_any(&self) -> &dyn Any;
    /// View as mutable [Any].
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A boxed behavior.
pub type BoxedBehavior = Box<dyn ControlBehavior>;

/// The widget-specific part of a control.
///
/// Every control is the same node type; what makes a button a button is
/// the behavior it carries. Geometry, visibility, ordering, input dispatch
/// and render targets are handled by the [WindowManager] for all controls
/// alike; a behavior only fills in the hooks it cares about.
///
/// # Frame Lifecycle
///
/// ```text
/// update pass (per control, parents before children):
///   1. deferred callbacks
///   2. update()
///   3. children (update order)
///   4. hover/click dispatch -> on_mouse_*, on_*_click
///
/// draw pass (per visible, non-detached control):
///   1. draw()
///   2. children (draw order)
///   3. draw_overlay()
/// ```
///
/// While a hook runs, the behavior is taken out of its node. Hooks are free
/// to mutate any part of the tree through the window manager, including the
/// node they belong to; hooks for the same control are not re-entered and
/// events it raises are delivered once the hook returns.
#[allow(unused_variables)]
pub trait ControlBehavior: AsAny {
    /// Type name used for diagnostics and the control registry.
    fn type_name(&self) -> &'static str;

    /// Optional interfaces this behavior implements.
    fn capabilities(&self) -> Capabilities {
        Capabilities::empty()
    }

    /// Called once when the control is first attached or explicitly initialized.
    /// Compound controls create their sub-controls here.
    fn initialize(&mut self, wm: &mut WindowManager, id: ControlId) -> Result<(), UiError> {
        Ok(())
    }

    /// Called every frame while the control is enabled, before its children.
    fn update(&mut self, wm: &mut WindowManager, id: ControlId) {}

    /// Draw the control itself, before its children.
    fn draw(&mut self, wm: &mut WindowManager, id: ControlId) -> Result<(), UiError> {
        Ok(())
    }

    /// Draw on top of the control's children.
    fn draw_overlay(&mut self, wm: &mut WindowManager, id: ControlId) -> Result<(), UiError> {
        Ok(())
    }

    /// The cursor started hovering the control.
    fn on_mouse_enter(&mut self, wm: &mut WindowManager, id: ControlId) {}

    /// The cursor stopped hovering the control.
    fn on_mouse_leave(&mut self, wm: &mut WindowManager, id: ControlId) {}

    /// The cursor moved while directly over the control.
    fn on_mouse_move(&mut self, wm: &mut WindowManager, id: ControlId) {}

    /// Called every frame the cursor is directly over the control.
    fn on_mouse_on_control(&mut self, wm: &mut WindowManager, id: ControlId) {}

    /// The left button went down over the control.
    fn on_mouse_left_down(&mut self, wm: &mut WindowManager, id: ControlId) {}

    /// The left button was clicked on the control.
    fn on_left_click(&mut self, wm: &mut WindowManager, id: ControlId) {}

    /// The left button was double-clicked on the control.
    fn on_double_left_click(&mut self, wm: &mut WindowManager, id: ControlId) {}

    /// The right button was clicked on the control.
    fn on_right_click(&mut self, wm: &mut WindowManager, id: ControlId) {}

    /// The wheel moved by `delta` notches over the control or an unhandling
    /// descendant. Return `true` to stop the scroll from bubbling further up.
    fn on_mouse_scrolled(&mut self, wm: &mut WindowManager, id: ControlId, delta: i32) -> bool {
        false
    }

    /// The position or size changed.
    fn on_client_rectangle_updated(&mut self, wm: &mut WindowManager, id: ControlId) {}

    /// Visibility changed.
    fn on_visible_changed(&mut self, wm: &mut WindowManager, id: ControlId) {}

    /// The enabled state changed.
    fn on_enabled_changed(&mut self, wm: &mut WindowManager, id: ControlId) {}

    /// The control gained (`true`) or lost input focus.
    fn on_selected_changed(&mut self, wm: &mut WindowManager, id: ControlId, selected: bool) {}

    /// A character was typed while the control is selected. Return `true` if consumed.
    fn on_character_input(&mut self, wm: &mut WindowManager, id: ControlId, character: char) -> bool {
        false
    }

    /// A child was removed from the control.
    fn on_child_removed(&mut self, wm: &mut WindowManager, id: ControlId, child: ControlId) {}

    /// The control is being killed. Release subscriptions here.
    fn on_kill(&mut self, wm: &mut WindowManager, id: ControlId) {}

    /// Apply a widget-specific attribute. Return `true` if the key was recognized.
    fn apply_attribute(&mut self, wm: &mut WindowManager, id: ControlId, key: &str, value: &str) -> bool {
        false
    }
}

/// A behavior that does nothing. Used for plain container controls.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainControl;

impl ControlBehavior for PlainControl {
    fn type_name(&self) -> &'static str {
        "Control"
    }
}
