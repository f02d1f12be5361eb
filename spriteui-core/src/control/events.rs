// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::control::ControlId;
use crate::window_manager::WindowManager;

/// Events a control can raise.
///
/// Handlers receive the window manager and the id of the raising control and
/// query whatever state they need from there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlEvent {
    /// The left button was released over the control after being pressed.
    LeftClick,
    /// A second left click arrived within the double-click time.
    DoubleLeftClick,
    /// The right button was released over the control.
    RightClick,
    /// The left button went down over the control.
    MouseLeftDown,
    /// The cursor started hovering the control or one of its descendants.
    MouseEnter,
    /// The cursor stopped hovering the control and its descendants.
    MouseLeave,
    /// The cursor moved over the control.
    MouseMove,
    /// Raised every frame the cursor is directly over the control.
    MouseOnControl,
    /// The wheel moved over the control.
    MouseScrolled,
    /// The position or size changed.
    ClientRectangleUpdated,
    /// Visibility changed.
    VisibleChanged,
    /// The enabled state changed.
    EnabledChanged,
    /// The control was attached to or removed from a parent.
    ParentChanged,
    /// A child was removed from the control.
    ChildRemoved,
    /// The control gained or lost input focus.
    SelectedChanged,
    /// A scrollbar or scroll panel was scrolled by the user.
    Scrolled,
    /// The selected item of a list changed.
    SelectedIndexChanged,
    /// The hovered item of a list changed.
    HoveredIndexChanged,
    /// The first visible item of a list changed.
    TopIndexChanged,
    /// A checkbox was checked or unchecked.
    CheckedChanged,
    /// The text of an editable control changed.
    TextChanged,
    /// Enter was pressed in a text box.
    EnterPressed,
    /// A widget-specific event.
    Custom(&'static str),
}

/// Handler for a [ControlEvent].
pub type EventHandler = Box<dyn FnMut(&mut WindowManager, ControlId)>;
