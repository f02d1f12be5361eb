#![warn(missing_docs)]

//! Retained-mode widgets for sprite-batch style 2D renderers.
//!
//! Controls live in a tree owned by the [WindowManager](core::WindowManager),
//! which updates and draws them once per frame through a
//! [RenderBackend](core::graphics::RenderBackend). Layouts can be built in
//! code or loaded from TOML with the control registry.

pub use nalgebra as math;

pub use spriteui_core as core;
pub use spriteui_theme as theme;
pub use spriteui_widgets as widgets;

/// A "prelude" for users of the spriteui toolkit.
///
/// Importing this module brings into scope the most common types
/// needed to build a basic spriteui interface.
///
/// ```rust
/// use spriteui::prelude::*;
///
/// let (mut wm, _log) = WindowManager::headless(320, 240);
/// let button = wm.create(Control::new(Button::new()).with_text("Start").with_size(80, 24));
/// wm.add_control(button).unwrap();
/// wm.on(button, ControlEvent::LeftClick, |wm, id| wm.set_text(id, "Starting"));
/// ```
pub mod prelude {
    pub use crate::core::config::UiConfig;
    pub use crate::core::control::{
        Capabilities, Control, ControlBehavior, ControlEvent, ControlId, DrawMode, PlainControl,
    };
    pub use crate::core::geometry::{point, Point, Rectangle};
    pub use crate::core::layout_config::LayoutConfig;
    pub use crate::core::registry::ControlRegistry;
    pub use crate::core::{UiError, WindowManager};

    // Theme
    pub use crate::theme::{Color, UiSettings};

    // Math
    pub use nalgebra::Vector2;

    // Widgets
    pub use crate::widgets::button::Button;
    pub use crate::widgets::checkbox::CheckBox;
    pub use crate::widgets::dropdown::{DropDown, DropDownState};
    pub use crate::widgets::item::ListItem;
    pub use crate::widgets::label::{Label, TextAnchor};
    pub use crate::widgets::list_box::ListBox;
    pub use crate::widgets::panel::{Panel, PanelBackgroundImageDrawMode};
    pub use crate::widgets::registry::{builtin_registry, register_builtin_widgets};
    pub use crate::widgets::scroll_panel::ScrollPanel;
    pub use crate::widgets::scrollbar::{Orientation, ScrollBar};
    pub use crate::widgets::tab_control::{Tab, TabControl};
    pub use crate::widgets::text_box::TextBox;
}
