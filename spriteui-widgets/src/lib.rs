// SPDX-License-Identifier: MIT OR Apache-2.0
#![warn(missing_docs)]

//! Widget library for spriteui => See `spriteui` crate.
//!
//! Every widget is a [ControlBehavior](spriteui_core::control::ControlBehavior)
//! carried by a [Control](spriteui_core::control::Control). Compound widgets
//! (scroll panel, list box) build their parts as child controls when they
//! are initialized.

/// Contains the [Button](button::Button) widget.
pub mod button;

/// Contains the [CheckBox](checkbox::CheckBox) widget.
pub mod checkbox;

/// Contains the [DropDown](dropdown::DropDown) widget.
pub mod dropdown;

/// Contains the [ListItem](item::ListItem) shared by list widgets.
pub mod item;

/// Contains the [Label](label::Label) widget.
pub mod label;

/// Contains the [ListBox](list_box::ListBox) widget.
pub mod list_box;

/// Contains the [Panel](panel::Panel) widget.
pub mod panel;

/// Contains functions to register the built-in widgets in a [ControlRegistry](spriteui_core::registry::ControlRegistry).
pub mod registry;

/// Contains the [ScrollPanel](scroll_panel::ScrollPanel) widget.
pub mod scroll_panel;

/// Contains the [ScrollBar](scrollbar::ScrollBar) widget.
pub mod scrollbar;

/// Contains the [TabControl](tab_control::TabControl) widget.
pub mod tab_control;

/// Contains the [TextBox](text_box::TextBox) widget.
pub mod text_box;
