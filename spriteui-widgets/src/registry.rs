// SPDX-License-Identifier: MIT OR Apache-2.0

use spriteui_core::control::Control;
use spriteui_core::registry::ControlRegistry;

use crate::button::Button;
use crate::checkbox::CheckBox;
use crate::dropdown::DropDown;
use crate::label::Label;
use crate::list_box::ListBox;
use crate::panel::Panel;
use crate::scroll_panel::ScrollPanel;
use crate::scrollbar::{Orientation, ScrollBar};
use crate::tab_control::TabControl;
use crate::text_box::TextBox;

/// Register a factory for every widget of this crate under its type name.
pub fn register_builtin_widgets(registry: &mut ControlRegistry) {
    registry.register("Panel", || Control::new(Panel::new()));
    registry.register("Label", || Control::new(Label::new()));
    registry.register("Button", || Control::new(Button::new()));
    registry.register("CheckBox", || Control::new(CheckBox::new()));
    registry.register("ScrollBar", || Control::new(ScrollBar::new(Orientation::Vertical)));
    registry.register("HorizontalScrollBar", || {
        Control::new(ScrollBar::new(Orientation::Horizontal))
    });
    registry.register("ScrollPanel", || ScrollPanel::new().into_control());
    registry.register("ListBox", || Control::new(ListBox::new()));
    registry.register("DropDown", || Control::new(DropDown::new()));
    registry.register("TextBox", || Control::new(TextBox::new()));
    registry.register("TabControl", || Control::new(TabControl::new()));
}

/// A registry holding the plain `Control` type and every built-in widget.
pub fn builtin_registry() -> ControlRegistry {
    let mut registry = ControlRegistry::new();
    register_builtin_widgets(&mut registry);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_widget_is_registered_under_its_type_name() {
        let registry = builtin_registry();
        for name in registry.names().filter(|name| *name != "Control") {
            let control = registry.create(name).unwrap();
            assert_eq!(control.type_name(), name);
        }
        assert_eq!(registry.names().count(), 12);
    }
}
