// SPDX-License-Identifier: MIT OR Apache-2.0

use std::time::Duration;

use crate::control::{Capabilities, ControlEvent, ControlId, ParentRef};
use crate::window_manager::WindowManager;

impl WindowManager {
    /// Run one update pass.
    ///
    /// Refreshes the input devices, drains the root callbacks, dispatches key
    /// presses and typed characters, resolves which control the cursor
    /// targets and updates the tree in update order.
    pub fn update(&mut self, elapsed: Duration) {
        self.time.advance(elapsed);
        let (scale, offset) = self.letterbox();
        self.cursor.update(scale, offset);
        self.keyboard.update();

        let callbacks = self.callbacks.clone();
        callbacks.drain(self);

        self.dispatch_key_presses();
        self.dispatch_characters();
        self.resolve_captured_control();

        self.update_children(ParentRef::Root);

        if self.cursor.left_pressed_down() {
            if let Some(selected) = self.input.selected {
                if !self.is_active(selected) {
                    self.set_selected(None);
                }
            }
        }
    }

    fn dispatch_key_presses(&mut self) {
        for event in self.keyboard.press_events() {
            for id in self.key_subscribers.ids() {
                let Some(mut handler) = self.key_subscribers.take(id) else {
                    continue;
                };
                let handled = handler(self, &event);
                self.key_subscribers.restore(id, handler);
                if handled {
                    break;
                }
            }
        }
    }

    fn dispatch_characters(&mut self) {
        let characters = std::mem::take(&mut self.pending_characters);
        let Some(selected) = self.input.selected else {
            return;
        };

        for character in characters {
            self.with_behavior(selected, |behavior, wm| {
                behavior.on_character_input(wm, selected, character)
            });
        }
    }

    /// Controls that get the cursor before the attached tree does: the
    /// selected control while it captures input exclusively, then detached
    /// overlays from the top-most down.
    fn resolve_captured_control(&mut self) {
        self.input.active = None;
        self.input.exclusive_capture = false;

        if let Some(selected) = self.input.selected {
            if self.exists(selected) && self.exclusive_input_capture(selected) {
                self.input.exclusive_capture = true;
                self.input.active = Some(selected);
                return;
            }
        }

        let detached = self.detached.clone();
        for id in detached.into_iter().rev() {
            if self.enabled(id) && self.is_shown(id) && self.hit_test(id) {
                self.input.active = Some(id);
                return;
            }
        }
    }

    fn hit_test(&self, id: ControlId) -> bool {
        let Some(node) = self.tree.get(id) else {
            return false;
        };
        if !node.visible || node.killed {
            return false;
        }
        node.focused || (node.input_enabled && self.is_cursor_on(id))
    }

    fn claims_cursor(&self, id: ControlId) -> bool {
        !self.is_detached(id) && self.hit_test(id)
    }

    /// Update the children of `parent` in update order.
    ///
    /// The first child claiming the cursor becomes active as long as
    /// `parent` itself is active. A focused child becomes active wherever
    /// its parent is. Structural changes to the child list made
    /// during the traversal are applied when it ends.
    pub(crate) fn update_children(&mut self, parent: ParentRef) {
        let Some(list) = self.child_list_mut(parent) else {
            return;
        };
        list.iterating = true;
        let order = list.update_order().to_vec();

        for child in order {
            let current = self
                .tree
                .get(child)
                .filter(|node| !node.killed && node.parent == Some(parent))
                .map(|node| node.enabled);
            let Some(enabled) = current else {
                continue;
            };

            let claims = if self.is_focused(child) {
                self.claims_cursor(child)
            } else {
                self.input.active == parent.control() && self.claims_cursor(child)
            };
            if !self.input.exclusive_capture && claims {
                self.input.active = Some(child);
            }

            if enabled {
                self.update_control(child);
            }
        }

        self.apply_pending(parent);
    }

    fn update_control(&mut self, id: ControlId) {
        if let Some(callbacks) = self.callback_queue(id) {
            callbacks.drain(self);
        }

        let elapsed = self.time.elapsed;
        let Some(node) = self.tree.get_mut(id).filter(|node| !node.killed) else {
            return;
        };
        let ignoring = !node.ignore_input_remaining.is_zero();
        node.ignore_input_remaining = node.ignore_input_remaining.saturating_sub(elapsed);
        node.time_since_left_click = node.time_since_left_click.saturating_add(elapsed);

        self.with_behavior(id, |behavior, wm| behavior.update(wm, id));
        self.update_children(ParentRef::Control(id));

        let Some(node) = self.tree.get(id).filter(|node| !node.killed) else {
            return;
        };
        if node.input_passthrough && self.input.active == Some(id) {
            self.input.active = node.parent.and_then(ParentRef::control);
        }

        self.process_input(id, ignoring);
    }

    /// Optional interfaces implemented by the behavior of a control.
    pub fn capabilities(&self, id: ControlId) -> Capabilities {
        self.tree
            .get(id)
            .and_then(|node| node.behavior.as_ref())
            .map(|behavior| behavior.capabilities())
            .unwrap_or_default()
    }

    fn process_input(&mut self, id: ControlId, ignoring: bool) {
        if ignoring || self.input.is_captured_by_other(id) {
            return;
        }

        let hovered = self.is_active(id);
        let was_hovered = match self.tree.get_mut(id) {
            Some(node) => std::mem::replace(&mut node.cursor_on_control, hovered),
            None => return,
        };

        if hovered && !was_hovered {
            self.with_behavior(id, |behavior, wm| behavior.on_mouse_enter(wm, id));
            self.raise_event(id, ControlEvent::MouseEnter);
        } else if !hovered && was_hovered {
            self.with_behavior(id, |behavior, wm| behavior.on_mouse_leave(wm, id));
            self.raise_event(id, ControlEvent::MouseLeave);
        }

        if self.input.active != Some(id) {
            return;
        }

        self.with_behavior(id, |behavior, wm| behavior.on_mouse_on_control(wm, id));
        self.raise_event(id, ControlEvent::MouseOnControl);

        if self.cursor.has_moved() {
            self.with_behavior(id, |behavior, wm| behavior.on_mouse_move(wm, id));
            self.raise_event(id, ControlEvent::MouseMove);
        }

        if self.cursor.left_pressed_down() {
            if self.capabilities(id).contains(Capabilities::SELECTABLE) {
                self.set_selected(Some(id));
            }
            self.with_behavior(id, |behavior, wm| behavior.on_mouse_left_down(wm, id));
            self.raise_event(id, ControlEvent::MouseLeftDown);
        }

        if self.cursor.left_clicked() {
            self.with_behavior(id, |behavior, wm| behavior.on_left_click(wm, id));
            self.raise_event(id, ControlEvent::LeftClick);

            let double_click_time = self.config.double_click_duration();
            if let Some(node) = self.tree.get_mut(id) {
                let double = node.time_since_left_click < double_click_time;
                node.time_since_left_click = if double { Duration::MAX } else { Duration::ZERO };
                if double {
                    self.with_behavior(id, |behavior, wm| behavior.on_double_left_click(wm, id));
                    self.raise_event(id, ControlEvent::DoubleLeftClick);
                }
            }
        }

        if self.cursor.right_clicked() {
            self.with_behavior(id, |behavior, wm| behavior.on_right_click(wm, id));
            self.raise_event(id, ControlEvent::RightClick);
        }

        let delta = self.cursor.scroll_wheel_value();
        if delta != 0 {
            self.bubble_scroll(id, delta);
        }
    }

    /// Offer a wheel movement to `id` and then its ancestors until one
    /// handles it. Detached controls do not pass it on.
    fn bubble_scroll(&mut self, id: ControlId, delta: i32) {
        let mut current = Some(id);
        while let Some(target) = current {
            let handled = self
                .with_behavior(target, |behavior, wm| behavior.on_mouse_scrolled(wm, target, delta))
                .unwrap_or(false);
            self.raise_event(target, ControlEvent::MouseScrolled);

            if handled || self.is_detached(target) {
                return;
            }
            current = self.parent(target);
        }
    }
}
