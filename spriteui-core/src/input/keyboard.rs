// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashSet;

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

use crate::window_manager::WindowManager;

/// A key that went down this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPressEvent {
    /// The pressed key.
    pub key: KeyCode,
    /// Modifiers held when the key went down.
    pub modifiers: ModifiersState,
}

/// Handler for key presses. Returning `true` consumes the press so later
/// subscribers never see it.
pub type KeyPressHandler = Box<dyn FnMut(&mut WindowManager, &KeyPressEvent) -> bool>;

/// Identifies a key press subscription for [WindowManager::unsubscribe_key_press].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// The keyboard.
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    held: HashSet<KeyCode>,
    pending: Vec<KeyCode>,
    pressed: Vec<KeyCode>,
    modifiers: ModifiersState,
}

impl Keyboard {
    /// Create a keyboard with no keys held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a winit key event. Keys without a physical code are ignored.
    pub fn handle_key_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key) = event.physical_key {
            if event.repeat {
                return;
            }
            self.handle_key(key, event.state);
        }
    }

    /// Record a key going down or up.
    pub fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if self.held.insert(key) {
                    self.pending.push(key);
                }
            },
            ElementState::Released => {
                self.held.remove(&key);
            },
        }
    }

    /// Hold a key down.
    pub fn press(&mut self, key: KeyCode) {
        self.handle_key(key, ElementState::Pressed);
    }

    /// Release a held key.
    pub fn release(&mut self, key: KeyCode) {
        self.handle_key(key, ElementState::Released);
    }

    /// Record the current modifier state.
    pub fn set_modifiers(&mut self, modifiers: ModifiersState) {
        self.modifiers = modifiers;
    }

    /// Move the keys pressed since the last frame into this frame's press list.
    pub fn update(&mut self) {
        self.pressed = std::mem::take(&mut self.pending);
    }

    /// Keys that went down this frame, in press order.
    pub fn pressed_keys(&self) -> &[KeyCode] {
        &self.pressed
    }

    /// Key press events for this frame.
    pub fn press_events(&self) -> Vec<KeyPressEvent> {
        self.pressed
            .iter()
            .map(|key| KeyPressEvent {
                key: *key,
                modifiers: self.modifiers,
            })
            .collect()
    }

    /// If `key` is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// The current modifier state.
    pub fn modifiers(&self) -> ModifiersState {
        self.modifiers
    }

    /// If either shift key is held.
    pub fn is_shift_down(&self) -> bool {
        self.modifiers.shift_key()
            || self.is_key_down(KeyCode::ShiftLeft)
            || self.is_key_down(KeyCode::ShiftRight)
    }

    /// If either control key is held.
    pub fn is_ctrl_down(&self) -> bool {
        self.modifiers.control_key()
            || self.is_key_down(KeyCode::ControlLeft)
            || self.is_key_down(KeyCode::ControlRight)
    }

    /// If either alt key is held.
    pub fn is_alt_down(&self) -> bool {
        self.modifiers.alt_key()
            || self.is_key_down(KeyCode::AltLeft)
            || self.is_key_down(KeyCode::AltRight)
    }
}

/// Ordered key press subscribers.
///
/// A handler is taken out of its slot while it runs, so it may subscribe or
/// unsubscribe (itself included) without invalidating the dispatch loop.
#[derive(Default)]
pub(crate) struct KeySubscribers {
    next_id: u64,
    slots: Vec<(SubscriptionId, Option<KeyPressHandler>)>,
}

impl KeySubscribers {
    pub fn subscribe(&mut self, handler: KeyPressHandler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.slots.push((id, Some(handler)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|(slot, _)| *slot != id);
        before != self.slots.len()
    }

    pub fn ids(&self) -> Vec<SubscriptionId> {
        self.slots.iter().map(|(id, _)| *id).collect()
    }

    pub fn take(&mut self, id: SubscriptionId) -> Option<KeyPressHandler> {
        self.slots
            .iter_mut()
            .find(|(slot, _)| *slot == id)
            .and_then(|(_, handler)| handler.take())
    }

    /// Put a handler back. Dropped if it was unsubscribed while running.
    pub fn restore(&mut self, id: SubscriptionId, handler: KeyPressHandler) {
        if let Some((_, slot)) = self.slots.iter_mut().find(|(slot, _)| *slot == id) {
            *slot = Some(handler);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_is_reported_once() {
        let mut keyboard = Keyboard::new();
        keyboard.press(KeyCode::KeyA);
        keyboard.press(KeyCode::KeyA);
        keyboard.update();
        assert_eq!(keyboard.pressed_keys(), &[KeyCode::KeyA]);
        assert!(keyboard.is_key_down(KeyCode::KeyA));

        keyboard.update();
        assert!(keyboard.pressed_keys().is_empty());
        assert!(keyboard.is_key_down(KeyCode::KeyA));

        keyboard.release(KeyCode::KeyA);
        assert!(!keyboard.is_key_down(KeyCode::KeyA));
    }

    #[test]
    fn test_press_order_is_kept() {
        let mut keyboard = Keyboard::new();
        keyboard.press(KeyCode::KeyB);
        keyboard.press(KeyCode::KeyA);
        keyboard.update();
        assert_eq!(keyboard.pressed_keys(), &[KeyCode::KeyB, KeyCode::KeyA]);
    }

    #[test]
    fn test_unsubscribed_handler_is_not_restored() {
        let mut subscribers = KeySubscribers::default();
        let id = subscribers.subscribe(Box::new(|_, _| false));
        let handler = subscribers.take(id).unwrap();
        assert!(subscribers.unsubscribe(id));
        subscribers.restore(id, handler);
        assert!(subscribers.ids().is_empty());
        assert!(subscribers.take(id).is_none());
    }
}
