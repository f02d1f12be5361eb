// SPDX-License-Identifier: MIT OR Apache-2.0

//! Input devices polled once per frame by the window manager.

/// The frame-scoped active/selected/exclusive-capture record.
pub mod context;

/// The mouse cursor.
pub mod cursor;

/// The keyboard and key-press subscriptions.
pub mod keyboard;

/// The shared hold-to-repeat timer.
pub mod repeat;

pub use context::InputContext;
pub use cursor::Cursor;
pub use keyboard::{KeyPressEvent, Keyboard, SubscriptionId};
pub use repeat::KeyRepeat;
