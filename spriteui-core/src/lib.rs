// SPDX-License-Identifier: MIT OR Apache-2.0
#![warn(missing_docs)]

//! Core library for spriteui => See `spriteui` crate.
//!
//! Contains the control tree, the window manager driving it, the renderer
//! abstraction and the input devices.

/// Contains useful types for interacting with winit.
pub mod window {
    pub use winit::event::*;
    pub use winit::keyboard::*;
}

/// Contains the [AssetProvider](assets::AssetProvider) trait and the file-system [ContentLoader](assets::ContentLoader).
pub mod assets;

/// Contains the thread-safe [CallbackQueue](callbacks::CallbackQueue).
pub mod callbacks;

/// Contains the [UiConfig](config::UiConfig) struct.
pub mod config;

/// Contains the [Control](control::Control) node and the [ControlBehavior](control::ControlBehavior) trait.
pub mod control;

/// Contains the [UiError](error::UiError) type.
pub mod error;

/// Contains the [Point](geometry::Point) and [Rectangle](geometry::Rectangle) primitives.
pub mod geometry;

/// Contains the rendering abstraction.
pub mod graphics;

/// Contains the cursor, the keyboard and the key repeat timer.
pub mod input;

/// Contains the TOML [LayoutConfig](layout_config::LayoutConfig).
pub mod layout_config;

/// Contains the [ControlRegistry](registry::ControlRegistry).
pub mod registry;

/// Contains the [FrameTime](time::FrameTime) struct.
pub mod time;

/// Contains the [WindowManager](window_manager::WindowManager).
pub mod window_manager;

pub use error::UiError;
pub use window_manager::WindowManager;
