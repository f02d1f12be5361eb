// SPDX-License-Identifier: MIT OR Apache-2.0

use nalgebra::Vector2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

use crate::geometry::Point;

/// Pixels of a touchpad scroll that count as one wheel notch.
const PIXELS_PER_NOTCH: f64 = 40.0;

/// The mouse cursor.
///
/// Raw state is fed in from window events at any time. [update](Cursor::update)
/// runs once per frame and derives the edge-triggered values the controls read.
#[derive(Debug, Clone, Default)]
pub struct Cursor {
    window_position: Option<Vector2<f64>>,
    location: Point,
    previous_location: Point,
    has_moved: bool,

    left_held: bool,
    right_held: bool,
    left_was_held: bool,
    right_was_held: bool,
    left_pressed_down: bool,
    right_pressed_down: bool,
    left_clicked: bool,
    right_clicked: bool,

    pending_scroll: f64,
    scroll_wheel_value: i32,
}

impl Cursor {
    /// Create a cursor that is off screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cursor move in window pixels.
    pub fn handle_cursor_moved(&mut self, position: Vector2<f64>) {
        self.window_position = Some(position);
    }

    /// Record the cursor leaving the window.
    pub fn handle_cursor_left(&mut self) {
        self.window_position = None;
    }

    /// Record a button press or release.
    pub fn handle_mouse_input(&mut self, button: MouseButton, state: ElementState) {
        let pressed = state == ElementState::Pressed;
        match button {
            MouseButton::Left => self.left_held = pressed,
            MouseButton::Right => self.right_held = pressed,
            _ => {},
        }
    }

    /// Record wheel movement. Positive values scroll up.
    pub fn handle_mouse_wheel(&mut self, delta: MouseScrollDelta) {
        self.pending_scroll += match delta {
            MouseScrollDelta::LineDelta(_, y) => y as f64,
            MouseScrollDelta::PixelDelta(position) => position.y / PIXELS_PER_NOTCH,
        };
    }

    /// Place the cursor at a render-space location.
    pub fn set_location(&mut self, location: Point) {
        self.window_position = Some(Vector2::new(location.x as f64, location.y as f64));
    }

    /// Hold or release the left button.
    pub fn set_left_down(&mut self, down: bool) {
        self.left_held = down;
    }

    /// Hold or release the right button.
    pub fn set_right_down(&mut self, down: bool) {
        self.right_held = down;
    }

    /// Queue wheel notches for the next frame. Positive values scroll up.
    pub fn scroll(&mut self, notches: i32) {
        self.pending_scroll += notches as f64;
    }

    /// Derive this frame's state. `scale` and `offset` map window pixels to
    /// render pixels: `render = (window - offset) / scale`.
    pub fn update(&mut self, scale: f64, offset: Vector2<f64>) {
        self.previous_location = self.location;
        if let Some(position) = self.window_position {
            let scale = if scale > 0.0 { scale } else { 1.0 };
            let render = (position - offset) / scale;
            self.location = Point::new(render.x.floor() as i32, render.y.floor() as i32);
        }
        self.has_moved = self.location != self.previous_location;

        self.left_pressed_down = self.left_held && !self.left_was_held;
        self.left_clicked = !self.left_held && self.left_was_held;
        self.right_pressed_down = self.right_held && !self.right_was_held;
        self.right_clicked = !self.right_held && self.right_was_held;
        self.left_was_held = self.left_held;
        self.right_was_held = self.right_held;

        self.scroll_wheel_value = if self.pending_scroll > 0.0 {
            self.pending_scroll.ceil() as i32
        } else {
            self.pending_scroll.floor() as i32
        };
        self.pending_scroll = 0.0;
    }

    /// The cursor location in render pixels.
    pub fn location(&self) -> Point {
        self.location
    }

    /// If the cursor is inside the window.
    pub fn is_on_screen(&self) -> bool {
        self.window_position.is_some()
    }

    /// If the cursor moved since the last frame.
    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// If the left button is held.
    pub fn left_down(&self) -> bool {
        self.left_held
    }

    /// If the right button is held.
    pub fn right_down(&self) -> bool {
        self.right_held
    }

    /// If the left button went down this frame.
    pub fn left_pressed_down(&self) -> bool {
        self.left_pressed_down
    }

    /// If the right button went down this frame.
    pub fn right_pressed_down(&self) -> bool {
        self.right_pressed_down
    }

    /// If the left button was released this frame after being held.
    pub fn left_clicked(&self) -> bool {
        self.left_clicked
    }

    /// If the right button was released this frame after being held.
    pub fn right_clicked(&self) -> bool {
        self.right_clicked
    }

    /// Wheel notches scrolled this frame. Positive values scroll up.
    pub fn scroll_wheel_value(&self) -> i32 {
        self.scroll_wheel_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_is_release_after_press() {
        let mut cursor = Cursor::new();
        cursor.handle_mouse_input(MouseButton::Left, ElementState::Pressed);
        cursor.update(1.0, Vector2::zeros());
        assert!(cursor.left_pressed_down());
        assert!(!cursor.left_clicked());

        cursor.update(1.0, Vector2::zeros());
        assert!(!cursor.left_pressed_down());
        assert!(cursor.left_down());

        cursor.handle_mouse_input(MouseButton::Left, ElementState::Released);
        cursor.update(1.0, Vector2::zeros());
        assert!(cursor.left_clicked());

        cursor.update(1.0, Vector2::zeros());
        assert!(!cursor.left_clicked());
    }

    #[test]
    fn test_window_to_render_mapping() {
        let mut cursor = Cursor::new();
        assert!(!cursor.is_on_screen());
        cursor.handle_cursor_moved(Vector2::new(120.0, 50.0));
        cursor.update(2.0, Vector2::new(20.0, 0.0));
        assert_eq!(cursor.location(), Point::new(50, 25));
        assert!(cursor.has_moved());
    }

    #[test]
    fn test_scroll_is_consumed_per_frame() {
        let mut cursor = Cursor::new();
        cursor.handle_mouse_wheel(MouseScrollDelta::LineDelta(0.0, -1.0));
        cursor.update(1.0, Vector2::zeros());
        assert_eq!(cursor.scroll_wheel_value(), -1);
        cursor.update(1.0, Vector2::zeros());
        assert_eq!(cursor.scroll_wheel_value(), 0);
    }
}
