// SPDX-License-Identifier: MIT OR Apache-2.0

use spriteui_core::control::{ControlBehavior, ControlEvent, ControlId};
use spriteui_core::error::UiError;
use spriteui_core::geometry::{Point, Rectangle};
use spriteui_core::WindowManager;

/// Direction a [ScrollBar] scrolls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Arrows at the top and bottom.
    #[default]
    Vertical,
    /// Arrows at the left and right.
    Horizontal,
}

impl Orientation {
    fn main(self, point: Point) -> i32 {
        match self {
            Orientation::Vertical => point.y,
            Orientation::Horizontal => point.x,
        }
    }

    fn cross(self, point: Point) -> i32 {
        match self {
            Orientation::Vertical => point.x,
            Orientation::Horizontal => point.y,
        }
    }

    /// Build a rectangle from main and cross axis extents.
    fn rectangle(self, main_start: i32, main_length: i32, cross_length: i32) -> Rectangle {
        match self {
            Orientation::Vertical => Rectangle::new(0, main_start, cross_length, main_length),
            Orientation::Horizontal => Rectangle::new(main_start, 0, main_length, cross_length),
        }
    }
}

/// Thumb and arrow layout along the main axis, in local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollBarLayout {
    /// Length of each arrow button.
    pub arrow_length: i32,
    /// Length of the track between the arrows.
    pub track_length: i32,
    /// Start of the thumb.
    pub thumb_start: i32,
    /// Length of the thumb.
    pub thumb_length: i32,
}

/// A scrollbar with two arrow buttons, a track and a draggable thumb.
///
/// The bar works on abstract units: `length` is the size of the scrolled
/// content, `display_length` the visible part and `view_top` the first
/// visible unit. Only user input raises [ControlEvent::Scrolled];
/// programmatic changes do not.
#[derive(Debug, Clone)]
pub struct ScrollBar {
    orientation: Orientation,
    length: i32,
    display_length: i32,
    view_top: i32,
    step: i32,
    drag_offset: Option<i32>,
}

impl ScrollBar {
    /// Create a bar scrolling in `orientation`.
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            length: 0,
            display_length: 0,
            view_top: 0,
            step: 1,
            drag_offset: None,
        }
    }

    /// Set the content and visible lengths.
    pub fn with_lengths(mut self, length: i32, display_length: i32) -> Self {
        self.length = length.max(0);
        self.display_length = display_length.max(0);
        self
    }

    /// Set how many units an arrow click or wheel notch scrolls.
    pub fn with_step(mut self, step: i32) -> Self {
        self.step = step.max(1);
        self
    }

    /// The orientation.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Length of the scrolled content.
    pub fn length(&self) -> i32 {
        self.length
    }

    /// Length of the visible part.
    pub fn display_length(&self) -> i32 {
        self.display_length
    }

    /// First visible unit.
    pub fn view_top(&self) -> i32 {
        self.view_top
    }

    /// Units per arrow click or wheel notch.
    pub fn step(&self) -> i32 {
        self.step
    }

    /// Largest valid `view_top`.
    pub fn max_view_top(&self) -> i32 {
        (self.length - self.display_length).max(0)
    }

    /// If there is anything to scroll.
    pub fn can_scroll(&self) -> bool {
        self.length > self.display_length
    }

    /// If the thumb is being dragged.
    pub fn is_dragging(&self) -> bool {
        self.drag_offset.is_some()
    }

    /// Set the content and visible lengths, clamping the view.
    pub fn set_lengths(&mut self, length: i32, display_length: i32) {
        self.length = length.max(0);
        self.display_length = display_length.max(0);
        self.view_top = self.view_top.clamp(0, self.max_view_top());
    }

    /// Set the first visible unit, clamped to the valid range.
    pub fn set_view_top(&mut self, view_top: i32) {
        self.view_top = view_top.clamp(0, self.max_view_top());
    }

    /// Set the units per arrow click or wheel notch.
    pub fn set_step(&mut self, step: i32) {
        self.step = step.max(1);
    }

    /// Scroll as the user, raising [ControlEvent::Scrolled] if the view moved.
    pub fn scroll_by(&mut self, wm: &mut WindowManager, id: ControlId, amount: i32) -> bool {
        let old = self.view_top;
        self.set_view_top(old + amount);
        let moved = self.view_top != old;
        if moved {
            wm.raise_event(id, ControlEvent::Scrolled);
        }
        moved
    }

    /// The layout of the bar for a control of `size`.
    pub fn layout(&self, size: Point) -> ScrollBarLayout {
        let main = self.orientation.main(size).max(0);
        let cross = self.orientation.cross(size).max(0);
        let arrow_length = cross.min(main / 2);
        let track_length = (main - arrow_length * 2).max(0);

        let thumb_length = if !self.can_scroll() || self.length == 0 {
            track_length
        } else {
            let proportional = (track_length as i64 * self.display_length as i64 / self.length as i64) as i32;
            proportional.max(cross.min(track_length))
        };

        let free = track_length - thumb_length;
        let max_top = self.max_view_top();
        let offset = if max_top == 0 {
            0
        } else {
            (free as i64 * self.view_top as i64 / max_top as i64) as i32
        };

        ScrollBarLayout {
            arrow_length,
            track_length,
            thumb_start: arrow_length + offset,
            thumb_length,
        }
    }

    fn drag_to(&mut self, wm: &mut WindowManager, id: ControlId, cursor_main: i32, grab: i32) {
        let layout = self.layout(wm.client_rectangle(id).size());
        let free = layout.track_length - layout.thumb_length;
        if free <= 0 {
            return;
        }
        let position = (cursor_main - grab - layout.arrow_length).clamp(0, free);
        let max_top = self.max_view_top() as i64;
        let top = ((position as i64 * max_top + free as i64 / 2) / free as i64) as i32;
        self.scroll_by(wm, id, top - self.view_top);
    }

    fn end_drag(&mut self, wm: &mut WindowManager, id: ControlId) {
        self.drag_offset = None;
        wm.set_exclusive_input_capture(id, false);
        if wm.is_selected(id) {
            wm.set_selected(None);
        }
    }
}

impl Default for ScrollBar {
    fn default() -> Self {
        Self::new(Orientation::Vertical)
    }
}

impl ControlBehavior for ScrollBar {
    fn type_name(&self) -> &'static str {
        match self.orientation {
            Orientation::Vertical => "ScrollBar",
            Orientation::Horizontal => "HorizontalScrollBar",
        }
    }

    fn update(&mut self, wm: &mut WindowManager, id: ControlId) {
        let Some(grab) = self.drag_offset else {
            return;
        };

        if !wm.cursor().left_down() {
            self.end_drag(wm, id);
            return;
        }

        if wm.cursor().has_moved() {
            let cursor = self.orientation.main(wm.cursor_point(id));
            self.drag_to(wm, id, cursor, grab);
        }
    }

    fn on_mouse_left_down(&mut self, wm: &mut WindowManager, id: ControlId) {
        let layout = self.layout(wm.client_rectangle(id).size());
        let main = self.orientation.main(wm.client_rectangle(id).size());
        let cursor = self.orientation.main(wm.cursor_point(id));

        if cursor < layout.arrow_length {
            self.scroll_by(wm, id, -self.step);
        } else if cursor >= main - layout.arrow_length {
            self.scroll_by(wm, id, self.step);
        } else if cursor < layout.thumb_start {
            self.scroll_by(wm, id, -self.display_length.max(1));
        } else if cursor >= layout.thumb_start + layout.thumb_length {
            self.scroll_by(wm, id, self.display_length.max(1));
        } else if self.can_scroll() {
            self.drag_offset = Some(cursor - layout.thumb_start);
            wm.set_selected(Some(id));
            wm.set_exclusive_input_capture(id, true);
        }
    }

    fn on_mouse_scrolled(&mut self, wm: &mut WindowManager, id: ControlId, delta: i32) -> bool {
        if !self.can_scroll() {
            return false;
        }
        self.scroll_by(wm, id, -delta * self.step);
        true
    }

    fn on_visible_changed(&mut self, wm: &mut WindowManager, id: ControlId) {
        if !wm.visible(id) && self.drag_offset.is_some() {
            self.end_drag(wm, id);
        }
    }

    fn draw(&mut self, wm: &mut WindowManager, id: ControlId) -> Result<(), UiError> {
        let rectangle = wm.render_rectangle(id);
        let layout = self.layout(rectangle.size());
        let cross = self.orientation.cross(rectangle.size());
        let main = self.orientation.main(rectangle.size());
        let origin = rectangle.location();

        let settings = wm.settings();
        let background = wm.color_with_alpha(id, settings.background_color);
        let arrow = wm.color_with_alpha(id, settings.panel_border_color);
        let thumb_color = if self.drag_offset.is_some() {
            settings.focus_color
        } else {
            settings.alt_color
        };
        let thumb_color = wm.color_with_alpha(id, thumb_color);

        let orientation = self.orientation;
        let local = |start, length| orientation.rectangle(start, length, cross).offset(origin);

        let renderer = wm.renderer_mut();
        renderer.fill_rectangle(rectangle, background);
        renderer.draw_rectangle(local(0, layout.arrow_length), arrow, 1);
        renderer.draw_rectangle(local(main - layout.arrow_length, layout.arrow_length), arrow, 1);
        if self.can_scroll() {
            renderer.fill_rectangle(local(layout.thumb_start, layout.thumb_length).inflate(-2), thumb_color);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_proportional() {
        let mut bar = ScrollBar::new(Orientation::Vertical).with_lengths(400, 100);
        let layout = bar.layout(Point::new(10, 120));
        assert_eq!(layout.arrow_length, 10);
        assert_eq!(layout.track_length, 100);
        assert_eq!(layout.thumb_length, 25);
        assert_eq!(layout.thumb_start, 10);

        bar.set_view_top(300);
        assert_eq!(bar.layout(Point::new(10, 120)).thumb_start, 85);
    }

    #[test]
    fn test_view_is_clamped() {
        let mut bar = ScrollBar::new(Orientation::Horizontal).with_lengths(50, 20);
        bar.set_view_top(100);
        assert_eq!(bar.view_top(), 30);
        bar.set_lengths(25, 20);
        assert_eq!(bar.view_top(), 5);
        bar.set_lengths(10, 20);
        assert_eq!(bar.view_top(), 0);
        assert!(!bar.can_scroll());
    }

    #[test]
    fn test_thumb_never_shrinks_below_its_thickness() {
        let bar = ScrollBar::new(Orientation::Vertical).with_lengths(10_000, 10);
        assert_eq!(bar.layout(Point::new(14, 114)).thumb_length, 14);
    }
}
