// SPDX-License-Identifier: MIT OR Apache-2.0

//! A viewport over a content panel of arbitrary size.
//!
//! The scroll panel owns four children: the content panel that user
//! controls are added to, a vertical and a horizontal [ScrollBar] and a
//! corner filler shown between them. Every frame it measures the content,
//! decides which scrollbars are needed and moves the content panel to the
//! current scroll offset.
//!
//! ```rust
//! use spriteui_core::control::Control;
//! use spriteui_core::WindowManager;
//! use spriteui_widgets::scroll_panel::ScrollPanel;
//!
//! let (mut wm, _log) = WindowManager::headless(320, 240);
//! let panel = wm.create(ScrollPanel::new().into_control().with_size(200, 100));
//! wm.add_control(panel).unwrap();
//!
//! let content = ScrollPanel::content_of(&wm, panel).unwrap();
//! wm.create_child(content, Control::default().with_client_rectangle(0, 0, 180, 400)).unwrap();
//! ```

use spriteui_core::control::{
    Capabilities, Control, ControlBehavior, ControlEvent, ControlId, DrawMode, PlainControl,
};
use spriteui_core::error::UiError;
use spriteui_core::geometry::{point, Point, Rectangle};
use spriteui_core::input::KeyRepeat;
use spriteui_core::window::KeyCode;
use spriteui_core::window_manager::parse_bool;
use spriteui_core::WindowManager;
use spriteui_theme::Color;

use crate::panel::{draw_border, fill_background, Panel};
use crate::scrollbar::{Orientation, ScrollBar};

/// Pixels scrolled per wheel notch.
pub const DEFAULT_WHEEL_STEP: i32 = 20;

/// Pixels scrolled per arrow key repeat.
pub const DEFAULT_KEY_STEP: i32 = 10;

const BAR_ORDER: i32 = 10;

/// Which scrollbars a viewport needs.
///
/// `viewport` is the area inside the border with no scrollbars shown.
/// An axis hard-overflows when the content is larger than that area and
/// soft-overflows when it is larger than the area left after showing both
/// scrollbars. A scrollbar is shown when its axis hard-overflows, or when
/// it soft-overflows while the other axis hard-overflows, since the other
/// scrollbar then takes the space it would have fit in.
///
/// Returns `(horizontal, vertical)`.
pub fn scroll_bar_visibility(
    content: Point,
    viewport: Point,
    thickness: i32,
    allow_horizontal: bool,
    allow_vertical: bool,
) -> (bool, bool) {
    let hard_x = content.x > viewport.x;
    let hard_y = content.y > viewport.y;
    let soft_x = content.x > viewport.x - thickness;
    let soft_y = content.y > viewport.y - thickness;

    let horizontal = allow_horizontal && (hard_x || (soft_x && allow_vertical && hard_y));
    let vertical = allow_vertical && (hard_y || (soft_y && allow_horizontal && hard_x));
    (horizontal, vertical)
}

/// Offset that makes `target` visible in a viewport of `length` currently
/// scrolled to `offset`, moving as little as possible.
fn reveal(offset: i32, length: i32, start: i32, size: i32) -> i32 {
    if size > length || start < offset {
        start
    } else if start + size > offset + length {
        start + size - length
    } else {
        offset
    }
}

#[derive(Debug, Clone, Copy)]
struct Parts {
    content: ControlId,
    vertical: ControlId,
    horizontal: ControlId,
    corner: ControlId,
}

/// A scrollable viewport. See the [module docs](self).
#[derive(Debug, Clone)]
pub struct ScrollPanel {
    parts: Option<Parts>,
    background_color: Option<Color>,
    border_width: i32,
    allow_horizontal: bool,
    allow_vertical: bool,
    overscroll_margin: i32,
    wheel_step: i32,
    key_step: i32,
    keyboard_scrolling: bool,
    offset: Point,
    content_size: Point,
    viewport: Point,
    scrollbars: (bool, bool),
    key_repeats: [KeyRepeat; 4],
}

impl ScrollPanel {
    /// Create a panel scrolling on both axes.
    pub fn new() -> Self {
        Self {
            parts: None,
            background_color: None,
            border_width: 1,
            allow_horizontal: true,
            allow_vertical: true,
            overscroll_margin: 0,
            wheel_step: DEFAULT_WHEEL_STEP,
            key_step: DEFAULT_KEY_STEP,
            keyboard_scrolling: true,
            offset: Point::zeros(),
            content_size: Point::zeros(),
            viewport: Point::zeros(),
            scrollbars: (false, false),
            key_repeats: [KeyRepeat::default(); 4],
        }
    }

    /// Wrap the panel in a control drawing into its own render target, so
    /// content outside the viewport is clipped.
    pub fn into_control(self) -> Control {
        Control::new(self).with_draw_mode(DrawMode::UniqueRenderTarget)
    }

    /// Set which axes may scroll.
    pub fn with_allow_scroll(mut self, horizontal: bool, vertical: bool) -> Self {
        self.allow_horizontal = horizontal;
        self.allow_vertical = vertical;
        self
    }

    /// Set the empty space kept after the right-most and bottom-most content.
    pub fn with_overscroll_margin(mut self, margin: i32) -> Self {
        self.overscroll_margin = margin.max(0);
        self
    }

    /// Set the border width. Zero draws no border.
    pub fn with_border_width(mut self, width: i32) -> Self {
        self.border_width = width.max(0);
        self
    }

    /// Set the background color.
    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    /// Set the pixels scrolled per wheel notch.
    pub fn with_wheel_step(mut self, step: i32) -> Self {
        self.wheel_step = step.max(1);
        self
    }

    /// Enable or disable arrow key scrolling.
    pub fn with_keyboard_scrolling(mut self, enabled: bool) -> Self {
        self.keyboard_scrolling = enabled;
        self
    }

    /// The content panel of a scroll panel control.
    pub fn content_of(wm: &WindowManager, id: ControlId) -> Option<ControlId> {
        wm.behavior::<ScrollPanel>(id)?.content()
    }

    /// The content panel, once initialized.
    pub fn content(&self) -> Option<ControlId> {
        self.parts.map(|parts| parts.content)
    }

    /// The vertical scrollbar, once initialized.
    pub fn vertical_scroll_bar(&self) -> Option<ControlId> {
        self.parts.map(|parts| parts.vertical)
    }

    /// The horizontal scrollbar, once initialized.
    pub fn horizontal_scroll_bar(&self) -> Option<ControlId> {
        self.parts.map(|parts| parts.horizontal)
    }

    /// The corner filler, once initialized.
    pub fn corner(&self) -> Option<ControlId> {
        self.parts.map(|parts| parts.corner)
    }

    /// Size of the content including the overscroll margin.
    pub fn content_size(&self) -> Point {
        self.content_size
    }

    /// Size of the visible part of the content.
    pub fn viewport_size(&self) -> Point {
        self.viewport
    }

    /// The scroll offset: the content point shown at the viewport's top left corner.
    pub fn view_position(&self) -> Point {
        self.offset
    }

    /// Which scrollbars are shown, as `(horizontal, vertical)`.
    pub fn scroll_bars_visible(&self) -> (bool, bool) {
        self.scrollbars
    }

    /// The overscroll margin.
    pub fn overscroll_margin(&self) -> i32 {
        self.overscroll_margin
    }

    /// Set the overscroll margin and re-measure.
    pub fn set_overscroll_margin(&mut self, wm: &mut WindowManager, id: ControlId, margin: i32) {
        self.overscroll_margin = margin.max(0);
        self.refresh(wm, id);
    }

    /// Set which axes may scroll and re-measure.
    pub fn set_allow_scroll(&mut self, wm: &mut WindowManager, id: ControlId, horizontal: bool, vertical: bool) {
        self.allow_horizontal = horizontal;
        self.allow_vertical = vertical;
        self.refresh(wm, id);
    }

    /// Largest valid scroll offset.
    pub fn max_view_position(&self) -> Point {
        point(
            (self.content_size.x - self.viewport.x).max(0),
            (self.content_size.y - self.viewport.y).max(0),
        )
    }

    /// Convert a point of the content panel to viewport coordinates.
    pub fn content_to_view(&self, p: Point) -> Point {
        p - self.offset
    }

    /// Convert a point of the viewport to content panel coordinates.
    pub fn view_to_content(&self, p: Point) -> Point {
        p + self.offset
    }

    /// Scroll to `position`, clamped so the content never scrolls past its bounds.
    pub fn set_view_position(&mut self, wm: &mut WindowManager, id: ControlId, position: Point) {
        let max = self.max_view_position();
        self.offset = point(position.x.clamp(0, max.x), position.y.clamp(0, max.y));
        self.arrange(wm, id);
    }

    /// Scroll the least amount needed to show `target`, given in content
    /// coordinates. An axis where the target is larger than the viewport
    /// snaps to the target's start.
    pub fn scroll_to(&mut self, wm: &mut WindowManager, id: ControlId, target: Rectangle) {
        let x = reveal(self.offset.x, self.viewport.x, target.x, target.width);
        let y = reveal(self.offset.y, self.viewport.y, target.y, target.height);
        self.set_view_position(wm, id, point(x, y));
    }

    /// Scroll by `delta` as the user, raising [ControlEvent::Scrolled] if the view moved.
    pub fn scroll_by(&mut self, wm: &mut WindowManager, id: ControlId, delta: Point) -> bool {
        let old = self.offset;
        self.set_view_position(wm, id, old + delta);
        let moved = self.offset != old;
        if moved {
            wm.raise_event(id, ControlEvent::Scrolled);
        }
        moved
    }

    fn measure_content(&self, wm: &WindowManager, content: ControlId) -> Point {
        let mut size = Point::zeros();
        let mut any = false;
        for child in wm.children(content) {
            if !wm.visible(child) {
                continue;
            }
            let rectangle = wm.client_rectangle(child);
            size.x = size.x.max(rectangle.right());
            size.y = size.y.max(rectangle.bottom());
            any = true;
        }
        if any {
            size += point(self.overscroll_margin, self.overscroll_margin);
        }
        size
    }

    /// Re-measure the content, decide on the scrollbars and lay out all parts.
    pub fn refresh(&mut self, wm: &mut WindowManager, id: ControlId) {
        let Some(parts) = self.parts else {
            return;
        };

        let size = wm.client_rectangle(id).size();
        let border = self.border_width;
        let inner = point((size.x - border * 2).max(0), (size.y - border * 2).max(0));
        let thickness = wm.settings().scroll_bar_thickness;

        self.content_size = self.measure_content(wm, parts.content);
        self.scrollbars = scroll_bar_visibility(
            self.content_size,
            inner,
            thickness,
            self.allow_horizontal,
            self.allow_vertical,
        );
        let (horizontal, vertical) = self.scrollbars;
        self.viewport = point(
            (inner.x - if vertical { thickness } else { 0 }).max(0),
            (inner.y - if horizontal { thickness } else { 0 }).max(0),
        );

        let max = self.max_view_position();
        self.offset = point(self.offset.x.clamp(0, max.x), self.offset.y.clamp(0, max.y));

        let bars = [
            (
                parts.vertical,
                vertical,
                Rectangle::new(size.x - border - thickness, border, thickness, self.viewport.y),
                (self.content_size.y, self.viewport.y, self.offset.y),
            ),
            (
                parts.horizontal,
                horizontal,
                Rectangle::new(border, size.y - border - thickness, self.viewport.x, thickness),
                (self.content_size.x, self.viewport.x, self.offset.x),
            ),
        ];
        for (bar, shown, rectangle, (length, display, top)) in bars {
            set_rectangle_if_changed(wm, bar, rectangle);
            set_visible_if_changed(wm, bar, shown);
            if let Some(bar) = wm.behavior_mut::<ScrollBar>(bar) {
                bar.set_lengths(length, display);
                bar.set_view_top(top);
            }
        }

        set_rectangle_if_changed(
            wm,
            parts.corner,
            Rectangle::new(size.x - border - thickness, size.y - border - thickness, thickness, thickness),
        );
        set_visible_if_changed(wm, parts.corner, horizontal && vertical);

        self.arrange(wm, id);
    }

    /// Move the content panel to the scroll offset and sync the scrollbars.
    fn arrange(&self, wm: &mut WindowManager, _id: ControlId) {
        let Some(parts) = self.parts else {
            return;
        };
        let border = self.border_width;
        let rectangle = Rectangle::new(
            border - self.offset.x,
            border - self.offset.y,
            self.content_size.x.max(self.viewport.x),
            self.content_size.y.max(self.viewport.y),
        );
        set_rectangle_if_changed(wm, parts.content, rectangle);

        if let Some(bar) = wm.behavior_mut::<ScrollBar>(parts.vertical) {
            bar.set_view_top(self.offset.y);
        }
        if let Some(bar) = wm.behavior_mut::<ScrollBar>(parts.horizontal) {
            bar.set_view_top(self.offset.x);
        }
    }

    fn keyboard_blocked(wm: &WindowManager) -> bool {
        wm.selected_control()
            .is_some_and(|selected| wm.capabilities(selected).contains(Capabilities::TEXT_EDITABLE))
    }

    fn scroll_with_keys(&mut self, wm: &mut WindowManager, id: ControlId) {
        let elapsed = wm.elapsed();
        let listening = self.keyboard_scrolling && wm.is_active(id) && !Self::keyboard_blocked(wm);
        let keys = [
            (KeyCode::ArrowUp, point(0, -self.key_step)),
            (KeyCode::ArrowDown, point(0, self.key_step)),
            (KeyCode::ArrowLeft, point(-self.key_step, 0)),
            (KeyCode::ArrowRight, point(self.key_step, 0)),
        ];

        let mut delta = Point::zeros();
        for ((key, step), repeat) in keys.into_iter().zip(self.key_repeats.iter_mut()) {
            let down = listening && wm.keyboard().is_key_down(key);
            let fired = repeat.update(down, elapsed) as i32;
            delta += step * fired;
        }
        if delta != Point::zeros() {
            self.scroll_by(wm, id, delta);
        }
    }

    fn follow_scroll_bar(wm: &mut WindowManager, panel: ControlId, bar: ControlId) {
        let Some((orientation, top)) = wm
            .behavior::<ScrollBar>(bar)
            .map(|bar| (bar.orientation(), bar.view_top()))
        else {
            return;
        };
        wm.with_behavior_as::<ScrollPanel, _, _>(panel, |scroll_panel, wm| {
            let mut position = scroll_panel.offset;
            match orientation {
                Orientation::Vertical => position.y = top,
                Orientation::Horizontal => position.x = top,
            }
            scroll_panel.scroll_by(wm, panel, position - scroll_panel.offset);
        });
    }
}

fn set_rectangle_if_changed(wm: &mut WindowManager, id: ControlId, rectangle: Rectangle) {
    if wm.client_rectangle(id) != rectangle {
        wm.set_client_rectangle(id, rectangle);
    }
}

fn set_visible_if_changed(wm: &mut WindowManager, id: ControlId, visible: bool) {
    if wm.visible(id) != visible {
        wm.set_visible(id, visible);
    }
}

impl Default for ScrollPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlBehavior for ScrollPanel {
    fn type_name(&self) -> &'static str {
        "ScrollPanel"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::SCROLLABLE
    }

    fn initialize(&mut self, wm: &mut WindowManager, id: ControlId) -> Result<(), UiError> {
        let wheel_step = self.wheel_step;
        let content = wm.create_child(
            id,
            Control::new(PlainControl)
                .with_name("ScrollContent")
                .with_input_passthrough(true),
        )?;
        let vertical = wm.create_child(
            id,
            Control::new(ScrollBar::new(Orientation::Vertical).with_step(wheel_step))
                .with_name("VerticalScrollBar")
                .with_visible(false)
                .with_update_order(BAR_ORDER)
                .with_draw_order(BAR_ORDER),
        )?;
        let horizontal = wm.create_child(
            id,
            Control::new(ScrollBar::new(Orientation::Horizontal).with_step(wheel_step))
                .with_name("HorizontalScrollBar")
                .with_visible(false)
                .with_update_order(BAR_ORDER)
                .with_draw_order(BAR_ORDER),
        )?;
        let corner = wm.create_child(
            id,
            Control::new(Panel::new().with_draw_border(false))
                .with_name("ScrollCorner")
                .with_visible(false)
                .with_input_enabled(false)
                .with_draw_order(BAR_ORDER),
        )?;

        for bar in [vertical, horizontal] {
            wm.on(bar, ControlEvent::Scrolled, move |wm, bar| {
                ScrollPanel::follow_scroll_bar(wm, id, bar)
            });
        }

        self.parts = Some(Parts {
            content,
            vertical,
            horizontal,
            corner,
        });
        self.refresh(wm, id);
        Ok(())
    }

    fn update(&mut self, wm: &mut WindowManager, id: ControlId) {
        self.refresh(wm, id);
        self.scroll_with_keys(wm, id);
    }

    fn on_client_rectangle_updated(&mut self, wm: &mut WindowManager, id: ControlId) {
        self.refresh(wm, id);
    }

    fn on_mouse_scrolled(&mut self, wm: &mut WindowManager, id: ControlId, delta: i32) -> bool {
        let max = self.max_view_position();
        let can_scroll_vertically = self.allow_vertical && max.y > 0;
        let can_scroll_horizontally = self.allow_horizontal && max.x > 0;
        let keyboard = wm.keyboard();
        let modifier = keyboard.is_shift_down() || keyboard.is_ctrl_down();

        let amount = -delta * self.wheel_step;
        if can_scroll_horizontally && (modifier || !can_scroll_vertically) {
            self.scroll_by(wm, id, point(amount, 0));
            true
        } else if can_scroll_vertically {
            self.scroll_by(wm, id, point(0, amount));
            true
        } else {
            false
        }
    }

    fn draw(&mut self, wm: &mut WindowManager, id: ControlId) -> Result<(), UiError> {
        let background = self
            .background_color
            .unwrap_or(wm.settings().panel_background_color);
        if background.a > 0 {
            fill_background(wm, id, background);
        }
        Ok(())
    }

    fn draw_overlay(&mut self, wm: &mut WindowManager, id: ControlId) -> Result<(), UiError> {
        if self.border_width > 0 {
            let color = wm.settings().panel_border_color;
            draw_border(wm, id, color);
        }
        Ok(())
    }

    fn apply_attribute(&mut self, wm: &mut WindowManager, id: ControlId, key: &str, value: &str) -> bool {
        match key {
            "AllowHorizontalScroll" => {
                self.allow_horizontal = parse_bool(value).unwrap_or(self.allow_horizontal)
            },
            "AllowVerticalScroll" => self.allow_vertical = parse_bool(value).unwrap_or(self.allow_vertical),
            "OverscrollMargin" => match value.trim().parse() {
                Ok(margin) => self.overscroll_margin = i32::max(margin, 0),
                Err(_) => log::warn!("Invalid overscroll margin '{}'", value),
            },
            "BackgroundColor" => {
                self.background_color = Some(Color::parse_or(value, wm.settings().panel_background_color))
            },
            "KeyboardScrolling" => {
                self.keyboard_scrolling = parse_bool(value).unwrap_or(self.keyboard_scrolling)
            },
            _ => return false,
        }
        self.refresh(wm, id);
        true
    }
}
