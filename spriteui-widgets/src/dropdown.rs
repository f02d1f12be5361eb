// SPDX-License-Identifier: MIT OR Apache-2.0

use nalgebra::Vector2;
use spriteui_core::control::{ControlBehavior, ControlEvent, ControlId};
use spriteui_core::error::UiError;
use spriteui_core::geometry::{point, Point, Rectangle};
use spriteui_core::window_manager::parse_bool;
use spriteui_core::WindowManager;
use spriteui_theme::Color;

use crate::item::{parse_items, ListItem};

const TEXT_BORDER_DISTANCE: i32 = 3;

/// Default number of items shown at once while open.
pub const DEFAULT_MAX_VISIBLE_ITEMS: usize = 10;

/// Open state of a [DropDown].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropDownState {
    /// Only the selected item is shown.
    #[default]
    Closed,
    /// The item list hangs below the closed area.
    OpenedDown,
    /// The item list sits above the closed area.
    OpenedUp,
}

/// A combo box: shows the selected item and opens a list to pick another.
///
/// Pressing the left button on the closed drop-down opens it. While open it
/// is detached so the list draws above its siblings and sees every click.
/// Picking an item, clicking anywhere but the list or pressing the button
/// outside the drop-down closes it again. The release of the press that
/// opened the list is ignored.
///
/// The list opens downwards unless upward opening is preferred or there is
/// not enough room below.
///
/// ```rust
/// use spriteui_core::control::Control;
/// use spriteui_widgets::dropdown::DropDown;
///
/// let resolution = DropDown::new()
///     .with_items(["800x600", "1024x768", "1280x720"])
///     .with_selected_index(Some(1));
/// let control = Control::new(resolution).with_size(120, 20);
/// ```
#[derive(Debug, Clone)]
pub struct DropDown {
    items: Vec<ListItem>,
    selected_index: Option<usize>,
    hovered_index: Option<usize>,
    top_index: usize,
    max_visible_items: usize,
    font_index: Option<usize>,
    allow_dropdown: bool,
    open_up: bool,
    state: DropDownState,
    clicked_after_open: bool,
    closed_rectangle: Rectangle,
}

impl DropDown {
    /// Create an empty drop-down.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            selected_index: None,
            hovered_index: None,
            top_index: 0,
            max_visible_items: DEFAULT_MAX_VISIBLE_ITEMS,
            font_index: None,
            allow_dropdown: true,
            open_up: false,
            state: DropDownState::Closed,
            clicked_after_open: false,
            closed_rectangle: Rectangle::default(),
        }
    }

    /// Append items.
    pub fn with_items<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ListItem>,
    {
        self.items.extend(items.into_iter().map(Into::into));
        self
    }

    /// Set the initially selected item.
    pub fn with_selected_index(mut self, index: Option<usize>) -> Self {
        self.selected_index = index.filter(|index| self.items.get(*index).is_some_and(|item| item.selectable));
        self
    }

    /// Prefer opening upwards.
    pub fn with_open_up(mut self, open_up: bool) -> Self {
        self.open_up = open_up;
        self
    }

    /// Set how many items are shown at once while open.
    pub fn with_max_visible_items(mut self, count: usize) -> Self {
        self.max_visible_items = count.max(1);
        self
    }

    /// Set the font.
    pub fn with_font_index(mut self, font_index: usize) -> Self {
        self.font_index = Some(font_index);
        self
    }

    /// Set whether the list can be opened.
    pub fn with_allow_dropdown(mut self, allow: bool) -> Self {
        self.allow_dropdown = allow;
        self
    }

    /// The items.
    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    /// The state.
    pub fn state(&self) -> DropDownState {
        self.state
    }

    /// If the list is open.
    pub fn is_open(&self) -> bool {
        self.state != DropDownState::Closed
    }

    /// The selected item index.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    /// The selected item.
    pub fn selected_item(&self) -> Option<&ListItem> {
        self.selected_index.and_then(|index| self.items.get(index))
    }

    /// The hovered item index.
    pub fn hovered_index(&self) -> Option<usize> {
        self.hovered_index
    }

    /// The first item shown while open.
    pub fn top_index(&self) -> usize {
        self.top_index
    }

    /// Append an item.
    pub fn add_item(&mut self, item: impl Into<ListItem>) {
        self.items.push(item.into());
    }

    /// Select an item. Out of range and unselectable items are ignored.
    pub fn set_selected_index(&mut self, wm: &mut WindowManager, id: ControlId, index: Option<usize>) {
        if let Some(index) = index {
            if !self.items.get(index).is_some_and(|item| item.selectable) {
                return;
            }
        }
        if self.selected_index != index {
            self.selected_index = index;
            wm.raise_event(id, ControlEvent::SelectedIndexChanged);
        }
    }

    fn item_height(&self) -> i32 {
        self.closed_rectangle.height.max(1)
    }

    fn visible_item_count(&self) -> usize {
        self.items.len().min(self.max_visible_items)
    }

    fn list_height(&self) -> i32 {
        self.visible_item_count() as i32 * self.item_height()
    }

    /// The closed-state area in local coordinates.
    fn closed_area(&self) -> Rectangle {
        let y = match self.state {
            DropDownState::OpenedUp => self.list_height(),
            _ => 0,
        };
        Rectangle::new(0, y, self.closed_rectangle.width, self.closed_rectangle.height)
    }

    /// The item list area in local coordinates, empty while closed.
    fn list_area(&self) -> Rectangle {
        let y = match self.state {
            DropDownState::Closed => return Rectangle::default(),
            DropDownState::OpenedDown => self.closed_rectangle.height,
            DropDownState::OpenedUp => 0,
        };
        Rectangle::new(0, y, self.closed_rectangle.width, self.list_height())
    }

    /// Open the list.
    pub fn open(&mut self, wm: &mut WindowManager, id: ControlId) {
        if self.is_open() || !self.allow_dropdown || self.items.is_empty() {
            return;
        }

        self.closed_rectangle = wm.client_rectangle(id);
        let needed = self.list_height() * wm.total_scaling(id);
        let (_, render_height) = wm.render_resolution();
        let space_below = render_height as i32 - wm.window_rectangle(id).bottom();
        self.state = if self.open_up || space_below < needed {
            DropDownState::OpenedUp
        } else {
            DropDownState::OpenedDown
        };

        let closed = self.closed_rectangle;
        let list_height = self.list_height();
        let opened = match self.state {
            DropDownState::OpenedUp => Rectangle::new(closed.x, closed.y - list_height, closed.width, closed.height + list_height),
            _ => Rectangle::new(closed.x, closed.y, closed.width, closed.height + list_height),
        };

        let visible = self.visible_item_count();
        self.top_index = match self.selected_index {
            Some(selected) if selected >= visible => (selected + 1 - visible).min(self.items.len() - visible),
            _ => 0,
        };
        self.clicked_after_open = false;
        self.hovered_index = None;

        wm.set_client_rectangle(id, opened);
        wm.detach(id);
        log::trace!("Opened drop-down {} {:?}", wm.name(id), self.state);
    }

    /// Close the list.
    pub fn close(&mut self, wm: &mut WindowManager, id: ControlId) {
        if !self.is_open() {
            return;
        }
        self.state = DropDownState::Closed;
        self.hovered_index = None;
        wm.set_client_rectangle(id, self.closed_rectangle);
        wm.attach(id);
    }

    fn update_hover(&mut self, wm: &mut WindowManager, id: ControlId) {
        let cursor = wm.cursor_point(id);
        let list = self.list_area();
        let hovered = if wm.is_cursor_on(id) && list.contains(cursor) {
            let index = self.top_index + ((cursor.y - list.y) / self.item_height()) as usize;
            self.items
                .get(index)
                .filter(|item| item.selectable)
                .map(|_| index)
        } else {
            None
        };

        if hovered != self.hovered_index {
            self.hovered_index = hovered;
            wm.raise_event(id, ControlEvent::HoveredIndexChanged);
        }
    }

    /// Move the selection one item in `direction`, stepping over at most
    /// one unselectable neighbour.
    fn step_selection(&mut self, wm: &mut WindowManager, id: ControlId, direction: i64) {
        let len = self.items.len() as i64;
        let mut index = match self.selected_index {
            Some(selected) => selected as i64 + direction,
            None => 0,
        };
        if (0..len).contains(&index) && !self.items[index as usize].selectable {
            index += direction;
        }
        if (0..len).contains(&index) {
            self.set_selected_index(wm, id, Some(index as usize));
        }
    }
}

impl Default for DropDown {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlBehavior for DropDown {
    fn type_name(&self) -> &'static str {
        "DropDown"
    }

    fn initialize(&mut self, wm: &mut WindowManager, id: ControlId) -> Result<(), UiError> {
        self.closed_rectangle = wm.client_rectangle(id);
        Ok(())
    }

    fn update(&mut self, wm: &mut WindowManager, id: ControlId) {
        if !self.is_open() {
            return;
        }

        self.update_hover(wm, id);

        if wm.cursor().left_pressed_down() && !wm.is_active(id) {
            self.close(wm, id);
            return;
        }

        if !wm.cursor().left_clicked() {
            return;
        }
        if !self.clicked_after_open {
            self.clicked_after_open = true;
            return;
        }

        if let Some(index) = self.hovered_index {
            self.set_selected_index(wm, id, Some(index));
            self.close(wm, id);
        } else if !self.list_area().contains(wm.cursor_point(id)) || !wm.is_cursor_on(id) {
            self.close(wm, id);
        }
    }

    fn on_client_rectangle_updated(&mut self, wm: &mut WindowManager, id: ControlId) {
        if !self.is_open() {
            self.closed_rectangle = wm.client_rectangle(id);
        }
    }

    fn on_mouse_left_down(&mut self, wm: &mut WindowManager, id: ControlId) {
        if !self.is_open() {
            self.open(wm, id);
        }
    }

    fn on_mouse_scrolled(&mut self, wm: &mut WindowManager, id: ControlId, delta: i32) -> bool {
        if self.items.is_empty() {
            return false;
        }

        if self.is_open() && self.list_area().contains(wm.cursor_point(id)) {
            let max_top = self.items.len() - self.visible_item_count();
            let top = (self.top_index as i64 - delta as i64).clamp(0, max_top as i64) as usize;
            if top != self.top_index {
                self.top_index = top;
                wm.raise_event(id, ControlEvent::TopIndexChanged);
            }
            return true;
        }

        self.step_selection(wm, id, if delta > 0 { -1 } else { 1 });
        true
    }

    fn on_enabled_changed(&mut self, wm: &mut WindowManager, id: ControlId) {
        if !wm.enabled(id) {
            self.close(wm, id);
        }
    }

    fn on_visible_changed(&mut self, wm: &mut WindowManager, id: ControlId) {
        if !wm.visible(id) {
            self.close(wm, id);
        }
    }

    fn draw(&mut self, wm: &mut WindowManager, id: ControlId) -> Result<(), UiError> {
        let origin = wm.render_point(id);
        let font = self.font_index.unwrap_or(wm.settings().default_font_index);
        let settings = wm.settings().clone();
        let closed = self.closed_area().offset(origin);

        let background = wm.color_with_alpha(id, settings.background_color);
        let border = wm.color_with_alpha(id, settings.panel_border_color);
        wm.renderer_mut().fill_rectangle(closed, background);
        wm.renderer_mut().draw_rectangle(closed, border, 1);

        if let Some(item) = self.selected_item() {
            let color = if wm.enabled(id) {
                item.color.unwrap_or(settings.text_color)
            } else {
                settings.disabled_item_color
            };
            let color = wm.color_with_alpha(id, color);
            let text_y = closed.y + (closed.height - wm.renderer().measure_string(&item.text, font).y as i32) / 2;
            wm.renderer_mut()
                .draw_string(&item.text, font, point(closed.x + TEXT_BORDER_DISTANCE, text_y), color);
        }
        draw_arrow(wm, closed, border, self.state == DropDownState::OpenedUp);

        if !self.is_open() {
            return Ok(());
        }

        let list = self.list_area().offset(origin);
        wm.renderer_mut().fill_rectangle(list, background);
        let item_height = self.item_height();
        let visible = self.visible_item_count();
        for (row, index) in (self.top_index..self.items.len()).take(visible).enumerate() {
            let item = &self.items[index];
            let line = Rectangle::new(list.x, list.y + row as i32 * item_height, list.width, item_height);
            if self.hovered_index == Some(index) {
                let highlight = wm.color_with_alpha(id, settings.focus_color);
                wm.renderer_mut().fill_rectangle(line, highlight);
            }
            let color = if item.selectable {
                item.color.unwrap_or(settings.text_color)
            } else {
                settings.disabled_item_color
            };
            let color = wm.color_with_alpha(id, color);
            let text_y = line.y + (item_height - wm.renderer().measure_string(&item.text, font).y as i32) / 2;
            wm.renderer_mut()
                .draw_string(&item.text, font, point(line.x + TEXT_BORDER_DISTANCE, text_y), color);
        }
        wm.renderer_mut().draw_rectangle(list, border, 1);
        Ok(())
    }

    fn apply_attribute(&mut self, wm: &mut WindowManager, id: ControlId, key: &str, value: &str) -> bool {
        match key {
            "Items" => {
                self.close(wm, id);
                self.items = parse_items(value);
                self.selected_index = None;
                self.top_index = 0;
            },
            "SelectedIndex" => match value.trim().parse::<usize>() {
                Ok(index) => self.set_selected_index(wm, id, Some(index)),
                Err(_) => log::warn!("Invalid selected index '{}'", value),
            },
            "OpenUp" => self.open_up = parse_bool(value).unwrap_or(self.open_up),
            "AllowDropDown" => self.allow_dropdown = parse_bool(value).unwrap_or(self.allow_dropdown),
            "MaxVisibleItems" => match value.trim().parse::<usize>() {
                Ok(count) => self.max_visible_items = count.max(1),
                Err(_) => log::warn!("Invalid item count '{}'", value),
            },
            _ => return false,
        }
        true
    }
}

/// Draw the open indicator at the right end of the closed area.
fn draw_arrow(wm: &mut WindowManager, closed: Rectangle, color: Color, pointing_up: bool) {
    let size = (closed.height / 4).max(2);
    let center = point(closed.right() - closed.height / 2, closed.y + closed.height / 2);
    let (tip, base) = if pointing_up { (-size / 2, size / 2) } else { (size / 2, -size / 2) };

    let to_f32 = |p: Point| Vector2::new(p.x as f32, p.y as f32);
    let left = to_f32(center + point(-size, base));
    let right = to_f32(center + point(size, base));
    let tip = to_f32(center + point(0, tip));
    wm.renderer_mut().draw_line(left, tip, color, 1.0);
    wm.renderer_mut().draw_line(tip, right, color, 1.0);
}
