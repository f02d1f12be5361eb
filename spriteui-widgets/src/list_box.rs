// SPDX-License-Identifier: MIT OR Apache-2.0

use spriteui_core::control::{Capabilities, Control, ControlBehavior, ControlEvent, ControlId};
use spriteui_core::error::UiError;
use spriteui_core::geometry::{point, Rectangle};
use spriteui_core::input::KeyRepeat;
use spriteui_core::window::KeyCode;
use spriteui_core::window_manager::parse_bool;
use spriteui_core::WindowManager;

use crate::item::{next_selectable, parse_items, ListItem};
use crate::panel::{draw_border, fill_background};
use crate::scrollbar::{Orientation, ScrollBar};

const TEXT_BORDER_DISTANCE: i32 = 3;

/// A scrollable list of text items.
///
/// The hovered item follows the cursor and a click selects it. While the
/// list box is the selected control, the up and down arrow keys move the
/// selection, repeating while held. Items that are not selectable are
/// drawn but can never be hovered or selected.
///
/// ```rust
/// use spriteui_core::control::Control;
/// use spriteui_widgets::item::ListItem;
/// use spriteui_widgets::list_box::ListBox;
///
/// let list = ListBox::new()
///     .with_item("Easy")
///     .with_item(ListItem::new("Hard").with_selectable(false));
/// let control = Control::new(list).with_size(120, 80);
/// ```
#[derive(Debug, Clone)]
pub struct ListBox {
    items: Vec<ListItem>,
    selected_index: Option<usize>,
    hovered_index: Option<usize>,
    top_index: usize,
    font_index: Option<usize>,
    allow_keyboard_input: bool,
    scroll_bar: Option<ControlId>,
    key_up: KeyRepeat,
    key_down: KeyRepeat,
}

impl ListBox {
    /// Create an empty list.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            selected_index: None,
            hovered_index: None,
            top_index: 0,
            font_index: None,
            allow_keyboard_input: true,
            scroll_bar: None,
            key_up: KeyRepeat::default(),
            key_down: KeyRepeat::default(),
        }
    }

    /// Append an item.
    pub fn with_item(mut self, item: impl Into<ListItem>) -> Self {
        self.items.push(item.into());
        self
    }

    /// Set the font.
    pub fn with_font_index(mut self, font_index: usize) -> Self {
        self.font_index = Some(font_index);
        self
    }

    /// Set whether the arrow keys move the selection.
    pub fn with_keyboard_input(mut self, allow: bool) -> Self {
        self.allow_keyboard_input = allow;
        self
    }

    /// The items.
    pub fn items(&self) -> &[ListItem] {
        &self.items
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

    /// The first visible item index.
    pub fn top_index(&self) -> usize {
        self.top_index
    }

    /// The scrollbar, once initialized.
    pub fn scroll_bar(&self) -> Option<ControlId> {
        self.scroll_bar
    }

    fn font(&self, wm: &WindowManager) -> usize {
        self.font_index.unwrap_or(wm.settings().default_font_index)
    }

    /// Height of one item row.
    pub fn line_height(&self, wm: &WindowManager) -> i32 {
        let glyph = wm.renderer().measure_string("A", self.font(wm)).y.ceil() as i32;
        (glyph + wm.settings().list_item_spacing).max(1)
    }

    /// How many rows fit in the list.
    pub fn visible_line_count(&self, wm: &WindowManager, id: ControlId) -> usize {
        (wm.height(id) / self.line_height(wm)).max(0) as usize
    }

    fn max_top_index(&self, wm: &WindowManager, id: ControlId) -> usize {
        self.items.len().saturating_sub(self.visible_line_count(wm, id))
    }

    /// Append an item.
    pub fn add_item(&mut self, wm: &mut WindowManager, id: ControlId, item: impl Into<ListItem>) {
        self.items.push(item.into());
        self.refresh_scroll_bar(wm, id);
    }

    /// Remove the item at `index`, keeping the selection on the same item if it survives.
    pub fn remove_item(&mut self, wm: &mut WindowManager, id: ControlId, index: usize) -> Option<ListItem> {
        if index >= self.items.len() {
            return None;
        }
        let item = self.items.remove(index);

        match self.selected_index {
            Some(selected) if selected == index => self.set_selected_index(wm, id, None),
            Some(selected) if selected > index => self.selected_index = Some(selected - 1),
            _ => {},
        }
        self.hovered_index = None;
        let top = self.top_index;
        self.set_top_index(wm, id, top);
        self.refresh_scroll_bar(wm, id);
        Some(item)
    }

    /// Remove every item.
    pub fn clear(&mut self, wm: &mut WindowManager, id: ControlId) {
        self.items.clear();
        self.hovered_index = None;
        self.set_selected_index(wm, id, None);
        self.set_top_index(wm, id, 0);
        self.refresh_scroll_bar(wm, id);
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

    /// Set the first visible item, clamped to the valid range.
    pub fn set_top_index(&mut self, wm: &mut WindowManager, id: ControlId, top_index: usize) {
        let top_index = top_index.min(self.max_top_index(wm, id));
        if self.top_index != top_index {
            self.top_index = top_index;
            wm.raise_event(id, ControlEvent::TopIndexChanged);
        }
        if let Some(bar) = self.scroll_bar {
            if let Some(bar) = wm.behavior_mut::<ScrollBar>(bar) {
                bar.set_view_top(top_index as i32);
            }
        }
    }

    /// Scroll so the item at `index` is visible.
    pub fn scroll_into_view(&mut self, wm: &mut WindowManager, id: ControlId, index: usize) {
        let visible = self.visible_line_count(wm, id).max(1);
        if index < self.top_index {
            self.set_top_index(wm, id, index);
        } else if index >= self.top_index + visible {
            self.set_top_index(wm, id, index + 1 - visible);
        }
    }

    fn refresh_scroll_bar(&mut self, wm: &mut WindowManager, id: ControlId) {
        let Some(bar) = self.scroll_bar else {
            return;
        };
        let visible = self.visible_line_count(wm, id);
        let thickness = wm.settings().scroll_bar_thickness;
        let rectangle = Rectangle::new(wm.width(id) - thickness, 0, thickness, wm.height(id));
        if wm.client_rectangle(bar) != rectangle {
            wm.set_client_rectangle(bar, rectangle);
        }
        let shown = self.items.len() > visible;
        if wm.visible(bar) != shown {
            wm.set_visible(bar, shown);
        }
        let top = self.top_index as i32;
        if let Some(bar) = wm.behavior_mut::<ScrollBar>(bar) {
            bar.set_lengths(self.items.len() as i32, visible as i32);
            bar.set_view_top(top);
        }
    }

    fn item_area_width(&self, wm: &WindowManager, id: ControlId) -> i32 {
        let bar = self.scroll_bar.filter(|bar| wm.visible(*bar));
        wm.width(id) - bar.map_or(0, |bar| wm.width(bar))
    }

    fn update_hover(&mut self, wm: &mut WindowManager, id: ControlId) {
        let cursor = wm.cursor_point(id);
        let hovered = if wm.is_active(id) && cursor.x >= 0 && cursor.x < self.item_area_width(wm, id) && cursor.y >= 0 {
            let index = self.top_index + (cursor.y / self.line_height(wm)) as usize;
            let visible_end = self.top_index + self.visible_line_count(wm, id);
            self.items
                .get(index)
                .filter(|item| item.selectable && index < visible_end)
                .map(|_| index)
        } else {
            None
        };

        if hovered != self.hovered_index {
            self.hovered_index = hovered;
            wm.raise_event(id, ControlEvent::HoveredIndexChanged);
        }
    }

    fn move_selection(&mut self, wm: &mut WindowManager, id: ControlId, direction: i32) {
        if let Some(index) = next_selectable(&self.items, self.selected_index, direction) {
            self.set_selected_index(wm, id, Some(index));
            self.scroll_into_view(wm, id, index);
        }
    }

    fn handle_keys(&mut self, wm: &mut WindowManager, id: ControlId) {
        let listening = self.allow_keyboard_input && wm.is_selected(id);
        let elapsed = wm.elapsed();
        let up = listening && wm.keyboard().is_key_down(KeyCode::ArrowUp);
        let down = listening && wm.keyboard().is_key_down(KeyCode::ArrowDown);

        for _ in 0..self.key_up.update(up, elapsed) {
            self.move_selection(wm, id, -1);
        }
        for _ in 0..self.key_down.update(down, elapsed) {
            self.move_selection(wm, id, 1);
        }
    }
}

impl Default for ListBox {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlBehavior for ListBox {
    fn type_name(&self) -> &'static str {
        "ListBox"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::SELECTABLE | Capabilities::SCROLLABLE
    }

    fn initialize(&mut self, wm: &mut WindowManager, id: ControlId) -> Result<(), UiError> {
        let bar = wm.create_child(
            id,
            Control::new(ScrollBar::new(Orientation::Vertical))
                .with_name("ListBoxScrollBar")
                .with_visible(false),
        )?;
        wm.on(bar, ControlEvent::Scrolled, move |wm, bar| {
            let Some(top) = wm.behavior::<ScrollBar>(bar).map(ScrollBar::view_top) else {
                return;
            };
            wm.with_behavior_as::<ListBox, _, _>(id, |list, wm| {
                list.set_top_index(wm, id, top.max(0) as usize)
            });
        });
        self.scroll_bar = Some(bar);
        self.refresh_scroll_bar(wm, id);
        Ok(())
    }

    fn update(&mut self, wm: &mut WindowManager, id: ControlId) {
        self.update_hover(wm, id);
        self.handle_keys(wm, id);
    }

    fn on_client_rectangle_updated(&mut self, wm: &mut WindowManager, id: ControlId) {
        let top = self.top_index;
        self.set_top_index(wm, id, top);
        self.refresh_scroll_bar(wm, id);
    }

    fn on_left_click(&mut self, wm: &mut WindowManager, id: ControlId) {
        if let Some(index) = self.hovered_index {
            self.set_selected_index(wm, id, Some(index));
        }
    }

    fn on_mouse_scrolled(&mut self, wm: &mut WindowManager, id: ControlId, delta: i32) -> bool {
        if self.max_top_index(wm, id) == 0 {
            return false;
        }
        let top = (self.top_index as i64 - delta as i64).max(0) as usize;
        self.set_top_index(wm, id, top);
        true
    }

    fn draw(&mut self, wm: &mut WindowManager, id: ControlId) -> Result<(), UiError> {
        let background = wm.settings().background_color;
        fill_background(wm, id, background);

        let rectangle = wm.render_rectangle(id);
        let font = self.font(wm);
        let line_height = self.line_height(wm);
        let width = self.item_area_width(wm, id);
        let visible = self.visible_line_count(wm, id);

        for (row, index) in (self.top_index..self.items.len()).take(visible).enumerate() {
            let item = &self.items[index];
            let y = rectangle.y + row as i32 * line_height;
            let line = Rectangle::new(rectangle.x + 1, y, width - 2, line_height);

            let settings = wm.settings();
            let highlight = if self.selected_index == Some(index) {
                Some(settings.focus_color)
            } else if self.hovered_index == Some(index) {
                Some(settings.alt_color.multiply_alpha(0.5))
            } else {
                None
            };
            let text_color = if item.selectable {
                item.color.unwrap_or(settings.text_color)
            } else {
                settings.disabled_item_color
            };

            if let Some(highlight) = highlight {
                let highlight = wm.color_with_alpha(id, highlight);
                wm.renderer_mut().fill_rectangle(line, highlight);
            }
            let text_color = wm.color_with_alpha(id, text_color);
            wm.renderer_mut().draw_string(
                &item.text,
                font,
                point(rectangle.x + TEXT_BORDER_DISTANCE, y + 1),
                text_color,
            );
        }

        let border = wm.settings().panel_border_color;
        draw_border(wm, id, border);
        Ok(())
    }

    fn apply_attribute(&mut self, wm: &mut WindowManager, id: ControlId, key: &str, value: &str) -> bool {
        match key {
            "Items" => {
                self.items = parse_items(value);
                self.selected_index = None;
                self.hovered_index = None;
                self.top_index = 0;
                self.refresh_scroll_bar(wm, id);
            },
            "AllowKeyboardInput" => {
                self.allow_keyboard_input = parse_bool(value).unwrap_or(self.allow_keyboard_input)
            },
            "FontIndex" => match value.trim().parse() {
                Ok(index) => self.font_index = Some(index),
                Err(_) => log::warn!("Invalid font index '{}'", value),
            },
            _ => return false,
        }
        true
    }
}
