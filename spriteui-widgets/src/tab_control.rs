// SPDX-License-Identifier: MIT OR Apache-2.0

use spriteui_core::control::{Capabilities, ControlBehavior, ControlEvent, ControlId};
use spriteui_core::error::UiError;
use spriteui_core::geometry::{point, Rectangle};
use spriteui_core::WindowManager;

use crate::item::parse_items;

const TAB_PADDING: i32 = 8;

/// One tab of a [TabControl].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    /// Displayed text.
    pub text: String,
    /// If the tab can be selected.
    pub enabled: bool,
}

impl Tab {
    /// Create an enabled tab.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            enabled: true,
        }
    }

    /// Set whether the tab can be selected.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// A row of tabs laid out left to right, each as wide as its text plus padding.
///
/// Clicking an enabled tab selects it and raises
/// [ControlEvent::SelectedIndexChanged].
#[derive(Debug, Clone, Default)]
pub struct TabControl {
    tabs: Vec<Tab>,
    selected_tab: usize,
    hovered_tab: Option<usize>,
    font_index: Option<usize>,
}

impl TabControl {
    /// Create a tab control without tabs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add tabs.
    pub fn with_tabs<I, T>(mut self, tabs: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tabs.extend(tabs.into_iter().map(Tab::new));
        self
    }

    /// Set the font.
    pub fn with_font_index(mut self, font_index: usize) -> Self {
        self.font_index = Some(font_index);
        self
    }

    /// The tabs.
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Append a tab.
    pub fn add_tab(&mut self, tab: Tab) {
        self.tabs.push(tab);
    }

    /// Enable or disable a tab.
    pub fn set_tab_enabled(&mut self, index: usize, enabled: bool) {
        if let Some(tab) = self.tabs.get_mut(index) {
            tab.enabled = enabled;
        }
    }

    /// Index of the selected tab.
    pub fn selected_tab(&self) -> usize {
        self.selected_tab
    }

    /// Index of the tab under the cursor.
    pub fn hovered_tab(&self) -> Option<usize> {
        self.hovered_tab
    }

    /// Select a tab. Disabled and missing tabs are ignored.
    pub fn set_selected_tab(&mut self, wm: &mut WindowManager, id: ControlId, index: usize) {
        if index == self.selected_tab || !self.tabs.get(index).is_some_and(|tab| tab.enabled) {
            return;
        }
        self.selected_tab = index;
        wm.raise_event(id, ControlEvent::SelectedIndexChanged);
    }

    fn font(&self, wm: &WindowManager) -> usize {
        self.font_index.unwrap_or(wm.settings().default_font_index)
    }

    /// Tab rectangles relative to the control.
    pub fn tab_rectangles(&self, wm: &WindowManager, id: ControlId) -> Vec<Rectangle> {
        let font = self.font(wm);
        let height = wm.height(id);
        let mut x = 0;
        self.tabs
            .iter()
            .map(|tab| {
                let width = wm.renderer().measure_string(&tab.text, font).x.ceil() as i32 + TAB_PADDING * 2;
                let rectangle = Rectangle::new(x, 0, width, height);
                x += width;
                rectangle
            })
            .collect()
    }

    fn tab_at_cursor(&self, wm: &WindowManager, id: ControlId) -> Option<usize> {
        let cursor = wm.cursor_point(id);
        self.tab_rectangles(wm, id)
            .iter()
            .position(|rectangle| rectangle.contains(cursor))
            .filter(|index| self.tabs[*index].enabled)
    }
}

impl ControlBehavior for TabControl {
    fn type_name(&self) -> &'static str {
        "TabControl"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::SELECTABLE
    }

    fn update(&mut self, wm: &mut WindowManager, id: ControlId) {
        self.hovered_tab = if wm.is_cursor_on(id) && wm.enabled(id) {
            self.tab_at_cursor(wm, id)
        } else {
            None
        };
    }

    fn on_left_click(&mut self, wm: &mut WindowManager, id: ControlId) {
        if let Some(index) = self.tab_at_cursor(wm, id) {
            self.set_selected_tab(wm, id, index);
        }
    }

    fn draw(&mut self, wm: &mut WindowManager, id: ControlId) -> Result<(), UiError> {
        let origin = wm.render_point(id);
        let font = self.font(wm);
        let settings = wm.settings().clone();

        for (index, rectangle) in self.tab_rectangles(wm, id).into_iter().enumerate() {
            let tab = &self.tabs[index];
            let rectangle = rectangle.offset(origin);

            let background = if index == self.selected_tab {
                Some(settings.alt_color)
            } else if Some(index) == self.hovered_tab {
                Some(settings.button_hover_color)
            } else {
                None
            };
            if let Some(background) = background {
                let color = wm.color_with_alpha(id, background);
                wm.renderer_mut().fill_rectangle(rectangle, color);
            }

            let border = wm.color_with_alpha(id, settings.panel_border_color);
            wm.renderer_mut().draw_rectangle(rectangle, border, 1);

            let text_color = if tab.enabled && wm.enabled(id) {
                settings.text_color
            } else {
                settings.disabled_item_color
            };
            let text_color = wm.color_with_alpha(id, text_color);
            let text_height = wm.renderer().measure_string(&tab.text, font).y as i32;
            let position = point(
                rectangle.x + TAB_PADDING,
                rectangle.y + (rectangle.height - text_height) / 2,
            );
            wm.renderer_mut().draw_string(&tab.text, font, position, text_color);
        }
        Ok(())
    }

    fn apply_attribute(&mut self, _wm: &mut WindowManager, _id: ControlId, key: &str, value: &str) -> bool {
        match key {
            "Tabs" => {
                self.tabs = parse_items(value).into_iter().map(|item| Tab::new(item.text)).collect();
                self.selected_tab = 0;
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

#[cfg(test)]
mod tests {
    use spriteui_core::control::Control;

    use super::*;

    #[test]
    fn test_tabs_are_laid_out_by_text_width() {
        let (mut wm, _log) = WindowManager::headless(640, 480);
        let id = wm.create(
            Control::new(TabControl::new().with_tabs(["ab", "abcd"])).with_client_rectangle(0, 0, 200, 24),
        );
        wm.add_control(id).unwrap();

        let tabs = wm.behavior::<TabControl>(id).unwrap().tab_rectangles(&wm, id);
        assert_eq!(tabs, vec![Rectangle::new(0, 0, 32, 24), Rectangle::new(32, 0, 48, 24)]);
    }
}
