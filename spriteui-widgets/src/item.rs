// SPDX-License-Identifier: MIT OR Apache-2.0

use spriteui_theme::Color;

/// An entry of a [ListBox](crate::list_box::ListBox) or [DropDown](crate::dropdown::DropDown).
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    /// Displayed text.
    pub text: String,
    /// Text color, or the default text color if `None`.
    pub color: Option<Color>,
    /// If the item can be hovered and selected.
    pub selectable: bool,
    /// Free-form user data.
    pub tag: Option<String>,
}

impl ListItem {
    /// Create a selectable item.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
            selectable: true,
            tag: None,
        }
    }

    /// Set the text color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Set whether the item can be selected.
    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Attach user data.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

impl From<&str> for ListItem {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for ListItem {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// Index of the closest selectable item after `from` in `direction` (+1 or -1).
pub(crate) fn next_selectable(items: &[ListItem], from: Option<usize>, direction: i32) -> Option<usize> {
    let len = items.len() as i64;
    let mut index = match from {
        Some(index) => index as i64 + direction as i64,
        None if direction > 0 => 0,
        None => len - 1,
    };
    while (0..len).contains(&index) {
        if items[index as usize].selectable {
            return Some(index as usize);
        }
        index += direction as i64;
    }
    None
}

/// Parse the `"a,b,c"` attribute form into items.
pub(crate) fn parse_items(value: &str) -> Vec<ListItem> {
    value
        .split(',')
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ListItem::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_selectable_skips_any_number_of_items() {
        let items = vec![
            ListItem::new("a"),
            ListItem::new("-").with_selectable(false),
            ListItem::new("-").with_selectable(false),
            ListItem::new("b"),
        ];
        assert_eq!(next_selectable(&items, Some(0), 1), Some(3));
        assert_eq!(next_selectable(&items, Some(3), -1), Some(0));
        assert_eq!(next_selectable(&items, Some(3), 1), None);
        assert_eq!(next_selectable(&items, None, 1), Some(0));
    }
}
