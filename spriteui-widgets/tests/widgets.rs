// SPDX-License-Identifier: MIT OR Apache-2.0

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use spriteui_core::control::{Control, ControlEvent, ControlId};
use spriteui_core::geometry::{point, Point, Rectangle};
use spriteui_core::layout_config::LayoutConfig;
use spriteui_core::window::KeyCode;
use spriteui_core::{UiError, WindowManager};
use spriteui_widgets::dropdown::{DropDown, DropDownState};
use spriteui_widgets::item::ListItem;
use spriteui_widgets::list_box::ListBox;
use spriteui_widgets::registry::builtin_registry;
use spriteui_widgets::scroll_panel::ScrollPanel;
use spriteui_widgets::scrollbar::{Orientation, ScrollBar};
use spriteui_widgets::tab_control::TabControl;
use spriteui_widgets::text_box::TextBox;

const FRAME: Duration = Duration::from_millis(16);

fn press(wm: &mut WindowManager, at: Point) {
    wm.cursor_mut().set_location(at);
    wm.cursor_mut().set_left_down(true);
    wm.update(FRAME);
}

fn release(wm: &mut WindowManager) {
    wm.cursor_mut().set_left_down(false);
    wm.update(FRAME);
}

fn click(wm: &mut WindowManager, at: Point) {
    press(wm, at);
    release(wm);
}

fn count_events(wm: &mut WindowManager, id: ControlId, event: ControlEvent) -> Rc<Cell<u32>> {
    let count = Rc::new(Cell::new(0));
    let counter = count.clone();
    wm.on(id, event, move |_, _| counter.set(counter.get() + 1));
    count
}

fn drop_down(wm: &mut WindowManager, drop_down: DropDown, rectangle: Rectangle) -> ControlId {
    let id = wm.create(
        Control::new(drop_down).with_client_rectangle(rectangle.x, rectangle.y, rectangle.width, rectangle.height),
    );
    wm.add_control(id).unwrap();
    id
}

fn drop_down_state(wm: &WindowManager, id: ControlId) -> DropDownState {
    wm.behavior::<DropDown>(id).unwrap().state()
}

#[test]
fn scroll_panel_shows_only_the_needed_scrollbar() {
    let (mut wm, _log) = WindowManager::headless(640, 480);
    let panel = wm.create(ScrollPanel::new().into_control().with_size(200, 100));
    wm.add_control(panel).unwrap();
    let content = ScrollPanel::content_of(&wm, panel).unwrap();
    wm.create_child(content, Control::default().with_client_rectangle(0, 0, 180, 400))
        .unwrap();

    wm.update(FRAME);

    let scroll_panel = wm.behavior::<ScrollPanel>(panel).unwrap();
    assert_eq!(scroll_panel.scroll_bars_visible(), (false, true));
    assert_eq!(scroll_panel.content_size(), point(180, 400));
    assert_eq!(scroll_panel.viewport_size(), point(184, 98));
    assert_eq!(scroll_panel.max_view_position(), point(0, 302));

    let vertical = scroll_panel.vertical_scroll_bar().unwrap();
    let corner = scroll_panel.corner().unwrap();
    assert!(wm.visible(vertical));
    assert!(!wm.visible(corner));
}

#[test]
fn scroll_panel_scrolls_with_the_wheel_and_to_targets() {
    let (mut wm, _log) = WindowManager::headless(640, 480);
    let panel = wm.create(ScrollPanel::new().into_control().with_size(200, 100));
    wm.add_control(panel).unwrap();
    let content = ScrollPanel::content_of(&wm, panel).unwrap();
    wm.create_child(content, Control::default().with_client_rectangle(0, 0, 180, 400))
        .unwrap();
    let scrolled = count_events(&mut wm, panel, ControlEvent::Scrolled);
    wm.update(FRAME);

    wm.cursor_mut().set_location(point(50, 50));
    wm.cursor_mut().scroll(-1);
    wm.update(FRAME);

    assert_eq!(wm.behavior::<ScrollPanel>(panel).unwrap().view_position(), point(0, 20));
    assert_eq!(wm.y(content), 1 - 20);
    assert_eq!(scrolled.get(), 1);

    wm.with_behavior_as::<ScrollPanel, _, _>(panel, |scroll_panel, wm| {
        scroll_panel.scroll_to(wm, panel, Rectangle::new(0, 300, 10, 50));
    });
    assert_eq!(wm.behavior::<ScrollPanel>(panel).unwrap().view_position(), point(0, 252));

    wm.with_behavior_as::<ScrollPanel, _, _>(panel, |scroll_panel, wm| {
        scroll_panel.set_view_position(wm, panel, point(50, 1000));
    });
    assert_eq!(wm.behavior::<ScrollPanel>(panel).unwrap().view_position(), point(0, 302));
}

#[test]
fn scroll_panel_adds_the_overscroll_margin_once() {
    let (mut wm, _log) = WindowManager::headless(640, 480);
    let panel = wm.create(ScrollPanel::new().into_control().with_size(200, 100));
    wm.add_control(panel).unwrap();
    let content = ScrollPanel::content_of(&wm, panel).unwrap();
    wm.create_child(content, Control::default().with_client_rectangle(0, 0, 180, 400))
        .unwrap();
    wm.update(FRAME);

    wm.with_behavior_as::<ScrollPanel, _, _>(panel, |scroll_panel, wm| {
        scroll_panel.set_overscroll_margin(wm, panel, 10);
        scroll_panel.set_overscroll_margin(wm, panel, 10);
    });
    wm.update(FRAME);
    let scroll_panel = wm.behavior::<ScrollPanel>(panel).unwrap();
    assert_eq!(scroll_panel.content_size(), point(190, 410));
    assert_eq!(scroll_panel.scroll_bars_visible(), (true, true));
    assert_eq!(scroll_panel.max_view_position(), point(6, 326));

    wm.with_behavior_as::<ScrollPanel, _, _>(panel, |scroll_panel, wm| {
        scroll_panel.set_overscroll_margin(wm, panel, 4);
    });
    wm.update(FRAME);
    let scroll_panel = wm.behavior::<ScrollPanel>(panel).unwrap();
    assert_eq!(scroll_panel.content_size(), point(184, 404));
    assert_eq!(scroll_panel.scroll_bars_visible(), (false, true));
    assert_eq!(scroll_panel.max_view_position(), point(0, 306));
}

#[test]
fn scroll_bar_thumb_drag_captures_the_cursor() {
    let (mut wm, _log) = WindowManager::headless(640, 480);
    let bar = wm.create(
        Control::new(ScrollBar::new(Orientation::Vertical).with_lengths(400, 100))
            .with_client_rectangle(0, 0, 10, 120),
    );
    let other = wm.create(Control::default().with_client_rectangle(50, 0, 50, 200));
    wm.add_control(bar).unwrap();
    wm.add_control(other).unwrap();
    let scrolled = count_events(&mut wm, bar, ControlEvent::Scrolled);
    let entered = count_events(&mut wm, other, ControlEvent::MouseEnter);

    press(&mut wm, point(5, 20));
    assert_eq!(wm.selected_control(), Some(bar));
    assert!(wm.exclusive_input_capture(bar));

    wm.cursor_mut().set_location(point(75, 70));
    wm.update(FRAME);
    assert_eq!(wm.active_control(), Some(bar));
    assert_eq!(wm.behavior::<ScrollBar>(bar).unwrap().view_top(), 200);
    assert_eq!(scrolled.get(), 1);
    assert_eq!(entered.get(), 0);

    release(&mut wm);
    assert!(!wm.exclusive_input_capture(bar));
    assert_eq!(wm.selected_control(), None);
    assert_eq!(entered.get(), 0);

    wm.update(FRAME);
    assert_eq!(wm.active_control(), Some(other));
    assert_eq!(entered.get(), 1);
    assert_eq!(wm.behavior::<ScrollBar>(bar).unwrap().view_top(), 200);
}

#[test]
fn drop_down_ignores_the_release_of_the_opening_click() {
    let (mut wm, _log) = WindowManager::headless(640, 480);
    let id = drop_down(
        &mut wm,
        DropDown::new().with_items(["a", "b", "c"]),
        Rectangle::new(10, 10, 100, 20),
    );
    let changed = count_events(&mut wm, id, ControlEvent::SelectedIndexChanged);

    press(&mut wm, point(15, 15));
    assert_eq!(drop_down_state(&wm, id), DropDownState::OpenedDown);
    assert!(wm.is_detached(id));
    assert_eq!(wm.client_rectangle(id), Rectangle::new(10, 10, 100, 80));

    release(&mut wm);
    assert_eq!(drop_down_state(&wm, id), DropDownState::OpenedDown);

    wm.cursor_mut().set_location(point(15, 55));
    wm.update(FRAME);
    assert_eq!(wm.behavior::<DropDown>(id).unwrap().hovered_index(), Some(1));

    click(&mut wm, point(15, 55));
    let dropdown = wm.behavior::<DropDown>(id).unwrap();
    assert_eq!(dropdown.state(), DropDownState::Closed);
    assert_eq!(dropdown.selected_index(), Some(1));
    assert!(!wm.is_detached(id));
    assert_eq!(wm.client_rectangle(id), Rectangle::new(10, 10, 100, 20));
    assert_eq!(changed.get(), 1);
}

#[test]
fn drop_down_closes_on_a_press_elsewhere() {
    let (mut wm, _log) = WindowManager::headless(640, 480);
    let id = drop_down(
        &mut wm,
        DropDown::new().with_items(["a", "b"]),
        Rectangle::new(10, 10, 100, 20),
    );

    click(&mut wm, point(15, 15));
    assert!(wm.behavior::<DropDown>(id).unwrap().is_open());

    press(&mut wm, point(300, 300));
    let dropdown = wm.behavior::<DropDown>(id).unwrap();
    assert_eq!(dropdown.state(), DropDownState::Closed);
    assert_eq!(dropdown.selected_index(), None);
    assert_eq!(wm.client_rectangle(id), Rectangle::new(10, 10, 100, 20));
}

#[test]
fn drop_down_opens_upwards_without_room_below() {
    let (mut wm, _log) = WindowManager::headless(640, 480);
    let id = drop_down(
        &mut wm,
        DropDown::new().with_items(["a", "b", "c"]),
        Rectangle::new(10, 450, 100, 20),
    );

    press(&mut wm, point(15, 455));

    assert_eq!(drop_down_state(&wm, id), DropDownState::OpenedUp);
    assert_eq!(wm.client_rectangle(id), Rectangle::new(10, 390, 100, 80));
}

#[test]
fn drop_down_wheel_skips_only_one_unselectable_neighbour() {
    let (mut wm, _log) = WindowManager::headless(640, 480);
    let one_gap = drop_down(
        &mut wm,
        DropDown::new()
            .with_items([
                ListItem::new("a"),
                ListItem::new("-").with_selectable(false),
                ListItem::new("b"),
            ])
            .with_selected_index(Some(0)),
        Rectangle::new(10, 10, 100, 20),
    );
    let two_gaps = drop_down(
        &mut wm,
        DropDown::new()
            .with_items([
                ListItem::new("a"),
                ListItem::new("-").with_selectable(false),
                ListItem::new("-").with_selectable(false),
                ListItem::new("b"),
            ])
            .with_selected_index(Some(0)),
        Rectangle::new(10, 100, 100, 20),
    );

    wm.cursor_mut().set_location(point(15, 15));
    wm.cursor_mut().scroll(-1);
    wm.update(FRAME);
    assert_eq!(wm.behavior::<DropDown>(one_gap).unwrap().selected_index(), Some(2));

    wm.cursor_mut().set_location(point(15, 105));
    wm.cursor_mut().scroll(-1);
    wm.update(FRAME);
    assert_eq!(wm.behavior::<DropDown>(two_gaps).unwrap().selected_index(), Some(0));
}

#[test]
fn list_box_arrow_keys_repeat_while_held() {
    let (mut wm, _log) = WindowManager::headless(640, 480);
    let list = (0..10).fold(ListBox::new(), |list, index| list.with_item(format!("Item {}", index)));
    let id = wm.create(Control::new(list).with_client_rectangle(0, 0, 100, 100));
    wm.add_control(id).unwrap();
    wm.set_selected(Some(id));

    let selected = |wm: &WindowManager| wm.behavior::<ListBox>(id).unwrap().selected_index();

    wm.keyboard_mut().press(KeyCode::ArrowDown);
    wm.update(Duration::from_millis(100));
    assert_eq!(selected(&wm), Some(0));

    for _ in 0..3 {
        wm.update(Duration::from_millis(100));
        assert_eq!(selected(&wm), Some(0));
    }
    wm.update(Duration::from_millis(100));
    assert_eq!(selected(&wm), Some(1));

    wm.update(Duration::from_millis(30));
    assert_eq!(selected(&wm), Some(2));
    wm.update(Duration::from_millis(90));
    assert_eq!(selected(&wm), Some(5));
    // 20 pixel rows in a 100 pixel list show five items.
    assert_eq!(wm.behavior::<ListBox>(id).unwrap().top_index(), 1);

    wm.keyboard_mut().release(KeyCode::ArrowDown);
    wm.update(Duration::from_millis(500));
    assert_eq!(selected(&wm), Some(5));
}

#[test]
fn list_box_click_selects_the_hovered_item() {
    let (mut wm, _log) = WindowManager::headless(640, 480);
    let list = ListBox::new()
        .with_item("a")
        .with_item(ListItem::new("b").with_selectable(false))
        .with_item("c");
    let id = wm.create(Control::new(list).with_client_rectangle(0, 0, 100, 100));
    wm.add_control(id).unwrap();

    click(&mut wm, point(10, 45));
    assert_eq!(wm.behavior::<ListBox>(id).unwrap().selected_index(), Some(2));

    click(&mut wm, point(10, 25));
    assert_eq!(wm.behavior::<ListBox>(id).unwrap().selected_index(), Some(2));
}

#[test]
fn text_box_edits_at_the_caret() {
    let (mut wm, _log) = WindowManager::headless(640, 480);
    let id = wm.create(
        Control::new(TextBox::new().with_max_length(5))
            .with_name("txtName")
            .with_client_rectangle(0, 0, 100, 20),
    );
    wm.add_control(id).unwrap();
    let entered = count_events(&mut wm, id, ControlEvent::EnterPressed);
    wm.set_selected(Some(id));

    for character in "abcdefg".chars() {
        wm.push_character(character);
    }
    wm.update(FRAME);
    assert_eq!(wm.text(id), "abcde");

    wm.keyboard_mut().press(KeyCode::Home);
    wm.update(FRAME);
    wm.keyboard_mut().release(KeyCode::Home);
    wm.keyboard_mut().press(KeyCode::Delete);
    wm.update(FRAME);
    wm.keyboard_mut().release(KeyCode::Delete);
    assert_eq!(wm.text(id), "bcde");
    assert_eq!(wm.behavior::<TextBox>(id).unwrap().caret(), 0);

    wm.keyboard_mut().press(KeyCode::End);
    wm.update(FRAME);
    wm.keyboard_mut().release(KeyCode::End);
    wm.keyboard_mut().press(KeyCode::Backspace);
    wm.update(FRAME);
    wm.keyboard_mut().release(KeyCode::Backspace);
    assert_eq!(wm.text(id), "bcd");

    wm.keyboard_mut().press(KeyCode::Enter);
    wm.update(FRAME);
    wm.keyboard_mut().release(KeyCode::Enter);
    assert_eq!(entered.get(), 1);
}

#[test]
fn text_box_rejects_text_over_the_limit() {
    let (mut wm, _log) = WindowManager::headless(640, 480);
    let id = wm.create(
        Control::new(TextBox::new().with_max_length(3))
            .with_name("txtCode")
            .with_size(100, 20),
    );
    wm.add_control(id).unwrap();

    let result = wm
        .with_behavior_as::<TextBox, _, _>(id, |text_box, wm| text_box.set_text(wm, id, "toolong"))
        .unwrap();
    assert!(matches!(
        result,
        Err(UiError::TextTooLong { ref name, length: 7, max_length: 3 }) if name == "txtCode"
    ));
    assert_eq!(wm.text(id), "");

    wm.with_behavior_as::<TextBox, _, _>(id, |text_box, wm| text_box.set_text(wm, id, "abc"))
        .unwrap()
        .unwrap();
    assert_eq!(wm.text(id), "abc");
}

#[test]
fn text_box_keeps_the_caret_visible() {
    let (mut wm, _log) = WindowManager::headless(640, 480);
    // Room for ten 8 pixel glyphs between the borders.
    let id = wm.create(Control::new(TextBox::new()).with_size(86, 20));
    wm.add_control(id).unwrap();

    wm.with_behavior_as::<TextBox, _, _>(id, |text_box, wm| {
        text_box.set_text(wm, id, "abcdefghijklmno")
    })
    .unwrap()
    .unwrap();

    let text_box = wm.behavior::<TextBox>(id).unwrap();
    assert_eq!(text_box.caret(), 15);
    assert_eq!(text_box.view_start(), 5);
    assert_eq!(text_box.visible_text(&wm, id), "fghijklmno");
}

#[test]
fn tab_control_selects_enabled_tabs() {
    let (mut wm, _log) = WindowManager::headless(640, 480);
    let id = wm.create(
        Control::new(TabControl::new().with_tabs(["ab", "abcd", "x"])).with_client_rectangle(0, 0, 200, 24),
    );
    wm.add_control(id).unwrap();
    let changed = count_events(&mut wm, id, ControlEvent::SelectedIndexChanged);

    click(&mut wm, point(40, 10));
    assert_eq!(wm.behavior::<TabControl>(id).unwrap().selected_tab(), 1);
    assert_eq!(changed.get(), 1);

    wm.behavior_mut::<TabControl>(id).unwrap().set_tab_enabled(2, false);
    click(&mut wm, point(85, 10));
    assert_eq!(wm.behavior::<TabControl>(id).unwrap().selected_tab(), 1);
    assert_eq!(changed.get(), 1);
}

#[test]
fn layout_creates_built_in_widgets() {
    const LAYOUT: &str = r#"
[Window]
Size = [400, 300]
"$CC0" = "ddQuality:DropDown"
"$CC1" = "tabSettings:TabControl"
"$CC2" = "lstSaves:ListBox"

[ddQuality]
Location = [10, 10]
Size = [100, 20]
Items = "Low,Medium,High"
SelectedIndex = 2

[tabSettings]
Y = 40
Size = [200, 24]
Tabs = ["General", "Audio"]

[lstSaves]
Location = "10,70"
Size = "150,100"
Items = "one, two"
"#;

    let config = LayoutConfig::from_toml(LAYOUT).unwrap();
    let registry = builtin_registry();
    let (mut wm, _log) = WindowManager::headless(640, 480);
    let window = wm.create(Control::default().with_name("Window"));
    wm.add_control(window).unwrap();

    config.apply(&mut wm, &registry, window).unwrap();

    let quality = wm.find_child(window, "ddQuality", false).unwrap();
    let dropdown = wm.behavior::<DropDown>(quality).unwrap();
    assert_eq!(dropdown.items().len(), 3);
    assert_eq!(dropdown.selected_item().map(|item| item.text.as_str()), Some("High"));
    assert_eq!(wm.client_rectangle(quality), Rectangle::new(10, 10, 100, 20));

    let tabs = wm.find_child(window, "tabSettings", false).unwrap();
    let names: Vec<_> = wm
        .behavior::<TabControl>(tabs)
        .unwrap()
        .tabs()
        .iter()
        .map(|tab| tab.text.clone())
        .collect();
    assert_eq!(names, ["General", "Audio"]);

    let saves = wm.find_child(window, "lstSaves", false).unwrap();
    let items: Vec<_> = wm
        .behavior::<ListBox>(saves)
        .unwrap()
        .items()
        .iter()
        .map(|item| item.text.clone())
        .collect();
    assert_eq!(items, ["one", "two"]);
}
