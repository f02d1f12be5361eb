// SPDX-License-Identifier: MIT OR Apache-2.0

use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use spriteui_core::control::{Control, ControlBehavior, ControlEvent, ControlId, DrawMode};
use spriteui_core::geometry::{Point, Rectangle};
use spriteui_core::{UiError, WindowManager};

const FRAME: Duration = Duration::from_millis(16);

/// Counts how often it is updated.
struct Counter(Rc<Cell<u32>>);

impl ControlBehavior for Counter {
    fn type_name(&self) -> &'static str {
        "Counter"
    }

    fn update(&mut self, _wm: &mut WindowManager, _id: ControlId) {
        self.0.set(self.0.get() + 1);
    }
}

fn click(wm: &mut WindowManager, at: Point) {
    wm.cursor_mut().set_location(at);
    wm.cursor_mut().set_left_down(true);
    wm.update(FRAME);
    wm.cursor_mut().set_left_down(false);
    wm.update(FRAME);
}

#[test]
fn window_point_compounds_ancestor_scaling() {
    let (mut wm, _log) = WindowManager::headless(800, 600);
    let a = wm.create(Control::default().with_client_rectangle(10, 0, 100, 100));
    wm.add_control(a).unwrap();
    let b = wm
        .create_child(
            a,
            Control::default()
                .with_client_rectangle(5, 0, 40, 40)
                .with_draw_mode(DrawMode::UniqueRenderTarget)
                .with_scaling(2),
        )
        .unwrap();
    let c = wm
        .create_child(
            b,
            Control::default()
                .with_client_rectangle(2, 0, 4, 3)
                .with_draw_mode(DrawMode::UniqueRenderTarget)
                .with_scaling(3),
        )
        .unwrap();

    assert_eq!(wm.window_point(c), Point::new(19, 0));
    assert_eq!(wm.total_scaling(c), 6);
    assert_eq!(wm.window_rectangle(c), Rectangle::new(19, 0, 24, 18));

    // Drawing happens relative to the target of the nearest unique ancestor.
    assert_eq!(wm.render_point(c), Point::zeros());
    assert_eq!(wm.placement_point(c), Point::new(2, 0));
    assert_eq!(wm.placement_point(b), Point::new(15, 0));
}

#[test]
fn structural_misuse_is_rejected() {
    let (mut wm, _log) = WindowManager::headless(100, 100);
    let parent = wm.create(Control::default().with_name("parent"));
    let other = wm.create(Control::default().with_name("other"));
    wm.add_control(parent).unwrap();
    wm.add_control(other).unwrap();
    let child = wm.create_child(parent, Control::default().with_name("child")).unwrap();

    assert_eq!(
        wm.add_child(other, child),
        Err(UiError::ControlAlreadyParented {
            name: "child".to_string()
        })
    );
    assert!(matches!(
        wm.add_child(child, child),
        Err(UiError::ControlAlreadyParented { .. })
    ));

    wm.remove_child(parent, child).unwrap();
    assert!(matches!(
        wm.add_child(child, parent),
        Err(UiError::ControlAlreadyParented { .. })
    ));
    wm.remove_control(parent).unwrap();
    wm.add_child(parent, child).unwrap();
    assert!(matches!(
        wm.add_child(child, parent),
        Err(UiError::InvalidParent { .. })
    ));
    assert!(matches!(
        wm.remove_child(other, child),
        Err(UiError::InvalidParent { .. })
    ));
}

#[test]
fn draw_mode_and_scaling_rules() {
    let (mut wm, _log) = WindowManager::headless(100, 100);

    let plain = wm.create(Control::default().with_scaling(2));
    assert!(matches!(
        wm.add_control(plain),
        Err(UiError::ScalingRequiresUniqueRenderTarget { .. })
    ));

    let id = wm.create(
        Control::default()
            .with_name("scaled")
            .with_draw_mode(DrawMode::UniqueRenderTarget)
            .with_scaling(2),
    );
    assert!(matches!(
        wm.set_scaling(id, 0),
        Err(UiError::InvalidScaling { scaling: 0, .. })
    ));
    wm.add_control(id).unwrap();

    assert_eq!(
        wm.set_draw_mode(id, DrawMode::Normal),
        Err(UiError::DrawModeLocked {
            name: "scaled".to_string()
        })
    );
    assert_eq!(
        wm.set_scaling(id, 1),
        Err(UiError::ScalingBelowMinimum {
            name: "scaled".to_string(),
            scaling: 1,
            minimum: 2
        })
    );
    wm.set_scaling(id, 3).unwrap();
    assert_eq!(wm.scaling(id), 3);
}

#[test]
fn removal_during_click_is_deferred_to_the_end_of_the_traversal() {
    let (mut wm, _log) = WindowManager::headless(200, 100);
    let a_updates = Rc::new(Cell::new(0));
    let b_updates = Rc::new(Cell::new(0));

    let a = wm.create(
        Control::new(Counter(a_updates.clone()))
            .with_client_rectangle(0, 0, 50, 50)
            .with_update_order(1),
    );
    let b = wm.create(Control::new(Counter(b_updates.clone())).with_client_rectangle(100, 0, 50, 50));
    wm.add_control(a).unwrap();
    wm.add_control(b).unwrap();
    assert_eq!(wm.root_controls(), vec![a, b]);

    wm.on(a, ControlEvent::LeftClick, move |wm, _| {
        wm.remove_control(b).unwrap();
        assert!(wm.is_attached(b));
    });

    click(&mut wm, Point::new(10, 10));

    assert_eq!(a_updates.get(), 2);
    assert_eq!(b_updates.get(), 2);
    assert!(!wm.is_attached(b));
    assert!(wm.exists(b));
    assert_eq!(wm.root_controls(), vec![a]);

    wm.update(FRAME);
    assert_eq!(b_updates.get(), 2);
}

#[test]
fn killing_the_parent_from_a_child_handler() {
    let (mut wm, _log) = WindowManager::headless(200, 100);
    let window = wm.create(Control::default().with_client_rectangle(0, 0, 100, 100));
    wm.add_control(window).unwrap();
    let close = wm
        .create_child(window, Control::default().with_client_rectangle(10, 10, 20, 20))
        .unwrap();

    wm.on(close, ControlEvent::LeftClick, move |wm, _| wm.kill(window));
    click(&mut wm, Point::new(15, 15));

    assert!(!wm.exists(window));
    assert!(!wm.exists(close));
    assert!(wm.root_controls().is_empty());
    assert_eq!(wm.active_control(), None);
}

#[test]
fn add_during_update_is_applied_after_the_traversal() {
    /// Adds a counted sibling the first time it updates.
    struct Spawner {
        spawned: Rc<Cell<Option<ControlId>>>,
        sibling_updates: Rc<Cell<u32>>,
    }

    impl ControlBehavior for Spawner {
        fn type_name(&self) -> &'static str {
            "Spawner"
        }

        fn update(&mut self, wm: &mut WindowManager, id: ControlId) {
            if self.spawned.get().is_some() {
                return;
            }
            let parent = wm.parent(id).unwrap();
            let sibling = wm.create(Control::new(Counter(self.sibling_updates.clone())));
            wm.add_child(parent, sibling).unwrap();
            assert_eq!(wm.parent(sibling), None);
            self.spawned.set(Some(sibling));
        }
    }

    let (mut wm, _log) = WindowManager::headless(100, 100);
    let parent = wm.create(Control::default().with_size(100, 100));
    wm.add_control(parent).unwrap();
    let spawned = Rc::new(Cell::new(None));
    let sibling_updates = Rc::new(Cell::new(0));
    let spawner = wm
        .create_child(
            parent,
            Control::new(Spawner {
                spawned: spawned.clone(),
                sibling_updates: sibling_updates.clone(),
            }),
        )
        .unwrap();

    wm.update(FRAME);
    let sibling = spawned.get().unwrap();
    assert_eq!(wm.parent(sibling), Some(parent));
    assert_eq!(wm.children(parent), vec![spawner, sibling]);
    assert_eq!(sibling_updates.get(), 0);

    wm.update(FRAME);
    assert_eq!(sibling_updates.get(), 1);
}

#[test]
fn callbacks_queued_while_draining_wait_a_frame() {
    let (mut wm, _log) = WindowManager::headless(100, 100);
    let runs = Arc::new(AtomicUsize::new(0));

    let first = runs.clone();
    wm.root_callbacks().push(move |wm| {
        first.fetch_add(1, Ordering::SeqCst);
        let second = first.clone();
        wm.root_callbacks().push(move |_| {
            second.fetch_add(10, Ordering::SeqCst);
        });
    });

    wm.update(FRAME);
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    wm.update(FRAME);
    assert_eq!(runs.load(Ordering::SeqCst), 11);
}

#[test]
fn exclusive_capture_suppresses_hover_elsewhere() {
    let (mut wm, _log) = WindowManager::headless(200, 100);
    let captor = wm.create(Control::default().with_client_rectangle(0, 0, 50, 50));
    let other = wm.create(Control::default().with_client_rectangle(100, 0, 50, 50));
    wm.add_control(captor).unwrap();
    wm.add_control(other).unwrap();

    let entered = Rc::new(Cell::new(0));
    let counter = entered.clone();
    wm.on(other, ControlEvent::MouseEnter, move |_, _| counter.set(counter.get() + 1));

    wm.set_selected(Some(captor));
    wm.set_exclusive_input_capture(captor, true);
    wm.cursor_mut().set_location(Point::new(120, 10));
    wm.update(FRAME);

    assert_eq!(wm.active_control(), Some(captor));
    assert!(wm.input_context().exclusive_capture);
    assert_eq!(entered.get(), 0);

    wm.set_exclusive_input_capture(captor, false);
    wm.update(FRAME);
    assert_eq!(wm.active_control(), Some(other));
    assert_eq!(entered.get(), 1);
}

#[test]
fn passthrough_hands_the_cursor_to_the_next_sibling() {
    let (mut wm, _log) = WindowManager::headless(100, 100);
    let overlay = wm.create(
        Control::default()
            .with_size(100, 100)
            .with_input_passthrough(true)
            .with_update_order(1),
    );
    let below = wm.create(Control::default().with_size(100, 100));
    wm.add_control(overlay).unwrap();
    wm.add_control(below).unwrap();

    wm.cursor_mut().set_location(Point::new(5, 5));
    wm.update(FRAME);
    assert_eq!(wm.active_control(), Some(below));
}

#[test]
fn double_click_within_the_window() {
    let (mut wm, _log) = WindowManager::headless(100, 100);
    let id = wm.create(Control::default().with_size(100, 100));
    wm.add_control(id).unwrap();

    let doubles = Rc::new(Cell::new(0));
    let counter = doubles.clone();
    wm.on(id, ControlEvent::DoubleLeftClick, move |_, _| counter.set(counter.get() + 1));

    click(&mut wm, Point::new(5, 5));
    click(&mut wm, Point::new(5, 5));
    assert_eq!(doubles.get(), 1);

    // The third click starts a new pair.
    click(&mut wm, Point::new(5, 5));
    assert_eq!(doubles.get(), 1);
}

#[test]
fn ignored_input_counts_down() {
    let (mut wm, _log) = WindowManager::headless(100, 100);
    let id = wm.create(Control::default().with_size(100, 100));
    wm.add_control(id).unwrap();
    wm.set_ignore_input_time(id, Duration::from_millis(20));

    let clicks = Rc::new(Cell::new(0));
    let counter = clicks.clone();
    wm.on(id, ControlEvent::LeftClick, move |_, _| counter.set(counter.get() + 1));

    click(&mut wm, Point::new(5, 5));
    assert_eq!(clicks.get(), 0);
    click(&mut wm, Point::new(5, 5));
    assert_eq!(clicks.get(), 1);
}

#[test]
fn update_and_draw_orders_are_reversed() {
    let (mut wm, _log) = WindowManager::headless(100, 100);
    let parent = wm.create(Control::default());
    wm.add_control(parent).unwrap();
    let first = wm.create_child(parent, Control::default()).unwrap();
    let second = wm.create_child(parent, Control::default()).unwrap();

    assert_eq!(wm.children_in_update_order(parent), vec![second, first]);
    assert_eq!(wm.children_in_draw_order(parent), vec![first, second]);

    wm.set_draw_order(first, 5);
    assert_eq!(wm.children_in_draw_order(parent), vec![second, first]);

    wm.set_auto_update_child_order(parent, false);
    wm.set_update_order(first, 5);
    assert_eq!(wm.children_in_update_order(parent), vec![second, first]);
    wm.reorder_children(parent);
    assert_eq!(wm.children_in_update_order(parent), vec![first, second]);
}

#[test]
fn wheel_bubbles_to_the_first_handling_ancestor() {
    struct WheelSink(Rc<Cell<i32>>);

    impl ControlBehavior for WheelSink {
        fn type_name(&self) -> &'static str {
            "WheelSink"
        }

        fn on_mouse_scrolled(&mut self, _wm: &mut WindowManager, _id: ControlId, delta: i32) -> bool {
            self.0.set(self.0.get() + delta);
            true
        }
    }

    let (mut wm, _log) = WindowManager::headless(100, 100);
    let scrolled = Rc::new(Cell::new(0));
    let sink = wm.create(Control::new(WheelSink(scrolled.clone())).with_size(100, 100));
    wm.add_control(sink).unwrap();
    let leaf = wm
        .create_child(sink, Control::default().with_size(50, 50))
        .unwrap();

    wm.cursor_mut().set_location(Point::new(10, 10));
    wm.cursor_mut().scroll(-2);
    wm.update(FRAME);

    assert_eq!(wm.active_control(), Some(leaf));
    assert_eq!(scrolled.get(), -2);
}

#[test]
fn focused_child_is_active_away_from_its_parent() {
    let (mut wm, _log) = WindowManager::headless(200, 200);
    let parent = wm.create(Control::default().with_client_rectangle(0, 0, 50, 50));
    wm.add_control(parent).unwrap();
    let child = wm
        .create_child(parent, Control::default().with_client_rectangle(0, 0, 20, 20))
        .unwrap();
    wm.set_focused(child, true);

    wm.cursor_mut().set_location(Point::new(150, 150));
    wm.update(FRAME);
    assert_eq!(wm.active_control(), Some(child));
    assert!(wm.is_cursor_over(child));

    wm.set_focused(child, false);
    wm.update(FRAME);
    assert_eq!(wm.active_control(), None);
    assert!(!wm.is_cursor_over(child));
}

#[test]
fn removing_a_detached_child_attaches_it() {
    let (mut wm, _log) = WindowManager::headless(200, 200);
    let parent = wm.create(Control::default().with_client_rectangle(0, 0, 100, 100));
    wm.add_control(parent).unwrap();
    let popup = wm
        .create_child(parent, Control::default().with_client_rectangle(5, 5, 20, 10))
        .unwrap();
    wm.detach(popup);
    assert_eq!(wm.detached_controls(), [popup]);

    wm.remove_child(parent, popup).unwrap();
    assert!(wm.detached_controls().is_empty());
    assert!(!wm.is_detached(popup));

    wm.add_child(parent, popup).unwrap();
    wm.update(FRAME);
    wm.draw().unwrap();
}
