// SPDX-License-Identifier: MIT OR Apache-2.0

use spriteui_core::control::{Control, ControlBehavior, ControlId, DrawMode};
use spriteui_core::error::UiError;
use spriteui_core::geometry::{Point, Rectangle};
use spriteui_core::graphics::headless::DrawCommand;
use spriteui_core::graphics::{GraphicsError, SamplerState};
use spriteui_core::WindowManager;
use spriteui_theme::Color;

/// Fills its render rectangle with one color.
struct Fill(Color);

impl ControlBehavior for Fill {
    fn type_name(&self) -> &'static str {
        "Fill"
    }

    fn draw(&mut self, wm: &mut WindowManager, id: ControlId) -> Result<(), UiError> {
        let rectangle = wm.render_rectangle(id);
        wm.renderer_mut().fill_rectangle(rectangle, self.0);
        Ok(())
    }
}

#[test]
fn unique_render_target_is_drawn_back_at_placement() {
    let (mut wm, log) = WindowManager::headless(200, 200);
    let parent = wm.create(Control::default().with_client_rectangle(20, 10, 100, 100));
    wm.add_control(parent).unwrap();
    let child = wm
        .create_child(
            parent,
            Control::new(Fill(Color::WHITE))
                .with_client_rectangle(5, 5, 30, 20)
                .with_draw_mode(DrawMode::UniqueRenderTarget)
                .with_scaling(2),
        )
        .unwrap();

    wm.draw().unwrap();
    assert!(wm.has_render_target(child));
    assert_eq!(wm.renderer().render_target_depth(), 0);

    let commands = log.commands();
    let blit = commands
        .iter()
        .find_map(|command| match command {
            DrawCommand::DrawTexture {
                source: Some(source),
                destination,
                ..
            } if *destination == Rectangle::new(25, 15, 60, 40) => Some(*source),
            _ => None,
        })
        .expect("scaled blit");
    assert_eq!(blit, Rectangle::new(0, 0, 30, 20));

    let point_sampled = commands.iter().any(|command| {
        matches!(command, DrawCommand::Begin(settings) if settings.sampler_state == SamplerState::PointClamp)
    });
    assert!(point_sampled);
}

#[test]
fn hidden_controls_can_return_their_target_to_the_pool() {
    let (mut wm, _log) = WindowManager::headless(100, 100);
    let id = wm.create(
        Control::new(Fill(Color::BLACK))
            .with_size(40, 40)
            .with_draw_mode(DrawMode::UniqueRenderTarget)
            .with_free_render_target_when_hidden(true),
    );
    wm.add_control(id).unwrap();
    wm.draw().unwrap();
    assert_eq!(wm.renderer().pooled_render_targets(), 0);

    wm.set_visible(id, false);
    assert!(!wm.has_render_target(id));
    assert_eq!(wm.renderer().pooled_render_targets(), 1);

    wm.set_visible(id, true);
    wm.draw().unwrap();
    assert!(wm.has_render_target(id));
    assert_eq!(wm.renderer().pooled_render_targets(), 0);
}

#[test]
fn resizing_releases_the_target_unless_suppressed() {
    let (mut wm, _log) = WindowManager::headless(100, 100);
    let parent = wm.create(Control::default().with_size(100, 100));
    wm.add_control(parent).unwrap();
    let id = wm
        .create_child(
            parent,
            Control::new(Fill(Color::BLACK))
                .with_size(10, 10)
                .with_draw_mode(DrawMode::UniqueRenderTarget),
        )
        .unwrap();
    wm.draw().unwrap();

    wm.set_suppress_size_change(parent, true);
    wm.set_width(id, 12);
    wm.set_width(id, 14);
    assert!(wm.has_render_target(id));

    wm.set_suppress_size_change(parent, false);
    assert!(!wm.has_render_target(id));
    assert_eq!(wm.renderer().pooled_render_targets(), 1);
}

#[test]
fn scaled_detached_control_draws_through_the_scratch_target() {
    let (mut wm, log) = WindowManager::headless(300, 300);
    let scaled = wm.create(
        Control::default()
            .with_client_rectangle(10, 10, 100, 100)
            .with_draw_mode(DrawMode::UniqueRenderTarget)
            .with_scaling(2),
    );
    wm.add_control(scaled).unwrap();
    let popup = wm
        .create_child(scaled, Control::new(Fill(Color::WHITE)).with_client_rectangle(5, 5, 20, 10))
        .unwrap();
    wm.detach(popup);

    assert_eq!(wm.placement_point(popup), Point::zeros());
    assert_eq!(wm.window_rectangle(popup), Rectangle::new(20, 20, 40, 20));

    wm.draw().unwrap();
    let scratch = wm.renderer_mut().detached_render_target(1, 1);
    assert_eq!(
        log.texture_destinations(scratch.id()),
        vec![Rectangle::new(20, 20, 40, 20)]
    );
}

#[test]
fn unscaled_detached_control_draws_at_its_window_point() {
    let (mut wm, _log) = WindowManager::headless(300, 300);
    let parent = wm.create(
        Control::default()
            .with_client_rectangle(10, 10, 100, 100)
            .with_draw_mode(DrawMode::UniqueRenderTarget),
    );
    wm.add_control(parent).unwrap();
    let popup = wm
        .create_child(parent, Control::default().with_client_rectangle(5, 5, 20, 10))
        .unwrap();

    assert_eq!(wm.render_rectangle(popup), Rectangle::new(5, 5, 20, 10));
    wm.detach(popup);
    assert_eq!(wm.render_rectangle(popup), Rectangle::new(15, 15, 20, 10));
    assert_eq!(wm.detached_controls(), [popup]);

    wm.attach(popup);
    assert!(wm.detached_controls().is_empty());
}

#[test]
fn unbalanced_push_surfaces_from_draw() {
    struct Leaky;

    impl ControlBehavior for Leaky {
        fn type_name(&self) -> &'static str {
            "Leaky"
        }

        fn draw(&mut self, wm: &mut WindowManager, _id: ControlId) -> Result<(), UiError> {
            let target = wm.renderer_mut().acquire_render_target(8, 8);
            wm.renderer_mut().push_render_target(target, None);
            Ok(())
        }
    }

    let (mut wm, _log) = WindowManager::headless(100, 100);
    let id = wm.create(Control::new(Leaky));
    wm.add_control(id).unwrap();

    assert_eq!(
        wm.draw(),
        Err(UiError::Graphics(GraphicsError::UnbalancedRenderTargetStack { depth: 1 }))
    );
}

#[test]
fn failed_draw_inside_unique_target_keeps_the_stack_balanced() {
    /// Fails its first draw, then draws normally.
    struct FailOnce {
        failed: bool,
    }

    impl ControlBehavior for FailOnce {
        fn type_name(&self) -> &'static str {
            "FailOnce"
        }

        fn draw(&mut self, _wm: &mut WindowManager, _id: ControlId) -> Result<(), UiError> {
            if self.failed {
                return Ok(());
            }
            self.failed = true;
            Err(UiError::UnknownControlType {
                type_name: "Missing".to_string(),
            })
        }
    }

    let (mut wm, _log) = WindowManager::headless(100, 100);
    let id = wm.create(
        Control::new(FailOnce { failed: false })
            .with_size(40, 40)
            .with_draw_mode(DrawMode::UniqueRenderTarget),
    );
    wm.add_control(id).unwrap();

    assert_eq!(
        wm.draw(),
        Err(UiError::UnknownControlType {
            type_name: "Missing".to_string()
        })
    );
    assert_eq!(wm.renderer().render_target_depth(), 0);

    assert_eq!(wm.draw(), Ok(()));
    assert_eq!(wm.draw(), Ok(()));
}
