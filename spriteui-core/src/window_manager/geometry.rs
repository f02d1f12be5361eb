// SPDX-License-Identifier: MIT OR Apache-2.0

use std::time::Duration;

use spriteui_theme::Color;

use crate::control::{ControlEvent, ControlId, DrawMode, ParentRef};
use crate::error::UiError;
use crate::geometry::{Point, Rectangle};
use crate::window_manager::WindowManager;

/// Coordinates and properties of controls.
///
/// Two coordinate spaces exist side by side. Window coordinates are absolute
/// render-resolution pixels with every ancestor's scaling applied and are
/// only used for hit testing. Render coordinates are relative to the render
/// target the control actually draws into and are only used for drawing.
impl WindowManager {
    /// The name of a control.
    pub fn name(&self, id: ControlId) -> &str {
        self.tree.get(id).map(|node| node.name.as_str()).unwrap_or("")
    }

    /// Rename a control.
    pub fn set_name(&mut self, id: ControlId, name: impl Into<String>) {
        if let Some(node) = self.tree.get_mut(id) {
            node.name = name.into();
        }
    }

    /// The text of a control.
    pub fn text(&self, id: ControlId) -> &str {
        self.tree.get(id).map(|node| node.text.as_str()).unwrap_or("")
    }

    /// Replace the text of a control.
    pub fn set_text(&mut self, id: ControlId, text: impl Into<String>) {
        let text = text.into();
        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        if node.text == text {
            return;
        }
        node.text = text;
        self.raise_event(id, ControlEvent::TextChanged);
    }

    /// Position and size relative to the parent.
    pub fn client_rectangle(&self, id: ControlId) -> Rectangle {
        self.tree
            .get(id)
            .map(|node| node.rectangle)
            .unwrap_or_default()
    }

    /// X relative to the parent.
    pub fn x(&self, id: ControlId) -> i32 {
        self.client_rectangle(id).x
    }

    /// Y relative to the parent.
    pub fn y(&self, id: ControlId) -> i32 {
        self.client_rectangle(id).y
    }

    /// Width in unscaled pixels.
    pub fn width(&self, id: ControlId) -> i32 {
        self.client_rectangle(id).width
    }

    /// Height in unscaled pixels.
    pub fn height(&self, id: ControlId) -> i32 {
        self.client_rectangle(id).height
    }

    /// Right edge relative to the parent.
    pub fn right(&self, id: ControlId) -> i32 {
        self.client_rectangle(id).right()
    }

    /// Bottom edge relative to the parent.
    pub fn bottom(&self, id: ControlId) -> i32 {
        self.client_rectangle(id).bottom()
    }

    /// Set position and size at once. Dependents are notified once.
    pub fn set_client_rectangle(&mut self, id: ControlId, rectangle: Rectangle) {
        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        if node.rectangle == rectangle {
            return;
        }

        let old = std::mem::replace(&mut node.rectangle, rectangle);
        let resized = old.size() != rectangle.size();
        if resized
            && node.draw_mode == DrawMode::UniqueRenderTarget
            && !node.suppress_size_change
        {
            if let Some(target) = node.render_target.take() {
                self.renderer.release_render_target(target);
            }
        }

        self.with_behavior(id, |behavior, wm| behavior.on_client_rectangle_updated(wm, id));
        self.raise_event(id, ControlEvent::ClientRectangleUpdated);
    }

    /// Set X.
    pub fn set_x(&mut self, id: ControlId, x: i32) {
        let rectangle = Rectangle {
            x,
            ..self.client_rectangle(id)
        };
        self.set_client_rectangle(id, rectangle);
    }

    /// Set Y.
    pub fn set_y(&mut self, id: ControlId, y: i32) {
        let rectangle = Rectangle {
            y,
            ..self.client_rectangle(id)
        };
        self.set_client_rectangle(id, rectangle);
    }

    /// Set the width.
    pub fn set_width(&mut self, id: ControlId, width: i32) {
        let rectangle = Rectangle {
            width,
            ..self.client_rectangle(id)
        };
        self.set_client_rectangle(id, rectangle);
    }

    /// Set the height.
    pub fn set_height(&mut self, id: ControlId, height: i32) {
        let rectangle = Rectangle {
            height,
            ..self.client_rectangle(id)
        };
        self.set_client_rectangle(id, rectangle);
    }

    /// Set the position.
    pub fn set_location(&mut self, id: ControlId, location: Point) {
        let size = self.client_rectangle(id).size();
        self.set_client_rectangle(id, Rectangle::from_parts(location, size));
    }

    /// Set the size.
    pub fn set_size(&mut self, id: ControlId, width: i32, height: i32) {
        let location = self.client_rectangle(id).location();
        self.set_client_rectangle(id, Rectangle::from_parts(location, Point::new(width, height)));
    }

    /// Suspend or resume render target reallocation for a control and all of
    /// its descendants while a batch of size changes is applied.
    pub fn set_suppress_size_change(&mut self, id: ControlId, suppress: bool) {
        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        node.suppress_size_change = suppress;
        if !suppress && node.draw_mode == DrawMode::UniqueRenderTarget {
            let fits = node.render_target.as_ref().is_some_and(|target| {
                target.width() as i32 == node.rectangle.width.max(2)
                    && target.height() as i32 == node.rectangle.height.max(2)
            });
            if !fits {
                if let Some(target) = node.render_target.take() {
                    self.renderer.release_render_target(target);
                }
            }
        }

        for child in self.children(id) {
            self.set_suppress_size_change(child, suppress);
        }
    }

    /// Product of the scaling of the control and all of its ancestors.
    pub fn total_scaling(&self, id: ControlId) -> i32 {
        let Some(node) = self.tree.get(id) else {
            return 1;
        };
        let parent_scaling = self.parent(id).map_or(1, |parent| self.total_scaling(parent));
        node.scaling * parent_scaling
    }

    /// Product of the scaling of all ancestors, excluding the control itself.
    pub fn ancestor_scaling(&self, id: ControlId) -> i32 {
        self.parent(id).map_or(1, |parent| self.total_scaling(parent))
    }

    /// The control's own scaling.
    pub fn scaling(&self, id: ControlId) -> i32 {
        self.tree.get(id).map_or(1, |node| node.scaling)
    }

    /// Absolute position used for hit testing.
    ///
    /// Each level adds its local offset multiplied by the accumulated scaling
    /// of all of its ancestors.
    pub fn window_point(&self, id: ControlId) -> Point {
        let location = self.client_rectangle(id).location();
        match self.parent(id) {
            Some(parent) => self.window_point(parent) + location * self.total_scaling(parent),
            None => location,
        }
    }

    /// Absolute bounds used for hit testing, scaled by every ancestor and the control itself.
    pub fn window_rectangle(&self, id: ControlId) -> Rectangle {
        let rectangle = self.client_rectangle(id);
        Rectangle::from_parts(self.window_point(id), rectangle.size() * self.total_scaling(id))
    }

    /// Where the control is placed inside the render target its parent draws into.
    ///
    /// Detached controls draw at the root level: straight at their window
    /// point, or at the origin of the shared scratch target when an ancestor
    /// scales them.
    pub fn placement_point(&self, id: ControlId) -> Point {
        let Some(node) = self.tree.get(id) else {
            return Point::zeros();
        };

        if node.detached {
            if self.ancestor_scaling(id) > 1 {
                return Point::zeros();
            }
            return self.window_point(id);
        }

        match self.parent(id) {
            Some(parent) => self.render_point(parent) + node.rectangle.location(),
            None => node.rectangle.location(),
        }
    }

    /// Origin the control draws itself and its children at, within the
    /// render target that is bound while it draws.
    pub fn render_point(&self, id: ControlId) -> Point {
        match self.tree.get(id) {
            Some(node) if node.draw_mode == DrawMode::UniqueRenderTarget => Point::zeros(),
            Some(_) => self.placement_point(id),
            None => Point::zeros(),
        }
    }

    /// Draw bounds of the control within the bound render target.
    pub fn render_rectangle(&self, id: ControlId) -> Rectangle {
        let size = self.client_rectangle(id).size();
        Rectangle::from_parts(self.render_point(id), size)
    }

    /// The cursor location in the control's own unscaled coordinates.
    pub fn cursor_point(&self, id: ControlId) -> Point {
        let scaling = self.total_scaling(id).max(1);
        (self.cursor().location() - self.window_point(id)) / scaling
    }

    /// If the cursor is on screen and inside the control's window rectangle.
    pub fn is_cursor_on(&self, id: ControlId) -> bool {
        self.cursor().is_on_screen() && self.window_rectangle(id).contains(self.cursor().location())
    }

    pub(crate) fn parent_size(&self, id: ControlId) -> Point {
        match self.parent(id) {
            Some(parent) => self.client_rectangle(parent).size(),
            None => {
                let (width, height) = self.render_resolution();
                Point::new(width as i32, height as i32)
            },
        }
    }

    /// Center the control in its parent, or in the render resolution for top-level controls.
    pub fn center_on_parent(&mut self, id: ControlId) {
        let parent = self.parent_size(id);
        let size = self.client_rectangle(id).size();
        self.set_location(id, Point::new((parent.x - size.x) / 2, (parent.y - size.y) / 2));
    }

    /// Center the control horizontally in its parent.
    pub fn center_on_parent_horizontally(&mut self, id: ControlId) {
        let parent = self.parent_size(id);
        let width = self.width(id);
        self.set_x(id, (parent.x - width) / 2);
    }

    /// If the control is visible.
    pub fn visible(&self, id: ControlId) -> bool {
        self.tree.get(id).is_some_and(|node| node.visible)
    }

    /// If the control and all of its ancestors are visible and it is attached to the tree.
    pub fn is_shown(&self, id: ControlId) -> bool {
        let Some(node) = self.tree.get(id).filter(|node| !node.killed && node.visible) else {
            return false;
        };
        match node.parent {
            Some(ParentRef::Root) => true,
            Some(ParentRef::Control(parent)) => self.is_shown(parent),
            None => false,
        }
    }

    /// Show or hide a control.
    pub fn set_visible(&mut self, id: ControlId, visible: bool) {
        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        if node.visible == visible {
            return;
        }
        node.visible = visible;
        if !visible && node.free_render_target_when_hidden {
            if let Some(target) = node.render_target.take() {
                self.renderer.release_render_target(target);
            }
        }

        self.with_behavior(id, |behavior, wm| behavior.on_visible_changed(wm, id));
        self.raise_event(id, ControlEvent::VisibleChanged);
    }

    /// If the control is enabled.
    pub fn enabled(&self, id: ControlId) -> bool {
        self.tree.get(id).is_some_and(|node| node.enabled)
    }

    /// Enable or disable a control. Disabled controls are not updated.
    pub fn set_enabled(&mut self, id: ControlId, enabled: bool) {
        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        if node.enabled == enabled {
            return;
        }
        node.enabled = enabled;

        self.with_behavior(id, |behavior, wm| behavior.on_enabled_changed(wm, id));
        self.raise_event(id, ControlEvent::EnabledChanged);
    }

    /// Show and enable a control.
    pub fn enable(&mut self, id: ControlId) {
        self.set_enabled(id, true);
        self.set_visible(id, true);
    }

    /// Hide and disable a control.
    pub fn disable(&mut self, id: ControlId) {
        self.set_enabled(id, false);
        self.set_visible(id, false);
    }

    /// The tint color.
    pub fn remap_color(&self, id: ControlId) -> Color {
        self.tree.get(id).map_or(Color::WHITE, |node| node.remap_color)
    }

    /// Set the tint color.
    pub fn set_remap_color(&mut self, id: ControlId, color: Color) {
        if let Some(node) = self.tree.get_mut(id) {
            node.remap_color = color;
        }
    }

    /// The control's own alpha. Ancestor alpha is not applied.
    pub fn alpha(&self, id: ControlId) -> f32 {
        self.tree.get(id).map_or(1.0, |node| node.alpha)
    }

    /// Set the alpha, clamped to `0.0..=1.0`.
    pub fn set_alpha(&mut self, id: ControlId, alpha: f32) {
        if let Some(node) = self.tree.get_mut(id) {
            node.alpha = alpha.clamp(0.0, 1.0);
        }
    }

    /// `color` with the control's alpha applied.
    pub fn color_with_alpha(&self, id: ControlId, color: Color) -> Color {
        color.multiply_alpha(self.alpha(id))
    }

    /// Set whether the control can claim the cursor.
    pub fn set_input_enabled(&mut self, id: ControlId, input_enabled: bool) {
        if let Some(node) = self.tree.get_mut(id) {
            node.input_enabled = input_enabled;
        }
    }

    /// If the control can claim the cursor.
    pub fn input_enabled(&self, id: ControlId) -> bool {
        self.tree.get(id).is_some_and(|node| node.input_enabled)
    }

    /// Set whether the control hands the cursor back to its parent when none
    /// of its own children claimed it.
    pub fn set_input_passthrough(&mut self, id: ControlId, passthrough: bool) {
        if let Some(node) = self.tree.get_mut(id) {
            node.input_passthrough = passthrough;
        }
    }

    /// If the control claims the cursor regardless of where it is.
    pub fn is_focused(&self, id: ControlId) -> bool {
        self.tree.get(id).is_some_and(|node| node.focused)
    }

    /// Make the control claim the cursor regardless of where it is.
    pub fn set_focused(&mut self, id: ControlId, focused: bool) {
        if let Some(node) = self.tree.get_mut(id) {
            node.focused = focused;
        }
    }

    /// While set and the control is selected, no other control receives hover input.
    pub fn set_exclusive_input_capture(&mut self, id: ControlId, capture: bool) {
        if let Some(node) = self.tree.get_mut(id) {
            node.exclusive_input_capture = capture;
        }
        if !capture && self.input.selected == Some(id) {
            self.input.exclusive_capture = false;
        }
    }

    /// If the control captures input exclusively while selected.
    pub fn exclusive_input_capture(&self, id: ControlId) -> bool {
        self.tree.get(id).is_some_and(|node| node.exclusive_input_capture)
    }

    /// Ignore cursor input on the control for `duration`.
    pub fn set_ignore_input_time(&mut self, id: ControlId, duration: Duration) {
        if let Some(node) = self.tree.get_mut(id) {
            node.ignore_input_remaining = duration;
        }
    }

    /// If the cursor is over the control or one of its descendants this frame.
    pub fn is_cursor_over(&self, id: ControlId) -> bool {
        self.tree.get(id).is_some_and(|node| node.cursor_on_control)
    }

    /// Set the update order. Higher values update first.
    pub fn set_update_order(&mut self, id: ControlId, order: i32) {
        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        node.update_order = order;
        self.reorder_parent_if_automatic(id);
    }

    /// Set the draw order. Higher values draw later, on top.
    pub fn set_draw_order(&mut self, id: ControlId, order: i32) {
        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        node.draw_order = order;
        self.reorder_parent_if_automatic(id);
    }

    /// Set whether a child's order change re-sorts this control's children right away.
    pub fn set_auto_update_child_order(&mut self, id: ControlId, automatic: bool) {
        if let Some(node) = self.tree.get_mut(id) {
            node.auto_update_child_order = automatic;
        }
        if automatic {
            self.reorder(ParentRef::Control(id));
        }
    }

    fn reorder_parent_if_automatic(&mut self, id: ControlId) {
        let parent = self.tree.get(id).and_then(|node| node.parent);
        match parent {
            Some(ParentRef::Root) => self.reorder(ParentRef::Root),
            Some(ParentRef::Control(parent))
                if self.tree.get(parent).is_some_and(|p| p.auto_update_child_order) =>
            {
                self.reorder(ParentRef::Control(parent))
            },
            _ => {},
        }
    }

    /// The draw mode.
    pub fn draw_mode(&self, id: ControlId) -> DrawMode {
        self.tree.get(id).map_or(DrawMode::Normal, |node| node.draw_mode)
    }

    /// Set the draw mode. Fails once the control is initialized.
    pub fn set_draw_mode(&mut self, id: ControlId, draw_mode: DrawMode) -> Result<(), UiError> {
        let node = self
            .tree
            .get_mut(id)
            .ok_or(UiError::ControlNotFound { id })?;
        if node.initialized {
            return Err(UiError::DrawModeLocked {
                name: node.name.clone(),
            });
        }
        node.draw_mode = draw_mode;
        Ok(())
    }

    /// Set the scaling.
    ///
    /// Requires a unique render target, must be at least 1 and cannot go
    /// below the value the control was initialized with.
    pub fn set_scaling(&mut self, id: ControlId, scaling: i32) -> Result<(), UiError> {
        let node = self
            .tree
            .get_mut(id)
            .ok_or(UiError::ControlNotFound { id })?;
        let name = || node.name.clone();

        if scaling < 1 {
            return Err(UiError::InvalidScaling {
                name: name(),
                scaling,
            });
        }
        if node.draw_mode != DrawMode::UniqueRenderTarget {
            return Err(UiError::ScalingRequiresUniqueRenderTarget { name: name() });
        }
        if node.initialized && scaling < node.initial_scaling {
            return Err(UiError::ScalingBelowMinimum {
                name: name(),
                scaling,
                minimum: node.initial_scaling,
            });
        }

        node.scaling = scaling;
        Ok(())
    }

    /// Set whether the unique render target is released while hidden.
    pub fn set_free_render_target_when_hidden(&mut self, id: ControlId, free: bool) {
        if let Some(node) = self.tree.get_mut(id) {
            node.free_render_target_when_hidden = free;
        }
    }

    /// If the control currently holds a unique render target.
    pub fn has_render_target(&self, id: ControlId) -> bool {
        self.tree.get(id).is_some_and(|node| node.render_target.is_some())
    }

    /// If the control has been initialized.
    pub fn is_initialized(&self, id: ControlId) -> bool {
        self.tree.get(id).is_some_and(|node| node.initialized)
    }
}
