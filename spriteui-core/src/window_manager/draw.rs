// SPDX-License-Identifier: MIT OR Apache-2.0

use spriteui_theme::Color;

use crate::control::{ControlId, DrawMode, ParentRef};
use crate::error::UiError;
use crate::geometry::{Point, Rectangle};
use crate::graphics::{RenderTarget, SpriteBatchSettings};
use crate::window_manager::WindowManager;

impl WindowManager {
    /// Run one draw pass and present the frame.
    ///
    /// The attached tree is drawn in draw order, then every visible detached
    /// control on top of it, and finally the render-resolution target is
    /// letterboxed into the window.
    pub fn draw(&mut self) -> Result<(), UiError> {
        self.renderer.begin_frame(self.config.clear_color);

        self.draw_children(ParentRef::Root)?;

        let detached = self.detached.clone();
        for id in detached {
            if self.is_shown(id) {
                self.draw_detached(id)?;
            }
        }

        let destination = self.letterbox_rectangle();
        self.renderer.end_frame(destination)?;
        Ok(())
    }

    fn draw_children(&mut self, parent: ParentRef) -> Result<(), UiError> {
        let Some(order) = self.child_list(parent).map(|list| list.draw_order().to_vec()) else {
            return Ok(());
        };

        for child in order {
            let drawable = self
                .tree
                .get(child)
                .is_some_and(|node| node.visible && !node.detached && !node.killed);
            if drawable {
                self.draw_control(child)?;
            }
        }
        Ok(())
    }

    /// Draw a control and its subtree into the bound render target.
    pub(crate) fn draw_control(&mut self, id: ControlId) -> Result<(), UiError> {
        let Some(node) = self.tree.get(id) else {
            return Ok(());
        };
        if node.draw_mode == DrawMode::Normal {
            return self.draw_contents(id);
        }

        let scaling = node.scaling;
        let size = node.rectangle.size();
        let target = self.unique_render_target(id);

        self.renderer.push_render_target(target.clone(), None);
        self.renderer.clear(Color::TRANSPARENT);
        let drawn = self.draw_contents(id);
        self.renderer.pop_render_target()?;
        drawn?;

        let destination = Rectangle::from_parts(self.placement_point(id), size * scaling);
        let source = Rectangle::from_parts(Point::zeros(), size);
        if scaling > 1 {
            self.renderer.push_settings(SpriteBatchSettings::point_sampled());
            self.renderer
                .draw_render_target(&target, source, destination, Color::WHITE);
            self.renderer.pop_settings()?;
        } else {
            self.renderer
                .draw_render_target(&target, source, destination, Color::WHITE);
        }
        Ok(())
    }

    /// The control's private render target, (re)acquired from the pool when
    /// missing or too small for its size.
    fn unique_render_target(&mut self, id: ControlId) -> RenderTarget {
        let rectangle = self.client_rectangle(id);
        let width = rectangle.width.max(2) as u32;
        let height = rectangle.height.max(2) as u32;

        let current = self.tree.get_mut(id).and_then(|node| node.render_target.take());
        let target = match current {
            Some(target) if target.fits(width, height) => target,
            Some(target) => {
                self.renderer.release_render_target(target);
                self.renderer.acquire_render_target(width, height)
            },
            None => self.renderer.acquire_render_target(width, height),
        };

        if let Some(node) = self.tree.get_mut(id) {
            node.render_target = Some(target.clone());
        }
        target
    }

    fn draw_contents(&mut self, id: ControlId) -> Result<(), UiError> {
        if let Some(result) = self.with_behavior(id, |behavior, wm| behavior.draw(wm, id)) {
            result?;
        }

        self.draw_children(ParentRef::Control(id))?;

        if let Some(result) = self.with_behavior(id, |behavior, wm| behavior.draw_overlay(wm, id)) {
            result?;
        }
        Ok(())
    }

    /// Draw a detached control at root level.
    ///
    /// Under a scaling ancestor the control is first drawn into the shared
    /// scratch target and then blitted to its window rectangle with point
    /// sampling. Detached controls are drawn one at a time, so a single
    /// scratch target serves all of them.
    fn draw_detached(&mut self, id: ControlId) -> Result<(), UiError> {
        if self.ancestor_scaling(id) <= 1 {
            return self.draw_control(id);
        }

        let rectangle = self.client_rectangle(id);
        let own_size = rectangle.size() * self.scaling(id);
        let scratch = self
            .renderer
            .detached_render_target(own_size.x.max(1) as u32, own_size.y.max(1) as u32);

        self.renderer.push_render_target(scratch.clone(), None);
        self.renderer.clear(Color::TRANSPARENT);
        let drawn = self.draw_control(id);
        self.renderer.pop_render_target()?;
        drawn?;

        let source = Rectangle::from_parts(Point::zeros(), own_size);
        let destination = self.window_rectangle(id);
        self.renderer.push_settings(SpriteBatchSettings::point_sampled());
        self.renderer
            .draw_render_target(&scratch, source, destination, Color::WHITE);
        self.renderer.pop_settings()?;
        Ok(())
    }
}
