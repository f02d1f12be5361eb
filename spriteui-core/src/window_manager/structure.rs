// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::control::{ChildList, Control, ControlEvent, ControlId, DrawMode, ParentRef};
use crate::error::UiError;
use crate::window_manager::WindowManager;

impl WindowManager {
    /// Take ownership of a new, disconnected control.
    pub fn create(&mut self, control: Control) -> ControlId {
        self.tree.insert(control)
    }

    /// If `id` refers to a live control.
    pub fn exists(&self, id: ControlId) -> bool {
        self.tree.get(id).is_some_and(|node| !node.killed)
    }

    pub(crate) fn node_name(&self, id: ControlId) -> String {
        self.tree
            .get(id)
            .map(|node| node.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    pub(crate) fn child_list(&self, parent: ParentRef) -> Option<&ChildList> {
        match parent {
            ParentRef::Root => Some(&self.roots),
            ParentRef::Control(id) => self.tree.get(id).map(|node| &node.children),
        }
    }

    pub(crate) fn child_list_mut(&mut self, parent: ParentRef) -> Option<&mut ChildList> {
        match parent {
            ParentRef::Root => Some(&mut self.roots),
            ParentRef::Control(id) => self.tree.get_mut(id).map(|node| &mut node.children),
        }
    }

    /// Add a top-level control.
    pub fn add_control(&mut self, id: ControlId) -> Result<(), UiError> {
        self.add_to(ParentRef::Root, id)
    }

    /// Add `child` to `parent`.
    ///
    /// Initializes the child if needed. While `parent` is updating its
    /// children the add is queued and applied after the traversal.
    pub fn add_child(&mut self, parent: ControlId, child: ControlId) -> Result<(), UiError> {
        self.add_to(ParentRef::Control(parent), child)
    }

    /// Create a control and add it to `parent` in one go.
    pub fn create_child(&mut self, parent: ControlId, control: Control) -> Result<ControlId, UiError> {
        let id = self.create(control);
        if let Err(err) = self.add_child(parent, id) {
            self.tree.remove(id);
            return Err(err);
        }
        Ok(id)
    }

    fn add_to(&mut self, parent: ParentRef, child: ControlId) -> Result<(), UiError> {
        let node = self
            .tree
            .get(child)
            .filter(|node| !node.killed)
            .ok_or(UiError::ControlNotFound { id: child })?;

        if node.parent.is_some() || node.pending_parent.is_some() {
            return Err(UiError::ControlAlreadyParented {
                name: node.name.clone(),
            });
        }

        if let ParentRef::Control(parent_id) = parent {
            if !self.exists(parent_id) {
                return Err(UiError::ControlNotFound { id: parent_id });
            }
            if parent_id == child || self.is_ancestor_of(child, parent_id) {
                return Err(UiError::InvalidParent {
                    name: self.node_name(child),
                    parent: self.node_name(parent_id),
                });
            }
        }

        let iterating = self.child_list(parent).is_some_and(|list| list.iterating);
        if iterating {
            if let Some(list) = self.child_list_mut(parent) {
                list.pending_add.push(child);
            }
            if let Some(node) = self.tree.get_mut(child) {
                node.pending_parent = Some(parent);
            }
            return Ok(());
        }

        self.attach_child(parent, child)
    }

    fn attach_child(&mut self, parent: ParentRef, child: ControlId) -> Result<(), UiError> {
        if let Some(node) = self.tree.get_mut(child) {
            node.pending_parent = None;
            node.parent = Some(parent);
        }

        if let Err(err) = self.initialize(child) {
            if let Some(node) = self.tree.get_mut(child) {
                node.parent = None;
            }
            return Err(err);
        }

        if let Some(list) = self.child_list_mut(parent) {
            list.push(child);
        }
        self.reorder(parent);
        log::debug!("Added control {} to {:?}", self.node_name(child), parent);
        self.raise_event(child, ControlEvent::ParentChanged);
        Ok(())
    }

    /// Initialize a control that has not been initialized yet.
    ///
    /// Captures the current scaling as the floor for later changes and runs
    /// the behavior's initialization. Attaching a control does this implicitly.
    pub fn initialize(&mut self, id: ControlId) -> Result<(), UiError> {
        let node = self
            .tree
            .get_mut(id)
            .ok_or(UiError::ControlNotFound { id })?;
        if node.initialized {
            return Ok(());
        }

        if node.scaling > 1 && node.draw_mode != DrawMode::UniqueRenderTarget {
            return Err(UiError::ScalingRequiresUniqueRenderTarget {
                name: node.name.clone(),
            });
        }

        node.initialized = true;
        node.initial_scaling = node.scaling;

        let result = self.with_behavior(id, |behavior, wm| behavior.initialize(wm, id));
        if let Some(Err(err)) = result {
            if let Some(node) = self.tree.get_mut(id) {
                node.initialized = false;
            }
            return Err(err);
        }
        Ok(())
    }

    /// Remove a top-level control. The control stays alive and can be added again.
    pub fn remove_control(&mut self, id: ControlId) -> Result<(), UiError> {
        self.remove_from(ParentRef::Root, id)
    }

    /// Remove `child` from `parent`. The child stays alive and can be added again.
    ///
    /// While `parent` is updating its children the removal is queued and
    /// applied after the traversal.
    pub fn remove_child(&mut self, parent: ControlId, child: ControlId) -> Result<(), UiError> {
        self.remove_from(ParentRef::Control(parent), child)
    }

    fn remove_from(&mut self, parent: ParentRef, child: ControlId) -> Result<(), UiError> {
        let node = self
            .tree
            .get_mut(child)
            .ok_or(UiError::ControlNotFound { id: child })?;

        if node.pending_parent == Some(parent) {
            node.pending_parent = None;
            if let Some(list) = self.child_list_mut(parent) {
                list.pending_add.retain(|c| *c != child);
            }
            return Ok(());
        }

        if node.parent != Some(parent) {
            let parent_name = match parent {
                ParentRef::Root => "the window manager".to_string(),
                ParentRef::Control(id) => self.node_name(id),
            };
            return Err(UiError::InvalidParent {
                name: self.node_name(child),
                parent: parent_name,
            });
        }

        self.queue_or_detach(parent, child);
        Ok(())
    }

    fn queue_or_detach(&mut self, parent: ParentRef, child: ControlId) {
        let Some(list) = self.child_list_mut(parent) else {
            return;
        };

        if list.iterating {
            if !list.pending_remove.contains(&child) {
                list.pending_remove.push(child);
            }
        } else {
            self.detach_from_parent(parent, child);
        }
    }

    fn detach_from_parent(&mut self, parent: ParentRef, child: ControlId) {
        if let Some(list) = self.child_list_mut(parent) {
            list.remove(child);
        }
        self.attach(child);

        let killed = match self.tree.get_mut(child) {
            Some(node) => {
                node.parent = None;
                node.cursor_on_control = false;
                node.killed
            },
            None => return,
        };

        if killed {
            self.tree.remove(child);
        } else {
            self.clear_input_references(child);
            self.raise_event(child, ControlEvent::ParentChanged);
        }

        if let ParentRef::Control(parent_id) = parent {
            self.with_behavior(parent_id, |behavior, wm| {
                behavior.on_child_removed(wm, parent_id, child)
            });
            self.raise_event(parent_id, ControlEvent::ChildRemoved);
        }
    }

    /// Apply adds and removals queued while `parent` was iterating its children.
    pub(crate) fn apply_pending(&mut self, parent: ParentRef) {
        let Some(list) = self.child_list_mut(parent) else {
            return;
        };
        list.iterating = false;
        let adds = std::mem::take(&mut list.pending_add);
        let removes = std::mem::take(&mut list.pending_remove);

        for child in adds {
            let queued = self
                .tree
                .get(child)
                .is_some_and(|node| node.pending_parent == Some(parent) && !node.killed);
            if !queued {
                continue;
            }

            if let Err(err) = self.attach_child(parent, child) {
                log::error!("Deferred add of control {} failed: {}", child, err);
            }
        }

        for child in removes {
            let attached = self
                .tree
                .get(child)
                .is_some_and(|node| node.parent == Some(parent));
            if attached {
                self.detach_from_parent(parent, child);
            }
        }
    }

    /// Kill a control and all of its children.
    ///
    /// Releases render targets, drops input focus and frees the control. If
    /// its parent is iterating, the control is freed after the traversal.
    pub fn kill(&mut self, id: ControlId) {
        if !self.exists(id) {
            return;
        }

        // Runs before the node is flagged; a behavior busy in its own hook is
        // notified once the hook returns.
        self.with_behavior(id, |behavior, wm| behavior.on_kill(wm, id));

        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        node.killed = true;
        let mut children = node.children.children().to_vec();
        children.extend(node.children.pending_add.iter().copied());
        let render_target = node.render_target.take();
        let detached = std::mem::replace(&mut node.detached, false);
        let parent = node.parent;
        let pending_parent = node.pending_parent.take();

        for child in children {
            self.kill(child);
        }

        if let Some(target) = render_target {
            self.renderer.release_render_target(target);
        }
        if detached {
            self.detached.retain(|d| *d != id);
        }
        if self.input.active == Some(id) {
            self.input.active = None;
        }
        if self.input.selected == Some(id) {
            self.input.selected = None;
            self.input.exclusive_capture = false;
        }

        log::debug!("Killed control {}", self.node_name(id));

        match (parent, pending_parent) {
            (Some(parent), _) => self.queue_or_detach(parent, id),
            (None, Some(pending)) => {
                if let Some(list) = self.child_list_mut(pending) {
                    list.pending_add.retain(|c| *c != id);
                }
                self.tree.remove(id);
            },
            (None, None) => {
                self.tree.remove(id);
            },
        }
    }

    /// The parent control, or `None` for top-level and unattached controls.
    pub fn parent(&self, id: ControlId) -> Option<ControlId> {
        self.tree.get(id)?.parent?.control()
    }

    /// If the control is attached to the tree, directly or through its ancestors.
    pub fn is_attached(&self, id: ControlId) -> bool {
        match self.tree.get(id).and_then(|node| node.parent) {
            Some(ParentRef::Root) => true,
            Some(ParentRef::Control(parent)) => self.is_attached(parent),
            None => false,
        }
    }

    /// If `ancestor` is a strict ancestor of `id`.
    pub fn is_ancestor_of(&self, ancestor: ControlId, id: ControlId) -> bool {
        let mut current = self.parent(id);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.parent(parent);
        }
        false
    }

    /// Children of a control in insertion order.
    pub fn children(&self, id: ControlId) -> Vec<ControlId> {
        self.tree
            .get(id)
            .map(|node| node.children.children().to_vec())
            .unwrap_or_default()
    }

    /// Children of a control in update order.
    pub fn children_in_update_order(&self, id: ControlId) -> Vec<ControlId> {
        self.tree
            .get(id)
            .map(|node| node.children.update_order().to_vec())
            .unwrap_or_default()
    }

    /// Children of a control in draw order.
    pub fn children_in_draw_order(&self, id: ControlId) -> Vec<ControlId> {
        self.tree
            .get(id)
            .map(|node| node.children.draw_order().to_vec())
            .unwrap_or_default()
    }

    /// Top-level controls in insertion order.
    pub fn root_controls(&self) -> Vec<ControlId> {
        self.roots.children().to_vec()
    }

    /// Find a child by name, optionally searching grandchildren too.
    pub fn find_child(&self, parent: ControlId, name: &str, recursive: bool) -> Option<ControlId> {
        let children = self.tree.get(parent)?.children.children();
        self.find_in(children, name, recursive)
    }

    /// Find a control by name anywhere in the attached tree.
    pub fn find_control(&self, name: &str) -> Option<ControlId> {
        self.find_in(self.roots.children(), name, true)
    }

    fn find_in(&self, ids: &[ControlId], name: &str, recursive: bool) -> Option<ControlId> {
        for id in ids {
            if self.tree.get(*id).is_some_and(|node| node.name == name) {
                return Some(*id);
            }
        }

        if recursive {
            for id in ids {
                if let Some(found) = self.find_child(*id, name, true) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Rebuild the update and draw orders of a child list.
    pub(crate) fn reorder(&mut self, parent: ParentRef) {
        let Some(list) = self.child_list_mut(parent) else {
            return;
        };
        let mut list = std::mem::take(list);

        list.reorder(|child| {
            self.tree
                .get(child)
                .map(|node| (node.update_order, node.draw_order))
                .unwrap_or_default()
        });

        if let Some(slot) = self.child_list_mut(parent) {
            *slot = list;
        }
    }

    /// Rebuild the child orders of a control now, regardless of
    /// [set_auto_update_child_order](Self::set_auto_update_child_order).
    pub fn reorder_children(&mut self, id: ControlId) {
        self.reorder(ParentRef::Control(id));
    }

    /// Draw the control as a root-level overlay above the whole tree and let
    /// it claim the cursor before any attached control.
    pub fn detach(&mut self, id: ControlId) {
        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        if node.detached {
            return;
        }
        node.detached = true;
        self.detached.push(id);
    }

    /// Return a detached control to its parent's normal flow.
    pub fn attach(&mut self, id: ControlId) {
        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        if !node.detached {
            return;
        }
        node.detached = false;
        self.detached.retain(|d| *d != id);
    }

    /// If the control is detached.
    pub fn is_detached(&self, id: ControlId) -> bool {
        self.tree.get(id).is_some_and(|node| node.detached)
    }

    /// Detached controls, bottom-most first.
    pub fn detached_controls(&self) -> &[ControlId] {
        &self.detached
    }

    /// The control holding input focus.
    pub fn selected_control(&self) -> Option<ControlId> {
        self.input.selected
    }

    /// The control the cursor targets this frame.
    pub fn active_control(&self) -> Option<ControlId> {
        self.input.active
    }

    /// Move input focus. Both the old and the new selection are notified.
    pub fn set_selected(&mut self, id: Option<ControlId>) {
        let id = id.filter(|id| self.exists(*id));
        if self.input.selected == id {
            return;
        }

        let old = std::mem::replace(&mut self.input.selected, id);
        if old.is_some() {
            self.input.exclusive_capture = false;
        }

        if let Some(old) = old {
            self.with_behavior(old, |behavior, wm| behavior.on_selected_changed(wm, old, false));
            self.raise_event(old, ControlEvent::SelectedChanged);
        }
        if let Some(new) = id {
            self.with_behavior(new, |behavior, wm| behavior.on_selected_changed(wm, new, true));
            self.raise_event(new, ControlEvent::SelectedChanged);
        }
    }

    /// If the cursor targets this control or one of its attached descendants.
    pub fn is_active(&self, id: ControlId) -> bool {
        let mut current = self.input.active;
        while let Some(candidate) = current {
            if candidate == id {
                return true;
            }
            let Some(node) = self.tree.get(candidate) else {
                return false;
            };
            if node.detached {
                return false;
            }
            current = node.parent.and_then(ParentRef::control);
        }
        false
    }

    /// If the control is the selected control.
    pub fn is_selected(&self, id: ControlId) -> bool {
        self.input.selected == Some(id)
    }

    fn clear_input_references(&mut self, id: ControlId) {
        let in_subtree = |wm: &WindowManager, other: Option<ControlId>| {
            other.is_some_and(|other| other == id || wm.is_ancestor_of(id, other))
        };

        if in_subtree(self, self.input.active) {
            self.input.active = None;
        }
        if in_subtree(self, self.input.selected) {
            self.set_selected(None);
        }
    }
}
