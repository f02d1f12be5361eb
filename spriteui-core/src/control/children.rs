// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::control::ControlId;

/// Where a control is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParentRef {
    /// The window manager's top-level list.
    Root,
    /// Another control.
    Control(ControlId),
}

impl ParentRef {
    /// The parent control, if this is not the root.
    pub fn control(self) -> Option<ControlId> {
        match self {
            ParentRef::Root => None,
            ParentRef::Control(id) => Some(id),
        }
    }
}

/// A control's children with their two traversal orders.
///
/// `update_order` is sorted by descending update order and `draw_order` by
/// ascending draw order, ties broken by insertion: the last added child is
/// updated first and drawn last. While `iterating` is set, structural
/// changes are queued and applied by the owner after the traversal.
#[derive(Debug, Default, Clone)]
pub(crate) struct ChildList {
    children: Vec<ControlId>,
    update_order: Vec<ControlId>,
    draw_order: Vec<ControlId>,
    pub iterating: bool,
    pub pending_add: Vec<ControlId>,
    pub pending_remove: Vec<ControlId>,
}

impl ChildList {
    pub fn children(&self) -> &[ControlId] {
        &self.children
    }

    pub fn update_order(&self) -> &[ControlId] {
        &self.update_order
    }

    pub fn draw_order(&self) -> &[ControlId] {
        &self.draw_order
    }

    pub fn push(&mut self, id: ControlId) {
        self.children.push(id);
    }

    pub fn remove(&mut self, id: ControlId) -> bool {
        let before = self.children.len();
        self.children.retain(|c| *c != id);
        self.update_order.retain(|c| *c != id);
        self.draw_order.retain(|c| *c != id);
        before != self.children.len()
    }

    /// Rebuild both orders. `orders` returns `(update_order, draw_order)` for a child.
    pub fn reorder<F>(&mut self, orders: F)
    where
        F: Fn(ControlId) -> (i32, i32),
    {
        let keyed: Vec<(usize, ControlId, i32, i32)> = self
            .children
            .iter()
            .enumerate()
            .map(|(index, id)| {
                let (update, draw) = orders(*id);
                (index, *id, update, draw)
            })
            .collect();

        let mut update = keyed.clone();
        update.sort_by(|a, b| (b.2, b.0).cmp(&(a.2, a.0)));
        self.update_order = update.into_iter().map(|k| k.1).collect();

        let mut draw = keyed;
        draw.sort_by(|a, b| (a.3, a.0).cmp(&(b.3, b.0)));
        self.draw_order = draw.into_iter().map(|k| k.1).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(index: u32) -> ControlId {
        ControlId {
            index,
            generation: 0,
        }
    }

    #[test]
    fn test_orders_are_reverse_of_each_other_by_default() {
        let mut list = ChildList::default();
        for i in 0..3 {
            list.push(id(i));
        }
        list.reorder(|_| (0, 0));

        assert_eq!(list.update_order(), &[id(2), id(1), id(0)]);
        assert_eq!(list.draw_order(), &[id(0), id(1), id(2)]);
    }

    #[test]
    fn test_explicit_orders() {
        let mut list = ChildList::default();
        for i in 0..3 {
            list.push(id(i));
        }
        // child 0 updates first and is drawn on top
        list.reorder(|c| if c == id(0) { (10, 10) } else { (0, 0) });

        assert_eq!(list.update_order(), &[id(0), id(2), id(1)]);
        assert_eq!(list.draw_order(), &[id(1), id(2), id(0)]);
    }
}
