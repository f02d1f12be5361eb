// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::control::{Control, ControlId};

#[derive(Default)]
struct Slot {
    generation: u32,
    control: Option<Control>,
}

/// Generational arena owning every control.
#[derive(Default)]
pub(crate) struct ControlTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl ControlTree {
    pub fn insert(&mut self, control: Control) -> ControlId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.control = Some(control);
            return ControlId {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            control: Some(control),
        });
        ControlId {
            index,
            generation: 0,
        }
    }

    pub fn get(&self, id: ControlId) -> Option<&Control> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.control.as_ref())
    }

    pub fn get_mut(&mut self, id: ControlId) -> Option<&mut Control> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.control.as_mut())
    }

    pub fn remove(&mut self, id: ControlId) -> Option<Control> {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)?;
        let control = slot.control.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(control)
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.control.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_ids_do_not_resolve() {
        let mut tree = ControlTree::default();
        let a = tree.insert(Control::default());
        assert!(tree.remove(a).is_some());

        let b = tree.insert(Control::default());
        assert_eq!(a.index, b.index);
        assert!(tree.get(a).is_none());
        assert!(tree.get(b).is_some());
        assert!(tree.remove(a).is_none());
        assert_eq!(tree.len(), 1);
    }
}
