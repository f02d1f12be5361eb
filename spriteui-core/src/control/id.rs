// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

/// Handle to a control in the window manager's tree.
///
/// Ids are generational: once a control is killed its id never resolves
/// again, even if the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}
