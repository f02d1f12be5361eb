// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::control::ControlId;

/// Which controls hold the cursor and the keyboard this frame.
///
/// Recomputed by the window manager at the start of every update pass and
/// refined by the control tree while it is traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputContext {
    /// The control the cursor currently targets.
    pub active: Option<ControlId>,
    /// The control holding logical input focus across frames.
    pub selected: Option<ControlId>,
    /// If the selected control captures all hover input this frame.
    pub exclusive_capture: bool,
}

impl InputContext {
    /// If hover input for `id` is suppressed by another control's exclusive capture.
    pub fn is_captured_by_other(&self, id: ControlId) -> bool {
        self.exclusive_capture && self.selected != Some(id)
    }
}
