// SPDX-License-Identifier: MIT OR Apache-2.0

use std::time::Duration;

/// Timing of the frame being updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameTime {
    /// Time since the previous update.
    pub elapsed: Duration,
    /// Time since the first update.
    pub total: Duration,
}

impl FrameTime {
    /// Advance by one frame.
    pub fn advance(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
        self.total += elapsed;
    }

    /// Elapsed time in seconds.
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }
}
