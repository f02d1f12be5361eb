// SPDX-License-Identifier: MIT OR Apache-2.0

use std::time::Duration;

/// Default hold time before a held key starts repeating.
pub const DEFAULT_REPEAT_TRIGGER: Duration = Duration::from_millis(400);

/// Default time between repeats once a key is repeating.
pub const DEFAULT_REPEAT_INTERVAL: Duration = Duration::from_millis(30);

/// Hold-to-repeat timer shared by every widget that scrolls or edits on a held key.
///
/// The action fires once on the first frame the key is seen down, then not
/// again until the key has been held for the trigger time, then once per
/// interval until release. Releasing resets everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRepeat {
    trigger: Duration,
    interval: Duration,
    held: Duration,
    since_repeat: Duration,
    down: bool,
    repeating: bool,
}

impl KeyRepeat {
    /// Create a timer with custom timings.
    pub fn new(trigger: Duration, interval: Duration) -> Self {
        Self {
            trigger,
            interval: interval.max(Duration::from_millis(1)),
            held: Duration::ZERO,
            since_repeat: Duration::ZERO,
            down: false,
            repeating: false,
        }
    }

    /// Advance the timer by `elapsed` and return how many times the action fires.
    pub fn update(&mut self, is_down: bool, elapsed: Duration) -> u32 {
        if !is_down {
            self.reset();
            return 0;
        }

        if !self.down {
            self.down = true;
            return 1;
        }

        self.held += elapsed;
        if !self.repeating {
            if self.held >= self.trigger {
                self.repeating = true;
                self.since_repeat = Duration::ZERO;
                return 1;
            }
            return 0;
        }

        self.since_repeat += elapsed;
        let mut fired = 0;
        while self.since_repeat >= self.interval {
            self.since_repeat -= self.interval;
            fired += 1;
        }
        fired
    }

    /// Advance the timer and run `action` once per firing.
    pub fn run<F: FnMut()>(&mut self, is_down: bool, elapsed: Duration, mut action: F) {
        for _ in 0..self.update(is_down, elapsed) {
            action();
        }
    }

    /// Forget the held state.
    pub fn reset(&mut self) {
        self.held = Duration::ZERO;
        self.since_repeat = Duration::ZERO;
        self.down = false;
        self.repeating = false;
    }

    /// If the key is past the trigger time.
    pub fn is_repeating(&self) -> bool {
        self.repeating
    }
}

impl Default for KeyRepeat {
    fn default() -> Self {
        Self::new(DEFAULT_REPEAT_TRIGGER, DEFAULT_REPEAT_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(10);

    #[test]
    fn test_fires_immediately_then_after_trigger_then_every_interval() {
        let mut repeat = KeyRepeat::default();
        let mut fired_at = Vec::new();
        let mut t = Duration::ZERO;

        for frame in 0..=100u32 {
            let elapsed = if frame == 0 { Duration::ZERO } else { FRAME };
            t += elapsed;
            if repeat.update(true, elapsed) > 0 {
                fired_at.push(t.as_millis());
            }
        }

        assert_eq!(&fired_at[..5], &[0, 400, 430, 460, 490]);
        assert!(fired_at.iter().all(|ms| *ms == 0 || *ms >= 400));
    }

    #[test]
    fn test_release_resets_to_immediate_fire() {
        let mut repeat = KeyRepeat::default();
        assert_eq!(repeat.update(true, Duration::ZERO), 1);
        assert_eq!(repeat.update(true, Duration::from_millis(450)), 1);
        assert!(repeat.is_repeating());

        assert_eq!(repeat.update(false, FRAME), 0);
        assert!(!repeat.is_repeating());
        assert_eq!(repeat.update(true, FRAME), 1);
        assert_eq!(repeat.update(true, FRAME), 0);
    }

    #[test]
    fn test_run_invokes_action_per_firing() {
        let mut repeat = KeyRepeat::default();
        repeat.update(true, Duration::ZERO);
        repeat.update(true, Duration::from_millis(400));

        let mut count = 0;
        repeat.run(true, Duration::from_millis(90), || count += 1);
        assert_eq!(count, 3);
    }
}
