//! Digital input debouncing.
//!
//! Converts noisy level samples into reliable transition events using
//! a minimum-stable-time window. One instance per monitored line,
//! owned by the control state machine; no hardware dependencies,
//! fully testable on host.

use crate::config::DEBOUNCE_WINDOW_US;

/// Per-channel debounce filter.
///
/// A raw level change is accepted only when the configured window has
/// elapsed since the last accepted transition. The window timer resets
/// only on accepted transitions, so every bounce inside the window is
/// suppressed without extending it.
pub struct DebouncedInput {
    last_stable: bool,
    last_transition_us: i64,
    window_us: i64,
}

impl DebouncedInput {
    /// Create a filter with the default 50 ms window, idle low.
    pub const fn new() -> Self {
        Self::with_window(DEBOUNCE_WINDOW_US)
    }

    /// Create a filter with a custom window in microseconds.
    pub const fn with_window(window_us: i64) -> Self {
        Self {
            last_stable: false,
            last_transition_us: 0,
            window_us,
        }
    }

    /// Feed one raw level sample.
    ///
    /// Returns the new stable level when a transition is accepted,
    /// `None` otherwise.
    #[inline]
    pub fn update(&mut self, raw: bool, now_us: i64) -> Option<bool> {
        if raw != self.last_stable && now_us - self.last_transition_us > self.window_us {
            self.last_stable = raw;
            self.last_transition_us = now_us;
            return Some(raw);
        }

        None
    }

    /// Last accepted level.
    #[inline]
    pub fn stable_level(&self) -> bool {
        self.last_stable
    }
}

impl Default for DebouncedInput {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: i64 = 1_000;

    #[test]
    fn test_bounce_inside_window_suppressed() {
        let mut input = DebouncedInput::new();

        // First flip accepted (well past the initial window)
        assert_eq!(input.update(true, 60 * MS), Some(true));

        // Bounce back 10 ms later: suppressed
        assert_eq!(input.update(false, 70 * MS), None);
        assert!(input.stable_level());

        // Still bouncing at 40 ms: suppressed
        assert_eq!(input.update(false, 100 * MS), None);

        // Genuine release 60 ms after the accepted flip
        assert_eq!(input.update(false, 121 * MS), Some(false));
    }

    #[test]
    fn test_unchanged_level_emits_nothing() {
        let mut input = DebouncedInput::new();

        assert_eq!(input.update(false, 100 * MS), None);
        assert_eq!(input.update(false, 200 * MS), None);
    }

    #[test]
    fn test_window_resets_only_on_accepted_transition() {
        let mut input = DebouncedInput::with_window(50 * MS);

        assert_eq!(input.update(true, 60 * MS), Some(true));

        // Suppressed bounces must not push the window forward
        assert_eq!(input.update(false, 80 * MS), None);
        assert_eq!(input.update(false, 100 * MS), None);

        // 51 ms after the accepted flip at t=60, not after the bounces
        assert_eq!(input.update(false, 111 * MS), Some(false));
    }

    #[test]
    fn test_flip_at_startup_waits_for_window() {
        let mut input = DebouncedInput::new();

        // Transition timestamp starts at zero: a flip inside the first
        // window is still suppressed
        assert_eq!(input.update(true, 10 * MS), None);
        assert_eq!(input.update(true, 51 * MS), Some(true));
    }
}
