//! Timing knobs for synthesized input.

use std::time::Duration;

/// Delays applied between injected events.
///
/// None of these are read from files or the environment; the command line is
/// the only way to change them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Pause between moving the cursor and clicking at the new position.
    pub settle_delay: Duration,
    /// Pause between a key or button press and its release.
    pub hold_delay: Duration,
    /// Pause after each typed character.
    pub char_delay: Duration,
}

impl Settings {
    pub const DEFAULT_SETTLE: Duration = Duration::from_millis(50);
    pub const DEFAULT_HOLD: Duration = Duration::from_millis(10);
    pub const DEFAULT_CHAR: Duration = Duration::from_millis(10);

    pub fn new() -> Self {
        Self {
            settle_delay: Self::DEFAULT_SETTLE,
            hold_delay: Self::DEFAULT_HOLD,
            char_delay: Self::DEFAULT_CHAR,
        }
    }

    /// Settings with every delay set to zero.
    pub fn immediate() -> Self {
        Self {
            settle_delay: Duration::ZERO,
            hold_delay: Duration::ZERO,
            char_delay: Duration::ZERO,
        }
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_hold_delay(mut self, delay: Duration) -> Self {
        self.hold_delay = delay;
        self
    }

    pub fn with_char_delay(mut self, delay: Duration) -> Self {
        self.char_delay = delay;
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

/// Sleep unless the delay is zero.
pub(crate) fn pause(delay: Duration) {
    if !delay.is_zero() {
        std::thread::sleep(delay);
    }
}
