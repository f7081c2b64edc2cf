//! Alert-light blink timer for the continue wait.

use joystick_2048_types::BLINK_PERIOD_POLLS;

const LIT_POLLS: u8 = BLINK_PERIOD_POLLS / 2;

/// Counts wait polls and says whether the alert lights are on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlinkTimer {
    counter: u8,
}

impl BlinkTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one poll. Returns true while the lights should be lit.
    pub fn advance(&mut self) -> bool {
        self.counter += 1;
        if self.counter < LIT_POLLS {
            true
        } else {
            self.counter %= BLINK_PERIOD_POLLS;
            false
        }
    }

    pub fn reset(&mut self) {
        self.counter = 0;
    }
}
