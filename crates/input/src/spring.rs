//! Spring-return stick for host builds.
//!
//! A terminal only reports key presses, not a stick position. `SpringStick`
//! turns a press into a full deflection that springs back to centre after a
//! hold timeout, so the main loop sees the same "deflect, hold, release"
//! pattern the real joystick produces. Re-pressing before the timeout extends
//! the hold, like a stick that was never let go.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::stick::{AnalogStick, StickSample};
use crate::types::Direction;

/// Default time a key press keeps the stick deflected.
pub const DEFAULT_HOLD_MS: u64 = 150;

// Deflection packed into one word: direction code in the top byte, release
// deadline (ms since `origin`) in the low 56 bits.
const DEADLINE_MASK: u64 = (1 << 56) - 1;

fn direction_code(direction: Direction) -> u64 {
    match direction {
        Direction::None => 0,
        Direction::Up => 1,
        Direction::Down => 2,
        Direction::Left => 3,
        Direction::Right => 4,
    }
}

fn direction_from_code(code: u64) -> Direction {
    match code {
        1 => Direction::Up,
        2 => Direction::Down,
        3 => Direction::Left,
        4 => Direction::Right,
        _ => Direction::None,
    }
}

#[derive(Debug)]
pub struct SpringStick {
    origin: Instant,
    hold_ms: u64,
    deflection: AtomicU64,
}

impl SpringStick {
    pub fn new(hold_ms: u64) -> Self {
        Self {
            origin: Instant::now(),
            hold_ms,
            deflection: AtomicU64::new(0),
        }
    }

    pub fn hold_ms(&self) -> u64 {
        self.hold_ms
    }

    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    /// Push the stick toward `direction` now
    pub fn deflect(&self, direction: Direction) {
        self.deflect_at(direction, self.now_ms());
    }

    /// Push the stick toward `direction` at `now_ms` (ms since creation)
    pub fn deflect_at(&self, direction: Direction, now_ms: u64) {
        let deadline = now_ms.saturating_add(self.hold_ms) & DEADLINE_MASK;
        let word = (direction_code(direction) << 56) | deadline;
        self.deflection.store(word, Ordering::Release);
    }

    /// Let go of the stick
    pub fn release(&self) {
        self.deflection.store(0, Ordering::Release);
    }

    /// Stick reading at `now_ms`
    pub fn sample_at(&self, now_ms: u64) -> StickSample {
        let word = self.deflection.load(Ordering::Acquire);
        let direction = direction_from_code(word >> 56);
        if now_ms < word & DEADLINE_MASK {
            StickSample::toward(direction)
        } else {
            StickSample::CENTER
        }
    }
}

impl Default for SpringStick {
    fn default() -> Self {
        Self::new(DEFAULT_HOLD_MS)
    }
}

impl AnalogStick for Arc<SpringStick> {
    fn sample(&mut self) -> StickSample {
        self.sample_at(self.now_ms())
    }
}
