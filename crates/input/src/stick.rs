//! Analog stick decoding.
//!
//! The stick is two ADC channels. A direction is decoded fresh every poll and
//! never latched; [`DirectionTracker`] turns the stream of decoded values into
//! discrete moves by reporting only changes.

use crate::types::{Direction, ADC_MAX, ADC_MID, ADC_MIN, STICK_DEAD_ZONE};

/// One pair of raw ADC readings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StickSample {
    pub x: u16,
    pub y: u16,
}

impl StickSample {
    pub const CENTER: StickSample = StickSample {
        x: ADC_MID,
        y: ADC_MID,
    };

    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// A full deflection toward `direction` (centre for `None`)
    pub const fn toward(direction: Direction) -> Self {
        match direction {
            Direction::None => Self::CENTER,
            Direction::Left => Self::new(ADC_MIN, ADC_MID),
            Direction::Right => Self::new(ADC_MAX, ADC_MID),
            Direction::Up => Self::new(ADC_MID, ADC_MIN),
            Direction::Down => Self::new(ADC_MID, ADC_MAX),
        }
    }
}

impl Default for StickSample {
    fn default() -> Self {
        Self::CENTER
    }
}

/// Readings strictly below `low` or strictly above `high` count as deflected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeadZone {
    pub low: u16,
    pub high: u16,
}

impl DeadZone {
    /// Band of `size` counts in from each end of the ADC range
    pub const fn from_edge(size: u16) -> Self {
        Self {
            low: ADC_MIN.saturating_add(size),
            high: ADC_MAX.saturating_sub(size),
        }
    }
}

impl Default for DeadZone {
    fn default() -> Self {
        Self::from_edge(STICK_DEAD_ZONE)
    }
}

/// Decode a direction from one sample. The horizontal axis wins when both
/// axes are deflected.
pub fn decode_direction(sample: StickSample, dead_zone: DeadZone) -> Direction {
    if sample.x < dead_zone.low {
        Direction::Left
    } else if sample.x > dead_zone.high {
        Direction::Right
    } else if sample.y < dead_zone.low {
        Direction::Up
    } else if sample.y > dead_zone.high {
        Direction::Down
    } else {
        Direction::None
    }
}

/// Source of raw stick readings (ADC driver on the board, simulator on host)
pub trait AnalogStick {
    fn sample(&mut self) -> StickSample;
}

impl<T: AnalogStick + ?Sized> AnalogStick for &mut T {
    fn sample(&mut self) -> StickSample {
        (**self).sample()
    }
}

/// Remembers the previous poll's direction so a held stick moves once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionTracker {
    prev: Direction,
}

impl DirectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn previous(&self) -> Direction {
        self.prev
    }

    /// Record this poll's direction; returns it if it is a new move.
    pub fn register(&mut self, current: Direction) -> Option<Direction> {
        let fresh = current.is_move() && current != self.prev;
        self.prev = current;
        fresh.then_some(current)
    }
}
