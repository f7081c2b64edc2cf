//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain `Copy` data with no external dependencies, so they can be
//! used from interrupt context, the main loop, the renderer and tests alike.
//!
//! # Board Dimensions
//!
//! The board is a fixed 4x4 grid of tile values. A cell is either `0` (empty)
//! or a power of two reached by repeated doubling from 2.
//!
//! # Input Constants
//!
//! The joystick is sampled by a 10-bit ADC:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `ADC_MIN` | 0 | Lowest raw reading |
//! | `ADC_MAX` | 1023 | Highest raw reading |
//! | `ADC_MID` | 512 | Stick at rest |
//! | `STICK_DEAD_ZONE` | 250 | Counts from each extreme that still read as deflected |
//!
//! # Loop Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `CONTINUE_POLL_MS` | 20 | Delay between confirm polls after a game over |
//! | `BLINK_PERIOD_POLLS` | 20 | Alert light period, in confirm polls |
//!
//! # Examples
//!
//! ```
//! use joystick_2048_types::{Direction, EdgeEvent, GRID_LEN};
//!
//! let dir = Direction::from_str("left").unwrap();
//! assert_eq!(dir, Direction::Left);
//! assert_eq!(dir.opposite(), Direction::Right);
//!
//! assert_eq!(EdgeEvent::Confirm.index(), 2);
//! assert_eq!(GRID_LEN, 4);
//! ```

#![cfg_attr(not(test), no_std)]

/// Side length of the board (4 cells)
pub const GRID_LEN: usize = 4;

/// Number of cells on the board (16)
pub const GRID_CELLS: usize = GRID_LEN * GRID_LEN;

/// Raw cell storage, row-major: `cells[row][col]`
pub type GridCells = [[u32; GRID_LEN]; GRID_LEN];

/// A spawned tile is a 4 once in this many spawns, otherwise a 2
pub const SPAWN_FOUR_ONE_IN: u32 = 10;

/// Largest score the 4-digit 7-segment display can show
pub const SCORE_DISPLAY_MAX: u32 = 9999;

/// Lowest raw ADC reading
pub const ADC_MIN: u16 = 0;

/// Highest raw ADC reading (10-bit converter)
pub const ADC_MAX: u16 = 1023;

/// Raw ADC reading of a centred stick
pub const ADC_MID: u16 = 512;

/// Width of the deflection band at each end of the ADC range
pub const STICK_DEAD_ZONE: u16 = 250;

/// Delay between confirm polls while waiting to continue
pub const CONTINUE_POLL_MS: u32 = 20;

/// Alert light blink period, counted in confirm polls
pub const BLINK_PERIOD_POLLS: u8 = 20;


/// Stick direction decoded from one pair of analog samples
///
/// Directions are never latched: a fresh value is decoded every poll, and a
/// move registers only when the decoded value changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Stick inside the dead zone on both axes
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The four directions that slide the board, in a stable order
    pub const MOVES: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parse a direction from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use joystick_2048_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("UP"), Some(Direction::Up));
    /// assert_eq!(Direction::from_str("right"), Some(Direction::Right));
    /// assert_eq!(Direction::from_str("sideways"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        const NAMES: [(&str, Direction); 5] = [
            ("none", Direction::None),
            ("up", Direction::Up),
            ("down", Direction::Down),
            ("left", Direction::Left),
            ("right", Direction::Right),
        ];
        NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|&(_, dir)| dir)
    }

    /// Lowercase name of the direction
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::None => "none",
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// The direction pointing the other way (`None` stays `None`)
    pub fn opposite(&self) -> Self {
        match self {
            Direction::None => Direction::None,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// True for the four sliding directions
    pub fn is_move(&self) -> bool {
        !matches!(self, Direction::None)
    }
}

/// Session state of the game loop controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    /// Accepting moves (initial state)
    #[default]
    Playing,
    /// Board is terminal; blinking until the operator confirms
    AwaitingContinue,
    /// Clearing the board and dealing two fresh tiles
    Resetting,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Playing => "playing",
            SessionState::AwaitingContinue => "awaitingContinue",
            SessionState::Resetting => "resetting",
        }
    }
}

/// Debounced discrete inputs delivered by the edge-triggered interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeEvent {
    /// Debug button: overwrite the board with a losing pattern
    ForceLoss,
    /// Flip the audio-enabled bit
    ToggleSound,
    /// Dismiss the game-over screen
    Confirm,
}

impl EdgeEvent {
    pub const ALL: [EdgeEvent; 3] = [EdgeEvent::ForceLoss, EdgeEvent::ToggleSound, EdgeEvent::Confirm];

    /// Stable index, used for latch banks and pending bitmasks
    pub const fn index(self) -> usize {
        match self {
            EdgeEvent::ForceLoss => 0,
            EdgeEvent::ToggleSound => 1,
            EdgeEvent::Confirm => 2,
        }
    }

    /// Single-bit mask for this event
    pub const fn bit(self) -> u8 {
        1 << self.index()
    }
}

/// Operator-facing messages emitted by the controller
///
/// On the board these went to the serial terminal; the renderer decides how
/// (or whether) to show them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    /// A new stick direction was registered and a slide attempted
    Slide(Direction),
    /// The slide changed nothing
    MoveRejected(Direction),
    /// Audio was switched on (`true`) or off
    SoundToggled(bool),
    /// A move was applied
    ScoreGained { added: u32, total: u32 },
    /// The session ended above the previous high score
    NewHighScore(u32),
    /// The board is terminal; waiting for confirm
    GameOver,
    /// A fresh board was dealt
    NewGame,
}
