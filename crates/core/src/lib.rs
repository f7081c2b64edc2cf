//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the 2048 board rules. It has **zero dependencies** on
//! peripherals, interrupts, audio or rendering, and never touches the heap:
//!
//! - **Deterministic**: same seed, same spawns
//! - **Portable**: `no_std`, runs on the board and on the host
//! - **Fast**: fixed-size arrays only, no allocation on any path
//!
//! # Module Structure
//!
//! - [`line`]: the single canonical slide/merge routine
//! - [`grid`]: 4x4 board, direction coordinate map, move/spawn/terminal checks
//! - [`rng`]: LCG used for spawns
//! - [`score`]: session score, high score, display clamp
//! - [`snapshot`]: `Copy` frame data handed to renderers
//!
//! # Game Rules
//!
//! - A move slides every line toward one edge. Equal tiles that meet merge
//!   once per move; the merged value is added to the score.
//! - A move that changes nothing is rejected and leaves the board untouched.
//! - After every applied move one tile spawns: a 2, or a 4 one time in ten.
//! - The session ends when the board is full and no neighbours are equal.
//!
//! # Example
//!
//! ```
//! use joystick_2048_core::{Grid, SimpleRng};
//! use joystick_2048_types::Direction;
//!
//! let mut grid = Grid::from_cells([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
//! let outcome = grid.apply_move(Direction::Left);
//! assert!(outcome.applied);
//! assert_eq!(outcome.score_delta, 4);
//! assert_eq!(grid.get(0, 0), Some(4));
//!
//! let mut rng = SimpleRng::new(12345);
//! let spawn = grid.spawn_tile(&mut rng).unwrap();
//! assert!(spawn.value == 2 || spawn.value == 4);
//! assert!(!grid.is_terminal());
//! ```

#![cfg_attr(not(test), no_std)]

pub mod grid;
pub mod line;
pub mod rng;
pub mod score;
pub mod snapshot;

pub use joystick_2048_types as types;

// Re-export commonly used types for convenience
pub use grid::{line_cell, Grid, MoveOutcome, Spawn};
pub use line::{slide_line, Line, LineSlide};
pub use rng::SimpleRng;
pub use score::{display_score, Scoreboard};
pub use snapshot::GameSnapshot;
