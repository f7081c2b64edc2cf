//! Engine module - runs the 2048 session on top of the board rules.
//!
//! [`GameLoopController`] is the single-threaded main loop: it polls the
//! stick and the edge latches, applies moves to the grid, plays jingles and
//! drives the front end through the [`ports`] traits. The only place it
//! blocks indefinitely is the continue wait after a session ends.

pub mod blink;
pub mod controller;
pub mod ports;

pub use blink::BlinkTimer;
pub use controller::{ControllerConfig, GameLoopController, WaitOutcome};
pub use ports::{Delay, Frontend, Indicators, Renderer, ScoreDisplay};
