//! Joystick 2048 (workspace facade crate).
//!
//! The game itself lives in dedicated crates under `crates/` and is
//! re-exported here as `joystick_2048::{types, core, input, audio, engine, term}`.
//! [`config`] and [`host`] hold the pieces only the terminal simulator needs.

pub mod config;
pub mod host;

pub use joystick_2048_audio as audio;
pub use joystick_2048_core as core;
pub use joystick_2048_engine as engine;
pub use joystick_2048_input as input;
pub use joystick_2048_term as term;
pub use joystick_2048_types as types;
