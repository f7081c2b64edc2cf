//! Input module - discrete edges and the analog stick.
//!
//! Board-facing pieces, used by the game loop on every target:
//!
//! - [`latch`]: single-writer/single-reader edge flags shared with interrupt
//!   context
//! - [`stick`]: dead-zone decoding and the held-direction tracker
//!
//! Host-facing pieces, used by the terminal simulator:
//!
//! - [`irq`]: a simulated edge-interrupt controller: the mask register and
//!   the handler that owns the latch producers
//! - [`spring`]: a stick that springs back to centre after a key press
//! - [`keymap`]: `crossterm` key events to board inputs

pub mod irq;
pub mod keymap;
pub mod latch;
pub mod spring;
pub mod stick;

pub use joystick_2048_types as types;

pub use irq::{EdgeIrqGate, EdgeIrqHandler};
pub use keymap::{map_key_event, HostInput};
pub use latch::{EdgeConsumers, EdgeLatch, EdgeLatches, EdgeProducers, EdgeSetter, EdgeTaker};
pub use spring::{SpringStick, DEFAULT_HOLD_MS};
pub use stick::{decode_direction, AnalogStick, DeadZone, DirectionTracker, StickSample};
