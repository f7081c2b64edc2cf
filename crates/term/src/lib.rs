//! Terminal front end for the 2048 board simulator.
//!
//! Renders into a plain framebuffer and flushes only the changed cells, so
//! the controller can redraw on every display or LED change without flicker.
//!
//! - [`fb`]: styled cell buffer
//! - [`grid_view`]: snapshot + panel state to framebuffer (pure)
//! - [`renderer`]: framebuffer to terminal bytes (crossterm)
//! - [`frontend`]: the controller's collaborator traits on top of the above

pub mod fb;
pub mod frontend;
pub mod grid_view;
pub mod renderer;

pub use joystick_2048_core as core;
pub use joystick_2048_engine as engine;
pub use joystick_2048_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use frontend::TerminalFrontend;
pub use grid_view::{tile_style, GridView, PanelState, Viewport};
pub use renderer::{changed_runs, encode_diff_into, encode_full_into, TerminalRenderer};
