//! Rendering module
//!
//! Turns a [`crate::sim::GameState`] into a flat list of rectangles and debug
//! text. The host owns the actual drawing surface.

pub mod command;
pub mod frame;

pub use command::{DrawCommand, colors};
pub use frame::{layout, phase_banner, render};
