//! Platform abstraction layer
//!
//! Turns browser events into per-tick simulation input:
//! - Keyboard state (WASD / arrows, reload, demo toggle)
//! - Virtual joystick for touch screens
//! - Click/tap to fire

pub mod input;

pub use input::{InputState, KeyAction, joystick_vector, touch_controls_active};
