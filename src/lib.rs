//! Keyboard-driven calculator core.
//!
//! The [`calculator::Controller`] owns access to a display surface and
//! rewrites its text for each [`input::InputEvent`]. Evaluation goes through
//! a small dedicated evaluator that only understands numbers and the keypad
//! operators.

pub mod calculator;
pub mod config;
pub mod input;
pub mod ui;
