//! Calculator core.
//!
//! This module provides functionality to:
//! - Apply keypad input to the display text
//! - Evaluate the display text with a dedicated arithmetic evaluator
//! - Check whether text can be typed on the keypad
//! - Copy results to the clipboard

mod buffer;
mod clipboard;
mod controller;
mod detection;
mod evaluation;

pub use buffer::{ERROR_TEXT, ZERO, is_sentinel};
pub use clipboard::{ClipboardError, copy_result, copy_to_clipboard};
pub use controller::{Controller, DisplaySurface, TextDisplay};
pub use detection::{current_operand, is_calculator_input};
pub use evaluation::{
    ArithmeticEvaluator, CalcResult, EvalError, Evaluator, Operator, evaluate_expression,
    format_number,
};
