//! Input detection for the calculator.
//!
//! Determines whether text is made of calculator characters, and locates
//! the operand currently being typed.

use lazy_static::lazy_static;
use regex::Regex;

use super::evaluation::Operator;

lazy_static! {
    /// Matches strings containing only characters the keypad can produce.
    /// Allows: digits, dots, the five operators and whitespace.
    static ref CALCULATOR_CHARS: Regex = Regex::new(r"^[\d\.\+\-\*/%\s]+$").unwrap();
}

/// Check if input can be typed on the calculator keypad.
///
/// Returns `true` if the input is non-empty and uses only digits, decimal
/// points, operators and whitespace.
pub fn is_calculator_input(input: &str) -> bool {
    !input.trim().is_empty() && CALCULATOR_CHARS.is_match(input)
}

/// Byte index of the last operator character in `text`, if any.
pub fn last_operator_index(text: &str) -> Option<usize> {
    text.rfind(|c: char| Operator::from_char(c).is_some())
}

/// The operand being typed: everything after the last operator, or the
/// whole text when there is no operator.
pub fn current_operand(text: &str) -> &str {
    match last_operator_index(text) {
        // operators are ASCII, so +1 stays on a char boundary
        Some(idx) => &text[idx + 1..],
        None => text,
    }
}
