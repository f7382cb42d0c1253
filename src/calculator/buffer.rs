//! Text rules for the expression buffer.
//!
//! Every function here is a pure mapping from the current display text to
//! the next one. The controller reads the surface, applies one of these and
//! writes the result back.

use super::detection::current_operand;
use super::evaluation::Operator;

/// The empty/reset state of the display.
pub const ZERO: &str = "0";

/// Shown whenever evaluation fails or produces a non-finite value.
pub const ERROR_TEXT: &str = "Error Math";

/// Check whether the text is one of the reserved sentinel values.
pub fn is_sentinel(text: &str) -> bool {
    text == ZERO || text == ERROR_TEXT
}

/// Append a digit, replacing a sentinel outright.
///
/// Values above 9 are not digits and leave the text unchanged.
pub fn append_digit(text: &str, digit: u8) -> String {
    let Some(ch) = char::from_digit(u32::from(digit), 10) else {
        return text.to_string();
    };

    if is_sentinel(text) {
        return ch.to_string();
    }

    let mut next = String::with_capacity(text.len() + 1);
    next.push_str(text);
    next.push(ch);
    next
}

/// Append an operator symbol. No check is made against what the text ends
/// with, so `"2+"` followed by `*` gives `"2+*"`.
pub fn append_operator(text: &str, op: Operator) -> String {
    format!("{}{}", text, op.symbol())
}

/// Append a decimal point unless the operand being typed already has one.
pub fn append_decimal(text: &str) -> String {
    if current_operand(text).contains('.') {
        return text.to_string();
    }
    format!("{}.", text)
}

/// Drop the last character, falling back to `"0"` rather than empty text.
pub fn backspace(text: &str) -> String {
    let mut chars = text.chars();
    if chars.clone().count() <= 1 {
        return ZERO.to_string();
    }
    chars.next_back();
    chars.as_str().to_string()
}

/// Reset the display.
pub fn clear() -> String {
    ZERO.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_replaces_sentinels() {
        for d in 0..=9 {
            assert_eq!(append_digit("0", d), d.to_string());
            assert_eq!(append_digit(ERROR_TEXT, d), d.to_string());
        }
    }

    #[test]
    fn test_digit_appends_otherwise() {
        assert_eq!(append_digit("12", 3), "123");
        assert_eq!(append_digit("1+", 0), "1+0");
        assert_eq!(append_digit("0.", 5), "0.5");
        // "10" is not a sentinel even though it starts with zero
        assert_eq!(append_digit("10", 0), "100");
    }

    #[test]
    fn test_out_of_range_digit_ignored() {
        assert_eq!(append_digit("12", 42), "12");
        assert_eq!(append_digit("0", 10), "0");
        assert_eq!(append_digit(ERROR_TEXT, 255), ERROR_TEXT);
    }

    #[test]
    fn test_operator_is_permissive() {
        assert_eq!(append_operator("2", Operator::Add), "2+");
        assert_eq!(append_operator("2+", Operator::Multiply), "2+*");
        assert_eq!(append_operator("0", Operator::Subtract), "0-");
        assert_eq!(append_operator(ERROR_TEXT, Operator::Remainder), "Error Math%");
    }

    #[test]
    fn test_decimal_scoped_to_operand() {
        assert_eq!(append_decimal("12+3"), "12+3.");
        assert_eq!(append_decimal("1.2+3"), "1.2+3.");
        assert_eq!(append_decimal("1.2+3."), "1.2+3.");
        assert_eq!(append_decimal("1.2"), "1.2");
        assert_eq!(append_decimal("0"), "0.");
        assert_eq!(append_decimal("4*"), "4*.");
        assert_eq!(append_decimal("8%2.5"), "8%2.5");
    }

    #[test]
    fn test_decimal_idempotent() {
        for text in ["0", "12", "3-4", "5/6.", "7%"] {
            let once = append_decimal(text);
            assert_eq!(append_decimal(&once), once);
        }
    }

    #[test]
    fn test_backspace() {
        assert_eq!(backspace("7"), "0");
        assert_eq!(backspace("0"), "0");
        assert_eq!(backspace(""), "0");
        assert_eq!(backspace("12+"), "12");
        assert_eq!(backspace(ERROR_TEXT), "Error Mat");
    }

    #[test]
    fn test_clear() {
        assert_eq!(clear(), "0");
    }
}
