//! Expression evaluation for the calculator display.
//!
//! A small dedicated evaluator for infix expressions over numbers and the
//! five keypad operators. Nothing else is accepted, so every way it can
//! fail is listed in [`EvalError`].
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := unary (('*' | '/' | '%') unary)*
//! unary  := ('+' | '-') unary | number
//! number := digits ['.' digits?] | '.' digits
//! ```
//!
//! Adjacent `++` and `--` are rejected as a whole, so `2--3` fails while
//! `2+-3` and `2- -3` evaluate.

use std::fmt;

use thiserror::Error;

/// A binary operator available on the keypad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
}

impl Operator {
    pub const ALL: [Operator; 5] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Remainder,
    ];

    /// Parse an operator from its keypad symbol.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            '%' => Some(Self::Remainder),
            _ => None,
        }
    }

    /// The keypad symbol for this operator.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
            Self::Remainder => '%',
        }
    }

    /// Apply the operator with IEEE semantics. Division by zero yields an
    /// infinity or NaN; the caller decides what that means.
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => lhs / rhs,
            // truncated remainder, sign follows the dividend
            Self::Remainder => lhs % rhs,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Why an expression could not be turned into a finite number.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("empty expression")]
    Empty,

    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },

    #[error("invalid number literal '{literal}'")]
    InvalidNumber { literal: String },

    #[error("unexpected '{token}' at position {position}")]
    UnexpectedToken { token: String, position: usize },

    #[error("expression ends unexpectedly")]
    UnexpectedEnd,

    #[error("result is not a finite number ({value})")]
    NonFinite { value: f64 },
}

/// Something that can evaluate the display text as an arithmetic expression.
pub trait Evaluator {
    /// Evaluate `expression`, returning the raw numeric result.
    ///
    /// Non-finite results are returned as values, not errors; the caller
    /// decides how to present them.
    fn evaluate(&self, expression: &str) -> Result<f64, EvalError>;
}

/// The built-in evaluator for `+ - * / %` with standard precedence.
#[derive(Clone, Copy, Debug, Default)]
pub struct ArithmeticEvaluator;

impl Evaluator for ArithmeticEvaluator {
    fn evaluate(&self, expression: &str) -> Result<f64, EvalError> {
        let tokens = tokenize(expression)?;
        if tokens.is_empty() {
            return Err(EvalError::Empty);
        }
        let mut parser = Parser { tokens, pos: 0 };
        let value = parser.expr()?;
        match parser.peek() {
            None => Ok(value),
            Some((token, position)) => Err(EvalError::UnexpectedToken {
                token: token.to_string(),
                position,
            }),
        }
    }
}

/// Result of evaluating the display text.
#[derive(Clone, Debug)]
pub enum CalcResult {
    /// Finite numeric result.
    Success {
        /// The expression that was evaluated.
        expression: String,
        /// The numeric value.
        value: f64,
        /// The value as it should appear on the display.
        display_result: String,
    },
    /// The expression was rejected or produced a non-finite value.
    Error {
        /// The expression that was evaluated.
        expression: String,
        /// What went wrong.
        error: EvalError,
    },
}

impl CalcResult {
    /// Get the expression that was evaluated.
    pub fn expression(&self) -> &str {
        match self {
            Self::Success { expression, .. } => expression,
            Self::Error { expression, .. } => expression,
        }
    }

    /// Check if this is a successful result.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Get the display string, or `error_text` for failures.
    pub fn display<'a>(&'a self, error_text: &'a str) -> &'a str {
        match self {
            Self::Success { display_result, .. } => display_result,
            Self::Error { .. } => error_text,
        }
    }
}

/// Evaluate `input` with `evaluator`, folding non-finite values into errors.
pub fn evaluate_expression<E: Evaluator + ?Sized>(evaluator: &E, input: &str) -> CalcResult {
    let expression = input.to_string();

    match evaluator.evaluate(input) {
        Ok(value) if value.is_finite() => CalcResult::Success {
            expression,
            display_result: format_number(value),
            value,
        },
        Ok(value) => CalcResult::Error {
            expression,
            error: EvalError::NonFinite { value },
        },
        Err(error) => CalcResult::Error { expression, error },
    }
}

/// Format a number the way a JavaScript host stringifies it.
///
/// Integral values print without a fraction, negative zero prints as `0`,
/// and magnitudes at or above 1e21 or below 1e-6 switch to exponent form
/// with an explicit sign (`1e+21`, `1.5e-7`).
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".to_string()
        } else if value.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };
    }

    let abs = value.abs();
    if (1e-6..1e21).contains(&abs) {
        return format!("{}", value);
    }

    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Number(f64),
    Op(Operator),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::Op(op) => write!(f, "{}", op),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(position, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if let Some(op) = Operator::from_char(c) {
            chars.next();
            // adjacent "++" or "--" is an increment/decrement, not two signs
            if matches!(op, Operator::Add | Operator::Subtract)
                && chars.peek().is_some_and(|&(_, next)| next == c)
            {
                return Err(EvalError::UnexpectedToken {
                    token: format!("{}{}", c, c),
                    position,
                });
            }
            tokens.push((Token::Op(op), position));
        } else if c.is_ascii_digit() || c == '.' {
            let mut literal = String::new();
            while let Some(&(_, d)) = chars.peek() {
                if d.is_ascii_digit() || d == '.' {
                    literal.push(d);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push((Token::Number(parse_number(&literal)?), position));
        } else {
            return Err(EvalError::UnexpectedCharacter { ch: c, position });
        }
    }

    Ok(tokens)
}

fn parse_number(literal: &str) -> Result<f64, EvalError> {
    let invalid = || EvalError::InvalidNumber {
        literal: literal.to_string(),
    };

    let dots = literal.matches('.').count();
    let has_digit = literal.chars().any(|c| c.is_ascii_digit());
    if dots > 1 || !has_digit {
        return Err(invalid());
    }

    literal.parse::<f64>().map_err(|_| invalid())
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<(&Token, usize)> {
        self.tokens.get(self.pos).map(|(t, p)| (t, *p))
    }

    fn peek_op(&self, accepted: &[Operator]) -> Option<Operator> {
        match self.peek() {
            Some((Token::Op(op), _)) if accepted.contains(op) => Some(*op),
            _ => None,
        }
    }

    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        while let Some(op) = self.peek_op(&[Operator::Add, Operator::Subtract]) {
            self.pos += 1;
            let rhs = self.term()?;
            value = op.apply(value, rhs);
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.unary()?;
        while let Some(op) =
            self.peek_op(&[Operator::Multiply, Operator::Divide, Operator::Remainder])
        {
            self.pos += 1;
            let rhs = self.unary()?;
            value = op.apply(value, rhs);
        }
        Ok(value)
    }

    fn unary(&mut self) -> Result<f64, EvalError> {
        match self.peek() {
            None => Err(EvalError::UnexpectedEnd),
            Some((Token::Number(n), _)) => {
                let n = *n;
                self.pos += 1;
                Ok(n)
            }
            Some((Token::Op(Operator::Add), _)) => {
                self.pos += 1;
                self.unary()
            }
            Some((Token::Op(Operator::Subtract), _)) => {
                self.pos += 1;
                Ok(-self.unary()?)
            }
            Some((token, position)) => Err(EvalError::UnexpectedToken {
                token: token.to_string(),
                position,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(input: &str) -> Result<f64, EvalError> {
        ArithmeticEvaluator.evaluate(input)
    }

    fn shown(input: &str) -> String {
        evaluate_expression(&ArithmeticEvaluator, input)
            .display("Error Math")
            .to_string()
    }

    #[test]
    fn test_basic_evaluation() {
        let result = evaluate_expression(&ArithmeticEvaluator, "2+2");
        assert!(result.is_success());
        assert_eq!(result.display("Error Math"), "4");
        assert_eq!(result.expression(), "2+2");
    }

    #[test]
    fn test_precedence_and_associativity() {
        assert_eq!(eval("2+3*4"), Ok(14.0));
        assert_eq!(eval("8-3-2"), Ok(3.0));
        assert_eq!(eval("8/4/2"), Ok(1.0));
        assert_eq!(eval("10-4%3"), Ok(9.0));
        assert_eq!(eval("2 * 3 + 4"), Ok(10.0));
    }

    #[test]
    fn test_remainder() {
        assert_eq!(eval("7%3"), Ok(1.0));
        assert_eq!(eval("-7%3"), Ok(-1.0));
        assert_eq!(eval("5.5%2"), Ok(1.5));
    }

    #[test]
    fn test_unary_signs() {
        assert_eq!(eval("-5"), Ok(-5.0));
        assert_eq!(eval("2*-3"), Ok(-6.0));
        assert_eq!(eval("2+-3"), Ok(-1.0));
        assert_eq!(eval("2- -3"), Ok(5.0));
        assert_eq!(eval("2*+3"), Ok(6.0));
        assert_eq!(eval("2-+3"), Ok(-1.0));
        assert_eq!(eval("+4"), Ok(4.0));
    }

    #[test]
    fn test_number_literals() {
        assert_eq!(eval("5."), Ok(5.0));
        assert_eq!(eval(".5"), Ok(0.5));
        assert_eq!(eval("010"), Ok(10.0));
        assert_eq!(
            eval("1.2.3"),
            Err(EvalError::InvalidNumber {
                literal: "1.2.3".to_string()
            })
        );
        assert_eq!(
            eval("1+."),
            Err(EvalError::InvalidNumber {
                literal: ".".to_string()
            })
        );
    }

    #[test]
    fn test_malformed_expressions() {
        assert_eq!(eval(""), Err(EvalError::Empty));
        assert_eq!(eval("  "), Err(EvalError::Empty));
        assert_eq!(eval("3+"), Err(EvalError::UnexpectedEnd));
        assert_eq!(
            eval("2--3"),
            Err(EvalError::UnexpectedToken {
                token: "--".to_string(),
                position: 1
            })
        );
        assert_eq!(
            eval("2++3"),
            Err(EvalError::UnexpectedToken {
                token: "++".to_string(),
                position: 1
            })
        );
        assert!(eval("--3").is_err());
        assert!(eval("5---3").is_err());
        assert_eq!(
            eval("2*/3"),
            Err(EvalError::UnexpectedToken {
                token: "/".to_string(),
                position: 2
            })
        );
        assert_eq!(
            eval("*2"),
            Err(EvalError::UnexpectedToken {
                token: "*".to_string(),
                position: 0
            })
        );
        assert_eq!(
            eval("Error Math"),
            Err(EvalError::UnexpectedCharacter { ch: 'E', position: 0 })
        );
    }

    #[test]
    fn test_division_by_zero() {
        let result = evaluate_expression(&ArithmeticEvaluator, "5/0");
        assert!(!result.is_success());
        assert_eq!(result.display("Error Math"), "Error Math");
        assert_eq!(shown("-5/0"), "Error Math");
        assert_eq!(shown("0/0"), "Error Math");
        assert_eq!(shown("5%0"), "Error Math");
    }

    #[test]
    fn test_display_matches_js_stringification() {
        assert_eq!(shown("0.1+0.2"), "0.30000000000000004");
        assert_eq!(shown("1/4"), "0.25");
        assert_eq!(shown("0-0"), "0");
        assert_eq!(shown("-0*1"), "0");
        assert_eq!(shown("1/3"), "0.3333333333333333");
        assert_eq!(shown("3-5"), "-2");
    }

    #[test]
    fn test_format_number_exponents() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(-2.5e22), "-2.5e+22");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
    }

    #[test]
    fn test_operator_symbols() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_char(op.symbol()), Some(op));
        }
        assert_eq!(Operator::from_char('^'), None);
    }
}
