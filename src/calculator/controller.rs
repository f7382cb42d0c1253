//! The expression buffer controller.
//!
//! Owns access to the display surface and the evaluator, and turns each
//! input event into one rewrite of the display text.

use tracing::{debug, trace};

use super::buffer::{self, ERROR_TEXT, ZERO};
use super::evaluation::{
    ArithmeticEvaluator, CalcResult, Evaluator, Operator, evaluate_expression,
};
use crate::input::InputEvent;

/// A surface that shows the calculator text.
pub trait DisplaySurface {
    /// Current text on the surface.
    fn text(&self) -> String;
    /// Replace the text on the surface.
    fn set_text(&mut self, text: String);
}

/// In-memory display surface, starting at `"0"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextDisplay {
    text: String,
}

impl TextDisplay {
    pub fn new() -> Self {
        Self {
            text: ZERO.to_string(),
        }
    }
}

impl Default for TextDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface for TextDisplay {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: String) {
        // never let the surface go blank
        self.text = if text.is_empty() {
            ZERO.to_string()
        } else {
            text
        };
    }
}

/// Drives a display surface from discrete input events.
///
/// Every operation returns `true` if it reached a surface. With no surface
/// attached the operations do nothing and return `false`.
pub struct Controller<D: DisplaySurface, E: Evaluator = ArithmeticEvaluator> {
    display: Option<D>,
    evaluator: E,
}

impl<D: DisplaySurface> Controller<D> {
    /// Create a controller over `display` using the built-in evaluator.
    pub fn new(display: D) -> Self {
        Self::with_evaluator(Some(display), ArithmeticEvaluator)
    }

    /// Create a controller with no surface attached yet.
    pub fn detached() -> Self {
        Self::with_evaluator(None, ArithmeticEvaluator)
    }
}

impl<D: DisplaySurface, E: Evaluator> Controller<D, E> {
    pub fn with_evaluator(display: Option<D>, evaluator: E) -> Self {
        Self { display, evaluator }
    }

    /// Attach a display surface, returning the previous one.
    pub fn attach(&mut self, display: D) -> Option<D> {
        self.display.replace(display)
    }

    /// Remove the display surface.
    pub fn detach(&mut self) -> Option<D> {
        self.display.take()
    }

    pub fn display(&self) -> Option<&D> {
        self.display.as_ref()
    }

    pub fn display_mut(&mut self) -> Option<&mut D> {
        self.display.as_mut()
    }

    /// Current display text, if a surface is attached.
    pub fn text(&self) -> Option<String> {
        self.display.as_ref().map(|d| d.text())
    }

    /// Route one input event to its operation.
    pub fn apply(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Digit(d) => self.append_digit(d),
            InputEvent::Operator(op) => self.append_operator(op),
            InputEvent::Decimal => self.append_decimal(),
            InputEvent::Evaluate => self.evaluate(),
            InputEvent::Clear => self.clear(),
            InputEvent::Backspace => self.backspace(),
        }
    }

    pub fn append_digit(&mut self, digit: u8) -> bool {
        self.rewrite("digit", |text| buffer::append_digit(text, digit))
    }

    pub fn append_operator(&mut self, op: Operator) -> bool {
        self.rewrite("operator", |text| buffer::append_operator(text, op))
    }

    pub fn append_decimal(&mut self) -> bool {
        self.rewrite("decimal", buffer::append_decimal)
    }

    pub fn clear(&mut self) -> bool {
        self.rewrite("clear", |_| buffer::clear())
    }

    pub fn backspace(&mut self) -> bool {
        self.rewrite("backspace", buffer::backspace)
    }

    /// Evaluate the display text and show the result, or [`ERROR_TEXT`]
    /// when the expression is rejected or the result is not finite.
    pub fn evaluate(&mut self) -> bool {
        let Some(display) = self.display.as_mut() else {
            trace!(operation = "evaluate", "No display surface, skipping");
            return false;
        };

        let result = evaluate_expression(&self.evaluator, &display.text());
        match &result {
            CalcResult::Success { expression, value, .. } => {
                debug!(expression = %expression, value, "Evaluated expression");
            }
            CalcResult::Error { expression, error } => {
                debug!(expression = %expression, error = %error, "Evaluation failed");
            }
        }

        display.set_text(result.display(ERROR_TEXT).to_string());
        true
    }

    fn rewrite(&mut self, operation: &'static str, rule: impl FnOnce(&str) -> String) -> bool {
        let Some(display) = self.display.as_mut() else {
            trace!(operation, "No display surface, skipping");
            return false;
        };

        let current = display.text();
        let next = rule(&current);
        trace!(operation, from = %current, to = %next, "Display updated");
        display.set_text(next);
        true
    }
}
