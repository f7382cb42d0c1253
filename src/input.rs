//! Input events and the rules that map keys and buttons onto them.
//!
//! Two delivery paths feed the controller: the keyboard, and the keypad
//! buttons (used by `zcalc press`). They differ on purpose: `%` exists only
//! as a button, and keyboard chords with Alt, Ctrl or Meta never dispatch.

use thiserror::Error;

use crate::calculator::Operator;

/// A discrete input the controller understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Digit(u8),
    Operator(Operator),
    Decimal,
    Evaluate,
    Clear,
    Backspace,
}

/// Platform-independent key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Escape,
    Other,
}

/// Modifier keys held during a key press.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        alt: false,
        ctrl: false,
        meta: false,
        shift: false,
    };

    /// True when a chord modifier (not Shift) is held.
    pub fn is_chord(&self) -> bool {
        self.alt || self.ctrl || self.meta
    }
}

/// A key event from whatever terminal or window delivers it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown button '{0}' (expected 0-9, + - * / %, ., =, C or DEL)")]
    UnknownButton(String),
}

/// Map a keyboard press to an input event.
///
/// Shift is allowed since most layouts need it for `+` and `*`.
pub fn dispatch_key(press: KeyPress) -> Option<InputEvent> {
    if press.modifiers.is_chord() {
        return None;
    }

    match press.key {
        Key::Char(c @ '0'..='9') => Some(InputEvent::Digit(c as u8 - b'0')),
        Key::Char(c @ ('+' | '-' | '*' | '/')) => Operator::from_char(c).map(InputEvent::Operator),
        Key::Char('.') => Some(InputEvent::Decimal),
        Key::Char('=') | Key::Enter => Some(InputEvent::Evaluate),
        Key::Backspace => Some(InputEvent::Backspace),
        Key::Escape | Key::Delete => Some(InputEvent::Clear),
        _ => None,
    }
}

/// Map a keypad button label to an input event.
pub fn dispatch_button(label: &str) -> Result<InputEvent, InputError> {
    let trimmed = label.trim();
    let mut chars = trimmed.chars();

    if let (Some(c), None) = (chars.next(), chars.next()) {
        if let Some(d) = c.to_digit(10) {
            return Ok(InputEvent::Digit(d as u8));
        }
        if let Some(op) = Operator::from_char(c) {
            return Ok(InputEvent::Operator(op));
        }
        match c {
            '.' => return Ok(InputEvent::Decimal),
            '=' => return Ok(InputEvent::Evaluate),
            'c' | 'C' => return Ok(InputEvent::Clear),
            _ => {}
        }
    }

    if trimmed.eq_ignore_ascii_case("del") {
        return Ok(InputEvent::Backspace);
    }

    Err(InputError::UnknownButton(label.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: char) -> Option<InputEvent> {
        dispatch_key(KeyPress::plain(Key::Char(c)))
    }

    #[test]
    fn test_digit_keys() {
        for d in 0..=9u8 {
            let c = char::from(b'0' + d);
            assert_eq!(key(c), Some(InputEvent::Digit(d)));
        }
    }

    #[test]
    fn test_operator_keys() {
        assert_eq!(key('+'), Some(InputEvent::Operator(Operator::Add)));
        assert_eq!(key('-'), Some(InputEvent::Operator(Operator::Subtract)));
        assert_eq!(key('*'), Some(InputEvent::Operator(Operator::Multiply)));
        assert_eq!(key('/'), Some(InputEvent::Operator(Operator::Divide)));
    }

    #[test]
    fn test_percent_not_on_keyboard() {
        assert_eq!(key('%'), None);
        assert_eq!(
            dispatch_button("%"),
            Ok(InputEvent::Operator(Operator::Remainder))
        );
    }

    #[test]
    fn test_special_keys() {
        assert_eq!(key('.'), Some(InputEvent::Decimal));
        assert_eq!(key('='), Some(InputEvent::Evaluate));
        assert_eq!(
            dispatch_key(KeyPress::plain(Key::Enter)),
            Some(InputEvent::Evaluate)
        );
        assert_eq!(
            dispatch_key(KeyPress::plain(Key::Backspace)),
            Some(InputEvent::Backspace)
        );
        assert_eq!(
            dispatch_key(KeyPress::plain(Key::Escape)),
            Some(InputEvent::Clear)
        );
        assert_eq!(dispatch_key(KeyPress::plain(Key::Other)), None);
        assert_eq!(key('a'), None);
    }

    #[test]
    fn test_modifier_chords_ignored() {
        let chords = [
            Modifiers { alt: true, ..Modifiers::NONE },
            Modifiers { ctrl: true, ..Modifiers::NONE },
            Modifiers { meta: true, ..Modifiers::NONE },
        ];
        for modifiers in chords {
            assert_eq!(dispatch_key(KeyPress::new(Key::Char('5'), modifiers)), None);
            assert_eq!(dispatch_key(KeyPress::new(Key::Enter, modifiers)), None);
            assert_eq!(dispatch_key(KeyPress::new(Key::Backspace, modifiers)), None);
        }

        let shifted = Modifiers { shift: true, ..Modifiers::NONE };
        assert_eq!(
            dispatch_key(KeyPress::new(Key::Char('+'), shifted)),
            Some(InputEvent::Operator(Operator::Add))
        );
    }

    #[test]
    fn test_buttons() {
        assert_eq!(dispatch_button("7"), Ok(InputEvent::Digit(7)));
        assert_eq!(dispatch_button("."), Ok(InputEvent::Decimal));
        assert_eq!(dispatch_button("="), Ok(InputEvent::Evaluate));
        assert_eq!(dispatch_button("C"), Ok(InputEvent::Clear));
        assert_eq!(dispatch_button("c"), Ok(InputEvent::Clear));
        assert_eq!(dispatch_button("DEL"), Ok(InputEvent::Backspace));
        assert_eq!(dispatch_button("del"), Ok(InputEvent::Backspace));
        assert_eq!(
            dispatch_button("12"),
            Err(InputError::UnknownButton("12".to_string()))
        );
        assert_eq!(
            dispatch_button("^"),
            Err(InputError::UnknownButton("^".to_string()))
        );
    }
}
