//! Interactive terminal calculator.
//!
//! Puts the terminal in raw mode, reads key events with crossterm and
//! feeds them through keyboard dispatch. The display is redrawn after
//! every event.

use std::io::{self, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use tracing::{debug, info};

use crate::calculator::{
    Controller, DisplaySurface, ERROR_TEXT, TextDisplay, copy_result, is_sentinel,
};
use crate::config::Config;
use crate::input::{InputEvent, Key, KeyPress, Modifiers, dispatch_key};

const KEY_HELP: &str = "0-9 . + - * /   Enter/= evaluate   Backspace delete   Esc clear   y copy   q quit";

/// Keys handled by the frontend itself, before keyboard dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FrontendAction {
    Quit,
    Copy,
}

/// Restores the terminal when dropped, including on early return.
struct RawModeGuard;

impl RawModeGuard {
    fn enter(out: &mut impl Write) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(e) = execute!(out, EnterAlternateScreen, cursor::Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Run the interactive calculator until the user quits.
pub fn run(config: &Config) -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    let _guard = RawModeGuard::enter(&mut stdout)?;
    info!("Interactive calculator started");

    let mut controller = Controller::new(TextDisplay::new());
    let mut status: Option<String> = None;
    render(&mut stdout, &controller, status.as_deref(), config.show_key_help)?;

    loop {
        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            Event::Resize(..) => {
                render(&mut stdout, &controller, status.as_deref(), config.show_key_help)?;
                continue;
            }
            _ => continue,
        };

        status = None;
        match frontend_action(&key) {
            Some(FrontendAction::Quit) => break,
            Some(FrontendAction::Copy) => {
                status = Some(copy_status(&controller));
            }
            None => {
                let press = translate_key(&key);
                if let Some(input) = dispatch_key(press) {
                    controller.apply(input);
                    if input == InputEvent::Evaluate && config.copy_result_to_clipboard {
                        status = Some(copy_status(&controller));
                    }
                } else {
                    debug!(?press, "Key not mapped to calculator input");
                }
            }
        }

        render(&mut stdout, &controller, status.as_deref(), config.show_key_help)?;
    }

    info!("Interactive calculator stopped");
    Ok(())
}

fn copy_status(controller: &Controller<TextDisplay>) -> String {
    let text = controller.text().unwrap_or_default();
    if copy_result(&text) {
        format!("Copied {}", text)
    } else {
        "Nothing copied".to_string()
    }
}

fn frontend_action(key: &KeyEvent) -> Option<FrontendAction> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(FrontendAction::Quit)
        }
        _ if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => None,
        KeyCode::Char('q') => Some(FrontendAction::Quit),
        KeyCode::Char('y') => Some(FrontendAction::Copy),
        _ => None,
    }
}

/// Translate a crossterm key event into the calculator's key type.
fn translate_key(key: &KeyEvent) -> KeyPress {
    let modifiers = Modifiers {
        alt: key.modifiers.contains(KeyModifiers::ALT),
        ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
        meta: key
            .modifiers
            .intersects(KeyModifiers::META | KeyModifiers::SUPER),
        shift: key.modifiers.contains(KeyModifiers::SHIFT),
    };

    let key = match key.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Esc => Key::Escape,
        _ => Key::Other,
    };

    KeyPress::new(key, modifiers)
}

fn render(
    out: &mut impl Write,
    controller: &Controller<TextDisplay>,
    status: Option<&str>,
    show_help: bool,
) -> io::Result<()> {
    let text = controller
        .display()
        .map(|d| d.text())
        .unwrap_or_default();

    let color = if text == ERROR_TEXT {
        // orange/red-ish, like a failed calculation
        Color::Rgb { r: 230, g: 120, b: 80 }
    } else if is_sentinel(&text) {
        Color::DarkGrey
    } else {
        Color::White
    };

    queue!(
        out,
        terminal::Clear(ClearType::All),
        cursor::MoveTo(2, 1),
        SetForegroundColor(Color::DarkGrey),
        Print("zcalc"),
        cursor::MoveTo(2, 3),
        SetForegroundColor(color),
        SetAttribute(Attribute::Bold),
        Print(&text),
        SetAttribute(Attribute::Reset),
        ResetColor,
    )?;

    if let Some(status) = status {
        queue!(
            out,
            cursor::MoveTo(2, 5),
            SetForegroundColor(Color::DarkCyan),
            Print(status),
            ResetColor,
        )?;
    }

    if show_help {
        queue!(
            out,
            cursor::MoveTo(2, 7),
            SetForegroundColor(Color::DarkGrey),
            Print(KEY_HELP),
            ResetColor,
        )?;
    }

    out.flush()
}
