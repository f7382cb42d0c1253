//! zcalc - a keyboard-driven calculator for the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Interactive calculator
//! zcalc
//!
//! # Press keypad buttons and print the display
//! zcalc press 1 2 % 5 =
//!
//! # Evaluate an expression typed on the keypad
//! zcalc eval "0.1+0.2"
//!
//! # Verbose logging
//! RUST_LOG=debug zcalc eval "5/0"
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use zcalc::calculator::{Controller, TextDisplay, copy_result, is_calculator_input};
use zcalc::config::{self, Config};
use zcalc::input::{InputEvent, dispatch_button};
use zcalc::ui;

#[derive(Parser, Debug)]
#[command(name = "zcalc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, env = "ZCALC_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the interactive calculator (default)
    Interactive,
    /// Press keypad buttons in order and print the display
    ///
    /// Buttons: 0-9, + - * / %, ., =, C (clear), DEL (backspace)
    Press {
        #[arg(required = true, allow_hyphen_values = true)]
        buttons: Vec<String>,
    },
    /// Type an expression on the keypad, evaluate it and print the display
    Eval {
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = config::load_config(cli.config.as_deref()).context("loading configuration")?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    init_tracing(&config)?;
    debug!(?config, "Configuration loaded");

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Interactive => ui::run_interactive(&config),
        Command::Press { buttons } => {
            let events = buttons
                .iter()
                .map(|b| dispatch_button(b))
                .collect::<Result<Vec<_>, _>>()?;
            print_display(&config, run_events(events));
            Ok(())
        }
        Command::Eval { expression } => {
            if !is_calculator_input(&expression) {
                anyhow::bail!(
                    "'{}' cannot be typed on the keypad (digits, '.', + - * / % only)",
                    expression
                );
            }
            let mut events = expression
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| dispatch_button(c.encode_utf8(&mut [0; 4])))
                .collect::<Result<Vec<_>, _>>()?;
            events.push(InputEvent::Evaluate);
            print_display(&config, run_events(events));
            Ok(())
        }
    }
}

/// Feed events through a fresh controller and return the final text.
fn run_events(events: impl IntoIterator<Item = InputEvent>) -> String {
    let mut controller = Controller::new(TextDisplay::new());
    for event in events {
        controller.apply(event);
    }
    controller.text().unwrap_or_default()
}

fn print_display(config: &Config, text: String) {
    println!("{}", text);
    if config.copy_result_to_clipboard {
        copy_result(&text);
    }
}

fn init_tracing(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("invalid log level")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false);

    match &config.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder.with_writer(std::sync::Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }

    Ok(())
}
