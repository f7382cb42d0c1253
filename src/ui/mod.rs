pub mod terminal;

pub use terminal::run as run_interactive;
