//! Configuration loading.
//!
//! Values come from, in increasing priority: built-in defaults, the TOML
//! file at `$XDG_CONFIG_HOME/zcalc/config.toml` (or `--config`), and the
//! `ZCALC_*` environment variables. CLI flags are applied by the caller.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Environment variable overriding `log_level`.
pub const ENV_LOG_LEVEL: &str = "ZCALC_LOG_LEVEL";
/// Environment variable overriding `copy_result_to_clipboard`.
pub const ENV_COPY_RESULT: &str = "ZCALC_COPY_RESULT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value '{value}' for {name} (expected true/false, yes/no, on/off or 1/0)")]
    InvalidEnv { name: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Default tracing filter when `RUST_LOG` and `--log-level` are unset.
    pub log_level: String,
    /// Write logs here instead of stderr.
    pub log_file: Option<PathBuf>,
    /// Copy every successful result to the system clipboard.
    pub copy_result_to_clipboard: bool,
    /// Show the key legend below the display in interactive mode.
    pub show_key_help: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_file: None,
            copy_result_to_clipboard: false,
            show_key_help: true,
        }
    }
}

/// Default config location, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("zcalc").join("config.toml"))
}

/// Load configuration from `path`, or from the default location.
///
/// A missing file is not an error; defaults are used. An explicitly given
/// path must exist.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => match default_config_path() {
            Some(default) if default.exists() => read_config_file(&default)?,
            _ => Config::default(),
        },
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(path, &contents)
}

fn parse_config(path: &Path, contents: &str) -> Result<Config, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn apply_env_overrides(
    config: &mut Config,
    var: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    if let Some(level) = var(ENV_LOG_LEVEL).filter(|l| !l.trim().is_empty()) {
        config.log_level = level;
    }

    if let Some(raw) = var(ENV_COPY_RESULT) {
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => config.copy_result_to_clipboard = true,
            "0" | "false" | "no" | "off" => config.copy_result_to_clipboard = false,
            _ => {
                return Err(ConfigError::InvalidEnv {
                    name: ENV_COPY_RESULT,
                    value: raw,
                });
            }
        }
    }

    Ok(())
}
