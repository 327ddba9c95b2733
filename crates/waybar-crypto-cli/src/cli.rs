//! CLI argument definitions for waybar-crypto.
//!
//! # Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `-c`, `--config-path` | `$XDG_CONFIG_HOME/waybar-crypto/config.toml` | Configuration file |
//! | `--log-level` | `$WAYBAR_CRYPTO_LOG` or `warn` | Diagnostic verbosity (stderr) |
//! | `--log-format` | `text` | Diagnostic format (text, json) |
//! | `--pretty` | `false` | Pretty-print the JSON written to stdout |
//!
//! # Examples
//!
//! ```bash
//! # Waybar custom module exec line
//! waybar-crypto
//!
//! # Explicit config and verbose diagnostics
//! waybar-crypto -c ~/dotfiles/crypto.toml --log-level debug
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

const XDG_CONFIG_HOME_ENV: &str = "XDG_CONFIG_HOME";
const DEFAULT_XDG_CONFIG_HOME: &str = "~/.config";
const CONFIG_DIR: &str = "waybar-crypto";
const CONFIG_FILE: &str = "config.toml";

/// Cryptocurrency prices for Waybar, from CoinMarketCap.
///
/// Prints one JSON object with `text`, `tooltip` and `class` keys, suitable for
/// a Waybar custom module with `"return-type": "json"`.
#[derive(Debug, Parser)]
#[command(name = "waybar-crypto", author, version, about)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(short = 'c', long, default_value_t = default_config_path())]
    pub config_path: String,

    /// Diagnostic log level, written to stderr.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Diagnostic log format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per event.
    Json,
}

/// Default config location, honouring `XDG_CONFIG_HOME` when set and non-empty.
pub fn default_config_path() -> String {
    config_path_under(std::env::var(XDG_CONFIG_HOME_ENV).ok())
}

fn config_path_under(xdg_config_home: Option<String>) -> String {
    let base = xdg_config_home
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| String::from(DEFAULT_XDG_CONFIG_HOME));

    Path::new(&base)
        .join(CONFIG_DIR)
        .join(CONFIG_FILE)
        .to_string_lossy()
        .into_owned()
}

/// Expand a leading `~` using `home`; other paths are returned unchanged.
pub fn expand_tilde(path: &str, home: Option<OsString>) -> PathBuf {
    let Some(home) = home else {
        return PathBuf::from(path);
    };

    if path == "~" {
        return PathBuf::from(home);
    }

    match path.strip_prefix("~/") {
        Some(rest) => PathBuf::from(home).join(rest),
        None => PathBuf::from(path),
    }
}
