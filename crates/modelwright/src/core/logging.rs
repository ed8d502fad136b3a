//! Logging setup for binaries embedding the translator
//!
//! The library itself only emits `tracing` spans and events. Call
//! [`init_logging`] once from a binary to send them to stderr, keeping stdout
//! free for generated source.
//!
//! ```rust
//! use modelwright::core::logging::init_logging;
//!
//! let _ = init_logging(Some("modelwright=debug"), Some("pretty"));
//! ```
//!
//! The level is an `EnvFilter` directive taken from, in order: the explicit
//! argument, `MODELWRIGHT_LOG_LEVEL`, `RUST_LOG`, then `info`. The format
//! (`compact`, `pretty` or `json`) comes from the argument, then
//! `MODELWRIGHT_LOG_FORMAT`, then `compact`.

use std::error::Error;
use std::str::FromStr;

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Environment variable holding the level directive
pub const LEVEL_VAR: &str = "MODELWRIGHT_LOG_LEVEL";
/// Environment variable holding the output format
pub const FORMAT_VAR: &str = "MODELWRIGHT_LOG_FORMAT";
/// Level used when neither an argument nor the environment names one
pub const DEFAULT_LEVEL: &str = "info";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One line per event, no targets
    #[default]
    Compact,
    /// Multi-line with source locations
    Pretty,
    /// One JSON object per event, span enter/exit included
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl LogFormat {
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

/// Level directive from the environment, `MODELWRIGHT_LOG_LEVEL` first
pub fn env_level() -> Option<String> {
    std::env::var(LEVEL_VAR)
        .ok()
        .or_else(|| std::env::var("RUST_LOG").ok())
}

fn choose_level(level: Option<&str>, from_env: Option<String>) -> String {
    level
        .map(str::to_string)
        .or(from_env)
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
}

fn level_filter(directive: &str) -> Result<EnvFilter, Box<dyn Error>> {
    EnvFilter::try_new(directive)
        .map_err(|e| format!("Invalid log level '{}': {}", directive, e).into())
}

/// Install a global stderr subscriber
///
/// Fails on an unknown format, an unparsable level directive, or when a
/// global subscriber is already installed.
pub fn init_logging(level: Option<&str>, format: Option<&str>) -> Result<(), Box<dyn Error>> {
    let directive = choose_level(level, env_level());
    let filter = level_filter(&directive)?;

    let format = match format
        .map(str::to_string)
        .or_else(|| std::env::var(FORMAT_VAR).ok())
    {
        Some(name) => {
            LogFormat::from_str(&name).map_err(|e| format!("Invalid log format: {}", e))?
        }
        None => LogFormat::default(),
    };

    let layer = match format {
        LogFormat::Compact => fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .with_writer(std::io::stderr)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .boxed(),
        LogFormat::Json => fmt::layer()
            .with_writer(std::io::stderr)
            .with_span_events(FmtSpan::ACTIVE)
            .json()
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()?;
    Ok(())
}
