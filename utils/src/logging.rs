//! Structured logging initialisation via `tracing`.
//!
//! Two output formats are supported:
//! - [`LogFormat::Human`]: human-readable lines for interactive runs.
//! - [`LogFormat::Json`]: newline-delimited JSON for workflow hosts that
//!   collect connector logs.
//!
//! A valid `RUST_LOG` overrides the caller-supplied level.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt as tracing_fmt, layer::SubscriberExt, EnvFilter};

/// Selects the output format for structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

#[derive(Debug, Error)]
#[error("unknown log format {0:?} (expected \"human\" or \"json\")")]
pub struct UnknownLogFormat(String);

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" | "text" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(UnknownLogFormat(s.to_string())),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Human => "human",
            Self::Json => "json",
        })
    }
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log level {level:?}: {source}")]
    InvalidLevel {
        level: String,
        #[source]
        source: ParseError,
    },

    #[error("logging already initialised: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

fn level_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(level).map_err(|source| LoggingError::InvalidLevel {
        level: level.to_string(),
        source,
    })
}

/// The filter for `level`, unless `RUST_LOG` is set and valid.
fn env_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => level_filter(level),
    }
}

/// Install the global tracing subscriber.
///
/// Logs go to stderr so that stdout stays reserved for connector output.
/// Fails on an unparsable level or when a subscriber is already installed.
pub fn init_logging(format: LogFormat, level: &str) -> Result<(), LoggingError> {
    let filter = env_filter(level)?;
    let (json, human) = match format {
        LogFormat::Json => (
            Some(
                tracing_fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            ),
            None,
        ),
        LogFormat::Human => (
            None,
            Some(
                tracing_fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            ),
        ),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(human)
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_formats() {
        assert_eq!("human".parse::<LogFormat>().unwrap(), LogFormat::Human);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for format in [LogFormat::Human, LogFormat::Json] {
            assert_eq!(format.to_string().parse::<LogFormat>().unwrap(), format);
        }
    }

    #[test]
    fn level_directives_are_checked() {
        assert!(level_filter("debug").is_ok());
        assert!(level_filter("info,chain_client=trace").is_ok());
        let err = level_filter("connector=loud").unwrap_err();
        assert!(err.to_string().starts_with("invalid log level \"connector=loud\""));
    }

    #[test]
    fn second_init_fails_instead_of_panicking() {
        let _ = init_logging(LogFormat::Human, "warn");
        assert!(matches!(
            init_logging(LogFormat::Json, "warn"),
            Err(LoggingError::AlreadyInitialized(_))
        ));
    }
}
