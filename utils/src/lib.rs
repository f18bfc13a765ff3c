//! Shared utilities for the Chain connectors.

pub mod logging;
pub mod redact;

pub use logging::{init_logging, LogFormat, LoggingError};
pub use redact::redact_token;
