//! Tracing setup for the identity service with PII redaction helpers
//!
//! Identity logs routinely mention the account being worked on. Raw email
//! addresses, bearer tokens and password digests must never reach a log sink,
//! so every value of that kind is passed through [`PiiRedactor`] before it is
//! recorded as a field.
//!
//! # Redacted data types
//!
//! - **Email addresses**: `john.doe@example.com` → `EMAIL[q1w2e3r4t5y=]` (correlation hash)
//!   or `j***@e***` when hashing is disabled
//! - **Bearer tokens** (JWT compact form): `eyJ...` → `TOKEN[REDACTED]`
//! - **Password digests** (argon2 PHC strings, bcrypt): → `DIGEST[REDACTED]`
//!
//! # Example
//!
//! ```rust,no_run
//! use logger_redacted::{init, redact_email, LoggerConfig};
//!
//! init(&LoggerConfig::default()).ok();
//! tracing::info!(email = %redact_email("john.doe@example.com"), "User registered");
//! ```

pub mod config;
pub mod redactor;

pub use config::*;
pub use redactor::*;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    #[error("Failed to install tracing subscriber: {0}")]
    InitFailed(String),
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `config.log_level` when set. Calling this twice
/// returns [`LoggerError::InitFailed`] instead of panicking.
pub fn init(config: &LoggerConfig) -> Result<(), LoggerError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .map_err(|e| LoggerError::InvalidFilter(e.to_string()))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| LoggerError::InitFailed(e.to_string()))
}
