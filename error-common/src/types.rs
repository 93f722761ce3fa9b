use serde::{Deserialize, Serialize};
use std::fmt;

/// Status class of an operation outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusClass {
    Ok,
    Unauthorized,
    NotFound,
    Conflict,
    InvalidInput,
    Internal,
}

impl StatusClass {
    /// Conventional HTTP status code for transports that need one
    pub fn http_status(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::InvalidInput => 400,
            Self::Unauthorized => 401,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Internal => 500,
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, Self::Ok)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Unauthorized => "unauthorized",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::InvalidInput => "invalid_input",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log an internal failure with its full source chain.
///
/// The chain stays server-side; callers pair this with
/// [`sanitize_message`](crate::sanitize_message) for the outward payload.
pub fn log_error(context: &str, error: &(dyn std::error::Error + 'static)) {
    let mut chain = Vec::new();
    let mut source = error.source();
    while let Some(cause) = source {
        chain.push(cause.to_string());
        source = cause.source();
    }

    tracing::error!(
        context = context,
        error = %error,
        causes = ?chain,
        "Internal failure at operation boundary"
    );
}
