// Outward message sanitisation
use crate::types::StatusClass;

/// The only message an internal failure ever carries outward
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Message safe to return to a caller for the given status class.
///
/// Internal failures lose their detail entirely; every other class keeps the
/// user-actionable message it was raised with.
pub fn sanitize_message(status: StatusClass, message: &str) -> String {
    match status {
        StatusClass::Internal => INTERNAL_SERVER_ERROR.to_string(),
        _ => message.to_string(),
    }
}
