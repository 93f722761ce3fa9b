use crate::error::{IdentityError, Result};
use error_common::{log_error, sanitize_message, StatusClass};
use serde::Serialize;

/// Result of one identity operation as seen by a transport.
///
/// Failures carry a status class, a stable code and a message that is safe
/// to show; internal detail only ever reaches the server log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome<T> {
    Success {
        status: StatusClass,
        payload: T,
    },
    Failure {
        status: StatusClass,
        code: &'static str,
        message: String,
    },
}

impl<T> Outcome<T> {
    pub fn success(payload: T) -> Self {
        Self::Success {
            status: StatusClass::Ok,
            payload,
        }
    }

    pub fn from_result(operation: &str, result: Result<T>) -> Self {
        match result {
            Ok(payload) => Self::success(payload),
            Err(error) => Self::from_error(operation, &error),
        }
    }

    pub fn from_error(operation: &str, error: &IdentityError) -> Self {
        let status = error.status();
        if status == StatusClass::Internal {
            log_error(operation, error);
        }

        Self::Failure {
            status,
            code: error.code(),
            message: sanitize_message(status, &error.to_string()),
        }
    }

    pub fn status(&self) -> StatusClass {
        match self {
            Self::Success { status, .. } | Self::Failure { status, .. } => *status,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            Self::Success { payload, .. } => Some(payload),
            Self::Failure { .. } => None,
        }
    }

    pub fn into_payload(self) -> Option<T> {
        match self {
            Self::Success { payload, .. } => Some(payload),
            Self::Failure { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { message, .. } => Some(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::models::MessagePayload;
    use error_common::{codes, INTERNAL_SERVER_ERROR};

    #[test]
    fn test_internal_failure_is_sanitized() {
        let error = IdentityError::from(StoreError::StorageError(
            "connection to 10.0.0.4:5432 refused".to_string(),
        ));
        let outcome: Outcome<MessagePayload> = Outcome::from_error("register", &error);

        assert_eq!(outcome.status(), StatusClass::Internal);
        assert_eq!(outcome.message(), Some(INTERNAL_SERVER_ERROR));
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(!json.contains("10.0.0.4"));
    }

    #[test]
    fn test_actionable_failure_keeps_message() {
        let outcome: Outcome<MessagePayload> =
            Outcome::from_error("register", &IdentityError::EmailAlreadyInUse);

        assert_eq!(
            outcome,
            Outcome::Failure {
                status: StatusClass::Conflict,
                code: codes::conflict::EMAIL_ALREADY_REGISTERED,
                message: "Email already registered".to_string(),
            }
        );
    }

    #[test]
    fn test_success_serialization_shape() {
        let outcome = Outcome::success(MessagePayload::new("done"));
        let value = serde_json::to_value(&outcome).unwrap();

        assert_eq!(value["outcome"], "success");
        assert_eq!(value["status"], "ok");
        assert_eq!(value["payload"]["message"], "done");
        assert!(outcome.is_success());
        assert_eq!(outcome.into_payload(), Some(MessagePayload::new("done")));
    }
}
