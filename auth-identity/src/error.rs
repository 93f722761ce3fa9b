use error_common::{codes, StatusClass};
use thiserror::Error;

/// Failures raised by a [`UserRepository`](crate::repository::UserRepository)
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store refused a write because another record holds the email
    #[error("Email already present in store")]
    DuplicateEmail,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    StorageError(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token missing")]
    Missing,

    #[error("Token expired")]
    Expired,

    #[error("Token invalid: {0}")]
    Invalid(String),

    #[error("Token could not be issued: {0}")]
    Issue(String),
}

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Email already registered")]
    EmailAlreadyInUse,

    #[error("Authentication failed. No user found")]
    UserNotFound,

    #[error("Authentication failed. Wrong password")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken(#[source] TokenError),

    /// Token verified but its subject no longer exists
    #[error("Identity is no longer valid")]
    SubjectNotFound,

    #[error("Password and confirm password do not match")]
    PasswordConfirmationMismatch,

    #[error("Store error: {0}")]
    StoreError(#[source] StoreError),

    #[error("Hashing error: {0}")]
    HashingError(String),

    #[error("Token error: {0}")]
    TokenIssueError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl From<StoreError> for IdentityError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::DuplicateEmail => Self::EmailAlreadyInUse,
            other => Self::StoreError(other),
        }
    }
}

impl From<TokenError> for IdentityError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Issue(reason) => Self::TokenIssueError(reason),
            other => Self::InvalidToken(other),
        }
    }
}

impl IdentityError {
    /// The single status class this failure maps to
    pub fn status(&self) -> StatusClass {
        match self {
            Self::EmailAlreadyInUse => StatusClass::Conflict,
            Self::UserNotFound => StatusClass::NotFound,
            Self::InvalidCredentials | Self::InvalidToken(_) | Self::SubjectNotFound => {
                StatusClass::Unauthorized
            }
            Self::PasswordConfirmationMismatch => StatusClass::InvalidInput,
            Self::StoreError(_)
            | Self::HashingError(_)
            | Self::TokenIssueError(_)
            | Self::ConfigError(_)
            | Self::InternalError(_) => StatusClass::Internal,
        }
    }

    /// Stable code reported alongside the outward message
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmailAlreadyInUse => codes::conflict::EMAIL_ALREADY_REGISTERED,
            Self::UserNotFound => codes::lookup::USER_NOT_FOUND,
            Self::InvalidCredentials => codes::authentication::INVALID_CREDENTIALS,
            Self::InvalidToken(_) => codes::authentication::TOKEN_INVALID,
            Self::SubjectNotFound => codes::authentication::IDENTITY_NO_LONGER_VALID,
            Self::PasswordConfirmationMismatch => codes::validation::PASSWORD_CONFIRMATION_MISMATCH,
            Self::StoreError(_) => codes::internal::STORE_FAILURE,
            Self::HashingError(_)
            | Self::TokenIssueError(_)
            | Self::ConfigError(_)
            | Self::InternalError(_) => codes::internal::PRIMITIVE_FAILURE,
        }
    }
}

pub type Result<T> = std::result::Result<T, IdentityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_duplicate_becomes_conflict() {
        let error = IdentityError::from(StoreError::DuplicateEmail);
        assert!(matches!(error, IdentityError::EmailAlreadyInUse));
        assert_eq!(error.status(), StatusClass::Conflict);
    }

    #[test]
    fn test_other_store_failures_are_internal() {
        let error = IdentityError::from(StoreError::StorageError("disk full".to_string()));
        assert_eq!(error.status(), StatusClass::Internal);
        assert_eq!(error.code(), codes::internal::STORE_FAILURE);
    }

    #[test]
    fn test_token_failures_split_by_direction() {
        assert_eq!(IdentityError::from(TokenError::Expired).status(), StatusClass::Unauthorized);
        assert_eq!(IdentityError::from(TokenError::Missing).status(), StatusClass::Unauthorized);
        assert_eq!(
            IdentityError::from(TokenError::Issue("bad key".to_string())).status(),
            StatusClass::Internal
        );
    }

    #[test]
    fn test_taxonomy_is_canonical() {
        assert_eq!(IdentityError::UserNotFound.status(), StatusClass::NotFound);
        assert_eq!(IdentityError::InvalidCredentials.status(), StatusClass::Unauthorized);
        assert_eq!(IdentityError::SubjectNotFound.status(), StatusClass::Unauthorized);
        assert_eq!(IdentityError::PasswordConfirmationMismatch.status(), StatusClass::InvalidInput);
    }
}
