//! Common error handling utilities shared by the identity crates
//!
//! Every operation in the identity service ends in exactly one status class.
//! This crate owns that taxonomy, the stable error codes attached to failed
//! outcomes, and the rule that decides what message may leave the process.
//!
//! # Status classes
//!
//! - **Ok**: the operation completed
//! - **Unauthorized**: missing or invalid proof of identity
//! - **NotFound**: no record matched the request
//! - **Conflict**: a uniqueness rule would be violated
//! - **InvalidInput**: request fields are malformed or inconsistent
//! - **Internal**: a store or primitive failed unexpectedly
//!
//! # Example
//!
//! ```rust
//! use error_common::{sanitize_message, StatusClass, INTERNAL_SERVER_ERROR};
//!
//! let outward = sanitize_message(StatusClass::Internal, "connection refused: 10.0.0.4:5432");
//! assert_eq!(outward, INTERNAL_SERVER_ERROR);
//! assert_eq!(StatusClass::Conflict.http_status(), 409);
//! ```

pub mod codes;
pub mod sanitization;
pub mod types;

pub use sanitization::*;
pub use types::*;
