//! Identity management and user authentication
//!
//! This crate implements the credential and session-assertion core of the
//! identity service:
//! - User registration with a unique email
//! - Password login against a stored one-way digest
//! - Profile updates and password changes proven by a bearer token
//! - A single outcome taxonomy for every failure
//!
//! The record store, the hashing primitive and the token primitive are all
//! injected, so tests run against [`repository::InMemoryUserRepository`] and
//! production against [`repository::PgUserRepository`].
//!
//! # Example
//!
//! ```rust,no_run
//! use auth_identity::{IdentityConfig, IdentityHandlers, IdentityService, LoginRequest};
//! use auth_identity::repository::InMemoryUserRepository;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = IdentityConfig::from_env()?;
//!     let store = Arc::new(InMemoryUserRepository::new());
//!     let service = Arc::new(IdentityService::from_config(store, config)?);
//!     let handlers = IdentityHandlers::new(service);
//!
//!     let outcome = handlers
//!         .login(LoginRequest {
//!             email: "user@example.com".to_string(),
//!             password: "password123".to_string(),
//!         })
//!         .await;
//!     println!("{}", outcome.status());
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod outcome;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

pub use config::*;
pub use error::*;
pub use handlers::*;
pub use models::*;
pub use outcome::*;
pub use service::*;
pub use token::{Subject, TokenProvider};
