//! Password hashing primitives
//!
//! Digests are opaque strings produced here and nowhere else. A digest that
//! fails to parse is an internal failure; a wrong password is `Ok(false)`.

use crate::config::{IdentityConfig, PasswordAlgorithm};
use crate::error::{IdentityError, Result};
use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier as _};
use std::sync::Arc;

pub trait CredentialHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String>;
    fn verify(&self, password: &str, digest: &str) -> Result<bool>;
}

pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| IdentityError::HashingError(e.to_string()))?
            .to_string();
        Ok(password_hash)
    }

    fn verify(&self, password: &str, digest: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(digest)
            .map_err(|e| IdentityError::HashingError(e.to_string()))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(IdentityError::HashingError(e.to_string())),
        }
    }
}

pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl CredentialHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> Result<String> {
        bcrypt::hash(password, self.cost).map_err(|e| IdentityError::HashingError(e.to_string()))
    }

    fn verify(&self, password: &str, digest: &str) -> Result<bool> {
        bcrypt::verify(password, digest).map_err(|e| IdentityError::HashingError(e.to_string()))
    }
}

/// Algorithm that produced `digest`, read from its prefix
pub fn digest_algorithm(digest: &str) -> Option<PasswordAlgorithm> {
    if digest.starts_with("$argon2") {
        Some(PasswordAlgorithm::Argon2)
    } else if digest.starts_with("$2") {
        Some(PasswordAlgorithm::Bcrypt)
    } else {
        None
    }
}

/// Hashes with one algorithm, verifies digests written by either.
///
/// Stored digests outlive configuration changes, so verification follows the
/// digest prefix and only falls back to the configured algorithm when the
/// prefix is unknown.
pub struct ConfiguredHasher {
    algorithm: PasswordAlgorithm,
    argon2: Argon2PasswordHasher,
    bcrypt: BcryptPasswordHasher,
}

impl ConfiguredHasher {
    pub fn new(algorithm: PasswordAlgorithm, bcrypt_cost: u32) -> Self {
        Self {
            algorithm,
            argon2: Argon2PasswordHasher::new(),
            bcrypt: BcryptPasswordHasher::new(bcrypt_cost),
        }
    }

    fn select(&self, algorithm: PasswordAlgorithm) -> &dyn CredentialHasher {
        match algorithm {
            PasswordAlgorithm::Argon2 => &self.argon2,
            PasswordAlgorithm::Bcrypt => &self.bcrypt,
        }
    }
}

impl CredentialHasher for ConfiguredHasher {
    fn hash(&self, password: &str) -> Result<String> {
        self.select(self.algorithm).hash(password)
    }

    fn verify(&self, password: &str, digest: &str) -> Result<bool> {
        let algorithm = digest_algorithm(digest).unwrap_or(self.algorithm);
        self.select(algorithm).verify(password, digest)
    }
}

/// Hasher writing `password_algorithm` digests
pub fn hasher_from_config(config: &IdentityConfig) -> Arc<dyn CredentialHasher> {
    Arc::new(ConfiguredHasher::new(config.password_algorithm, config.bcrypt_cost))
}
