//! Stateless bearer tokens
//!
//! A verified token yields a [`Subject`] and nothing else. No server-side
//! session state exists, so a token stays valid until it expires.

use crate::config::IdentityConfig;
use crate::error::TokenError;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Proof of identity for one user record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subject(Uuid);

impl Subject {
    pub fn new(user_id: Uuid) -> Self {
        Self(user_id)
    }

    pub fn user_id(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,

    /// JWT ID (unique token identifier)
    pub jti: String,

    /// Issued at timestamp (seconds since epoch)
    pub iat: i64,

    /// Expiration timestamp (seconds since epoch)
    pub exp: i64,

    pub iss: String,
}

impl TokenClaims {
    /// Claims expiring `ttl` from now. Fails when the expiry is not a representable instant.
    pub fn new(subject: &Subject, issuer: &str, ttl: Duration) -> Result<Self, TokenError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Issue("token expiry out of range".to_string()))?;

        Ok(Self {
            sub: subject.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: issuer.to_string(),
        })
    }
}

pub trait TokenProvider: Send + Sync {
    fn issue(&self, subject: &Subject) -> Result<String, TokenError>;
    fn verify(&self, token: &str) -> Result<Subject, TokenError>;
}

/// HS256 JWT implementation of [`TokenProvider`]
pub struct JwtTokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    ttl_hours: i64,
}

impl JwtTokenProvider {
    pub fn new(config: &IdentityConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.jwt_issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            issuer: config.jwt_issuer.clone(),
            ttl_hours: config.jwt_expiration_hours,
        }
    }
}

impl TokenProvider for JwtTokenProvider {
    fn issue(&self, subject: &Subject) -> Result<String, TokenError> {
        let ttl = Duration::try_hours(self.ttl_hours)
            .ok_or_else(|| TokenError::Issue("token lifetime out of range".to_string()))?;
        let claims = TokenClaims::new(subject, &self.issuer, ttl)?;
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Issue(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<Subject, TokenError> {
        let token = token.trim();
        let token = token.strip_prefix("Bearer ").unwrap_or(token);
        if token.is_empty() {
            return Err(TokenError::Missing);
        }

        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })?;

        let user_id = Uuid::parse_str(&data.claims.sub)
            .map_err(|_| TokenError::Invalid("subject is not a user id".to_string()))?;
        Ok(Subject::new(user_id))
    }
}
