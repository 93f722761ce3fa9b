use crate::error::{IdentityError, Result};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::str::FromStr;

/// Upper bound on token lifetime (ten years)
pub const MAX_JWT_EXPIRATION_HOURS: i64 = 24 * 365 * 10;

/// Password hashing algorithm used for new digests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordAlgorithm {
    Argon2,
    Bcrypt,
}

impl FromStr for PasswordAlgorithm {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "argon2" | "argon2id" => Ok(Self::Argon2),
            "bcrypt" => Ok(Self::Bcrypt),
            other => Err(IdentityError::ConfigError(format!(
                "unknown password algorithm '{other}'"
            ))),
        }
    }
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub jwt_issuer: String,
    pub password_algorithm: PasswordAlgorithm,
    pub bcrypt_cost: u32,
    /// Trim and lower-case emails before every lookup and write
    pub normalize_email: bool,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "your-secret-key".to_string(),
            jwt_expiration_hours: 24,
            jwt_issuer: "auth-identity".to_string(),
            password_algorithm: PasswordAlgorithm::Argon2,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            normalize_email: false,
        }
    }
}

impl fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("jwt_issuer", &self.jwt_issuer)
            .field("password_algorithm", &self.password_algorithm)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("normalize_email", &self.normalize_email)
            .finish()
    }
}

impl IdentityConfig {
    /// Load from `IDENTITY_*` environment variables, reading `.env` first.
    ///
    /// `IDENTITY_JWT_SECRET` is required; everything else falls back to
    /// [`IdentityConfig::default`].
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let jwt_secret = env::var("IDENTITY_JWT_SECRET")
            .map_err(|_| IdentityError::ConfigError("IDENTITY_JWT_SECRET must be set".to_string()))?;

        let config = Self {
            jwt_secret,
            jwt_expiration_hours: env_or("IDENTITY_JWT_EXPIRATION_HOURS", defaults.jwt_expiration_hours)?,
            jwt_issuer: env::var("IDENTITY_JWT_ISSUER").unwrap_or(defaults.jwt_issuer),
            password_algorithm: env_or("IDENTITY_PASSWORD_ALGORITHM", defaults.password_algorithm)?,
            bcrypt_cost: env_or("IDENTITY_BCRYPT_COST", defaults.bcrypt_cost)?,
            normalize_email: env_or("IDENTITY_NORMALIZE_EMAIL", defaults.normalize_email)?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.trim().is_empty() {
            return Err(IdentityError::ConfigError("jwt_secret must not be empty".to_string()));
        }
        if self.jwt_expiration_hours <= 0 {
            return Err(IdentityError::ConfigError(
                "jwt_expiration_hours must be positive".to_string(),
            ));
        }
        if self.jwt_expiration_hours > MAX_JWT_EXPIRATION_HOURS {
            return Err(IdentityError::ConfigError(format!(
                "jwt_expiration_hours must not exceed {MAX_JWT_EXPIRATION_HOURS}"
            )));
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(IdentityError::ConfigError("bcrypt_cost must be within 4..=31".to_string()));
        }
        Ok(())
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| IdentityError::ConfigError(format!("{key}: {e}"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(IdentityConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_secret_rejected() {
        let config = IdentityConfig {
            jwt_secret: "  ".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(IdentityError::ConfigError(_))));
    }

    #[test]
    fn test_non_positive_expiration_rejected() {
        let config = IdentityConfig {
            jwt_expiration_hours: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_expiration_rejected() {
        let config = IdentityConfig {
            jwt_expiration_hours: 10_000_000_000,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(IdentityError::ConfigError(_))));

        let at_limit = IdentityConfig {
            jwt_expiration_hours: MAX_JWT_EXPIRATION_HOURS,
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn test_algorithm_parsing() {
        assert_eq!("argon2".parse::<PasswordAlgorithm>().unwrap(), PasswordAlgorithm::Argon2);
        assert_eq!("BCRYPT".parse::<PasswordAlgorithm>().unwrap(), PasswordAlgorithm::Bcrypt);
        assert!("md5".parse::<PasswordAlgorithm>().is_err());
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = IdentityConfig {
            jwt_secret: "super-secret".to_string(),
            ..Default::default()
        };
        assert!(!format!("{config:?}").contains("super-secret"));
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: IdentityConfig =
            serde_json::from_str(r#"{"jwt_secret":"s","password_algorithm":"bcrypt"}"#).unwrap();
        assert_eq!(config.password_algorithm, PasswordAlgorithm::Bcrypt);
        assert_eq!(config.jwt_expiration_hours, 24);
        assert!(!config.normalize_email);
    }
}
