use base64::{engine::general_purpose, Engine as _};
use lazy_static::lazy_static;
use regex::Regex;
use sha2::{Digest, Sha256};

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap();
    static ref JWT_REGEX: Regex = Regex::new(r"\beyJ[A-Za-z0-9_-]*\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]*").unwrap();
    static ref DIGEST_REGEX: Regex = Regex::new(r"\$(?:argon2(?:id|i|d)|2[abxy]?)\$[A-Za-z0-9./=$,+-]+").unwrap();
    static ref DEFAULT_REDACTOR: PiiRedactor = PiiRedactor::new(RedactionConfig::default());
}

/// PII redaction configuration
#[derive(Debug, Clone)]
pub struct RedactionConfig {
    pub redact_emails: bool,
    pub redact_tokens: bool,
    pub redact_digests: bool,
    pub hash_for_correlation: bool,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            redact_emails: true,
            redact_tokens: true,
            redact_digests: true,
            hash_for_correlation: true,
        }
    }
}

/// PII redactor for log messages and fields
pub struct PiiRedactor {
    config: RedactionConfig,
}

impl PiiRedactor {
    pub fn new(config: RedactionConfig) -> Self {
        Self { config }
    }

    pub fn redact(&self, text: &str) -> String {
        let mut result = text.to_string();

        // Digests first: a bcrypt digest can contain text that looks like an email tail
        if self.config.redact_digests {
            result = DIGEST_REGEX.replace_all(&result, "DIGEST[REDACTED]").to_string();
        }

        if self.config.redact_tokens {
            result = JWT_REGEX.replace_all(&result, "TOKEN[REDACTED]").to_string();
        }

        if self.config.redact_emails {
            result = self.redact_emails(&result);
        }

        result
    }

    fn redact_emails(&self, text: &str) -> String {
        EMAIL_REGEX.replace_all(text, |caps: &regex::Captures| {
            let email = &caps[0];
            if self.config.hash_for_correlation {
                format!("EMAIL[{}]", self.hash_value(email))
            } else {
                match email.split_once('@') {
                    Some((local, domain)) => format!("{}***@{}***", first_char(local), first_char(domain)),
                    None => "***@***".to_string(),
                }
            }
        }).to_string()
    }

    fn hash_value(&self, value: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(value.as_bytes());
        let result = hasher.finalize();
        general_purpose::STANDARD.encode(&result[..8]) // Use first 8 bytes for shorter hash
    }
}

fn first_char(s: &str) -> String {
    s.chars().next().map(String::from).unwrap_or_default()
}

/// Redact a single email with the default configuration.
///
/// The same address always maps to the same marker, so log lines about one
/// account can still be correlated.
pub fn redact_email(email: &str) -> String {
    let redacted = DEFAULT_REDACTOR.redact(email);
    if redacted == email && !email.is_empty() {
        // Not shaped like an address; still never log it raw
        return format!("EMAIL[{}]", DEFAULT_REDACTOR.hash_value(email));
    }
    redacted
}
