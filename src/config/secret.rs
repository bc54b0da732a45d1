//! Credentials held in configuration
//!
//! The clinical API token and the PostgreSQL connection string (which
//! embeds the database password) are kept in [`SecretString`]. Both are
//! zeroized on drop and redacted in `Debug` output; callers reach the raw
//! text only through `expose_secret()`.

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::Zeroize;

/// Credential text. Has no `Display`; use `as_ref()` after exposing it.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl SecretValue {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Scheme checks on connection strings and URLs
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl Serialize for SecretValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(SecretValue)
    }
}

pub type SecretString = Secret<SecretValue>;

/// Wraps a substituted or overridden credential, e.g. the value of
/// `GENOSENTINEL_CLINICAL_API_TOKEN`.
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_token_is_redacted_in_debug() {
        let token = secret_string("clinical-token".to_string());
        assert!(!format!("{token:?}").contains("clinical-token"));
        assert!(!format!("{:?}", token.expose_secret()).contains("clinical-token"));
        assert!(token.expose_secret() == "clinical-token");
    }

    #[test]
    fn test_connection_string_scheme_check() {
        let conn = secret_string("postgresql://geno:pw@localhost/genosentinel".to_string());
        assert!(conn.expose_secret().starts_with("postgresql://"));
        assert!(!conn.expose_secret().is_empty());
    }

    #[test]
    fn test_deserializes_from_toml() {
        #[derive(Deserialize)]
        struct Clinical {
            api_token: SecretString,
        }

        let parsed: Clinical = toml::from_str("api_token = \"abc123\"").unwrap();
        assert!(parsed.api_token.expose_secret() == "abc123");
    }
}
