//! API token handling
//!
//! The personal access token is the only secret this tool holds. It is wiped
//! from memory on drop and never shows up in `Debug` or log output.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::UpdaterError;

/// A YNAB personal access token
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ApiToken {
    inner: String,
}

impl ApiToken {
    /// Wrap a token, rejecting blank input
    pub fn new(token: impl Into<String>) -> Result<Self, UpdaterError> {
        let mut raw = token.into();
        let trimmed = raw.trim().to_string();
        raw.zeroize();
        if trimmed.is_empty() {
            return Err(UpdaterError::Validation("API token cannot be empty".into()));
        }
        Ok(Self { inner: trimmed })
    }

    /// Get the token for the Authorization header
    pub fn expose(&self) -> &str {
        &self.inner
    }

    /// Short hint safe to show on screen, e.g. `abcd…` (first four characters)
    pub fn hint(&self) -> String {
        let prefix: String = self.inner.chars().take(4).collect();
        format!("{}…", prefix)
    }
}

// Don't print the contents in Debug output
impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiToken")
            .field("len", &self.inner.len())
            .finish()
    }
}

impl Serialize for ApiToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.inner)
    }
}

impl<'de> Deserialize<'de> for ApiToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ApiToken::new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_trimmed() {
        let token = ApiToken::new("  secret-token \n").unwrap();
        assert_eq!(token.expose(), "secret-token");
    }

    #[test]
    fn test_empty_token_rejected() {
        assert!(ApiToken::new("").is_err());
        assert!(ApiToken::new("   ").is_err());
    }

    #[test]
    fn test_debug_redacted() {
        let token = ApiToken::new("secret").unwrap();
        let debug = format!("{:?}", token);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("ApiToken"));
    }

    #[test]
    fn test_hint() {
        let token = ApiToken::new("abcdefgh").unwrap();
        assert_eq!(token.hint(), "abcd…");
    }

    #[test]
    fn test_serialized_as_plain_string() {
        let token = ApiToken::new("secret").unwrap();
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"secret\"");

        let parsed: ApiToken = serde_json::from_str("\"secret\"").unwrap();
        assert_eq!(parsed, token);
        assert!(serde_json::from_str::<ApiToken>("\"\"").is_err());
    }
}
