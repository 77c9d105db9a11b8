//! Credential classification and API key shape validation

use serde::{Deserialize, Serialize};

/// Literal prefix carried by every locally-issued API key
pub const API_KEY_PREFIX: &str = "gdelt_sk_";

/// Number of hex characters following the prefix
pub const API_KEY_BODY_LENGTH: usize = 64;

/// Kind of bearer credential presented by a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialKind {
    /// Long-lived key issued by GDELT Cloud (`gdelt_sk_...`)
    ApiKey,
    /// Short-lived token issued by the federated identity provider
    IdentityToken,
}

impl CredentialKind {
    /// Classify a bearer token by its prefix alone.
    ///
    /// The caller must strip any `Bearer ` scheme first. A token that still
    /// carries the scheme does not start with the key prefix and is therefore
    /// classified as an identity token.
    pub fn classify(token: &str) -> Self {
        if token.starts_with(API_KEY_PREFIX) {
            Self::ApiKey
        } else {
            Self::IdentityToken
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApiKey => "api_key",
            Self::IdentityToken => "identity_token",
        }
    }
}

impl std::fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Check that a token is a well-formed API key
///
/// Rules, checked in order:
/// - starts with `gdelt_sk_`
/// - the remainder is exactly 64 characters long
/// - every character of the remainder is a hex digit (either case)
///
/// Never fails: anything else is simply `false`.
pub fn validate_api_key(token: &str) -> bool {
    let Some(body) = token.strip_prefix(API_KEY_PREFIX) else {
        return false;
    };

    if body.len() != API_KEY_BODY_LENGTH {
        return false;
    }

    body.chars().all(|c| c.is_ascii_hexdigit())
}

/// Short, non-secret prefix of a token for log lines
pub fn redacted_prefix(token: &str) -> String {
    token.chars().take(8).collect()
}
