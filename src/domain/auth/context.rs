//! Per-call authentication context

use axum::http::{header, HeaderMap};

use super::credential::CredentialKind;
use super::error::AuthError;

const BEARER_SCHEME: &str = "Bearer ";

/// Tokens read from the environment at startup, used when a call carries none
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallbackCredentials {
    pub api_key: Option<String>,
    pub identity_token: Option<String>,
}

impl FallbackCredentials {
    pub fn new(api_key: Option<String>, identity_token: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            identity_token: identity_token.filter(|t| !t.trim().is_empty()),
        }
    }

    /// API key wins over identity token
    pub fn token(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .or(self.identity_token.as_deref())
    }
}

/// Authentication state for one inbound call
///
/// Built once, never mutated, dropped when the call ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    token: Option<String>,
}

impl AuthContext {
    /// Resolve the call's token
    ///
    /// `headers` is `None` when the call is not servicing an inbound request
    /// (CLI use, background work). Header problems never fail resolution;
    /// they fall through to the environment fallback.
    pub fn resolve(headers: Option<&HeaderMap>, fallback: &FallbackCredentials) -> Self {
        let token = headers
            .and_then(bearer_token)
            .or_else(|| fallback.token().map(str::to_string));

        Self { token }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Advisory only; nothing is verified here
    pub fn credential_kind(&self) -> Option<CredentialKind> {
        self.token.as_deref().map(CredentialKind::classify)
    }

    pub fn require_auth(&self) -> Result<&str, AuthError> {
        self.token().ok_or(AuthError::Unauthenticated)
    }
}

/// Token from an `Authorization: Bearer <token>` header, if usable
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix(BEARER_SCHEME)?.trim();

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
