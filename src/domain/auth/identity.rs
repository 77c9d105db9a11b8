//! Normalized result of a successful credential verification

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::credential::CredentialKind;

/// Subject recorded for API-key callers; the remote store resolves the real owner
pub const API_KEY_SUBJECT: &str = "api_key_client";

/// Scopes granted to every well-formed API key
pub const API_KEY_SCOPES: [&str; 2] = ["read", "write"];

/// Identity produced by the dual-credential dispatcher
///
/// Downstream code never needs to know which credential path produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifiedIdentity {
    #[serde(skip_serializing)]
    token: String,
    kind: CredentialKind,
    subject: String,
    scopes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires_at: Option<DateTime<Utc>>,
}

impl VerifiedIdentity {
    pub fn new(token: impl Into<String>, kind: CredentialKind, subject: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            kind,
            subject: subject.into(),
            scopes: Vec::new(),
            expires_at: None,
        }
    }

    /// Identity for a shape-validated API key: fixed subject, read/write, no expiry
    pub fn for_api_key(token: impl Into<String>) -> Self {
        Self::new(token, CredentialKind::ApiKey, API_KEY_SUBJECT)
            .with_scopes(API_KEY_SCOPES.iter().map(|s| s.to_string()).collect())
    }

    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn kind(&self) -> CredentialKind {
        self.kind
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }
}
