//! Dual-credential authentication
//!
//! Callers present either a GDELT Cloud API key (`gdelt_sk_` + 64 hex) or an
//! identity token issued by the federated identity provider, both as bearer
//! tokens. This module classifies, validates and verifies them behind one
//! contract.

mod context;
mod credential;
mod dispatcher;
mod error;
mod identity;
mod verifier;

pub use context::{AuthContext, FallbackCredentials};
pub use credential::{
    redacted_prefix, validate_api_key, CredentialKind, API_KEY_BODY_LENGTH, API_KEY_PREFIX,
};
pub use dispatcher::DualCredentialVerifier;
pub use error::{AuthError, IdentityTokenError};
pub use identity::{VerifiedIdentity, API_KEY_SCOPES, API_KEY_SUBJECT};
pub use verifier::IdentityTokenVerifier;

#[cfg(test)]
pub use verifier::MockIdentityTokenVerifier;
