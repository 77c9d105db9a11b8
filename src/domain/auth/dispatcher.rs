//! Single verification entry point for both credential kinds

use std::sync::Arc;

use tracing::debug;

use super::credential::{redacted_prefix, validate_api_key, CredentialKind};
use super::error::AuthError;
use super::identity::VerifiedIdentity;
use super::verifier::IdentityTokenVerifier;

/// Routes a bearer token to the API-key or identity-token path
///
/// API keys are checked for shape only; whether a key exists or has been
/// revoked is decided by the remote store when the query is forwarded.
#[derive(Clone)]
pub struct DualCredentialVerifier {
    identity_verifier: Arc<dyn IdentityTokenVerifier>,
}

impl std::fmt::Debug for DualCredentialVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DualCredentialVerifier")
            .field("identity_verifier", &self.identity_verifier.verifier_name())
            .finish()
    }
}

impl DualCredentialVerifier {
    pub fn new(identity_verifier: Arc<dyn IdentityTokenVerifier>) -> Self {
        Self { identity_verifier }
    }

    pub async fn verify(&self, token: &str) -> Result<VerifiedIdentity, AuthError> {
        let kind = CredentialKind::classify(token);

        debug!(
            credential_kind = %kind,
            token_prefix = %redacted_prefix(token),
            "Verifying credential"
        );

        match kind {
            CredentialKind::ApiKey => Self::verify_api_key(token),
            CredentialKind::IdentityToken => {
                let identity = self.identity_verifier.verify(token).await?;
                Ok(identity)
            }
        }
    }

    fn verify_api_key(token: &str) -> Result<VerifiedIdentity, AuthError> {
        if !validate_api_key(token) {
            return Err(AuthError::invalid_credential("malformed API key"));
        }

        Ok(VerifiedIdentity::for_api_key(token))
    }
}
