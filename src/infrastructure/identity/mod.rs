//! Identity token verifier implementations

mod deferred;
mod jwks;

use std::sync::Arc;

use tracing::warn;

use crate::config::AuthSettings;
use crate::domain::auth::IdentityTokenVerifier;

pub use deferred::{DeferredIdentityVerifier, UNVERIFIED_SUBJECT};
pub use jwks::{JwksConfig, JwksIdentityVerifier, DEFAULT_AUDIENCE};

/// Pick the verifier for the configured identity provider
pub fn create_identity_verifier(
    settings: &AuthSettings,
) -> anyhow::Result<Arc<dyn IdentityTokenVerifier>> {
    match settings.identity_provider() {
        Some(url) => {
            let config = settings.jwks_config(url);
            Ok(Arc::new(JwksIdentityVerifier::new(config)?))
        }
        None => {
            warn!("No identity provider configured. Identity tokens are forwarded unverified.");
            Ok(Arc::new(DeferredIdentityVerifier))
        }
    }
}
