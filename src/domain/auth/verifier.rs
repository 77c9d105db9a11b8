//! Identity token verification capability

use async_trait::async_trait;

use super::error::IdentityTokenError;
use super::identity::VerifiedIdentity;

#[cfg(test)]
use mockall::automock;

/// Verifies tokens issued by the federated identity provider
///
/// Implementations own the token format entirely; callers only see the
/// resulting identity or the provider's own error.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait IdentityTokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, IdentityTokenError>;

    /// Name used in log lines
    fn verifier_name(&self) -> &'static str;
}
