//! GDELT Cloud gateway
//!
//! Authenticates callers holding either a GDELT Cloud API key or an identity
//! provider token, then forwards their queries to the GDELT Cloud analytical
//! store using the same credential.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::AppState;
use domain::DualCredentialVerifier;
use infrastructure::identity::create_identity_verifier;

/// Build the dispatcher for the configured identity provider
pub fn create_verifier(config: &AppConfig) -> anyhow::Result<DualCredentialVerifier> {
    let identity_verifier = create_identity_verifier(&config.auth)?;
    info!(
        identity_verifier = identity_verifier.verifier_name(),
        "Credential verifier ready"
    );

    Ok(DualCredentialVerifier::new(identity_verifier))
}

/// Build the shared application state from configuration
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let verifier = create_verifier(config)?;
    let fallback = config.auth.fallback_credentials();

    if let Some(kind) = fallback.token().map(domain::CredentialKind::classify) {
        info!(kind = %kind, "Fallback credential configured");
    }

    Ok(AppState::new(
        Arc::new(verifier),
        fallback,
        config.gdelt.client_config(),
    )
    .with_server_base_url(config.auth.server_base_url.clone())
    .with_identity_provider(config.auth.identity_provider().map(str::to_string)))
}
