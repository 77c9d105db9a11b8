//! Application state shared by all handlers

use std::sync::Arc;

use crate::domain::{DualCredentialVerifier, FallbackCredentials};
use crate::infrastructure::gdelt::GdeltClientConfig;

/// Everything a request needs, read-only after startup
#[derive(Debug, Clone)]
pub struct AppState {
    pub verifier: Arc<DualCredentialVerifier>,
    pub fallback: FallbackCredentials,
    pub gdelt: GdeltClientConfig,
    /// Public URL of this gateway
    pub server_base_url: String,
    pub identity_provider_url: Option<String>,
}

impl AppState {
    pub fn new(
        verifier: Arc<DualCredentialVerifier>,
        fallback: FallbackCredentials,
        gdelt: GdeltClientConfig,
    ) -> Self {
        Self {
            verifier,
            fallback,
            gdelt,
            server_base_url: "http://localhost".to_string(),
            identity_provider_url: None,
        }
    }

    pub fn with_server_base_url(mut self, url: impl Into<String>) -> Self {
        self.server_base_url = url.into();
        self
    }

    pub fn with_identity_provider(mut self, url: Option<String>) -> Self {
        self.identity_provider_url = url;
        self
    }
}
