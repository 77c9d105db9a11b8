//! OAuth protected resource metadata

use axum::extract::State;
use serde::{Deserialize, Serialize};

use super::state::AppState;
use super::types::{ApiError, Json};

/// Body of `/.well-known/oauth-protected-resource`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtectedResourceMetadata {
    pub resource: String,
    pub authorization_servers: Vec<String>,
    pub bearer_methods_supported: Vec<String>,
}

impl ProtectedResourceMetadata {
    pub fn new(resource: impl Into<String>, authorization_server: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            authorization_servers: vec![authorization_server.into()],
            bearer_methods_supported: vec!["header".to_string()],
        }
    }
}

/// GET /.well-known/oauth-protected-resource
///
/// 404 when the gateway runs without an identity provider.
pub async fn protected_resource(
    State(state): State<AppState>,
) -> Result<Json<ProtectedResourceMetadata>, ApiError> {
    let provider = state
        .identity_provider_url
        .as_deref()
        .ok_or_else(|| ApiError::not_found("No identity provider configured"))?;

    Ok(Json(ProtectedResourceMetadata::new(
        state.server_base_url.trim_end_matches('/'),
        provider.trim_end_matches('/'),
    )))
}
