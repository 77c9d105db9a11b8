//! Bearer credential extractor

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::auth::redacted_prefix;
use crate::domain::{AuthContext, VerifiedIdentity};

/// Extractor that requires a verified credential
///
/// The token comes from `Authorization: Bearer <token>`, or from the
/// configured fallback credentials when the header is missing or unusable.
/// The raw token travels on in the identity so the handler can forward it.
#[derive(Debug, Clone)]
pub struct RequireCredential(pub VerifiedIdentity);

impl FromRequestParts<AppState> for RequireCredential {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let context = AuthContext::resolve(Some(&parts.headers), &state.fallback);
        if !context.is_authenticated() {
            debug!(path = %parts.uri.path(), "No credential in request or fallback");
        }
        let token = context.require_auth()?;

        debug!(
            kind = ?context.credential_kind(),
            token_prefix = %redacted_prefix(token),
            "Verifying credential"
        );

        let identity = state.verifier.verify(token).await?;

        Ok(RequireCredential(identity))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{header, Request, StatusCode};

    use super::*;
    use crate::domain::auth::MockIdentityTokenVerifier;
    use crate::domain::{
        CredentialKind, DualCredentialVerifier, FallbackCredentials, IdentityTokenError,
    };
    use crate::infrastructure::gdelt::GdeltClientConfig;

    fn api_key() -> String {
        format!("gdelt_sk_{}", "0123456789abcdef".repeat(4))
    }

    fn state(verifier: MockIdentityTokenVerifier, fallback: FallbackCredentials) -> AppState {
        AppState::new(
            Arc::new(DualCredentialVerifier::new(Arc::new(verifier))),
            fallback,
            GdeltClientConfig::new("http://unused.invalid"),
        )
    }

    fn parts(authorization: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/tools/query_gdelt_events");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    fn no_identity_calls() -> MockIdentityTokenVerifier {
        let mut verifier = MockIdentityTokenVerifier::new();
        verifier.expect_verify().never();
        verifier
    }

    #[tokio::test]
    async fn test_header_api_key_is_accepted() {
        let state = state(no_identity_calls(), FallbackCredentials::default());
        let mut parts = parts(Some(&format!("Bearer {}", api_key())));

        let RequireCredential(identity) =
            RequireCredential::from_request_parts(&mut parts, &state)
                .await
                .unwrap();

        assert_eq!(identity.kind(), CredentialKind::ApiKey);
        assert_eq!(identity.token(), api_key());
    }

    #[tokio::test]
    async fn test_missing_credential_is_unauthenticated() {
        let state = state(no_identity_calls(), FallbackCredentials::default());
        let mut parts = parts(None);

        let err = RequireCredential::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.response.error.code.as_deref(), Some("unauthenticated"));
    }

    #[tokio::test]
    async fn test_fallback_used_without_header() {
        let state = state(
            no_identity_calls(),
            FallbackCredentials::new(Some(api_key()), None),
        );
        let mut parts = parts(None);

        let RequireCredential(identity) =
            RequireCredential::from_request_parts(&mut parts, &state)
                .await
                .unwrap();

        assert_eq!(identity.token(), api_key());
    }

    #[tokio::test]
    async fn test_malformed_api_key_is_invalid_credential() {
        let state = state(no_identity_calls(), FallbackCredentials::default());
        let mut parts = parts(Some("Bearer gdelt_sk_short"));

        let err = RequireCredential::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.response.error.code.as_deref(), Some("invalid_credential"));
    }

    #[tokio::test]
    async fn test_identity_rejection_is_invalid_credential() {
        let mut verifier = MockIdentityTokenVerifier::new();
        verifier
            .expect_verify()
            .times(1)
            .returning(|_| Err(IdentityTokenError::Expired));
        let state = state(verifier, FallbackCredentials::default());
        let mut parts = parts(Some("Bearer eyJhbGciOiJSUzI1NiJ9.e30.sig"));

        let err = RequireCredential::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();

        assert_eq!(err.response.error.code.as_deref(), Some("invalid_credential"));
        assert_eq!(err.response.error.message, "Identity token has expired");
    }
}
