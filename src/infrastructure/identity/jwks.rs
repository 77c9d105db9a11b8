//! Identity token verification against the provider's published key set

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use moka::future::Cache;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::domain::auth::{
    CredentialKind, IdentityTokenError, IdentityTokenVerifier, VerifiedIdentity,
};

/// Audience the provider stamps on user sessions
pub const DEFAULT_AUDIENCE: &str = "authenticated";

const KEY_SET_CACHE_KEY: &str = "jwks";

/// Where the key set lives and which issuer/audience to accept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JwksConfig {
    pub jwks_uri: String,
    pub issuer: String,
    pub audience: Option<String>,
    pub cache_ttl: Duration,
    pub fetch_timeout: Duration,
}

impl JwksConfig {
    pub fn new(jwks_uri: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            jwks_uri: jwks_uri.into(),
            issuer: issuer.into(),
            audience: Some(DEFAULT_AUDIENCE.to_string()),
            cache_ttl: Duration::from_secs(300),
            fetch_timeout: Duration::from_secs(5),
        }
    }

    /// Standard endpoints below an identity provider base URL
    pub fn for_provider(provider_url: &str) -> Self {
        let base = provider_url.trim_end_matches('/');
        Self::new(format!("{}/auth/v1/jwks", base), format!("{}/auth/v1", base))
    }

    pub fn with_audience(mut self, audience: Option<String>) -> Self {
        self.audience = audience;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }
}

#[derive(Debug, Deserialize)]
struct IdentityClaims {
    sub: String,
    exp: Option<i64>,
    #[serde(default)]
    scope: Option<String>,
}

/// Verifies signed identity tokens using keys from `jwks_uri`
pub struct JwksIdentityVerifier {
    config: JwksConfig,
    http: reqwest::Client,
    key_sets: Cache<String, Arc<JwkSet>>,
}

impl std::fmt::Debug for JwksIdentityVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwksIdentityVerifier")
            .field("config", &self.config)
            .field("key_sets", &"[cached]")
            .finish()
    }
}

impl JwksIdentityVerifier {
    pub fn new(config: JwksConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.fetch_timeout)
            .build()?;

        let key_sets = Cache::builder()
            .time_to_live(config.cache_ttl)
            .max_capacity(1)
            .build();

        info!(
            jwks_uri = %config.jwks_uri,
            issuer = %config.issuer,
            audience = ?config.audience,
            "Identity token verification enabled"
        );

        Ok(Self {
            config,
            http,
            key_sets,
        })
    }

    pub fn config(&self) -> &JwksConfig {
        &self.config
    }

    async fn key_set(&self) -> Result<Arc<JwkSet>, IdentityTokenError> {
        self.key_sets
            .try_get_with(KEY_SET_CACHE_KEY.to_string(), self.fetch_key_set())
            .await
            .map_err(|e| (*e).clone())
    }

    async fn fetch_key_set(&self) -> Result<Arc<JwkSet>, IdentityTokenError> {
        debug!(jwks_uri = %self.config.jwks_uri, "Fetching identity provider key set");

        let response = self
            .http
            .get(&self.config.jwks_uri)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| IdentityTokenError::ProviderUnavailable(e.to_string()))?;

        let key_set = response
            .json::<JwkSet>()
            .await
            .map_err(|e| IdentityTokenError::ProviderUnavailable(format!("Invalid key set: {}", e)))?;

        Ok(Arc::new(key_set))
    }

    /// Find the signing key, refetching once in case the provider rotated keys
    async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, IdentityTokenError> {
        let mut key_set = self.key_set().await?;

        if key_set.find(kid).is_none() {
            debug!(kid = %kid, "Key id not in cached key set, refreshing");
            self.key_sets.invalidate(KEY_SET_CACHE_KEY).await;
            key_set = self.key_set().await?;
        }

        let jwk = key_set
            .find(kid)
            .ok_or_else(|| IdentityTokenError::UnknownKey(kid.to_string()))?;

        DecodingKey::from_jwk(jwk)
            .map_err(|e| IdentityTokenError::Malformed(format!("Unusable signing key: {}", e)))
    }

    fn validation(&self, algorithm: Algorithm) -> Validation {
        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[&self.config.issuer]);

        match &self.config.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        validation
    }
}

#[async_trait]
impl IdentityTokenVerifier for JwksIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, IdentityTokenError> {
        let header = decode_header(token)
            .map_err(|e| IdentityTokenError::Malformed(e.to_string()))?;

        if matches!(header.alg, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            return Err(IdentityTokenError::UnsupportedAlgorithm(format!("{:?}", header.alg)));
        }

        let kid = header
            .kid
            .ok_or_else(|| IdentityTokenError::Malformed("token header has no key id".to_string()))?;

        let key = self.decoding_key(&kid).await?;

        let claims = decode::<IdentityClaims>(token, &key, &self.validation(header.alg))
            .map_err(|e| {
                warn!(error = %e, "Identity token rejected");
                map_jwt_error(e)
            })?
            .claims;

        let scopes = claims
            .scope
            .as_deref()
            .map(|s| s.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();

        let mut identity =
            VerifiedIdentity::new(token, CredentialKind::IdentityToken, claims.sub).with_scopes(scopes);

        if let Some(expires_at) = claims.exp.and_then(|exp| DateTime::from_timestamp(exp, 0)) {
            identity = identity.with_expiry(expires_at);
        }

        Ok(identity)
    }

    fn verifier_name(&self) -> &'static str {
        "jwks"
    }
}

fn map_jwt_error(err: jsonwebtoken::errors::Error) -> IdentityTokenError {
    match err.kind() {
        ErrorKind::ExpiredSignature => IdentityTokenError::Expired,
        ErrorKind::InvalidSignature => IdentityTokenError::InvalidSignature,
        ErrorKind::InvalidIssuer => IdentityTokenError::InvalidIssuer,
        ErrorKind::InvalidAudience => IdentityTokenError::InvalidAudience,
        ErrorKind::InvalidAlgorithm => IdentityTokenError::UnsupportedAlgorithm(err.to_string()),
        ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Json(_) | ErrorKind::Utf8(_) => {
            IdentityTokenError::Malformed(err.to_string())
        }
        _ => IdentityTokenError::Rejected(err.to_string()),
    }
}
