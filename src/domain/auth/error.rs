use thiserror::Error;

/// Failure reported by an identity token verifier
///
/// The dispatcher hands these back to callers untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityTokenError {
    #[error("Malformed identity token: {0}")]
    Malformed(String),

    #[error("Identity token has expired")]
    Expired,

    #[error("Identity token signature is invalid")]
    InvalidSignature,

    #[error("Identity token issuer is not trusted")]
    InvalidIssuer,

    #[error("Identity token audience does not match")]
    InvalidAudience,

    #[error("No signing key found for key id '{0}'")]
    UnknownKey(String),

    #[error("Unsupported token algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Identity provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Identity token rejected: {0}")]
    Rejected(String),
}

/// Authentication failures raised to the caller
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No token could be resolved at all
    #[error("Authentication required. Provide OAuth token or API key.")]
    Unauthenticated,

    /// Token present but not acceptable for its kind
    #[error("Invalid credential: {reason}")]
    InvalidCredential { reason: String },

    /// Identity token rejected by the external verifier
    #[error(transparent)]
    IdentityToken(#[from] IdentityTokenError),
}

impl AuthError {
    pub fn invalid_credential(reason: impl Into<String>) -> Self {
        Self::InvalidCredential {
            reason: reason.into(),
        }
    }

    /// Whether the token was present but rejected
    pub fn is_invalid_credential(&self) -> bool {
        matches!(self, Self::InvalidCredential { .. } | Self::IdentityToken(_))
    }

    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::InvalidCredential { .. } | Self::IdentityToken(_) => "invalid_credential",
        }
    }
}
