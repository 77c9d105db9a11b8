//! Domain layer - credential handling and the query contract

pub mod auth;
pub mod query;

pub use auth::{
    AuthContext, AuthError, CredentialKind, DualCredentialVerifier, FallbackCredentials,
    IdentityTokenError, IdentityTokenVerifier, VerifiedIdentity,
};
pub use query::{QueryRequest, QueryResult, QueryTable};
