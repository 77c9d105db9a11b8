//! API middleware components

pub mod auth;
pub mod logging;

pub use auth::RequireCredential;
pub use logging::logging_middleware;
