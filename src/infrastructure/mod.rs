//! Infrastructure layer - External service implementations

pub mod api_key;
pub mod gdelt;
pub mod identity;
pub mod logging;
