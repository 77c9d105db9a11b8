//! API layer - HTTP endpoints and middleware

pub mod discovery;
pub mod health;
pub mod middleware;
pub mod router;
pub mod state;
pub mod tools;
pub mod types;

pub use middleware::RequireCredential;
pub use router::create_router;
pub use state::AppState;
