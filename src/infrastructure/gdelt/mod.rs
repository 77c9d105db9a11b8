//! GDELT Cloud analytical store access

mod client;

pub use client::{
    forward_query, probe_health, GdeltClientConfig, GdeltClientError, GdeltCloudClient,
    DEFAULT_BASE_URL, QUERY_FORMAT,
};
