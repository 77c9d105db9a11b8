//! CLI module for the GDELT Cloud gateway
//!
//! - `serve`: run the HTTP tool server
//! - `query`: run one query with the configured credential
//! - `health`: probe the remote store
//! - `generate-key`: print a new API key

pub mod health;
pub mod keys;
pub mod query;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// GDELT Cloud gateway - authenticated access to the GDELT Cloud store
#[derive(Parser)]
#[command(name = "gdelt-cloud-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP tool server
    Serve,

    /// Run a single query using the credential from the environment
    Query(query::QueryArgs),

    /// Check that the remote store answers
    Health,

    /// Print a freshly generated API key
    GenerateKey,
}

/// Load `.env` and layered configuration, then start logging
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    Ok(config)
}
