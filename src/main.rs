use clap::Parser;
use gdelt_cloud_gateway::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Query(args) => cli::query::run(args).await,
        Command::Health => cli::health::run().await,
        Command::GenerateKey => cli::keys::run(),
    }
}
