//! Health command - probe the remote store

use anyhow::bail;

use crate::infrastructure::gdelt::probe_health;

pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let fallback = config.auth.fallback_credentials();

    let healthy = probe_health(&config.gdelt.client_config(), fallback.token()).await;

    if !healthy {
        println!("unhealthy");
        bail!("GDELT Cloud at {} is not healthy", config.gdelt.api_url);
    }

    println!("healthy");
    Ok(())
}
