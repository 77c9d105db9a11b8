//! Generate-key command

use crate::infrastructure::api_key::ApiKeyGenerator;

pub fn run() -> anyhow::Result<()> {
    println!("{}", ApiKeyGenerator::new().generate());
    Ok(())
}
