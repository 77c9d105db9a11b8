//! API Key generation
//!
//! Issues keys in the `gdelt_sk_` + 64 hex shape accepted by the gateway.

use rand::RngCore;

use crate::domain::auth::{API_KEY_BODY_LENGTH, API_KEY_PREFIX};

/// Generator for GDELT Cloud API keys
#[derive(Debug, Clone, Default)]
pub struct ApiKeyGenerator;

impl ApiKeyGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate a new API key from 32 random bytes
    pub fn generate(&self) -> String {
        let mut random_bytes = [0u8; API_KEY_BODY_LENGTH / 2];
        rand::thread_rng().fill_bytes(&mut random_bytes);

        format!("{}{}", API_KEY_PREFIX, hex::encode(random_bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::{validate_api_key, CredentialKind};

    #[test]
    fn test_generated_key_shape() {
        let key = ApiKeyGenerator::new().generate();

        assert!(key.starts_with("gdelt_sk_"));
        assert_eq!(key.len(), 73);
        assert!(key[9..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_generated_key_is_accepted() {
        let key = ApiKeyGenerator::new().generate();

        assert!(validate_api_key(&key));
        assert_eq!(CredentialKind::classify(&key), CredentialKind::ApiKey);
    }

    #[test]
    fn test_key_uniqueness() {
        let generator = ApiKeyGenerator::new();
        assert_ne!(generator.generate(), generator.generate());
    }
}
