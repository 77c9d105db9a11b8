use std::time::Duration;

use serde::Deserialize;

use crate::domain::auth::FallbackCredentials;
use crate::infrastructure::gdelt::{GdeltClientConfig, DEFAULT_BASE_URL};
use crate::infrastructure::identity::{JwksConfig, DEFAULT_AUDIENCE};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub gdelt: GdeltSettings,
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Remote analytical store settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GdeltSettings {
    pub api_url: String,
    pub query_timeout_secs: u64,
    pub health_timeout_secs: u64,
}

/// Fallback credentials and identity provider settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// Fallback API key for calls without an Authorization header
    pub api_key: Option<String>,
    /// Fallback identity token, used when no fallback API key is set
    pub identity_token: Option<String>,
    /// Identity provider base URL; identity tokens go unverified when absent
    pub identity_provider_url: Option<String>,
    pub audience: Option<String>,
    pub jwks_cache_ttl_secs: u64,
    /// Public URL of this gateway, advertised as the protected resource
    pub server_base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for GdeltSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            query_timeout_secs: 30,
            health_timeout_secs: 5,
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            identity_token: None,
            identity_provider_url: None,
            audience: Some(DEFAULT_AUDIENCE.to_string()),
            jwks_cache_ttl_secs: 300,
            server_base_url: "http://localhost".to_string(),
        }
    }
}

impl GdeltSettings {
    pub fn client_config(&self) -> GdeltClientConfig {
        GdeltClientConfig::new(&self.api_url)
            .with_query_timeout(Duration::from_secs(self.query_timeout_secs))
            .with_health_timeout(Duration::from_secs(self.health_timeout_secs))
    }
}

impl AuthSettings {
    pub fn fallback_credentials(&self) -> FallbackCredentials {
        FallbackCredentials::new(self.api_key.clone(), self.identity_token.clone())
    }

    pub fn jwks_config(&self, provider_url: &str) -> JwksConfig {
        JwksConfig::for_provider(provider_url)
            .with_audience(self.audience.clone())
            .with_cache_ttl(Duration::from_secs(self.jwks_cache_ttl_secs))
    }

    /// Identity provider URL, if one is configured
    pub fn identity_provider(&self) -> Option<&str> {
        self.identity_provider_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

impl AppConfig {
    /// Load from defaults, `config/default`, `config/local`, `APP__*` variables
    /// and the legacy GDELT variable names
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("gdelt.api_url", env_var("GDELT_CLOUD_API_URL"))?
            .set_override_option("auth.api_key", env_var("GDELT_API_KEY"))?
            .set_override_option("auth.identity_token", env_var("GDELT_OAUTH_TOKEN"))?
            .set_override_option("auth.identity_provider_url", env_var("SUPABASE_URL"))?
            .set_override_option("auth.server_base_url", env_var("MCP_SERVER_BASE_URL"))?
            .build()?;

        config.try_deserialize()
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
