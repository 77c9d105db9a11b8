//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AuthSettings, GdeltSettings, LogFormat, LoggingConfig, ServerConfig,
};
