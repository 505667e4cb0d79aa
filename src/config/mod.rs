//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AuthConfig, CacheSettings, LogFormat, LoggingConfig, MetricsConfig, ServerConfig,
    StorageSettings, TeamsConfig, DEFAULT_JWT_SECRET,
};
