//! Configuration management for Bibliotek server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the per-collection JSON files
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ExternalApiConfig {
    /// Lookup URL template; `{isbn}` is substituted per request
    pub book_info_url: String,
    /// Freshness window for the durable book-info cache
    pub cache_ttl_seconds: u64,
    /// Upper bound on a single upstream call
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for daily-rolling log files
    pub directory: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub external_api: ExternalApiConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix BIBLIOTEK__)
            .add_source(
                Environment::with_prefix("BIBLIOTEK")
                    .separator("__")
                    .try_parsing(true),
            )
            // Override storage path from STORAGE_PATH env var if present
            .set_override_option("storage.path", env::var("STORAGE_PATH").ok())?
            // Override lookup URL from BOOK_INFO_API_URL env var if present
            .set_override_option("external_api.book_info_url", env::var("BOOK_INFO_API_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: "data/storage".to_string(),
        }
    }
}

impl Default for ExternalApiConfig {
    fn default() -> Self {
        Self {
            book_info_url: "https://openlibrary.org/isbn/{isbn}.json".to_string(),
            cache_ttl_seconds: 3600,
            timeout_seconds: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: "logs".to_string(),
        }
    }
}
