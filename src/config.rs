//! Client configuration.
//!
//! Values come from an optional `paperstore.{toml,yaml,json}` file and then
//! `PAPERSTORE__*` environment variables (e.g. `PAPERSTORE__API_BASE_URL`),
//! after `.env` has been loaded.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL the `/pdfs` routes hang off.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Bytes per streamed upload chunk; one progress event per chunk.
    #[serde(default = "default_upload_chunk_size")]
    pub upload_chunk_size: usize,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_json: bool,
}

fn default_api_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_upload_chunk_size() -> usize {
    64 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            upload_chunk_size: default_upload_chunk_size(),
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl ClientConfig {
    /// Load configuration from `.env`, the optional config file and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .add_source(File::with_name("paperstore").required(false))
            .add_source(Environment::with_prefix("PAPERSTORE").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Client-side request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_uses_defaults() {
        let config: ClientConfig = Config::builder()
            .build()
            .and_then(Config::try_deserialize)
            .expect("defaults deserialize");

        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn overrides_are_applied() {
        let config: ClientConfig = Config::builder()
            .set_override("api_base_url", "https://docs.example.com/api/")
            .and_then(|builder| builder.set_override("upload_chunk_size", 1024))
            .and_then(|builder| builder.build())
            .and_then(Config::try_deserialize)
            .expect("overrides deserialize");

        assert_eq!(config.base_url(), "https://docs.example.com/api");
        assert_eq!(config.upload_chunk_size, 1024);
        assert_eq!(config.log_level, "info");
    }
}
