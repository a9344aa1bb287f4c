//! TOML configuration for the backfill binaries
//!
//! Binaries load this once at startup and pass resolved values (API key,
//! addresses, store path) into component constructors; no component reads
//! configuration on its own.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Weather provider credentials and location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_url: String,
    pub api_key: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub host: Option<String>,
    pub base_port: Option<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub provider: Option<ProviderConfig>,
    pub channel: Option<ChannelConfig>,
    pub store: Option<StoreConfig>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing [provider] section (api_url, api_key, latitude, longitude)")]
    MissingProvider,
}

impl AppConfig {
    /// Load configuration from the WXFILL_CONFIG path (TOML) if present,
    /// with reasonable defaults for the channel and store sections
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("WXFILL_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from(&path)
    }

    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let cfg = if Path::new(path).exists() {
            let s = fs::read_to_string(path)?;
            toml::from_str::<AppConfig>(&s)?
        } else {
            AppConfig::default()
        };
        Ok(cfg)
    }

    /// Provider settings have no defaults; the producer refuses to run
    /// without them.
    pub fn provider(&self) -> Result<&ProviderConfig, ConfigError> {
        self.provider.as_ref().ok_or(ConfigError::MissingProvider)
    }

    /// Channel address for one partition (default 127.0.0.1, ports counting
    /// up from 9750)
    pub fn partition_addr(&self, partition: u32) -> String {
        let host = self
            .channel
            .as_ref()
            .and_then(|c| c.host.clone())
            .unwrap_or_else(|| "127.0.0.1".to_string());
        let base_port = self
            .channel
            .as_ref()
            .and_then(|c| c.base_port)
            .unwrap_or(9750);
        format!("{}:{}", host, base_port + partition as u16)
    }

    /// Store path (default "wxfill.db")
    pub fn store_path(&self) -> String {
        self.store
            .as_ref()
            .and_then(|s| s.path.clone())
            .unwrap_or_else(|| "wxfill.db".to_string())
    }
}
