use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Upper bound the articles API enforces on `limit`. The client clamps before
/// sending so the request reflects what it will actually get.
pub const MAX_FETCH_LIMIT: u32 = 500;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub feed: FeedConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub base_url: String,
    pub fetch_limit: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.stonksfeed.com/articles".to_string(),
            fetch_limit: 200,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub prefs_path: String,
    pub log_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            prefs_path: "newsdeck_prefs.json".to_string(),
            log_path: "newsdeck.log".to_string(),
        }
    }
}

impl Config {
    /// Read a TOML config file. A missing file yields the defaults so the app
    /// runs with no setup at all.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).with_context(|| "failed to parse config TOML")?;
        Ok(config)
    }

    /// Configured fetch limit after the server-side cap.
    pub fn fetch_limit(&self) -> u32 {
        self.feed.fetch_limit.min(MAX_FETCH_LIMIT)
    }
}
