//! Runtime options controlling manifest caching behaviour.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

const DEFAULT_CONFIG_FILE: &str = "loader.config.json";

const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Options consumed by [`crate::Loader`] at construction time.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoaderOptions {
    /// Disables manifest caching entirely, forcing a disk read on every load.
    pub debug: bool,
    /// Seconds a cached manifest stays fresh before the next disk read.
    pub cache_ttl_secs: u64,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            debug: false,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl LoaderOptions {
    /// Attempt to load options from the provided directory.
    ///
    /// When the configuration file does not exist or fails to parse we fall back to
    /// default values so downstream callers can continue operating with sensible
    /// assumptions.
    pub fn discover(dir: &Path) -> Self {
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        Self::from_path(&candidate).unwrap_or_default()
    }

    /// Read options from a specific JSON file.
    pub fn from_path(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Cache entry lifetime as a [`Duration`].
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
