use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::time::Duration;

use crate::constants::{
    DEFAULT_LATENCY_FRESHNESS_SECS, DEFAULT_RELIABILITY_WINDOW_MS, DEFAULT_SIGNAL_TIMEOUT_SECS,
};

/// Engine configuration. Everything here has a working default; a config
/// file only needs to override what it cares about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Per-chain signal fetch timeout in seconds. A fetch that misses the
    /// deadline degrades to documented defaults instead of failing the request.
    #[serde(default = "default_signal_timeout_secs")]
    pub signal_timeout_secs: u64,

    /// Latency samples older than this are ignored (treated as missing).
    #[serde(default = "default_latency_freshness_secs")]
    pub latency_freshness_secs: i64,

    /// Lookback window handed to the reliability-history provider.
    #[serde(default = "default_reliability_window_ms")]
    pub reliability_window_ms: u64,

    /// Default max hop count for requests that do not specify one.
    #[serde(default = "default_max_hops")]
    pub default_max_hops: u8,
}

fn default_signal_timeout_secs() -> u64 {
    DEFAULT_SIGNAL_TIMEOUT_SECS
}

fn default_latency_freshness_secs() -> i64 {
    DEFAULT_LATENCY_FRESHNESS_SECS
}

fn default_reliability_window_ms() -> u64 {
    DEFAULT_RELIABILITY_WINDOW_MS
}

fn default_max_hops() -> u8 {
    2
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            signal_timeout_secs: default_signal_timeout_secs(),
            latency_freshness_secs: default_latency_freshness_secs(),
            reliability_window_ms: default_reliability_window_ms(),
            default_max_hops: default_max_hops(),
        }
    }
}

impl RouterConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: RouterConfig = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    pub fn signal_timeout(&self) -> Duration {
        Duration::from_secs(self.signal_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RouterConfig::default();
        assert_eq!(config.signal_timeout_secs, 5);
        assert_eq!(config.default_max_hops, 2);
    }

    #[test]
    fn test_partial_toml_override() {
        let config: RouterConfig = toml::from_str("signal_timeout_secs = 2").unwrap();
        assert_eq!(config.signal_timeout_secs, 2);
        assert_eq!(config.reliability_window_ms, 24 * 60 * 60 * 1000);
    }
}
