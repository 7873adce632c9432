use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ChainId, Priority, TxCategory};

/// Freshest network-speed measurement for a chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LatencySample {
    /// Round-trip latency in milliseconds
    pub milliseconds: f64,

    /// Whether the probe succeeded; failed probes carry untrustworthy timings
    pub success: bool,

    /// When the sample was taken
    pub sampled_at: DateTime<Utc>,
}

impl LatencySample {
    /// Sample age in whole seconds (never negative).
    pub fn age_secs(&self, now: DateTime<Utc>) -> i64 {
        (now - self.sampled_at).num_seconds().max(0)
    }
}

/// Live per-chain latency source. `None` means no sample exists; the engine
/// falls back to the documented degraded default.
#[async_trait]
pub trait LatencyProvider: Send + Sync + std::fmt::Debug {
    async fn latest_sample(&self, chain: ChainId) -> Option<LatencySample>;
}

/// Historical per-chain uptime/reliability score source (0-100).
#[async_trait]
pub trait ReliabilityProvider: Send + Sync + std::fmt::Debug {
    async fn reliability_score(&self, chain: ChainId, window_ms: u64) -> Option<f64>;
}

/// Independently computed per-chain security rating source (0-100).
#[async_trait]
pub trait SecurityProvider: Send + Sync + std::fmt::Debug {
    async fn security_rating(&self, chain: ChainId) -> Option<f64>;
}

/// Value-denominated gas cost of one on-chain leg.
#[async_trait]
pub trait CostEstimator: Send + Sync + std::fmt::Debug {
    async fn estimate_gas_cost_usd(
        &self,
        chain: ChainId,
        category: TxCategory,
        priority: Priority,
    ) -> Option<f64>;
}

/// Bundle of the four collaborator handles the engine consumes. Owned by the
/// caller and injected at construction; the engine never reaches for ambient
/// state.
#[derive(Debug, Clone)]
pub struct SignalProviders {
    pub latency: Arc<dyn LatencyProvider>,
    pub reliability: Arc<dyn ReliabilityProvider>,
    pub security: Arc<dyn SecurityProvider>,
    pub gas: Arc<dyn CostEstimator>,
}

impl SignalProviders {
    pub fn new(
        latency: Arc<dyn LatencyProvider>,
        reliability: Arc<dyn ReliabilityProvider>,
        security: Arc<dyn SecurityProvider>,
        gas: Arc<dyn CostEstimator>,
    ) -> Self {
        Self {
            latency,
            reliability,
            security,
            gas,
        }
    }
}
