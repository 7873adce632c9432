//! In-memory signal providers for tests and offline demos.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use tokio::time::Duration;

use crate::signals::providers::{
    CostEstimator, LatencyProvider, LatencySample, ReliabilityProvider, SecurityProvider,
    SignalProviders,
};
use crate::types::{ChainId, Priority, TxCategory};

/// Configurable static signal source. Every lookup returns whatever was
/// staged for that chain, or `None`, which exercises the engine's default
/// paths. Per-chain delays simulate slow collectors for timeout tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSignals {
    latencies: HashMap<ChainId, LatencySample>,
    reliability: HashMap<ChainId, f64>,
    security: HashMap<ChainId, f64>,
    gas: HashMap<(ChainId, TxCategory), f64>,
    delays: HashMap<ChainId, Duration>,
}

impl StaticSignals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a fresh, successful latency sample.
    pub fn with_latency_ms(mut self, chain: ChainId, milliseconds: f64) -> Self {
        self.latencies.insert(
            chain,
            LatencySample {
                milliseconds,
                success: true,
                sampled_at: Utc::now(),
            },
        );
        self
    }

    /// Stage a failed probe; the engine must ignore its timing.
    pub fn with_failed_latency(mut self, chain: ChainId, milliseconds: f64) -> Self {
        self.latencies.insert(
            chain,
            LatencySample {
                milliseconds,
                success: false,
                sampled_at: Utc::now(),
            },
        );
        self
    }

    /// Stage a successful sample taken `age_secs` ago.
    pub fn with_stale_latency(mut self, chain: ChainId, milliseconds: f64, age_secs: i64) -> Self {
        self.latencies.insert(
            chain,
            LatencySample {
                milliseconds,
                success: true,
                sampled_at: Utc::now() - ChronoDuration::seconds(age_secs),
            },
        );
        self
    }

    pub fn with_reliability(mut self, chain: ChainId, score: f64) -> Self {
        self.reliability.insert(chain, score);
        self
    }

    pub fn with_security(mut self, chain: ChainId, rating: f64) -> Self {
        self.security.insert(chain, rating);
        self
    }

    pub fn with_gas(mut self, chain: ChainId, category: TxCategory, usd: f64) -> Self {
        self.gas.insert((chain, category), usd);
        self
    }

    /// Delay every lookup for one chain, to exercise fetch timeouts.
    pub fn with_chain_delay(mut self, chain: ChainId, delay: Duration) -> Self {
        self.delays.insert(chain, delay);
        self
    }

    /// Wrap this source into the provider bundle the engine consumes.
    pub fn into_providers(self) -> SignalProviders {
        let shared = Arc::new(self);
        SignalProviders::new(shared.clone(), shared.clone(), shared.clone(), shared)
    }

    async fn apply_delay(&self, chain: ChainId) {
        if let Some(delay) = self.delays.get(&chain) {
            tokio::time::sleep(*delay).await;
        }
    }
}

#[async_trait]
impl LatencyProvider for StaticSignals {
    async fn latest_sample(&self, chain: ChainId) -> Option<LatencySample> {
        self.apply_delay(chain).await;
        self.latencies.get(&chain).cloned()
    }
}

#[async_trait]
impl ReliabilityProvider for StaticSignals {
    async fn reliability_score(&self, chain: ChainId, _window_ms: u64) -> Option<f64> {
        self.apply_delay(chain).await;
        self.reliability.get(&chain).copied()
    }
}

#[async_trait]
impl SecurityProvider for StaticSignals {
    async fn security_rating(&self, chain: ChainId) -> Option<f64> {
        self.apply_delay(chain).await;
        self.security.get(&chain).copied()
    }
}

#[async_trait]
impl CostEstimator for StaticSignals {
    async fn estimate_gas_cost_usd(
        &self,
        chain: ChainId,
        category: TxCategory,
        _priority: Priority,
    ) -> Option<f64> {
        self.apply_delay(chain).await;
        self.gas.get(&(chain, category)).copied()
    }
}
