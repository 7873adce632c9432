use std::collections::{BTreeSet, HashMap};

use chrono::Utc;
use futures::future::join_all;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::config::RouterConfig;
use crate::constants::{DEFAULT_LATENCY_FACTOR, NEUTRAL_CHAIN_SCORE};
use crate::signals::providers::SignalProviders;
use crate::types::{ChainId, Priority, TxCategory};

/// Resolved signal values for one chain, with every gap already filled by the
/// documented defaults. Scoring is pure once it has these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainSignals {
    /// Multiplier applied to baseline bridge times (>= 1.0)
    pub latency_factor: f64,

    /// Chain security rating (0-100)
    pub security_rating: f64,

    /// Chain reliability history score (0-100)
    pub reliability_score: f64,

    /// Gas cost of a bridge deposit leg on this chain, in value units
    pub gas_bridge_leg_usd: f64,

    /// Gas cost of a receive/transfer leg on this chain, in value units
    pub gas_transfer_leg_usd: f64,
}

impl Default for ChainSignals {
    fn default() -> Self {
        Self {
            latency_factor: DEFAULT_LATENCY_FACTOR,
            security_rating: NEUTRAL_CHAIN_SCORE,
            reliability_score: NEUTRAL_CHAIN_SCORE,
            gas_bridge_leg_usd: 0.0,
            gas_transfer_leg_usd: 0.0,
        }
    }
}

/// Immutable bundle of per-chain signals gathered ahead of scoring.
#[derive(Debug, Clone, Default)]
pub struct SignalSnapshot {
    signals: HashMap<ChainId, ChainSignals>,
}

impl SignalSnapshot {
    /// Signals for a chain; chains missing from the snapshot resolve to the
    /// degraded defaults.
    pub fn chain(&self, chain: ChainId) -> ChainSignals {
        self.signals.get(&chain).copied().unwrap_or_default()
    }

    /// Manually assembled snapshot, for tests and offline scoring.
    pub fn from_signals(signals: HashMap<ChainId, ChainSignals>) -> Self {
        Self { signals }
    }

    /// Fan out one timeout-bounded fetch bundle per chain and fan back in.
    ///
    /// A fetch that times out or errors never blocks the others and never
    /// fails the request; that chain simply degrades to default signals.
    pub async fn gather(
        providers: &SignalProviders,
        chains: &BTreeSet<ChainId>,
        priority: Priority,
        config: &RouterConfig,
    ) -> Self {
        let deadline = config.signal_timeout();
        let fetches = chains.iter().map(|&chain| {
            let providers = providers.clone();
            let window_ms = config.reliability_window_ms;
            let freshness_secs = config.latency_freshness_secs;
            async move {
                let bundle = fetch_chain_signals(&providers, chain, priority, window_ms, freshness_secs);
                match timeout(deadline, bundle).await {
                    Ok(signals) => (chain, signals),
                    Err(_) => {
                        warn!("⏰ signal fetch timed out for chain {}, using defaults", chain);
                        (chain, ChainSignals::default())
                    }
                }
            }
        });

        let resolved = join_all(fetches).await;
        debug!("📡 gathered signals for {} chains", resolved.len());
        Self {
            signals: resolved.into_iter().collect(),
        }
    }
}

async fn fetch_chain_signals(
    providers: &SignalProviders,
    chain: ChainId,
    priority: Priority,
    window_ms: u64,
    freshness_secs: i64,
) -> ChainSignals {
    let (sample, reliability, security, gas_bridge, gas_transfer) = tokio::join!(
        providers.latency.latest_sample(chain),
        providers.reliability.reliability_score(chain, window_ms),
        providers.security.security_rating(chain),
        providers.gas.estimate_gas_cost_usd(chain, TxCategory::BridgeLeg, priority),
        providers.gas.estimate_gas_cost_usd(chain, TxCategory::TransferLeg, priority),
    );

    let now = Utc::now();
    let latency_factor = match sample {
        Some(s) if s.success && s.milliseconds.is_finite() && s.age_secs(now) <= freshness_secs => {
            (1.0 + s.milliseconds / 1000.0).max(1.0)
        }
        _ => DEFAULT_LATENCY_FACTOR,
    };

    ChainSignals {
        latency_factor,
        security_rating: sanitize_score(security),
        reliability_score: sanitize_score(reliability),
        gas_bridge_leg_usd: sanitize_cost(gas_bridge),
        gas_transfer_leg_usd: sanitize_cost(gas_transfer),
    }
}

fn sanitize_score(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v.clamp(0.0, 100.0),
        _ => NEUTRAL_CHAIN_SCORE,
    }
}

fn sanitize_cost(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => v,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::StaticSignals;
    use std::collections::BTreeSet;
    use tokio::time::Duration;

    fn chain(id: u64) -> ChainId {
        ChainId::new(id).unwrap()
    }

    fn chains(ids: &[u64]) -> BTreeSet<ChainId> {
        ids.iter().map(|&i| chain(i)).collect()
    }

    #[tokio::test]
    async fn test_gather_resolves_fresh_signals() {
        let providers = StaticSignals::new()
            .with_latency_ms(chain(1), 250.0)
            .with_security(chain(1), 92.0)
            .with_reliability(chain(1), 97.0)
            .with_gas(chain(1), TxCategory::BridgeLeg, 4.0)
            .into_providers();

        let snapshot = SignalSnapshot::gather(
            &providers,
            &chains(&[1]),
            Priority::Medium,
            &RouterConfig::default(),
        )
        .await;

        let signals = snapshot.chain(chain(1));
        assert!((signals.latency_factor - 1.25).abs() < 1e-9);
        assert_eq!(signals.security_rating, 92.0);
        assert_eq!(signals.reliability_score, 97.0);
        assert_eq!(signals.gas_bridge_leg_usd, 4.0);
        assert_eq!(signals.gas_transfer_leg_usd, 0.0);
    }

    #[tokio::test]
    async fn test_gather_defaults_for_unknown_chain() {
        let providers = StaticSignals::new().into_providers();
        let snapshot = SignalSnapshot::gather(
            &providers,
            &chains(&[7]),
            Priority::Medium,
            &RouterConfig::default(),
        )
        .await;

        assert_eq!(snapshot.chain(chain(7)), ChainSignals::default());
        // Chains never gathered also resolve to defaults.
        assert_eq!(snapshot.chain(chain(99)), ChainSignals::default());
    }

    #[tokio::test]
    async fn test_failed_probe_degrades_to_default_factor() {
        let providers = StaticSignals::new()
            .with_failed_latency(chain(1), 80.0)
            .into_providers();
        let snapshot = SignalSnapshot::gather(
            &providers,
            &chains(&[1]),
            Priority::Medium,
            &RouterConfig::default(),
        )
        .await;
        assert_eq!(snapshot.chain(chain(1)).latency_factor, DEFAULT_LATENCY_FACTOR);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_provider_times_out_without_blocking_others() {
        let providers = StaticSignals::new()
            .with_latency_ms(chain(1), 250.0)
            .with_latency_ms(chain(2), 250.0)
            .with_chain_delay(chain(2), Duration::from_secs(30))
            .into_providers();

        let snapshot = SignalSnapshot::gather(
            &providers,
            &chains(&[1, 2]),
            Priority::Medium,
            &RouterConfig::default(),
        )
        .await;

        // Chain 1 resolved normally, chain 2 hit the deadline and degraded.
        assert!((snapshot.chain(chain(1)).latency_factor - 1.25).abs() < 1e-9);
        assert_eq!(snapshot.chain(chain(2)), ChainSignals::default());
    }

    #[tokio::test]
    async fn test_stale_sample_is_ignored() {
        // Sampled an hour ago, far beyond the 5 minute freshness window.
        let providers = StaticSignals::new()
            .with_stale_latency(chain(1), 200.0, 3600)
            .into_providers();
        let snapshot = SignalSnapshot::gather(
            &providers,
            &chains(&[1]),
            Priority::Medium,
            &RouterConfig::default(),
        )
        .await;
        assert_eq!(snapshot.chain(chain(1)).latency_factor, DEFAULT_LATENCY_FACTOR);
    }

    #[tokio::test]
    async fn test_latency_floor_is_one() {
        // A negative latency sample must never produce a factor below 1.
        let providers = StaticSignals::new()
            .with_latency_ms(chain(1), -400.0)
            .into_providers();
        let snapshot = SignalSnapshot::gather(
            &providers,
            &chains(&[1]),
            Priority::Medium,
            &RouterConfig::default(),
        )
        .await;
        assert_eq!(snapshot.chain(chain(1)).latency_factor, 1.0);
    }
}
