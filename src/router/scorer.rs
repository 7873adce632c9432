use tracing::debug;

use crate::bridges::BridgeProtocolProfile;
use crate::constants::{CHAIN_SCORE_WEIGHT, MIN_STEP_TIME_SECS, PROTOCOL_SCORE_WEIGHT};
use crate::signals::SignalSnapshot;
use crate::types::{BridgeStep, ChainId};

/// Score a single bridge edge into a `BridgeStep`.
///
/// Pure given the snapshot: every signal gap was already resolved to its
/// default during gathering, so this never blocks and never fails.
pub fn score_step(
    source: ChainId,
    destination: ChainId,
    profile: &BridgeProtocolProfile,
    amount_usd: f64,
    snapshot: &SignalSnapshot,
) -> BridgeStep {
    let src = snapshot.chain(source);
    let dst = snapshot.chain(destination);

    let est_time_secs = (profile.baseline_time_secs as f64
        * src.latency_factor
        * dst.latency_factor)
        .max(MIN_STEP_TIME_SECS);

    let est_fee_usd = (profile.base_fee_usd
        + amount_usd * profile.variable_fee_fraction
        + src.gas_bridge_leg_usd
        + dst.gas_transfer_leg_usd)
        .max(0.0);

    let security_score = blend_score(
        profile.security_score,
        src.security_rating,
        dst.security_rating,
    );
    let reliability_score = blend_score(
        profile.reliability_score,
        src.reliability_score,
        dst.reliability_score,
    );

    debug!(
        "scored step {} -> {} via {}: {:.0}s, ${:.2}, sec {}, rel {}",
        source, destination, profile.id, est_time_secs, est_fee_usd, security_score,
        reliability_score
    );

    BridgeStep {
        source_chain: source,
        destination_chain: destination,
        protocol: profile.id.clone(),
        est_time_secs,
        est_fee_usd,
        trust_assumptions: profile.trust_assumptions.clone(),
        security_score,
        reliability_score,
    }
}

/// 0.6 x protocol score + 0.2 x each endpoint chain score, rounded.
fn blend_score(protocol_score: u8, source_score: f64, destination_score: f64) -> u8 {
    let blended = PROTOCOL_SCORE_WEIGHT * protocol_score as f64
        + CHAIN_SCORE_WEIGHT * source_score
        + CHAIN_SCORE_WEIGHT * destination_score;
    blended.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::ChainSignals;
    use crate::types::ProtocolId;
    use std::collections::HashMap;

    fn chain(id: u64) -> ChainId {
        ChainId::new(id).unwrap()
    }

    fn profile() -> BridgeProtocolProfile {
        BridgeProtocolProfile::new(
            ProtocolId::new("test"),
            "Test",
            80,
            90,
            [chain(1), chain(2)],
            1.0,
            0.01,
            600,
            vec!["validator quorum".to_string()],
        )
        .unwrap()
    }

    fn snapshot(entries: &[(u64, ChainSignals)]) -> SignalSnapshot {
        SignalSnapshot::from_signals(
            entries
                .iter()
                .map(|&(id, signals)| (chain(id), signals))
                .collect::<HashMap<_, _>>(),
        )
    }

    #[test]
    fn test_time_multiplies_both_latency_factors() {
        let snapshot = snapshot(&[
            (1, ChainSignals { latency_factor: 1.2, ..Default::default() }),
            (2, ChainSignals { latency_factor: 1.1, ..Default::default() }),
        ]);
        let step = score_step(chain(1), chain(2), &profile(), 1000.0, &snapshot);
        assert!((step.est_time_secs - 600.0 * 1.2 * 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_missing_chain_defaults_apply() {
        // Nothing staged at all: factor 1.5 each side, neutral 50 ratings.
        let step = score_step(chain(1), chain(2), &profile(), 1000.0, &SignalSnapshot::default());
        assert!((step.est_time_secs - 600.0 * 1.5 * 1.5).abs() < 1e-9);
        // 0.6*80 + 0.2*50 + 0.2*50 = 68
        assert_eq!(step.security_score, 68);
        // 0.6*90 + 0.2*50 + 0.2*50 = 74
        assert_eq!(step.reliability_score, 74);
    }

    #[test]
    fn test_fee_composition() {
        let snapshot = snapshot(&[
            (
                1,
                ChainSignals { gas_bridge_leg_usd: 4.0, gas_transfer_leg_usd: 9.0, ..Default::default() },
            ),
            (
                2,
                ChainSignals { gas_bridge_leg_usd: 7.0, gas_transfer_leg_usd: 2.5, ..Default::default() },
            ),
        ]);
        let step = score_step(chain(1), chain(2), &profile(), 1000.0, &snapshot);
        // base 1 + 1000*0.01 + bridge leg on source (4.0) + transfer leg on dest (2.5)
        assert!((step.est_fee_usd - (1.0 + 10.0 + 4.0 + 2.5)).abs() < 1e-9);
    }

    #[test]
    fn test_security_blend_uses_both_endpoints() {
        let snapshot = snapshot(&[
            (1, ChainSignals { security_rating: 90.0, ..Default::default() }),
            (2, ChainSignals { security_rating: 70.0, ..Default::default() }),
        ]);
        let step = score_step(chain(1), chain(2), &profile(), 100.0, &snapshot);
        // 0.6*80 + 0.2*90 + 0.2*70 = 80
        assert_eq!(step.security_score, 80);
    }

    #[test]
    fn test_step_outputs_are_finite_and_positive() {
        let step = score_step(chain(1), chain(2), &profile(), 0.000001, &SignalSnapshot::default());
        assert!(step.est_time_secs > 0.0);
        assert!(step.est_fee_usd >= 0.0);
        assert!(step.est_time_secs.is_finite());
        assert!(step.est_fee_usd.is_finite());
    }
}
