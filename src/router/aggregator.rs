use chrono::Utc;
use uuid::Uuid;

use crate::constants::{LOW_RISK_MIN_SCORE, MEDIUM_RISK_MIN_SCORE};
use crate::types::{BridgeStep, CrossChainRoute, RiskTier};

/// Compose an ordered sequence of scored steps into one route.
///
/// Times and fees sum; security and reliability are fee-weighted averages,
/// falling back to the unweighted mean for pathological zero-fee routes.
/// Zero steps means no route, not a zero-step route.
pub fn aggregate(steps: Vec<BridgeStep>) -> Option<CrossChainRoute> {
    let first = steps.first()?;
    let last = steps.last()?;
    let source_chain = first.source_chain;
    let destination_chain = last.destination_chain;

    let total_time_secs: f64 = steps.iter().map(|s| s.est_time_secs).sum();
    let total_fee_usd: f64 = steps.iter().map(|s| s.est_fee_usd).sum();

    let security_score = weighted_score(&steps, total_fee_usd, |s| s.security_score);
    let reliability_score = weighted_score(&steps, total_fee_usd, |s| s.reliability_score);
    let risk_tier = classify_risk(security_score, reliability_score);

    Some(CrossChainRoute {
        route_id: Uuid::new_v4().to_string(),
        source_chain,
        destination_chain,
        steps,
        total_time_secs,
        total_fee_usd,
        security_score,
        reliability_score,
        risk_tier,
        created_at: Utc::now(),
    })
}

/// Fee-weighted average of a per-step score; unweighted mean when the route
/// carries no fee at all.
fn weighted_score(steps: &[BridgeStep], total_fee_usd: f64, score: impl Fn(&BridgeStep) -> u8) -> u8 {
    let averaged = if total_fee_usd > 0.0 {
        steps
            .iter()
            .map(|s| (s.est_fee_usd / total_fee_usd) * score(s) as f64)
            .sum::<f64>()
    } else {
        steps.iter().map(|s| score(s) as f64).sum::<f64>() / steps.len() as f64
    };
    averaged.round().clamp(0.0, 100.0) as u8
}

/// Hard two-threshold classifier, boundaries inclusive.
pub fn classify_risk(security_score: u8, reliability_score: u8) -> RiskTier {
    if security_score >= LOW_RISK_MIN_SCORE && reliability_score >= LOW_RISK_MIN_SCORE {
        RiskTier::Low
    } else if security_score >= MEDIUM_RISK_MIN_SCORE && reliability_score >= MEDIUM_RISK_MIN_SCORE
    {
        RiskTier::Medium
    } else {
        RiskTier::High
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChainId, ProtocolId};

    fn chain(id: u64) -> ChainId {
        ChainId::new(id).unwrap()
    }

    fn step(from: u64, to: u64, fee: f64, security: u8, reliability: u8) -> BridgeStep {
        BridgeStep {
            source_chain: chain(from),
            destination_chain: chain(to),
            protocol: ProtocolId::new("test"),
            est_time_secs: 600.0,
            est_fee_usd: fee,
            trust_assumptions: vec![],
            security_score: security,
            reliability_score: reliability,
        }
    }

    #[test]
    fn test_zero_steps_yields_no_route() {
        assert!(aggregate(vec![]).is_none());
    }

    #[test]
    fn test_totals_sum_over_steps() {
        let route = aggregate(vec![
            step(1, 2, 10.0, 80, 80),
            step(2, 3, 30.0, 80, 80),
        ])
        .unwrap();
        assert_eq!(route.source_chain, chain(1));
        assert_eq!(route.destination_chain, chain(3));
        assert!((route.total_time_secs - 1200.0).abs() < 1e-9);
        assert!((route.total_fee_usd - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_scores_are_fee_weighted() {
        // Weights 0.25 and 0.75: 0.25*100 + 0.75*60 = 70
        let route = aggregate(vec![
            step(1, 2, 10.0, 100, 40),
            step(2, 3, 30.0, 60, 80),
        ])
        .unwrap();
        assert_eq!(route.security_score, 70);
        // 0.25*40 + 0.75*80 = 70
        assert_eq!(route.reliability_score, 70);
    }

    #[test]
    fn test_zero_fee_route_falls_back_to_unweighted_mean() {
        let route = aggregate(vec![
            step(1, 2, 0.0, 90, 70),
            step(2, 3, 0.0, 70, 90),
        ])
        .unwrap();
        assert_eq!(route.total_fee_usd, 0.0);
        assert_eq!(route.security_score, 80);
        assert_eq!(route.reliability_score, 80);
    }

    #[test]
    fn test_risk_tier_boundaries_are_inclusive() {
        assert_eq!(classify_risk(80, 80), RiskTier::Low);
        assert_eq!(classify_risk(79, 90), RiskTier::Medium);
        assert_eq!(classify_risk(60, 60), RiskTier::Medium);
        assert_eq!(classify_risk(59, 100), RiskTier::High);
        assert_eq!(classify_risk(100, 59), RiskTier::High);
    }
}
