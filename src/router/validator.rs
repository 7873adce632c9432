use crate::types::{CrossChainRoute, KnownChains, RouteValidation};

/// Structural consistency check on a route before it is handed to execution
/// code. Advisory: reports issues as data, never mutates, never panics.
pub fn validate(route: &CrossChainRoute, known_chains: &KnownChains) -> RouteValidation {
    let mut issues = Vec::new();

    if route.steps.is_empty() {
        issues.push("route has no steps".to_string());
        return RouteValidation::invalid(issues);
    }

    // Every referenced chain must exist in the configured universe.
    let mut flagged = Vec::new();
    for chain in route.chain_sequence() {
        if !known_chains.contains(&chain) && !flagged.contains(&chain) {
            flagged.push(chain);
            issues.push(format!("unknown chain referenced by route: {chain}"));
        }
    }
    for step in &route.steps {
        if !known_chains.contains(&step.source_chain) && !flagged.contains(&step.source_chain) {
            flagged.push(step.source_chain);
            issues.push(format!(
                "unknown chain referenced by route: {}",
                step.source_chain
            ));
        }
    }

    if let Some(first) = route.steps.first() {
        if first.source_chain != route.source_chain {
            issues.push(format!(
                "first step departs from chain {} but the route declares source {}",
                first.source_chain, route.source_chain
            ));
        }
    }

    for (i, pair) in route.steps.windows(2).enumerate() {
        if pair[0].destination_chain != pair[1].source_chain {
            issues.push(format!(
                "discontinuous route: step {} arrives on chain {} but step {} departs from chain {}",
                i,
                pair[0].destination_chain,
                i + 1,
                pair[1].source_chain
            ));
        }
    }

    if let Some(last) = route.steps.last() {
        if last.destination_chain != route.destination_chain {
            issues.push(format!(
                "last step arrives on chain {} but the route declares destination {}",
                last.destination_chain, route.destination_chain
            ));
        }
    }

    if issues.is_empty() {
        RouteValidation::valid()
    } else {
        RouteValidation::invalid(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BridgeStep, ChainId, ProtocolId, RiskTier};
    use chrono::Utc;

    fn chain(id: u64) -> ChainId {
        ChainId::new(id).unwrap()
    }

    fn step(from: u64, to: u64) -> BridgeStep {
        BridgeStep {
            source_chain: chain(from),
            destination_chain: chain(to),
            protocol: ProtocolId::new("test"),
            est_time_secs: 600.0,
            est_fee_usd: 1.0,
            trust_assumptions: vec![],
            security_score: 80,
            reliability_score: 80,
        }
    }

    fn route(source: u64, destination: u64, steps: Vec<BridgeStep>) -> CrossChainRoute {
        CrossChainRoute {
            route_id: "test".to_string(),
            source_chain: chain(source),
            destination_chain: chain(destination),
            steps,
            total_time_secs: 600.0,
            total_fee_usd: 1.0,
            security_score: 80,
            reliability_score: 80,
            risk_tier: RiskTier::Low,
            created_at: Utc::now(),
        }
    }

    fn known(ids: &[u64]) -> KnownChains {
        ids.iter().map(|&i| chain(i)).collect()
    }

    #[test]
    fn test_well_formed_route_passes() {
        let result = validate(
            &route(1, 3, vec![step(1, 2), step(2, 3)]),
            &known(&[1, 2, 3]),
        );
        assert!(result.ok);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_zero_step_route_is_never_valid() {
        let result = validate(&route(1, 3, vec![]), &known(&[1, 3]));
        assert!(!result.ok);
        assert_eq!(result.issues, vec!["route has no steps".to_string()]);
    }

    #[test]
    fn test_discontinuity_is_reported() {
        // Step 0 arrives on chain 2, step 1 departs from chain 4.
        let result = validate(
            &route(1, 3, vec![step(1, 2), step(4, 3)]),
            &known(&[1, 2, 3, 4]),
        );
        assert!(!result.ok);
        assert!(result.issues.iter().any(|i| i.contains("discontinuous")));
    }

    #[test]
    fn test_unknown_chain_is_reported_once() {
        let result = validate(
            &route(1, 3, vec![step(1, 9), step(9, 3)]),
            &known(&[1, 3]),
        );
        assert!(!result.ok);
        let unknown: Vec<_> = result
            .issues
            .iter()
            .filter(|i| i.contains("unknown chain"))
            .collect();
        assert_eq!(unknown.len(), 1);
    }

    #[test]
    fn test_endpoint_mismatches_are_reported() {
        let result = validate(&route(1, 3, vec![step(2, 4)]), &known(&[1, 2, 3, 4]));
        assert!(!result.ok);
        assert!(result.issues.iter().any(|i| i.contains("declares source")));
        assert!(result.issues.iter().any(|i| i.contains("declares destination")));
    }
}
