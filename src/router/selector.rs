use std::cmp::Ordering;

use crate::constants::{
    BALANCED_COST_WEIGHT, BALANCED_RELIABILITY_WEIGHT, BALANCED_SECURITY_WEIGHT,
    BALANCED_TIME_WEIGHT,
};
use crate::types::{CrossChainRoute, OptimizationCriterion};

/// Pick the best route for a criterion. Empty input yields `None`.
///
/// Linear scans with strict comparisons keep the first-seen route on exact
/// ties, so selection is reproducible for a fixed candidate order.
pub fn select<'a>(
    routes: &'a [CrossChainRoute],
    criterion: OptimizationCriterion,
) -> Option<&'a CrossChainRoute> {
    match criterion {
        OptimizationCriterion::Security => routes.iter().reduce(|best, candidate| {
            match candidate.security_score.cmp(&best.security_score) {
                Ordering::Greater => candidate,
                // Equal security: the cheaper route wins.
                Ordering::Equal if candidate.total_fee_usd < best.total_fee_usd => candidate,
                _ => best,
            }
        }),
        OptimizationCriterion::Cost => routes.iter().reduce(|best, candidate| {
            if candidate.total_fee_usd < best.total_fee_usd {
                candidate
            } else {
                best
            }
        }),
        OptimizationCriterion::Speed => routes.iter().reduce(|best, candidate| {
            if candidate.total_time_secs < best.total_time_secs {
                candidate
            } else {
                best
            }
        }),
        OptimizationCriterion::Balanced => {
            // A lone candidate normalizes cost/time to 1 and wins by default.
            if routes.len() == 1 {
                return routes.first();
            }
            let max_fee = routes
                .iter()
                .map(|r| r.total_fee_usd)
                .fold(f64::NEG_INFINITY, f64::max);
            let max_time = routes
                .iter()
                .map(|r| r.total_time_secs)
                .fold(f64::NEG_INFINITY, f64::max);

            routes
                .iter()
                .map(|r| (r, balanced_score(r, max_fee, max_time)))
                .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best })
                .map(|(route, _)| route)
        }
    }
}

/// Fixed-weight blend over metrics normalized across the candidate set.
/// A single-route set (or an all-zero metric) normalizes cost/time to 1.
fn balanced_score(route: &CrossChainRoute, max_fee: f64, max_time: f64) -> f64 {
    let security_norm = route.security_score as f64 / 100.0;
    let reliability_norm = route.reliability_score as f64 / 100.0;
    let cost_norm = if max_fee > 0.0 {
        1.0 - route.total_fee_usd / max_fee
    } else {
        1.0
    };
    let time_norm = if max_time > 0.0 {
        1.0 - route.total_time_secs / max_time
    } else {
        1.0
    };

    BALANCED_SECURITY_WEIGHT * security_norm
        + BALANCED_RELIABILITY_WEIGHT * reliability_norm
        + BALANCED_COST_WEIGHT * cost_norm
        + BALANCED_TIME_WEIGHT * time_norm
}

/// Display order for the full candidate list: ascending risk tier, then
/// ascending fee. Stable, independent of the selected route.
pub fn sort_for_display(routes: &mut [CrossChainRoute]) {
    routes.sort_by(|a, b| {
        a.risk_tier.cmp(&b.risk_tier).then_with(|| {
            a.total_fee_usd
                .partial_cmp(&b.total_fee_usd)
                .unwrap_or(Ordering::Equal)
        })
    });
}
