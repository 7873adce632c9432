use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Chain identifier (EVM-style numeric network id).
///
/// The chain universe is open: users can register custom bridges that touch
/// chains the default catalog has never heard of, so this is a validated
/// newtype rather than a closed enum. Zero is reserved/invalid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct ChainId(u64);

impl ChainId {
    /// Well-known mainnet ids used by the default catalog.
    pub const ETHEREUM: ChainId = ChainId(1);
    pub const OPTIMISM: ChainId = ChainId(10);
    pub const BSC: ChainId = ChainId(56);
    pub const POLYGON: ChainId = ChainId(137);
    pub const ARBITRUM: ChainId = ChainId(42161);
    pub const AVALANCHE: ChainId = ChainId(43114);

    /// Create a chain id. Zero is rejected.
    pub fn new(id: u64) -> Option<Self> {
        if id == 0 {
            None
        } else {
            Some(Self(id))
        }
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bridge protocol identifier (lowercase slug, e.g. "stargate").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct ProtocolId(String);

impl ProtocolId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProtocolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Request priority; feeds the per-leg gas cost estimates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

/// On-chain transaction category for gas estimation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TxCategory {
    /// Deposit/lock leg on the source chain of a bridge hop.
    BridgeLeg,
    /// Receive/transfer leg on the destination chain.
    TransferLeg,
}

/// Route optimization criterion, supplied per request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationCriterion {
    /// Highest weighted security score (ties: lowest fee).
    Security,
    /// Lowest total fee.
    Cost,
    /// Lowest total time.
    Speed,
    /// Fixed-weight blend of security, reliability, cost and time.
    Balanced,
}

impl FromStr for OptimizationCriterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "security" => Ok(OptimizationCriterion::Security),
            "cost" => Ok(OptimizationCriterion::Cost),
            "speed" => Ok(OptimizationCriterion::Speed),
            "balanced" => Ok(OptimizationCriterion::Balanced),
            other => Err(format!("unknown optimization criterion: {other}")),
        }
    }
}

/// Coarse risk classification of a route's combined security and reliability.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskTier::Low => write!(f, "low"),
            RiskTier::Medium => write!(f, "medium"),
            RiskTier::High => write!(f, "high"),
        }
    }
}

/// A cross-chain routing request. Constructed per call, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutingRequest {
    /// Source chain
    pub source_chain: ChainId,

    /// Destination chain
    pub destination_chain: ChainId,

    /// Transfer amount in value units (USD terms), must be > 0
    pub amount_usd: f64,

    /// Priority level, affects gas-cost sub-estimates
    pub priority: Priority,

    /// Maximum hop count; `None` falls back to the configured default.
    /// The engine caps at 2 (one intermediate chain) either way.
    pub max_hops: Option<u8>,
}

impl RoutingRequest {
    pub fn new(source_chain: ChainId, destination_chain: ChainId, amount_usd: f64) -> Self {
        Self {
            source_chain,
            destination_chain,
            amount_usd,
            priority: Priority::default(),
            max_hops: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_max_hops(mut self, max_hops: u8) -> Self {
        self.max_hops = Some(max_hops);
        self
    }
}

/// One scored traversal of a single bridge edge. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BridgeStep {
    /// Source chain of this hop
    pub source_chain: ChainId,

    /// Destination chain of this hop
    pub destination_chain: ChainId,

    /// Protocol carrying the hop
    pub protocol: ProtocolId,

    /// Estimated completion time in seconds (> 0)
    pub est_time_secs: f64,

    /// Estimated fee in value units (>= 0), bridge fees plus gas legs
    pub est_fee_usd: f64,

    /// Trust assumptions inherited from the protocol profile
    pub trust_assumptions: Vec<String>,

    /// Security score (0-100)
    pub security_score: u8,

    /// Reliability score (0-100)
    pub reliability_score: u8,
}

/// An ordered, contiguous sequence of scored bridge steps with aggregate
/// metrics. Never mutated after creation; re-scoring produces a new route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrossChainRoute {
    /// Route ID for tracking
    pub route_id: String,

    /// Source chain of the whole route
    pub source_chain: ChainId,

    /// Destination chain of the whole route
    pub destination_chain: ChainId,

    /// Scored hops, in traversal order (non-empty)
    pub steps: Vec<BridgeStep>,

    /// Sum of step times in seconds
    pub total_time_secs: f64,

    /// Sum of step fees in value units
    pub total_fee_usd: f64,

    /// Fee-weighted security score (0-100)
    pub security_score: u8,

    /// Fee-weighted reliability score (0-100)
    pub reliability_score: u8,

    /// Derived risk tier
    pub risk_tier: RiskTier,

    /// When this route was scored
    pub created_at: DateTime<Utc>,
}

impl CrossChainRoute {
    /// Number of bridge hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len()
    }

    /// Every chain the route touches, in traversal order.
    pub fn chain_sequence(&self) -> Vec<ChainId> {
        let mut chains = Vec::with_capacity(self.steps.len() + 1);
        chains.push(self.source_chain);
        for step in &self.steps {
            chains.push(step.destination_chain);
        }
        chains
    }
}

/// Result of a routing request: all viable routes (display-sorted) plus the
/// route selected by the requested optimization criterion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingOutcome {
    /// All candidate routes, sorted by ascending risk tier then fee
    pub routes: Vec<CrossChainRoute>,

    /// Best route per the requested criterion, if any route exists
    pub selected: Option<CrossChainRoute>,
}

/// Outcome of a structural route validation. Advisory only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteValidation {
    pub ok: bool,
    pub issues: Vec<String>,
}

impl RouteValidation {
    pub fn valid() -> Self {
        Self { ok: true, issues: Vec::new() }
    }

    pub fn invalid(issues: Vec<String>) -> Self {
        Self { ok: false, issues }
    }
}

/// Convenience alias for the chain universe handed to the validator.
pub type KnownChains = BTreeSet<ChainId>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_rejects_zero() {
        assert!(ChainId::new(0).is_none());
        assert_eq!(ChainId::new(137), Some(ChainId::POLYGON));
    }

    #[test]
    fn test_protocol_id_normalizes() {
        assert_eq!(ProtocolId::new(" Stargate ").as_str(), "stargate");
    }

    #[test]
    fn test_criterion_parsing() {
        assert_eq!(
            "BALANCED".parse::<OptimizationCriterion>(),
            Ok(OptimizationCriterion::Balanced)
        );
        assert!("cheapest".parse::<OptimizationCriterion>().is_err());
    }

    #[test]
    fn test_risk_tier_ordering() {
        assert!(RiskTier::Low < RiskTier::Medium);
        assert!(RiskTier::Medium < RiskTier::High);
    }

    #[test]
    fn test_chain_sequence() {
        let step = |from: ChainId, to: ChainId| BridgeStep {
            source_chain: from,
            destination_chain: to,
            protocol: ProtocolId::new("stargate"),
            est_time_secs: 600.0,
            est_fee_usd: 1.0,
            trust_assumptions: vec![],
            security_score: 80,
            reliability_score: 80,
        };
        let route = CrossChainRoute {
            route_id: "test".to_string(),
            source_chain: ChainId::ETHEREUM,
            destination_chain: ChainId::ARBITRUM,
            steps: vec![
                step(ChainId::ETHEREUM, ChainId::POLYGON),
                step(ChainId::POLYGON, ChainId::ARBITRUM),
            ],
            total_time_secs: 1200.0,
            total_fee_usd: 2.0,
            security_score: 80,
            reliability_score: 80,
            risk_tier: RiskTier::Low,
            created_at: Utc::now(),
        };
        assert_eq!(
            route.chain_sequence(),
            vec![ChainId::ETHEREUM, ChainId::POLYGON, ChainId::ARBITRUM]
        );
    }
}
