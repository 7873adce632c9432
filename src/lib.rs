// chainhop-router: cross-chain bridge route discovery and scoring engine.

pub mod bridges;
pub mod config;
pub mod constants;
pub mod mocks;
pub mod router;
pub mod signals;
pub mod types;

// Re-exports for convenience
pub use bridges::{BridgeCatalog, BridgeProtocolProfile, CatalogError, ConnectivityView};
pub use config::RouterConfig;
pub use router::{CrossChainRouter, RouterError, RouterResult};
pub use signals::{
    ChainSignals, CostEstimator, LatencyProvider, LatencySample, ReliabilityProvider,
    SecurityProvider, SignalProviders, SignalSnapshot,
};
pub use types::{
    BridgeStep, ChainId, CrossChainRoute, KnownChains, OptimizationCriterion, Priority,
    ProtocolId, RiskTier, RouteValidation, RoutingOutcome, RoutingRequest, TxCategory,
};
