pub mod providers;
pub mod snapshot;

// Re-exports
pub use providers::{
    CostEstimator, LatencyProvider, LatencySample, ReliabilityProvider, SecurityProvider,
    SignalProviders,
};
pub use snapshot::{ChainSignals, SignalSnapshot};
