pub mod aggregator;
pub mod engine;
pub mod paths;
pub mod scorer;
pub mod selector;
pub mod validator;

use crate::bridges::CatalogError;
use crate::types::ChainId;

/// Routing operation result type
pub type RouterResult<T> = Result<T, RouterError>;

/// Routing-engine errors. Only structurally invalid requests abort a call;
/// missing or stale signal data always degrades to documented defaults.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("source and destination chain are the same: {0}")]
    SameChain(ChainId),

    #[error("transfer amount must be positive, got {0}")]
    InvalidAmount(f64),

    #[error("maximum hop count must be at least 1")]
    InvalidHopCount,

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

// Re-exports
pub use engine::CrossChainRouter;
pub use paths::find_paths;
pub use selector::{select, sort_for_display};
pub use validator::validate;
