pub mod catalog;

// Re-exports
pub use catalog::{
    BridgeCatalog, BridgeProtocolProfile, CatalogError, ConnectivityView, CustomBridge,
};
