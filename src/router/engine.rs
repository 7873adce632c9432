use std::collections::BTreeSet;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::bridges::{BridgeCatalog, CatalogError, ConnectivityView, CustomBridge};
use crate::config::RouterConfig;
use crate::constants::MAX_SUPPORTED_HOPS;
use crate::router::{aggregator, paths, scorer, selector, validator, RouterError, RouterResult};
use crate::signals::{SignalProviders, SignalSnapshot};
use crate::types::{
    ChainId, CrossChainRoute, KnownChains, OptimizationCriterion, ProtocolId, RouteValidation,
    RoutingOutcome, RoutingRequest,
};

/// Cross-chain route discovery and scoring engine.
///
/// Owns the static catalog and the append-only custom-bridge registry;
/// consumes injected signal providers. `route` is deterministic for a fixed
/// connectivity view and signal snapshot.
#[derive(Debug)]
pub struct CrossChainRouter {
    /// Static protocol catalog
    catalog: BridgeCatalog,

    /// External signal collaborators
    providers: SignalProviders,

    /// Engine configuration
    config: RouterConfig,

    /// Caller-registered custom bridges (single writer, many readers)
    custom_bridges: RwLock<Vec<CustomBridge>>,
}

impl CrossChainRouter {
    pub fn new(catalog: BridgeCatalog, providers: SignalProviders, config: RouterConfig) -> Self {
        Self {
            catalog,
            providers,
            config,
            custom_bridges: RwLock::new(Vec::new()),
        }
    }

    /// Find and rank routes for a request.
    ///
    /// Returns every viable route sorted for display (ascending risk tier,
    /// then fee) plus the route selected by `criterion`. No connectivity is
    /// not an error: the outcome is simply empty with `selected = None`.
    pub async fn route(
        &self,
        request: &RoutingRequest,
        criterion: OptimizationCriterion,
    ) -> RouterResult<RoutingOutcome> {
        self.validate_request(request)?;
        let max_hops = request
            .max_hops
            .unwrap_or(self.config.default_max_hops)
            .min(MAX_SUPPORTED_HOPS);

        let view = self.connectivity().await;
        let candidate_paths = paths::find_paths(
            request.source_chain,
            request.destination_chain,
            &view,
            max_hops,
        );
        if candidate_paths.is_empty() {
            info!(
                "🔍 no connectivity {} -> {} within {} hops",
                request.source_chain, request.destination_chain, max_hops
            );
            return Ok(RoutingOutcome { routes: Vec::new(), selected: None });
        }

        // One signal fetch bundle per distinct chain across all candidates.
        let involved: BTreeSet<ChainId> =
            candidate_paths.iter().flatten().copied().collect();
        let snapshot = SignalSnapshot::gather(
            &self.providers,
            &involved,
            request.priority,
            &self.config,
        )
        .await;

        let mut routes = Vec::new();
        for path in &candidate_paths {
            match self.score_path(path, request, &view, &snapshot) {
                Some(route) => routes.push(route),
                // A path with any unusable edge is dropped, not surfaced
                // as a partial route.
                None => debug!("dropping path without usable edges: {path:?}"),
            }
        }

        selector::sort_for_display(&mut routes);
        let selected = selector::select(&routes, criterion).cloned();

        info!(
            "🏆 {} route(s) {} -> {}, selected: {}",
            routes.len(),
            request.source_chain,
            request.destination_chain,
            selected
                .as_ref()
                .map(|r| r.route_id.as_str())
                .unwrap_or("none")
        );
        Ok(RoutingOutcome { routes, selected })
    }

    /// Register a custom (source, destination, protocol) bridge edge.
    ///
    /// Additive only: the edge extends connectivity and restricts protocol
    /// choice on its pair, it never removes catalog entries. Unknown
    /// protocols and unsupported chains are rejected at this boundary.
    pub async fn register_custom_bridge(
        &self,
        source: ChainId,
        destination: ChainId,
        protocol: ProtocolId,
    ) -> RouterResult<()> {
        if source == destination {
            return Err(RouterError::Catalog(CatalogError::SameChain(source)));
        }
        let profile = self
            .catalog
            .profile(&protocol)
            .ok_or_else(|| CatalogError::UnknownProtocol(protocol.clone()))?;
        for chain in [source, destination] {
            if !profile.supports_chain(chain) {
                return Err(RouterError::Catalog(CatalogError::UnsupportedChain {
                    protocol: protocol.clone(),
                    chain,
                }));
            }
        }

        let mut registry = self.custom_bridges.write().await;
        registry.push(CustomBridge { source, destination, protocol: protocol.clone() });
        info!("🌉 registered custom bridge {} -> {} via {}", source, destination, protocol);
        Ok(())
    }

    /// Validate a route against the currently configured chain universe.
    pub async fn validate_route(&self, route: &CrossChainRoute) -> RouteValidation {
        let known = self.known_chains().await;
        validator::validate(route, &known)
    }

    /// Chains currently reachable: built-in catalog edges plus user-added
    /// custom bridges.
    pub async fn known_chains(&self) -> KnownChains {
        self.connectivity().await.chains().clone()
    }

    async fn connectivity(&self) -> ConnectivityView {
        let customs = self.custom_bridges.read().await;
        ConnectivityView::build(&self.catalog, &customs)
    }

    fn validate_request(&self, request: &RoutingRequest) -> RouterResult<()> {
        if request.source_chain == request.destination_chain {
            return Err(RouterError::SameChain(request.source_chain));
        }
        if !request.amount_usd.is_finite() || request.amount_usd <= 0.0 {
            return Err(RouterError::InvalidAmount(request.amount_usd));
        }
        if request.max_hops == Some(0) {
            return Err(RouterError::InvalidHopCount);
        }
        Ok(())
    }

    /// Score every edge of one candidate path and aggregate the steps.
    fn score_path(
        &self,
        path: &[ChainId],
        request: &RoutingRequest,
        view: &ConnectivityView,
        snapshot: &SignalSnapshot,
    ) -> Option<CrossChainRoute> {
        let mut steps = Vec::with_capacity(path.len().saturating_sub(1));
        for pair in path.windows(2) {
            let profile = view.choose_protocol(pair[0], pair[1])?;
            steps.push(scorer::score_step(
                pair[0],
                pair[1],
                profile,
                request.amount_usd,
                snapshot,
            ));
        }
        aggregator::aggregate(steps)
    }
}
