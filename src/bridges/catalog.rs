use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::types::{ChainId, ProtocolId};

/// Catalog-level errors. Raised at the boundary when profiles or edges are
/// registered, never from inside scoring.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CatalogError {
    #[error("protocol already declared: {0}")]
    DuplicateProtocol(ProtocolId),

    #[error("unknown protocol: {0}")]
    UnknownProtocol(ProtocolId),

    #[error("protocol {protocol} does not support chain {chain}")]
    UnsupportedChain { protocol: ProtocolId, chain: ChainId },

    #[error("bridge edge cannot connect a chain to itself: {0}")]
    SameChain(ChainId),

    #[error("invalid protocol profile: {reason}")]
    InvalidProfile { reason: String },
}

/// Immutable per-protocol record: scores, fee model, baseline time and the
/// chains the protocol is able to touch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BridgeProtocolProfile {
    /// Protocol identifier
    pub id: ProtocolId,

    /// Human-readable display name
    pub name: String,

    /// Protocol security score (0-100)
    pub security_score: u8,

    /// Protocol reliability score (0-100)
    pub reliability_score: u8,

    /// Chains this protocol can touch
    pub supported_chains: BTreeSet<ChainId>,

    /// Fixed fee per transfer, in value units
    pub base_fee_usd: f64,

    /// Variable fee as a fraction of the transfer amount, clamped to [0, 1]
    pub variable_fee_fraction: f64,

    /// Baseline transfer time in seconds, before latency adjustment
    pub baseline_time_secs: u64,

    /// Human-readable trust assumptions (e.g. "validator quorum")
    pub trust_assumptions: Vec<String>,
}

impl BridgeProtocolProfile {
    /// Build a profile, clamping scores to [0, 100] and the variable fee
    /// fraction to [0, 1]. Rejects empty chain sets and non-finite fees.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ProtocolId,
        name: impl Into<String>,
        security_score: u8,
        reliability_score: u8,
        supported_chains: impl IntoIterator<Item = ChainId>,
        base_fee_usd: f64,
        variable_fee_fraction: f64,
        baseline_time_secs: u64,
        trust_assumptions: Vec<String>,
    ) -> Result<Self, CatalogError> {
        let supported_chains: BTreeSet<ChainId> = supported_chains.into_iter().collect();
        if supported_chains.len() < 2 {
            return Err(CatalogError::InvalidProfile {
                reason: format!("protocol {id} must support at least two chains"),
            });
        }
        if !base_fee_usd.is_finite() || base_fee_usd < 0.0 {
            return Err(CatalogError::InvalidProfile {
                reason: format!("protocol {id} base fee must be finite and non-negative"),
            });
        }
        if !variable_fee_fraction.is_finite() {
            return Err(CatalogError::InvalidProfile {
                reason: format!("protocol {id} variable fee must be finite"),
            });
        }
        Ok(Self {
            id,
            name: name.into(),
            security_score: security_score.min(100),
            reliability_score: reliability_score.min(100),
            supported_chains,
            base_fee_usd,
            variable_fee_fraction: variable_fee_fraction.clamp(0.0, 1.0),
            baseline_time_secs: baseline_time_secs.max(1),
            trust_assumptions,
        })
    }

    pub fn supports_chain(&self, chain: ChainId) -> bool {
        self.supported_chains.contains(&chain)
    }
}

/// One officially supported directed bridge edge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct CatalogEdge {
    source: ChainId,
    destination: ChainId,
    protocol: ProtocolId,
}

/// A caller-registered (source, destination, protocol) triple. Additive only:
/// custom entries extend connectivity and restrict protocol choice on their
/// edge, they never remove a catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomBridge {
    pub source: ChainId,
    pub destination: ChainId,
    pub protocol: ProtocolId,
}

/// Static registry of bridge protocols and the chain pairs each one
/// officially serves. Declaration order matters: protocol-choice ties break
/// toward the first listed protocol.
#[derive(Debug, Clone, Default)]
pub struct BridgeCatalog {
    profiles: Vec<BridgeProtocolProfile>,
    by_id: HashMap<ProtocolId, usize>,
    edges: Vec<CatalogEdge>,
}

impl BridgeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a protocol profile. Duplicate ids are rejected.
    pub fn add_profile(&mut self, profile: BridgeProtocolProfile) -> Result<(), CatalogError> {
        if self.by_id.contains_key(&profile.id) {
            return Err(CatalogError::DuplicateProtocol(profile.id));
        }
        self.by_id.insert(profile.id.clone(), self.profiles.len());
        self.profiles.push(profile);
        Ok(())
    }

    /// Declare an officially supported one-way bridge edge.
    pub fn add_edge(
        &mut self,
        source: ChainId,
        destination: ChainId,
        protocol: &ProtocolId,
    ) -> Result<(), CatalogError> {
        if source == destination {
            return Err(CatalogError::SameChain(source));
        }
        let profile = self
            .profile(protocol)
            .ok_or_else(|| CatalogError::UnknownProtocol(protocol.clone()))?;
        for chain in [source, destination] {
            if !profile.supports_chain(chain) {
                return Err(CatalogError::UnsupportedChain {
                    protocol: protocol.clone(),
                    chain,
                });
            }
        }
        self.edges.push(CatalogEdge {
            source,
            destination,
            protocol: protocol.clone(),
        });
        Ok(())
    }

    /// Declare an edge in both directions.
    pub fn add_edge_bidirectional(
        &mut self,
        a: ChainId,
        b: ChainId,
        protocol: &ProtocolId,
    ) -> Result<(), CatalogError> {
        self.add_edge(a, b, protocol)?;
        self.add_edge(b, a, protocol)
    }

    pub fn profile(&self, id: &ProtocolId) -> Option<&BridgeProtocolProfile> {
        self.by_id.get(id).map(|&i| &self.profiles[i])
    }

    pub fn profiles(&self) -> &[BridgeProtocolProfile] {
        &self.profiles
    }

    /// Chains referenced by at least one official edge.
    pub fn edge_chains(&self) -> BTreeSet<ChainId> {
        self.edges
            .iter()
            .flat_map(|e| [e.source, e.destination])
            .collect()
    }

    /// Default mainnet catalog: the protocols and official pairs the engine
    /// ships with. Chains outside this table enter through custom bridges.
    pub fn default_mainnet() -> Self {
        let mut catalog = Self::new();
        let assume = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        // Declaration order is meaningful: stargate wins security ties.
        let entries = [
            (
                "stargate",
                "Stargate",
                88,
                95,
                vec![
                    ChainId::ETHEREUM,
                    ChainId::OPTIMISM,
                    ChainId::BSC,
                    ChainId::POLYGON,
                    ChainId::ARBITRUM,
                    ChainId::AVALANCHE,
                ],
                1.5,
                0.0006,
                180,
                assume(&["LayerZero oracle/relayer separation", "unified liquidity pools"]),
            ),
            (
                "hop",
                "Hop Protocol",
                85,
                96,
                vec![
                    ChainId::ETHEREUM,
                    ChainId::OPTIMISM,
                    ChainId::POLYGON,
                    ChainId::ARBITRUM,
                ],
                1.0,
                0.0008,
                300,
                assume(&["bonder liquidity", "optimistic challenge period"]),
            ),
            (
                "across",
                "Across",
                84,
                94,
                vec![
                    ChainId::ETHEREUM,
                    ChainId::OPTIMISM,
                    ChainId::POLYGON,
                    ChainId::ARBITRUM,
                ],
                0.8,
                0.0005,
                240,
                assume(&["UMA optimistic oracle", "relayer capital"]),
            ),
            (
                "synapse",
                "Synapse",
                80,
                92,
                vec![
                    ChainId::ETHEREUM,
                    ChainId::BSC,
                    ChainId::POLYGON,
                    ChainId::ARBITRUM,
                    ChainId::AVALANCHE,
                ],
                1.2,
                0.001,
                360,
                assume(&["validator quorum", "nUSD liquidity pools"]),
            ),
        ];

        for (id, name, sec, rel, chains, base_fee, var_fee, time, assumptions) in entries {
            let profile = BridgeProtocolProfile::new(
                ProtocolId::new(id),
                name,
                sec,
                rel,
                chains,
                base_fee,
                var_fee,
                time,
                assumptions,
            )
            .expect("built-in profile is valid");
            catalog.add_profile(profile).expect("built-in profile is unique");
        }

        // Official pairs. Deliberately not a full mesh: L2 <-> alt-L1 traffic
        // goes through a hub chain, which is what multi-hop routing is for.
        let pairs: [(&str, ChainId, ChainId); 10] = [
            ("stargate", ChainId::ETHEREUM, ChainId::OPTIMISM),
            ("stargate", ChainId::ETHEREUM, ChainId::ARBITRUM),
            ("stargate", ChainId::ETHEREUM, ChainId::BSC),
            ("stargate", ChainId::ETHEREUM, ChainId::AVALANCHE),
            ("hop", ChainId::ETHEREUM, ChainId::POLYGON),
            ("hop", ChainId::OPTIMISM, ChainId::ARBITRUM),
            ("across", ChainId::ETHEREUM, ChainId::OPTIMISM),
            ("across", ChainId::ETHEREUM, ChainId::ARBITRUM),
            ("across", ChainId::POLYGON, ChainId::ARBITRUM),
            ("synapse", ChainId::BSC, ChainId::AVALANCHE),
        ];
        for (protocol, a, b) in pairs {
            let id = ProtocolId::new(protocol);
            catalog
                .add_edge_bidirectional(a, b, &id)
                .expect("built-in edge references a declared protocol");
        }

        catalog
    }
}

/// Point-in-time, de-duplicated union of catalog edges and custom bridges.
/// The path enumerator and protocol chooser search over this view; building
/// it up front keeps a routing request deterministic even if a writer appends
/// custom bridges mid-flight.
#[derive(Debug, Clone)]
pub struct ConnectivityView {
    /// (source, destination) -> profile indices, catalog declaration order
    catalog_edges: HashMap<(ChainId, ChainId), Vec<usize>>,

    /// (source, destination) -> profile indices, registration order
    custom_edges: HashMap<(ChainId, ChainId), Vec<usize>>,

    profiles: Vec<BridgeProtocolProfile>,

    chains: BTreeSet<ChainId>,
}

impl ConnectivityView {
    /// Build the view from the static catalog plus a snapshot of the custom
    /// registry. Custom triples referencing unknown protocols were rejected
    /// at registration, so lookups here are infallible.
    pub fn build(catalog: &BridgeCatalog, customs: &[CustomBridge]) -> Self {
        let profiles = catalog.profiles.to_vec();
        let index_of: HashMap<&ProtocolId, usize> = profiles
            .iter()
            .enumerate()
            .map(|(i, p)| (&p.id, i))
            .collect();

        let mut catalog_edges: HashMap<(ChainId, ChainId), Vec<usize>> = HashMap::new();
        let mut chains = BTreeSet::new();
        for edge in &catalog.edges {
            if let Some(&idx) = index_of.get(&edge.protocol) {
                let slot = catalog_edges.entry((edge.source, edge.destination)).or_default();
                if !slot.contains(&idx) {
                    slot.push(idx);
                }
                chains.insert(edge.source);
                chains.insert(edge.destination);
            }
        }

        let mut custom_edges: HashMap<(ChainId, ChainId), Vec<usize>> = HashMap::new();
        for custom in customs {
            if let Some(&idx) = index_of.get(&custom.protocol) {
                let slot = custom_edges
                    .entry((custom.source, custom.destination))
                    .or_default();
                if !slot.contains(&idx) {
                    slot.push(idx);
                }
                chains.insert(custom.source);
                chains.insert(custom.destination);
            }
        }

        Self {
            catalog_edges,
            custom_edges,
            profiles,
            chains,
        }
    }

    /// Whether any protocol (catalog or custom) serves this directed edge.
    pub fn has_edge(&self, source: ChainId, destination: ChainId) -> bool {
        self.catalog_edges.contains_key(&(source, destination))
            || self.custom_edges.contains_key(&(source, destination))
    }

    /// All protocols serving an edge: catalog entries first (declaration
    /// order), then customs (registration order), de-duplicated.
    pub fn protocols(
        &self,
        source: ChainId,
        destination: ChainId,
    ) -> Vec<&BridgeProtocolProfile> {
        let key = (source, destination);
        let mut seen = Vec::new();
        let mut out = Vec::new();
        let catalog = self.catalog_edges.get(&key).into_iter().flatten();
        let custom = self.custom_edges.get(&key).into_iter().flatten();
        for &idx in catalog.chain(custom) {
            if !seen.contains(&idx) {
                seen.push(idx);
                out.push(&self.profiles[idx]);
            }
        }
        out
    }

    /// Pick the protocol to score for an edge.
    ///
    /// Custom registrations restrict the choice to themselves (that is how a
    /// caller overrides the default). Otherwise the highest raw security
    /// score wins, ties going to the first declared protocol.
    pub fn choose_protocol(
        &self,
        source: ChainId,
        destination: ChainId,
    ) -> Option<&BridgeProtocolProfile> {
        let key = (source, destination);
        let candidates: Vec<&BridgeProtocolProfile> =
            if let Some(customs) = self.custom_edges.get(&key) {
                customs.iter().map(|&i| &self.profiles[i]).collect()
            } else {
                self.catalog_edges
                    .get(&key)?
                    .iter()
                    .map(|&i| &self.profiles[i])
                    .collect()
            };

        // Linear scan with strict > keeps the first-listed winner on ties.
        let mut best: Option<&BridgeProtocolProfile> = None;
        for profile in candidates {
            match best {
                Some(current) if profile.security_score <= current.security_score => {}
                _ => best = Some(profile),
            }
        }
        best
    }

    /// Every chain touched by at least one edge in the view.
    pub fn chains(&self) -> &BTreeSet<ChainId> {
        &self.chains
    }
}
