use crate::bridges::ConnectivityView;
use crate::types::ChainId;

/// Enumerate candidate chain sequences from `source` to `destination`.
///
/// A direct edge always wins outright: when one exists the single direct
/// path is returned alone, without searching for one-hop alternatives.
/// Otherwise every chain `mid` with live `source -> mid` and
/// `mid -> destination` edges yields `[source, mid, destination]`, emitted
/// in ascending `mid` order for determinism. Paths never revisit a chain,
/// and anything longer than one intermediate chain is out of scope.
pub fn find_paths(
    source: ChainId,
    destination: ChainId,
    view: &ConnectivityView,
    max_hops: u8,
) -> Vec<Vec<ChainId>> {
    if source == destination || max_hops == 0 {
        return Vec::new();
    }

    if view.has_edge(source, destination) {
        return vec![vec![source, destination]];
    }

    if max_hops < 2 {
        return Vec::new();
    }

    // BTreeSet iteration is already ascending by chain id.
    view.chains()
        .iter()
        .copied()
        .filter(|&mid| mid != source && mid != destination)
        .filter(|&mid| view.has_edge(source, mid) && view.has_edge(mid, destination))
        .map(|mid| vec![source, mid, destination])
        .collect()
}
