//! Removal of inter-community edges.

use crate::graph::SimilarityGraph;

/// Drop every edge whose endpoints lie in different communities.
///
/// Nodes are left untouched. Modularity is computed on the full edge set
/// before this runs; the pruned graph only feeds rendering, where showing
/// intra-cluster structure alone lets the layout pull clusters apart.
pub fn prune_cross_community_edges(graph: &mut SimilarityGraph, assignment: &[usize]) {
    graph.retain_edges(|g, e| match g.edge_endpoints(e) {
        Some((a, b)) => assignment[a.index()] == assignment[b.index()],
        None => false,
    });
}
