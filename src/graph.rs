//! Similarity graph construction.
//!
//! Hits are filtered against a score threshold and a coverage cutoff, and the
//! survivors become edges of an undirected simple graph weighted by score.
//! Nodes exist only by virtue of a qualifying edge.

use std::collections::HashMap;

use log::debug;
use petgraph::graph::{NodeIndex, UnGraph};

use crate::hits::HitRecord;

/// Undirected similarity network: node weights are sequence ids, edge
/// weights are scores.
pub type SimilarityGraph = UnGraph<String, f64>;

/// Build the similarity graph for one threshold run.
///
/// A record contributes an edge iff `score >= threshold`, both coverages are
/// `>= coverage`, and query and target differ (self-hits are dropped). Ids
/// are compared as raw strings. When several qualifying records cover the
/// same unordered pair (including the two directions of a symmetric hit),
/// the record processed last overwrites the stored weight. Keep the hits
/// file in a stable order if reproducible weights matter.
pub fn build_graph(hits: &[HitRecord], threshold: f64, coverage: f64) -> SimilarityGraph {
    let mut graph = SimilarityGraph::new_undirected();
    let mut indices: HashMap<&str, NodeIndex> = HashMap::new();

    for hit in hits {
        if hit.score >= threshold
            && hit.query_coverage >= coverage
            && hit.target_coverage >= coverage
            && hit.query_id != hit.target_id
        {
            let query = *indices
                .entry(hit.query_id.as_str())
                .or_insert_with(|| graph.add_node(hit.query_id.clone()));
            let target = *indices
                .entry(hit.target_id.as_str())
                .or_insert_with(|| graph.add_node(hit.target_id.clone()));
            let _ = graph.update_edge(query, target, hit.score);
        }
    }

    debug!(
        "threshold {threshold}: graph has {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    graph
}
