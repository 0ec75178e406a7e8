//! Community detection trait.

use crate::error::Result;
use crate::graph::SimilarityGraph;

/// Trait for community detection over a similarity graph.
///
/// Abstracting the partitioning step lets implementations be swapped as long
/// as they honor the determinism contract: a fixed graph (same nodes, edges,
/// weights, and insertion order) must always yield the same partition and
/// the same community numbering.
pub trait CommunityDetection {
    /// Partition the graph into communities.
    ///
    /// Returns a mapping from node index to community id; ids are
    /// consecutive integers starting at 0 in the implementation's output
    /// order. An empty graph yields an empty mapping.
    fn detect(&self, graph: &SimilarityGraph) -> Result<Vec<usize>>;
}
