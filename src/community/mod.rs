//! Community structure of the similarity network.
//!
//! A community is a set of nodes whose internal edges are denser than the
//! random expectation; the partition maximizing **modularity** groups
//! sequences that hit each other far more often than chance. This module
//! provides the detection seam ([`CommunityDetection`]), the greedy
//! modularity implementation used by the pipeline, the partition helpers
//! shared by reporting and rendering, and the pruning step that strips
//! inter-community edges before layout.
//!
//! Community ids are stable, consecutive integers in the detector's output
//! order. They carry no meaning beyond serving as color and report keys.

mod greedy;
mod pruning;
mod traits;

pub use greedy::{modularity, GreedyModularity};
pub use pruning::prune_cross_community_edges;
pub use traits::CommunityDetection;

use petgraph::graph::NodeIndex;

/// Group an assignment into per-community member lists.
///
/// Index `c` of the result holds community `c`'s members in ascending
/// node-insertion order, which is the iteration order used by the
/// membership report. The lists partition the node set: exhaustive and
/// disjoint.
pub fn group_members(assignment: &[usize]) -> Vec<Vec<NodeIndex>> {
    let count = assignment.iter().max().map_or(0, |&c| c + 1);
    let mut members = vec![Vec::new(); count];
    for (node, &community) in assignment.iter().enumerate() {
        members[community].push(NodeIndex::new(node));
    }
    members
}
