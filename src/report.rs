//! Tabular community reports.
//!
//! Each threshold run writes a membership table, a member-count table, and a
//! note recording the threshold itself. Table content is assembled in memory
//! first so a run's outputs can be written all-or-nothing. File names embed
//! the threshold's display form verbatim; callers must keep numeric
//! representations consistent across a run for predictable names.

use std::path::{Path, PathBuf};

use petgraph::graph::NodeIndex;

use crate::graph::SimilarityGraph;

/// Membership table: `Community\tProtein`, rows grouped by community id.
pub fn members_table(graph: &SimilarityGraph, communities: &[Vec<NodeIndex>]) -> String {
    let mut content = String::from("Community\tProtein\n");
    for (id, community) in communities.iter().enumerate() {
        for &node in community {
            content.push_str(&format!("{id}\t{}\n", graph[node]));
        }
    }
    content
}

/// Count table: `Community\tMemberCount`, one row per community.
pub fn counts_table(communities: &[Vec<NodeIndex>]) -> String {
    let mut content = String::from("Community\tMemberCount\n");
    for (id, community) in communities.iter().enumerate() {
        content.push_str(&format!("{id}\t{}\n", community.len()));
    }
    content
}

/// Plain-text record of the threshold used for a run.
pub fn threshold_note(threshold: f64) -> String {
    format!("Threshold used for community detection: {threshold}\n")
}

/// Path of the membership table for a threshold.
pub fn members_path(dir: &Path, threshold: f64) -> PathBuf {
    dir.join(format!("community_members_threshold_{threshold}.tsv"))
}

/// Path of the count table for a threshold.
pub fn counts_path(dir: &Path, threshold: f64) -> PathBuf {
    dir.join(format!("community_counts_threshold_{threshold}.tsv"))
}

/// Path of the threshold note for a threshold.
pub fn note_path(dir: &Path, threshold: f64) -> PathBuf {
    dir.join(format!("community_threshold_{threshold}.txt"))
}

/// Path of the rendered network image for a threshold.
pub fn image_path(dir: &Path, threshold: f64) -> PathBuf {
    dir.join(format!(
        "protein_similarity_network_clusters_threshold_{threshold}.png"
    ))
}
