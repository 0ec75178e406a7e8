//! # simnet
//!
//! Turn pairwise sequence-similarity hits into a clustered similarity
//! network: filter hits by score and coverage into a weighted undirected
//! graph, partition it by greedy modularity maximization, report community
//! membership as TSV tables, and render the intra-community structure as a
//! labeled PNG. Multiple score thresholds are processed independently from
//! one hits table.
//!
//! The hits table comes from an external all-vs-all search tool
//! (tab-separated `query, target, score, qcov, tcov`); running that tool is
//! outside this crate.
//!
//! ```no_run
//! use simnet::pipeline::{run, PipelineConfig};
//! use simnet::render::RenderOptions;
//!
//! let config = PipelineConfig {
//!     hits_path: "result.tsv".into(),
//!     output_dir: "out".into(),
//!     thresholds: vec![0.5, 0.7],
//!     coverage: 0.8,
//!     label_path: None,
//!     render: RenderOptions::default(),
//! };
//! run(&config)?;
//! # Ok::<(), simnet::Error>(())
//! ```

pub mod community;
/// Error types used across `simnet`.
pub mod error;
pub mod graph;
pub mod hits;
pub mod labels;
pub mod pipeline;
pub mod render;
pub mod report;

pub use community::{
    group_members, modularity, prune_cross_community_edges, CommunityDetection, GreedyModularity,
};
pub use error::{Error, Result};
pub use graph::{build_graph, SimilarityGraph};
pub use hits::{load_hits, HitRecord};
pub use labels::{load_labels, LabelInfo};
pub use pipeline::{run, PipelineConfig};
pub use render::{render_network, RenderOptions};
