//! Threshold-run orchestration.
//!
//! The hits table and label registry are loaded once and shared read-only;
//! every requested threshold then gets an independent run that rebuilds the
//! graph, detects communities, and emits its own report/image set. Runs
//! share no mutable state and write threshold-unique paths, so they fan out
//! across a rayon thread pool. A failing run never aborts its siblings;
//! failures are collected and surfaced together at the end.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use log::info;
use rayon::prelude::*;

use crate::community::{
    group_members, modularity, prune_cross_community_edges, CommunityDetection, GreedyModularity,
};
use crate::error::{Error, Result};
use crate::graph::build_graph;
use crate::hits::{load_hits, HitRecord};
use crate::labels::{load_labels, LabelInfo};
use crate::render::{encode_png, render_network, RenderOptions};
use crate::report;

/// Everything one invocation needs. No process-global state: construct one
/// of these and hand it to [`run`].
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Hits table written by the external search tool.
    pub hits_path: PathBuf,
    /// Directory receiving all reports and images. Must exist.
    pub output_dir: PathBuf,
    /// Score thresholds, each processed independently.
    pub thresholds: Vec<f64>,
    /// Minimum query and target coverage for keeping a hit.
    pub coverage: f64,
    /// Optional node annotation file.
    pub label_path: Option<PathBuf>,
    /// Rendering knobs shared by all runs.
    pub render: RenderOptions,
}

/// Execute every threshold run.
///
/// Returns [`Error::ThresholdRuns`] after all runs finish if any of them
/// failed; input loading errors abort up front.
pub fn run(config: &PipelineConfig) -> Result<()> {
    let hits = load_hits(&config.hits_path)?;
    let labels = load_labels(config.label_path.as_deref())?;
    info!(
        "{} hits loaded, {} label entries, {} threshold run(s)",
        hits.len(),
        labels.len(),
        config.thresholds.len()
    );

    let mut failures: Vec<(f64, String)> = config
        .thresholds
        .par_iter()
        .filter_map(|&threshold| {
            run_threshold(config, &hits, &labels, threshold)
                .err()
                .map(|e| (threshold, e.to_string()))
        })
        .collect();

    if failures.is_empty() {
        Ok(())
    } else {
        failures.sort_by(|a, b| a.0.total_cmp(&b.0));
        Err(Error::ThresholdRuns(failures))
    }
}

fn run_threshold(
    config: &PipelineConfig,
    hits: &[HitRecord],
    labels: &HashMap<String, LabelInfo>,
    threshold: f64,
) -> Result<()> {
    let mut graph = build_graph(hits, threshold, config.coverage);
    let assignment = GreedyModularity::new().detect(&graph)?;
    let communities = group_members(&assignment);

    info!(
        "threshold {threshold}: {} nodes, {} edges, {} communities, Q = {:.4}",
        graph.node_count(),
        graph.edge_count(),
        communities.len(),
        modularity(&graph, &assignment)
    );

    // Materialize the full output set before touching the filesystem so a
    // run either writes everything or nothing.
    let members = report::members_table(&graph, &communities);
    let counts = report::counts_table(&communities);
    let note = report::threshold_note(threshold);

    prune_cross_community_edges(&mut graph, &assignment);
    let canvas = render_network(&graph, &assignment, labels, &config.render);
    let image = report::image_path(&config.output_dir, threshold);
    let png = encode_png(canvas, &image)?;

    let outputs: [(PathBuf, Vec<u8>); 4] = [
        (
            report::members_path(&config.output_dir, threshold),
            members.into_bytes(),
        ),
        (
            report::counts_path(&config.output_dir, threshold),
            counts.into_bytes(),
        ),
        (
            report::note_path(&config.output_dir, threshold),
            note.into_bytes(),
        ),
        (image, png),
    ];

    for (written, (path, bytes)) in outputs.iter().enumerate() {
        if let Err(source) = fs::write(path, bytes) {
            for (done, _) in &outputs[..written] {
                let _ = fs::remove_file(done);
            }
            return Err(Error::Io {
                path: path.clone(),
                source,
            });
        }
    }
    for (path, _) in &outputs {
        info!("wrote {}", path.display());
    }
    Ok(())
}
