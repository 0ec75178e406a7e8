//! Force-directed node placement.
//!
//! Nodes are seeded on a circle in insertion order, then a spring/charge
//! simulation with fixed parameters runs for a fixed number of ticks. With
//! no randomness anywhere the layout of a given graph is identical on every
//! run. Cross-community edges are pruned before layout, so the missing
//! attraction lets separate clusters drift apart.

use std::f32::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use petgraph::visit::EdgeRef;

use crate::graph::SimilarityGraph;

/// Simulation constants for one layout pass.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Node repulsion strength.
    pub repulsion: f32,
    /// Spring force of edges.
    pub spring: f32,
    /// Number of simulation ticks.
    pub iterations: usize,
    /// Simulated seconds per tick.
    pub time_step: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            repulsion: 150.0,
            spring: 0.05,
            iterations: 50,
            time_step: 0.02,
        }
    }
}

/// Compute a position for every node, indexed like the graph's nodes, fit
/// into a `width` x `height` canvas with a margin.
pub fn spring_layout(
    graph: &SimilarityGraph,
    width: u32,
    height: u32,
    options: &LayoutOptions,
) -> Vec<(f32, f32)> {
    let n = graph.node_count();
    if n == 0 {
        return Vec::new();
    }

    let mut sim = ForceGraph::<usize, ()>::new(SimulationParameters {
        force_charge: options.repulsion,
        force_spring: options.spring,
        force_max: 100.0,
        node_speed: 3000.0,
        damping_factor: 0.9,
    });

    let center = (width as f32 / 2.0, height as f32 / 2.0);
    let ring = width.min(height) as f32 / 4.0;
    let mut handles: Vec<DefaultNodeIdx> = Vec::with_capacity(n);
    for i in 0..n {
        let angle = i as f32 * 2.0 * PI / n as f32;
        handles.push(sim.add_node(NodeData {
            x: center.0 + ring * angle.cos(),
            y: center.1 + ring * angle.sin(),
            mass: 10.0,
            is_anchor: false,
            user_data: i,
        }));
    }
    for edge in graph.edge_references() {
        sim.add_edge(
            handles[edge.source().index()],
            handles[edge.target().index()],
            EdgeData::default(),
        );
    }

    for _ in 0..options.iterations {
        sim.update(options.time_step);
    }

    let mut positions = vec![(0.0f32, 0.0f32); n];
    sim.visit_nodes(|node| {
        positions[node.data.user_data] = (node.x(), node.y());
    });

    fit_to_canvas(&mut positions, width, height);
    positions
}

/// Rescale positions into the canvas, keeping a margin. Degenerate extents
/// (single node, or a simulation collapse) land on the center.
fn fit_to_canvas(positions: &mut [(f32, f32)], width: u32, height: u32) {
    let margin = width.min(height) as f32 * 0.05;
    let (mut min_x, mut min_y) = (f32::INFINITY, f32::INFINITY);
    let (mut max_x, mut max_y) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
    for &(x, y) in positions.iter() {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }

    let span_x = (max_x - min_x).max(1e-6);
    let span_y = (max_y - min_y).max(1e-6);
    let usable_x = width as f32 - 2.0 * margin;
    let usable_y = height as f32 - 2.0 * margin;

    for pos in positions.iter_mut() {
        if max_x - min_x < 1e-6 && max_y - min_y < 1e-6 {
            *pos = (width as f32 / 2.0, height as f32 / 2.0);
        } else {
            pos.0 = margin + (pos.0 - min_x) / span_x * usable_x;
            pos.1 = margin + (pos.1 - min_y) / span_y * usable_y;
        }
    }
}
