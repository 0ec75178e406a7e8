//! Network image rendering.
//!
//! Draws the pruned similarity graph: grey edges first, then every node as
//! a disc colored by its community, then the registered highlight nodes on
//! top with their own color, size, and label, and finally a legend bar
//! mapping community ids to palette colors. Axes and decorations are
//! deliberately absent; the background stays white.

mod canvas;
mod layout;
mod palette;

pub use canvas::Canvas;
pub use layout::{spring_layout, LayoutOptions};
pub use palette::{community_color, label_color, palette_len};

use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};
use crate::graph::SimilarityGraph;
use crate::labels::{LabelInfo, DEFAULT_LABEL_SIZE};

const EDGE_COLOR: (u8, u8, u8) = (128, 128, 128);
const EDGE_ALPHA: f32 = 0.5;
const NODE_ALPHA: f32 = 0.8;
const LABEL_TEXT_COLOR: (u8, u8, u8) = (0, 0, 0);

/// Rendering knobs for one threshold run.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Radius of an unhighlighted node.
    pub node_radius: f32,
    /// Integer magnification of the 8x8 label font.
    pub label_font_scale: u32,
    /// Layout simulation constants.
    pub layout: LayoutOptions,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 2000,
            height: 2000,
            node_radius: 12.0,
            label_font_scale: 5,
            layout: LayoutOptions::default(),
        }
    }
}

/// Render the pruned graph into a canvas.
///
/// Label entries whose node is absent from the graph are skipped silently.
/// A zero-node graph produces a blank canvas.
pub fn render_network(
    graph: &SimilarityGraph,
    assignment: &[usize],
    labels: &HashMap<String, LabelInfo>,
    options: &RenderOptions,
) -> Canvas {
    use petgraph::visit::EdgeRef;

    let mut canvas = Canvas::new(options.width, options.height);
    let positions = spring_layout(graph, options.width, options.height, &options.layout);
    if positions.is_empty() {
        return canvas;
    }

    for edge in graph.edge_references() {
        let (sx, sy) = positions[edge.source().index()];
        let (tx, ty) = positions[edge.target().index()];
        canvas.draw_line(sx, sy, tx, ty, EDGE_COLOR, EDGE_ALPHA);
    }

    for (node, &(x, y)) in positions.iter().enumerate() {
        canvas.fill_circle(
            x,
            y,
            options.node_radius,
            community_color(assignment[node]),
            NODE_ALPHA,
        );
    }

    // Highlight pass; sorted ids keep overlapping draws reproducible.
    let index_of: HashMap<&str, usize> = graph
        .node_indices()
        .map(|i| (graph[i].as_str(), i.index()))
        .collect();
    let mut highlighted: Vec<(&String, &LabelInfo)> = labels.iter().collect();
    highlighted.sort_by(|a, b| a.0.cmp(b.0));
    for (id, info) in highlighted {
        let Some(&node) = index_of.get(id.as_str()) else {
            debug!("label node {id} not in graph, skipping");
            continue;
        };
        let (x, y) = positions[node];
        let radius =
            options.node_radius * (info.size as f32 / DEFAULT_LABEL_SIZE as f32).sqrt();
        canvas.fill_circle(x, y, radius, label_color(&info.color), 1.0);
        if !info.label.is_empty() {
            let glyph = 8 * options.label_font_scale as i64;
            canvas.draw_text(
                (x + radius) as i64 + 4,
                y as i64 - glyph / 2,
                &info.label,
                options.label_font_scale,
                LABEL_TEXT_COLOR,
            );
        }
    }

    draw_legend(&mut canvas, assignment);
    canvas
}

/// Vertical color bar on the right edge: one stripe per community, top to
/// bottom in id order.
fn draw_legend(canvas: &mut Canvas, assignment: &[usize]) {
    let communities = assignment.iter().max().map_or(0, |&c| c + 1);
    if communities == 0 {
        return;
    }
    let bar_width = (canvas.width() / 80).max(8);
    let usable = canvas.height() - canvas.height() / 10;
    let stripe = (usable / communities as u32).clamp(2, 40);
    let x = (canvas.width() - bar_width - bar_width / 2) as i64;
    let y0 = (canvas
        .height()
        .saturating_sub(stripe * communities as u32)
        / 2) as i64;

    for community in 0..communities {
        canvas.fill_rect(
            x,
            y0 + (community as u32 * stripe) as i64,
            bar_width,
            stripe,
            community_color(community),
        );
    }
}

/// Encode a canvas as PNG bytes. `path` is only used for error context;
/// nothing is written here.
pub fn encode_png(canvas: Canvas, path: &Path) -> Result<Vec<u8>> {
    let (width, height) = (canvas.width(), canvas.height());
    let Some(img) = image::RgbImage::from_raw(width, height, canvas.into_rgb()) else {
        return Err(Error::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "raster buffer does not match image dimensions",
            ),
        });
    };

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::Other, e),
        })?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::LabelInfo;

    fn two_node_graph() -> SimilarityGraph {
        let mut graph = SimilarityGraph::new_undirected();
        let a = graph.add_node("p1".to_string());
        let b = graph.add_node("p2".to_string());
        let _ = graph.add_edge(a, b, 0.9);
        graph
    }

    fn small_options() -> RenderOptions {
        RenderOptions {
            width: 120,
            height: 120,
            node_radius: 5.0,
            label_font_scale: 1,
            layout: LayoutOptions::default(),
        }
    }

    #[test]
    fn test_render_marks_pixels() {
        let graph = two_node_graph();
        let canvas = render_network(&graph, &[0, 0], &HashMap::new(), &small_options());

        let colored = canvas
            .buffer()
            .chunks(4)
            .filter(|c| (c[0], c[1], c[2]) != (255, 255, 255))
            .count();
        assert!(colored > 0);
    }

    #[test]
    fn test_empty_graph_renders_blank() {
        let graph = SimilarityGraph::new_undirected();
        let canvas = render_network(&graph, &[], &HashMap::new(), &small_options());

        assert!(canvas.buffer().iter().all(|&b| b == 255));
    }

    #[test]
    fn test_unknown_label_node_skipped() {
        let graph = two_node_graph();
        let mut labels = HashMap::new();
        labels.insert(
            "ghost".to_string(),
            LabelInfo {
                label: "Ghost".to_string(),
                color: "blue".to_string(),
                size: 300,
            },
        );

        // Completes without panicking; the ghost node contributes nothing.
        let canvas = render_network(&graph, &[0, 0], &labels, &small_options());
        assert_eq!(canvas.width(), 120);
    }

    #[test]
    fn test_render_is_deterministic() {
        let graph = two_node_graph();
        let options = small_options();

        let first = render_network(&graph, &[0, 0], &HashMap::new(), &options);
        let second = render_network(&graph, &[0, 0], &HashMap::new(), &options);

        assert_eq!(first.buffer(), second.buffer());
    }

    #[test]
    fn test_encode_png_signature() {
        let canvas = Canvas::new(16, 16);
        let bytes = encode_png(canvas, Path::new("/tmp/test.png")).unwrap();

        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }
}
