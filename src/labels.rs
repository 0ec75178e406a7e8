//! Per-node display annotations.
//!
//! An optional tab-separated file selects nodes to highlight in the rendered
//! network: `node[\tlabel[\tcolor[\tsize]]]`, no header. Missing trailing
//! fields take defaults; if a node id appears twice the last line wins.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::ReaderBuilder;
use log::debug;

use crate::error::{Error, Result};

/// Default highlight color for labeled nodes.
pub const DEFAULT_LABEL_COLOR: &str = "red";
/// Default marker size for labeled nodes (relative area units).
pub const DEFAULT_LABEL_SIZE: u32 = 300;

/// Display metadata for one highlighted node.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelInfo {
    /// Text drawn next to the node. May be empty.
    pub label: String,
    /// Marker color name or `#rrggbb` hex.
    pub color: String,
    /// Marker size in the same relative units as the default 300.
    pub size: u32,
}

/// Read node annotations, or return an empty map when no path is given.
pub fn load_labels(path: Option<&Path>) -> Result<HashMap<String, LabelInfo>> {
    let Some(path) = path else {
        return Ok(HashMap::new());
    };

    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(BufReader::new(file));

    let mut labels = HashMap::new();
    for record in reader.records() {
        let record = record.map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;
        let line = record.position().map_or(0, |p| p.line());
        let Some(node) = record.get(0) else {
            return Err(Error::MalformedRecord {
                path: path.to_path_buf(),
                line,
                field: "node id",
                value: String::new(),
            });
        };

        let size = match record.get(3) {
            Some(raw) => raw.trim().parse().map_err(|_| Error::MalformedRecord {
                path: path.to_path_buf(),
                line,
                field: "size",
                value: raw.to_string(),
            })?,
            None => DEFAULT_LABEL_SIZE,
        };

        labels.insert(
            node.to_string(),
            LabelInfo {
                label: record.get(1).unwrap_or("").to_string(),
                color: record
                    .get(2)
                    .unwrap_or(DEFAULT_LABEL_COLOR)
                    .to_string(),
                size,
            },
        );
    }

    debug!("loaded {} label entries from {}", labels.len(), path.display());
    Ok(labels)
}
