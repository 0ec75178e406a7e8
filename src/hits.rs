//! Loading of pairwise similarity hits.
//!
//! The external all-vs-all search tool writes a tab-separated table with
//! columns `query, target, score, qcov, tcov` and no header. Each line
//! becomes one [`HitRecord`]; both directions of a pair may appear and are
//! kept as separate records.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::ReaderBuilder;
use log::debug;

use crate::error::{Error, Result};

/// One pairwise similarity hit as reported by the search tool.
#[derive(Debug, Clone, PartialEq)]
pub struct HitRecord {
    /// Query sequence id.
    pub query_id: String,
    /// Target sequence id.
    pub target_id: String,
    /// Similarity score (edge weight candidate).
    pub score: f64,
    /// Fraction of the query aligned, in [0, 1].
    pub query_coverage: f64,
    /// Fraction of the target aligned, in [0, 1].
    pub target_coverage: f64,
}

/// Read a hits table into memory.
///
/// Lines with fewer than five fields are skipped; this is a documented
/// filter, not an error. Extra fields are ignored. A non-numeric score or
/// coverage field aborts the load with [`Error::MalformedRecord`].
pub fn load_hits(path: &Path) -> Result<Vec<HitRecord>> {
    let file = File::open(path).map_err(|source| Error::MissingCollaboratorOutput {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(BufReader::new(file));

    let mut hits = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;
        if record.len() < 5 {
            continue;
        }
        let line = record.position().map_or(0, |p| p.line());
        hits.push(HitRecord {
            query_id: record[0].to_string(),
            target_id: record[1].to_string(),
            score: parse_field(path, line, "score", &record[2])?,
            query_coverage: parse_field(path, line, "query coverage", &record[3])?,
            target_coverage: parse_field(path, line, "target coverage", &record[4])?,
        });
    }

    debug!("loaded {} hits from {}", hits.len(), path.display());
    Ok(hits)
}

fn parse_field(path: &Path, line: u64, field: &'static str, raw: &str) -> Result<f64> {
    raw.trim().parse().map_err(|_| Error::MalformedRecord {
        path: path.to_path_buf(),
        line,
        field,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_hits(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_basic() {
        let file = write_hits("p1\tp2\t0.9\t1.0\t0.95\np2\tp1\t0.85\t0.95\t1.0\n");
        let hits = load_hits(file.path()).unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].query_id, "p1");
        assert_eq!(hits[0].target_id, "p2");
        assert!((hits[0].score - 0.9).abs() < 1e-12);
        assert!((hits[1].query_coverage - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_short_lines_skipped() {
        let file = write_hits("p1\tp2\t0.9\t1.0\t1.0\np3\tp4\np5\tp6\t0.5\n");
        let hits = load_hits(file.path()).unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].query_id, "p1");
    }

    #[test]
    fn test_extra_fields_ignored() {
        let file = write_hits("p1\tp2\t0.9\t1.0\t1.0\t42\tmore\n");
        let hits = load_hits(file.path()).unwrap();

        assert_eq!(hits.len(), 1);
        assert!((hits[0].target_coverage - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_malformed_score() {
        let file = write_hits("p1\tp2\t0.9\t1.0\t1.0\np3\tp4\tbad\t1.0\t1.0\n");
        let err = load_hits(file.path()).unwrap_err();

        match err {
            Error::MalformedRecord { line, field, value, .. } => {
                assert_eq!(line, 2);
                assert_eq!(field, "score");
                assert_eq!(value, "bad");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = load_hits(Path::new("/nonexistent/hits.tsv")).unwrap_err();
        assert!(matches!(err, Error::MissingCollaboratorOutput { .. }));
    }
}
