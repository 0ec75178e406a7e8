use core::fmt;
use std::path::PathBuf;

/// Result alias for `simnet`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading inputs or writing a threshold run's outputs.
#[derive(Debug)]
pub enum Error {
    /// A required numeric field in a hits or label file could not be parsed.
    MalformedRecord {
        /// File containing the bad record.
        path: PathBuf,
        /// 1-based line number.
        line: u64,
        /// Which field failed to parse.
        field: &'static str,
        /// The offending text.
        value: String,
    },

    /// The external search tool's output file is absent or unreadable.
    MissingCollaboratorOutput {
        /// Expected hits file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Reading or writing a pipeline file failed.
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// One or more threshold runs failed after all siblings completed.
    ThresholdRuns(Vec<(f64, String)>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedRecord {
                path,
                line,
                field,
                value,
            } => write!(
                f,
                "{}:{line}: cannot parse {field} from {value:?}",
                path.display()
            ),
            Error::MissingCollaboratorOutput { path, source } => {
                write!(f, "hits file {} unreadable: {source}", path.display())
            }
            Error::Io { path, source } => {
                write!(f, "{}: {source}", path.display())
            }
            Error::ThresholdRuns(failures) => {
                write!(f, "{} threshold run(s) failed:", failures.len())?;
                for (threshold, msg) in failures {
                    write!(f, " [threshold {threshold}: {msg}]")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::MissingCollaboratorOutput { source, .. } | Error::Io { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}
