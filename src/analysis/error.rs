//! Error types for the aggregation pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the aggregation pipeline.
///
/// Malformed individual records are not errors; they are skipped and counted
/// in the load summary. Only conditions that make the whole analysis
/// meaningless end up here.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// No valid ratings were available to bucket.
    #[error("no valid ratings to analyze")]
    EmptyInput,

    /// Window width must be a positive number of seconds.
    #[error("window size must be positive, got {0} seconds")]
    InvalidWindowSize(f64),

    /// The input file could not be opened or read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
