//! Trust aggregation pipeline.
//!
//! This module turns a timestamped signed edge list into per-window and
//! cumulative trend statistics plus degree-based graph snapshots, for
//! consumption by external plotting tooling.

pub mod error;
pub mod types;
pub mod loader;
pub mod window;
pub mod stats;
pub mod graph;
pub mod report;

pub use error::AnalysisError;
pub use types::*;
pub use loader::{apply_sign_transform, load_ratings, LoadOptions};
pub use window::bucket;
pub use stats::{cumulative, summarize, time_span_stats};
pub use graph::{negative_node_report, snapshot, window_snapshots};
pub use report::{generate_json_report, generate_text_report};
