//! Core data types for trust network analysis.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Rating timestamp in seconds since the Unix epoch. The published dataset
/// carries fractional seconds, so this stays a float throughout.
pub type Timestamp = f64;

/// Opaque node identifier. The source dataset happens to use integers, but
/// nothing in the pipeline does arithmetic on ids.
pub type NodeId = String;

/// A single directed, signed trust observation between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub source: NodeId,
    pub target: NodeId,
    pub weight: i32,
    pub timestamp: Timestamp,
}

/// A contiguous time interval holding the ratings that fall inside it.
///
/// Membership is half-open: `[start, end)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeWindow {
    pub index: usize,
    pub start: Timestamp,
    pub end: Timestamp,
    pub ratings: Vec<Rating>,
}

impl TimeWindow {
    pub fn new(index: usize, start: Timestamp, end: Timestamp) -> Self {
        Self {
            index,
            start,
            end,
            ratings: Vec::new(),
        }
    }

    /// Check whether a timestamp falls inside this window.
    pub fn contains(&self, ts: Timestamp) -> bool {
        ts >= self.start && ts < self.end
    }
}

/// Aggregate statistics for a single time window.
///
/// Aggregates are `None` when the window holds no ratings, so that "no data"
/// stays distinguishable from a genuinely neutral mean in downstream plots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowStatistics {
    pub window_index: usize,
    pub start: Timestamp,
    pub end: Timestamp,
    pub edge_count: usize,
    pub mean_weight: Option<f64>,
    pub positive_ratio: Option<f64>,
    pub negative_ratio: Option<f64>,
    pub active_node_count: usize,
}

/// Running aggregate over all ratings up to and including a window's end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CumulativeStatistics {
    pub window_index: usize,
    /// End bound of the window this aggregate runs through.
    pub through: Timestamp,
    pub edge_count: usize,
    pub mean_weight: Option<f64>,
    pub positive_ratio: Option<f64>,
    pub negative_ratio: Option<f64>,
    pub active_node_count: usize,
}

/// Counts of records skipped during loading, by reason.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SkippedRecords {
    pub missing_field: usize,
    pub bad_weight: usize,
    pub weight_out_of_range: usize,
    pub bad_timestamp: usize,
}

impl SkippedRecords {
    pub fn total(&self) -> usize {
        self.missing_field + self.bad_weight + self.weight_out_of_range + self.bad_timestamp
    }
}

/// Result of one ingestion pass over the input file.
#[derive(Debug, Clone, Default)]
pub struct LoadSummary {
    pub ratings: Vec<Rating>,
    pub skipped: SkippedRecords,
    /// Every record read, valid or not.
    pub total_records: usize,
}

/// Descriptive statistics over the timestamp column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSpanStats {
    pub min: Timestamp,
    pub max: Timestamp,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

/// Statistical summary of node degrees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DegreeStats {
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

/// Degree information for a single node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeCentrality {
    pub node: NodeId,
    pub in_degree: usize,
    pub out_degree: usize,
    pub degree: usize,
    /// Degree divided by `node_count - 1`.
    pub centrality: f64,
}

/// Degree-based structural statistics of the directed trust graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub node_count: usize,
    pub edge_count: usize,
    /// Edges divided by the maximum possible `n * (n - 1)` directed edges.
    pub edge_density: f64,
    pub degree_stats: Option<DegreeStats>,
    /// Degree -> count of nodes with that degree.
    pub degree_histogram: HashMap<usize, usize>,
    /// Highest degree-centrality nodes, descending.
    pub top_nodes: Vec<NodeCentrality>,
}

/// Snapshot of the graph restricted to a single window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowGraphSnapshot {
    pub window_index: usize,
    pub start: Timestamp,
    pub end: Timestamp,
    pub snapshot: GraphSnapshot,
}

/// Nodes on the receiving end of negative ratings, together with the
/// structure of the edges touching them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NegativeNodeReport {
    pub negative_node_count: usize,
    pub nodes: Vec<NodeId>,
    pub subgraph: GraphSnapshot,
}

/// Graph analysis section of the full report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphReport {
    pub overall: GraphSnapshot,
    pub negative_nodes: NegativeNodeReport,
    pub window_snapshots: Vec<WindowGraphSnapshot>,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub analysis_timestamp: String,
    pub input_file: String,
    pub window_size_sec: f64,
    pub total_records: usize,
    pub valid_ratings: usize,
    pub skipped_records: SkippedRecords,
    /// Whether weights were reduced to their sign before analysis.
    pub sign_only: bool,
    pub time_span: Option<TimeSpanStats>,
}

/// Complete analysis report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullReport {
    pub metadata: AnalysisMetadata,
    pub window_statistics: Option<Vec<WindowStatistics>>,
    pub cumulative_statistics: Option<Vec<CumulativeStatistics>>,
    pub graph_analysis: Option<GraphReport>,
}
