//! Degree-based snapshots of the directed trust graph.
//!
//! Covers the structural measures reported for signed trust networks:
//! node/edge counts, edge density, degree distribution, degree centrality,
//! and the subgraph around negatively rated nodes. Repeated ratings for the
//! same ordered pair collapse into a single directed edge.

use std::collections::{BTreeSet, HashMap, HashSet};

use super::stats;
use super::types::{
    DegreeStats, GraphSnapshot, NegativeNodeReport, NodeCentrality, NodeId, Rating, TimeWindow,
    WindowGraphSnapshot,
};

/// Build a degree-based snapshot of the graph induced by `ratings`.
///
/// `top_k` bounds the number of reported high-centrality nodes. Degree
/// centrality is degree over `node_count - 1`; ties break by node id so the
/// output is deterministic.
pub fn snapshot(ratings: &[Rating], top_k: usize) -> GraphSnapshot {
    let mut edges: HashSet<(&str, &str)> = HashSet::new();
    let mut in_degree: HashMap<&str, usize> = HashMap::new();
    let mut out_degree: HashMap<&str, usize> = HashMap::new();
    let mut nodes: BTreeSet<&str> = BTreeSet::new();

    for rating in ratings {
        nodes.insert(rating.source.as_str());
        nodes.insert(rating.target.as_str());
        if edges.insert((rating.source.as_str(), rating.target.as_str())) {
            *out_degree.entry(rating.source.as_str()).or_default() += 1;
            *in_degree.entry(rating.target.as_str()).or_default() += 1;
        }
    }

    let node_count = nodes.len();
    let edge_count = edges.len();

    let edge_density = if node_count > 1 {
        edge_count as f64 / (node_count as f64 * (node_count as f64 - 1.0))
    } else {
        0.0
    };

    let mut centralities: Vec<NodeCentrality> = nodes
        .iter()
        .map(|&node| {
            let ind = in_degree.get(node).copied().unwrap_or(0);
            let outd = out_degree.get(node).copied().unwrap_or(0);
            let degree = ind + outd;
            let centrality = if node_count > 1 {
                degree as f64 / (node_count as f64 - 1.0)
            } else {
                0.0
            };
            NodeCentrality {
                node: node.to_string(),
                in_degree: ind,
                out_degree: outd,
                degree,
                centrality,
            }
        })
        .collect();

    let mut degree_histogram: HashMap<usize, usize> = HashMap::new();
    for entry in &centralities {
        *degree_histogram.entry(entry.degree).or_default() += 1;
    }

    let degree_stats = if node_count > 0 {
        let degrees: Vec<f64> = centralities.iter().map(|c| c.degree as f64).collect();
        Some(DegreeStats {
            min: centralities.iter().map(|c| c.degree).min().unwrap_or(0),
            max: centralities.iter().map(|c| c.degree).max().unwrap_or(0),
            mean: stats::mean(&degrees),
            median: stats::median(&degrees),
            std_dev: stats::std_dev(&degrees),
        })
    } else {
        None
    };

    centralities.sort_by(|a, b| b.degree.cmp(&a.degree).then_with(|| a.node.cmp(&b.node)));
    centralities.truncate(top_k);

    GraphSnapshot {
        node_count,
        edge_count,
        edge_density,
        degree_stats,
        degree_histogram,
        top_nodes: centralities,
    }
}

/// Nodes that received at least one negative rating.
pub fn negative_nodes(ratings: &[Rating]) -> BTreeSet<NodeId> {
    ratings
        .iter()
        .filter(|r| r.weight < 0)
        .map(|r| r.target.clone())
        .collect()
}

/// Select the negatively rated nodes and snapshot the subgraph of edges
/// touching any of them.
pub fn negative_node_report(ratings: &[Rating], top_k: usize) -> NegativeNodeReport {
    let nodes = negative_nodes(ratings);

    let touching: Vec<Rating> = ratings
        .iter()
        .filter(|r| nodes.contains(&r.source) || nodes.contains(&r.target))
        .cloned()
        .collect();

    NegativeNodeReport {
        negative_node_count: nodes.len(),
        nodes: nodes.into_iter().collect(),
        subgraph: snapshot(&touching, top_k),
    }
}

/// Snapshot the graph restricted to each window.
pub fn window_snapshots(windows: &[TimeWindow], top_k: usize) -> Vec<WindowGraphSnapshot> {
    windows
        .iter()
        .map(|window| WindowGraphSnapshot {
            window_index: window.index,
            start: window.start,
            end: window.end,
            snapshot: snapshot(&window.ratings, top_k),
        })
        .collect()
}
