//! Per-window and cumulative aggregate statistics.

use std::collections::HashSet;

use super::types::{
    CumulativeStatistics, Rating, TimeSpanStats, TimeWindow, WindowStatistics,
};

/// Compute aggregate statistics for a single window in one pass.
///
/// All aggregate fields are `None` when the window is empty; an empty window
/// must never be reported as a zero-trust one.
pub fn summarize(window: &TimeWindow) -> WindowStatistics {
    let edge_count = window.ratings.len();

    let mut weight_sum = 0i64;
    let mut positive = 0usize;
    let mut negative = 0usize;
    let mut nodes: HashSet<&str> = HashSet::new();

    for rating in &window.ratings {
        weight_sum += rating.weight as i64;
        if rating.weight > 0 {
            positive += 1;
        } else if rating.weight < 0 {
            negative += 1;
        }
        nodes.insert(rating.source.as_str());
        nodes.insert(rating.target.as_str());
    }

    let (mean_weight, positive_ratio, negative_ratio) = if edge_count > 0 {
        let n = edge_count as f64;
        (
            Some(weight_sum as f64 / n),
            Some(positive as f64 / n),
            Some(negative as f64 / n),
        )
    } else {
        (None, None, None)
    };

    WindowStatistics {
        window_index: window.index,
        start: window.start,
        end: window.end,
        edge_count,
        mean_weight,
        positive_ratio,
        negative_ratio,
        active_node_count: nodes.len(),
    }
}

/// Compute running aggregates up to and including each window's end.
///
/// Shows the long-run trend alongside the per-window one; `edge_count` is
/// non-decreasing across the returned sequence.
pub fn cumulative(windows: &[TimeWindow]) -> Vec<CumulativeStatistics> {
    let mut out = Vec::with_capacity(windows.len());

    let mut edge_count = 0usize;
    let mut weight_sum = 0i64;
    let mut positive = 0usize;
    let mut negative = 0usize;
    let mut nodes: HashSet<&str> = HashSet::new();

    for window in windows {
        for rating in &window.ratings {
            edge_count += 1;
            weight_sum += rating.weight as i64;
            if rating.weight > 0 {
                positive += 1;
            } else if rating.weight < 0 {
                negative += 1;
            }
            nodes.insert(rating.source.as_str());
            nodes.insert(rating.target.as_str());
        }

        let (mean_weight, positive_ratio, negative_ratio) = if edge_count > 0 {
            let n = edge_count as f64;
            (
                Some(weight_sum as f64 / n),
                Some(positive as f64 / n),
                Some(negative as f64 / n),
            )
        } else {
            (None, None, None)
        };

        out.push(CumulativeStatistics {
            window_index: window.index,
            through: window.end,
            edge_count,
            mean_weight,
            positive_ratio,
            negative_ratio,
            active_node_count: nodes.len(),
        });
    }

    out
}

/// Descriptive statistics over the timestamp column, `None` on empty input.
pub fn time_span_stats(ratings: &[Rating]) -> Option<TimeSpanStats> {
    if ratings.is_empty() {
        return None;
    }

    let timestamps: Vec<f64> = ratings.iter().map(|r| r.timestamp).collect();
    let min = timestamps.iter().cloned().fold(f64::MAX, f64::min);
    let max = timestamps.iter().cloned().fold(f64::MIN, f64::max);

    Some(TimeSpanStats {
        min,
        max,
        mean: mean(&timestamps),
        median: median(&timestamps),
        std_dev: std_dev(&timestamps),
    })
}

/// Calculate mean of a slice
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Calculate median of a slice
pub(crate) fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Sample standard deviation of a slice, 0.0 below two values.
pub(crate) fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}
