//! Report generation for trust network analysis.
//!
//! Generates both JSON and human-readable text reports.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Context, Result};

use super::types::*;

/// Generate JSON report
pub fn generate_json_report(report: &FullReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .context("Failed to serialize report to JSON")?;

    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))?;

    log::info!("JSON report written to {}", output_path.display());
    Ok(())
}

/// Generate human-readable text report
pub fn generate_text_report(report: &FullReport, output_path: &Path) -> Result<()> {
    let mut lines: Vec<String> = Vec::new();

    // Header
    lines.push("=".repeat(80));
    lines.push("                      TRUST NETWORK TEMPORAL ANALYSIS".to_string());
    lines.push("=".repeat(80));
    lines.push(String::new());

    // Metadata
    lines.push(format!("Analysis Date: {}", report.metadata.analysis_timestamp));
    lines.push(format!("Input File: {}", report.metadata.input_file));
    lines.push(format!(
        "Window Size: {:.0} seconds",
        report.metadata.window_size_sec
    ));
    lines.push(format!("Records Read: {}", report.metadata.total_records));
    lines.push(format!("Valid Ratings: {}", report.metadata.valid_ratings));
    lines.push(format!(
        "Skipped Records: {}",
        report.metadata.skipped_records.total()
    ));
    if report.metadata.sign_only {
        lines.push("Weights reduced to sign only".to_string());
    }
    if let Some(ref span) = report.metadata.time_span {
        lines.push(format!(
            "Time Span: {} to {}",
            format_date(span.min),
            format_date(span.max)
        ));
    }
    lines.push(String::new());

    // Per-window statistics
    if let Some(ref windows) = report.window_statistics {
        lines.push("=".repeat(80));
        lines.push("                          PER-WINDOW STATISTICS".to_string());
        lines.push("=".repeat(80));
        lines.push(String::new());

        lines.push(format!(
            "{:>6}  {:>12}  {:>8}  {:>8}  {:>8}  {:>8}  {:>8}",
            "window", "start", "edges", "mean", "pos", "neg", "nodes"
        ));
        for w in windows {
            lines.push(format!(
                "{:>6}  {:>12}  {:>8}  {:>8}  {:>8}  {:>8}  {:>8}",
                w.window_index,
                format_date(w.start),
                w.edge_count,
                fmt_opt(w.mean_weight, 2),
                fmt_opt(w.positive_ratio, 2),
                fmt_opt(w.negative_ratio, 2),
                w.active_node_count,
            ));
        }
        lines.push(String::new());

        let empty = windows.iter().filter(|w| w.edge_count == 0).count();
        if empty > 0 {
            lines.push(format!(
                "{} of {} windows hold no ratings; their aggregates are reported as n/a.",
                empty,
                windows.len()
            ));
            lines.push(String::new());
        }
    }

    // Cumulative statistics
    if let Some(ref running) = report.cumulative_statistics {
        lines.push("=".repeat(80));
        lines.push("                          CUMULATIVE TREND".to_string());
        lines.push("=".repeat(80));
        lines.push(String::new());

        lines.push(format!(
            "{:>6}  {:>12}  {:>8}  {:>8}  {:>8}  {:>8}  {:>8}",
            "window", "through", "edges", "mean", "pos", "neg", "nodes"
        ));
        for c in running {
            lines.push(format!(
                "{:>6}  {:>12}  {:>8}  {:>8}  {:>8}  {:>8}  {:>8}",
                c.window_index,
                format_date(c.through),
                c.edge_count,
                fmt_opt(c.mean_weight, 2),
                fmt_opt(c.positive_ratio, 2),
                fmt_opt(c.negative_ratio, 2),
                c.active_node_count,
            ));
        }
        lines.push(String::new());
    }

    // Graph analysis
    if let Some(ref graph) = report.graph_analysis {
        lines.push("=".repeat(80));
        lines.push("                          GRAPH STRUCTURE".to_string());
        lines.push("=".repeat(80));
        lines.push(String::new());

        lines.push("Overall:".to_string());
        lines.push(format!("  Nodes: {}", graph.overall.node_count));
        lines.push(format!("  Edges: {}", graph.overall.edge_count));
        lines.push(format!("  Edge density: {:.4}", graph.overall.edge_density));
        if let Some(ref deg) = graph.overall.degree_stats {
            lines.push(format!(
                "  Degree: min {}, max {}, mean {:.1}, median {:.1}, std {:.1}",
                deg.min, deg.max, deg.mean, deg.median, deg.std_dev
            ));
        }
        lines.push(String::new());

        if !graph.overall.top_nodes.is_empty() {
            lines.push("Highest degree-centrality nodes:".to_string());
            for (i, node) in graph.overall.top_nodes.iter().enumerate() {
                lines.push(format!(
                    "  {}. {} (degree {}, in {}, out {}, centrality {:.3})",
                    i + 1,
                    node.node,
                    node.degree,
                    node.in_degree,
                    node.out_degree,
                    node.centrality
                ));
            }
            lines.push(String::new());
        }

        lines.push("Negatively rated nodes:".to_string());
        lines.push(format!(
            "  Count: {}",
            graph.negative_nodes.negative_node_count
        ));
        lines.push(format!(
            "  Subgraph: {} nodes, {} edges, density {:.4}",
            graph.negative_nodes.subgraph.node_count,
            graph.negative_nodes.subgraph.edge_count,
            graph.negative_nodes.subgraph.edge_density
        ));
        lines.push(String::new());

        if !graph.window_snapshots.is_empty() {
            lines.push("Per-window graph size:".to_string());
            lines.push(format!(
                "{:>6}  {:>12}  {:>8}  {:>8}  {:>10}",
                "window", "start", "nodes", "edges", "density"
            ));
            for entry in &graph.window_snapshots {
                lines.push(format!(
                    "{:>6}  {:>12}  {:>8}  {:>8}  {:>10.4}",
                    entry.window_index,
                    format_date(entry.start),
                    entry.snapshot.node_count,
                    entry.snapshot.edge_count,
                    entry.snapshot.edge_density,
                ));
            }
            lines.push(String::new());
        }
    }

    // Footer
    lines.push("=".repeat(80));

    let content = lines.join("\n");
    fs::write(output_path, content)
        .with_context(|| format!("Failed to write text report to {}", output_path.display()))?;

    log::info!("Text report written to {}", output_path.display());
    Ok(())
}

/// Print a summary to stdout
pub fn print_summary(report: &FullReport) {
    println!("\n=== TRUST NETWORK ANALYSIS SUMMARY ===\n");
    println!("Ratings: {}", report.metadata.valid_ratings);
    println!("Skipped: {}", report.metadata.skipped_records.total());
    if let Some(ref span) = report.metadata.time_span {
        println!(
            "Span: {} to {}",
            format_date(span.min),
            format_date(span.max)
        );
    }

    if let Some(ref windows) = report.window_statistics {
        let populated = windows.iter().filter(|w| w.edge_count > 0).count();
        println!("\nWindows:");
        println!("  Total: {}", windows.len());
        println!("  With ratings: {}", populated);
        if let Some(busiest) = windows.iter().max_by_key(|w| w.edge_count) {
            println!(
                "  Busiest: window {} ({} edges, starting {})",
                busiest.window_index,
                busiest.edge_count,
                format_date(busiest.start)
            );
        }
    }

    if let Some(ref running) = report.cumulative_statistics {
        if let Some(last) = running.last() {
            println!("\nCumulative (through end of data):");
            println!("  Edges: {}", last.edge_count);
            println!("  Mean weight: {}", fmt_opt(last.mean_weight, 2));
            println!("  Positive ratio: {}", fmt_opt(last.positive_ratio, 2));
            println!("  Negative ratio: {}", fmt_opt(last.negative_ratio, 2));
            println!("  Active nodes: {}", last.active_node_count);
        }
    }

    if let Some(ref graph) = report.graph_analysis {
        println!("\nGraph:");
        println!("  Nodes: {}", graph.overall.node_count);
        println!("  Edges: {}", graph.overall.edge_count);
        println!("  Density: {:.4}", graph.overall.edge_density);
        println!(
            "  Negatively rated nodes: {}",
            graph.negative_nodes.negative_node_count
        );
    }

    println!();
}

/// Render an optional statistic, keeping "no data" visibly distinct from 0.
fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "n/a".to_string(),
    }
}

/// Render an epoch-second timestamp as a calendar date.
fn format_date(ts: Timestamp) -> String {
    chrono::DateTime::from_timestamp(ts as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| format!("{:.0}", ts))
}
