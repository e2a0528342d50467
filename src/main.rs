//! Trust network analysis CLI.
//!
//! Loads a timestamped signed edge list, buckets it into fixed-width time
//! windows, and writes per-window, cumulative, and graph-level reports for
//! downstream plotting.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Context, Result};

use trustnet::analysis::{
    self,
    types::{AnalysisMetadata, FullReport, GraphReport, LoadSummary},
};
use trustnet::config::{self, AnalysisConfig};

#[derive(Parser)]
#[command(name = "trust-analyzer")]
#[command(about = "Temporal analysis of signed trust networks")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the CSV edge list (source,target,weight,timestamp)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Analysis profile (YAML); CLI flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Window width, e.g. "7days", "12h", "30m"
    #[arg(short, long, value_parser = humantime::parse_duration)]
    window_size: Option<Duration>,

    /// Output directory for reports
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Treat the first input row as a header
    #[arg(long)]
    has_header: bool,

    /// Reduce weights to their sign before analysis
    #[arg(long)]
    signed: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run full analysis (windows + cumulative + graph)
    Full,

    /// Per-window statistics only
    Windows,

    /// Cumulative trend statistics only
    Cumulative,

    /// Graph snapshots only
    Graph {
        /// Export the deduplicated adjacency list alongside the report
        #[arg(long)]
        export_edges: bool,
    },

    /// Show summary statistics without writing reports
    Summary,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    let config = resolve_config(&cli)?;
    let input = config
        .input
        .clone()
        .ok_or_else(|| eyre!("no input file given (use --input or the profile's `input` field)"))?;

    // Load the edge list
    let load_opts = analysis::LoadOptions {
        has_header: config.has_header,
        min_weight: config.min_weight,
        max_weight: config.max_weight,
    };

    log::info!("Loading ratings from {}...", input.display());
    let mut summary = analysis::load_ratings(&input, &load_opts)
        .with_context(|| format!("Failed to load ratings from {}", input.display()))?;

    if config.sign_only {
        analysis::apply_sign_transform(&mut summary.ratings);
    }

    log::info!(
        "Loaded {} ratings ({} records read, {} skipped)",
        summary.ratings.len(),
        summary.total_records,
        summary.skipped.total()
    );

    if let Commands::Summary = cli.command {
        print_dataset_summary(&input, &summary);
        return Ok(());
    }

    // Bucket into time windows
    let window_size_sec = config.window_size_sec();
    let windows = analysis::bucket(&summary.ratings, window_size_sec)
        .context("Failed to bucket ratings into time windows")?;
    log::info!(
        "Bucketed {} ratings into {} windows of {:.0}s",
        summary.ratings.len(),
        windows.len(),
        window_size_sec
    );

    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            config.output_dir.display()
        )
    })?;

    let metadata = create_metadata(&input, &config, &summary);

    let (report, json_name, text_name) = match cli.command {
        Commands::Full => {
            let report = FullReport {
                metadata,
                window_statistics: Some(windows.iter().map(analysis::summarize).collect()),
                cumulative_statistics: Some(analysis::cumulative(&windows)),
                graph_analysis: Some(build_graph_report(&summary, &windows, config.top_k)),
            };
            (report, "full_report.json", "report.txt")
        }
        Commands::Windows => {
            let report = FullReport {
                metadata,
                window_statistics: Some(windows.iter().map(analysis::summarize).collect()),
                cumulative_statistics: None,
                graph_analysis: None,
            };
            (report, "windows_report.json", "windows_report.txt")
        }
        Commands::Cumulative => {
            let report = FullReport {
                metadata,
                window_statistics: None,
                cumulative_statistics: Some(analysis::cumulative(&windows)),
                graph_analysis: None,
            };
            (report, "cumulative_report.json", "cumulative_report.txt")
        }
        Commands::Graph { export_edges } => {
            if export_edges {
                export_adjacency(&summary, &config.output_dir)?;
            }
            let report = FullReport {
                metadata,
                window_statistics: None,
                cumulative_statistics: None,
                graph_analysis: Some(build_graph_report(&summary, &windows, config.top_k)),
            };
            (report, "graph_report.json", "graph_report.txt")
        }
        Commands::Summary => unreachable!(),
    };

    analysis::generate_json_report(&report, &config.output_dir.join(json_name))?;
    analysis::generate_text_report(&report, &config.output_dir.join(text_name))?;
    analysis::report::print_summary(&report);

    log::info!(
        "Analysis complete. Reports written to {}",
        config.output_dir.display()
    );

    Ok(())
}

/// Merge the optional YAML profile with CLI overrides.
fn resolve_config(cli: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &cli.config {
        Some(path) => config::load_config(path)
            .with_context(|| format!("Failed to load analysis profile {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    if let Some(input) = &cli.input {
        config.input = Some(input.clone());
    }
    if let Some(window_size) = cli.window_size {
        config.window_size = window_size;
    }
    if let Some(output) = &cli.output {
        config.output_dir = output.clone();
    }
    if cli.has_header {
        config.has_header = true;
    }
    if cli.signed {
        config.sign_only = true;
    }

    config.validate()?;
    Ok(config)
}

fn build_graph_report(summary: &LoadSummary, windows: &[analysis::TimeWindow], top_k: usize) -> GraphReport {
    GraphReport {
        overall: analysis::snapshot(&summary.ratings, top_k),
        negative_nodes: analysis::negative_node_report(&summary.ratings, top_k),
        window_snapshots: analysis::window_snapshots(windows, top_k),
    }
}

fn create_metadata(input: &Path, config: &AnalysisConfig, summary: &LoadSummary) -> AnalysisMetadata {
    AnalysisMetadata {
        analysis_timestamp: chrono::Utc::now().to_rfc3339(),
        input_file: input.display().to_string(),
        window_size_sec: config.window_size_sec(),
        total_records: summary.total_records,
        valid_ratings: summary.ratings.len(),
        skipped_records: summary.skipped,
        sign_only: config.sign_only,
        time_span: analysis::time_span_stats(&summary.ratings),
    }
}

/// Export the deduplicated adjacency list for external graph tooling.
fn export_adjacency(summary: &LoadSummary, output_dir: &Path) -> Result<()> {
    let mut adjacency: std::collections::BTreeMap<String, Vec<String>> =
        std::collections::BTreeMap::new();

    for rating in &summary.ratings {
        let targets = adjacency.entry(rating.source.clone()).or_default();
        if !targets.contains(&rating.target) {
            targets.push(rating.target.clone());
        }
    }

    let path = output_dir.join("adjacency.json");
    let json = serde_json::to_string_pretty(&adjacency)?;
    fs::write(&path, json)?;
    log::info!("Adjacency list exported to {}", path.display());

    Ok(())
}

/// Quick dataset summary without running the full pipeline.
fn print_dataset_summary(input: &Path, summary: &LoadSummary) {
    println!("\n=== TRUST DATASET SUMMARY ===\n");
    println!("Input: {}", input.display());
    println!();
    println!("Records read: {}", summary.total_records);
    println!("Valid ratings: {}", summary.ratings.len());
    println!("Skipped: {}", summary.skipped.total());
    if summary.skipped.total() > 0 {
        println!("  Missing fields: {}", summary.skipped.missing_field);
        println!("  Unparsable weights: {}", summary.skipped.bad_weight);
        println!(
            "  Weights out of range: {}",
            summary.skipped.weight_out_of_range
        );
        println!("  Unparsable timestamps: {}", summary.skipped.bad_timestamp);
    }
    println!();

    let positive = summary.ratings.iter().filter(|r| r.weight > 0).count();
    let negative = summary.ratings.iter().filter(|r| r.weight < 0).count();
    println!("Positive ratings: {}", positive);
    println!("Negative ratings: {}", negative);

    if let Some(span) = analysis::time_span_stats(&summary.ratings) {
        println!();
        println!(
            "Time span: {:.0} to {:.0} ({:.1} days)",
            span.min,
            span.max,
            (span.max - span.min) / 86_400.0
        );
    }
    println!();
}
