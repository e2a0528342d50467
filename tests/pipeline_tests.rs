//! End-to-end tests for the aggregation pipeline: CSV in, reports out.

use std::io::Write;

use tempfile::{tempdir, NamedTempFile};

use trustnet::analysis::{
    self,
    types::{AnalysisMetadata, FullReport},
    AnalysisError, LoadOptions,
};

fn write_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn metadata_for(summary: &analysis::LoadSummary, window_size_sec: f64) -> AnalysisMetadata {
    AnalysisMetadata {
        analysis_timestamp: "2024-01-01T00:00:00Z".to_string(),
        input_file: "test.csv".to_string(),
        window_size_sec,
        total_records: summary.total_records,
        valid_ratings: summary.ratings.len(),
        skipped_records: summary.skipped,
        sign_only: false,
        time_span: analysis::time_span_stats(&summary.ratings),
    }
}

#[test]
fn test_csv_to_window_statistics() {
    // Two ratings at t0, one at t1 a day later; a half-day window puts the
    // first two alone in window 0.
    let file = write_csv(
        "A,B,5,1000000\n\
         A,C,-3,1000000\n\
         B,C,10,1086400\n",
    );
    let summary = analysis::load_ratings(file.path(), &LoadOptions::default()).unwrap();
    assert_eq!(summary.ratings.len(), 3);

    let windows = analysis::bucket(&summary.ratings, 43_200.0).unwrap();

    // Every rating lands in exactly one window
    let assigned: usize = windows.iter().map(|w| w.ratings.len()).sum();
    assert_eq!(assigned, summary.ratings.len());

    let first = analysis::summarize(&windows[0]);
    assert_eq!(first.edge_count, 2);
    assert_eq!(first.mean_weight, Some(1.0));
    assert_eq!(first.positive_ratio, Some(0.5));
    assert_eq!(first.negative_ratio, Some(0.5));
    assert_eq!(first.active_node_count, 3);

    // Middle window is empty and stays undefined
    let middle = analysis::summarize(&windows[1]);
    assert_eq!(middle.edge_count, 0);
    assert_eq!(middle.mean_weight, None);

    let last = analysis::summarize(windows.last().unwrap());
    assert_eq!(last.edge_count, 1);
    assert_eq!(last.mean_weight, Some(10.0));
}

#[test]
fn test_edge_counts_account_for_skips() {
    let file = write_csv(
        "A,B,5,1000\n\
         A,C,15,1001\n\
         B,C,3,1002\n\
         C,A,nope,1003\n\
         C,B,-2,1004\n",
    );
    let summary = analysis::load_ratings(file.path(), &LoadOptions::default()).unwrap();

    assert_eq!(summary.total_records, 5);
    assert_eq!(summary.skipped.total(), 2);
    assert_eq!(summary.ratings.len() + summary.skipped.total(), summary.total_records);

    let windows = analysis::bucket(&summary.ratings, 10.0).unwrap();
    let bucketed: usize = windows.iter().map(|w| w.ratings.len()).sum();
    assert_eq!(bucketed, summary.total_records - summary.skipped.total());
}

#[test]
fn test_empty_input_fails_bucketing() {
    let file = write_csv("");
    let summary = analysis::load_ratings(file.path(), &LoadOptions::default()).unwrap();
    assert!(summary.ratings.is_empty());

    let result = analysis::bucket(&summary.ratings, 3600.0);
    assert!(matches!(result, Err(AnalysisError::EmptyInput)));
}

#[test]
fn test_cumulative_tracks_totals() {
    let file = write_csv(
        "A,B,5,0\n\
         B,C,-5,100\n\
         C,D,1,200\n\
         D,A,1,300\n",
    );
    let summary = analysis::load_ratings(file.path(), &LoadOptions::default()).unwrap();
    let windows = analysis::bucket(&summary.ratings, 100.0).unwrap();
    let running = analysis::cumulative(&windows);

    assert_eq!(running.len(), windows.len());
    assert!(running.windows(2).all(|p| p[0].edge_count <= p[1].edge_count));
    assert_eq!(running.last().unwrap().edge_count, summary.ratings.len());
    assert_eq!(running.last().unwrap().active_node_count, 4);
}

#[test]
fn test_report_generation_roundtrip() {
    let file = write_csv(
        "A,B,5,1000000\n\
         A,C,-3,1000000\n\
         B,C,10,1086400\n",
    );
    let summary = analysis::load_ratings(file.path(), &LoadOptions::default()).unwrap();
    let windows = analysis::bucket(&summary.ratings, 43_200.0).unwrap();

    let report = FullReport {
        metadata: metadata_for(&summary, 43_200.0),
        window_statistics: Some(windows.iter().map(analysis::summarize).collect()),
        cumulative_statistics: Some(analysis::cumulative(&windows)),
        graph_analysis: Some(trustnet::analysis::types::GraphReport {
            overall: analysis::snapshot(&summary.ratings, 10),
            negative_nodes: analysis::negative_node_report(&summary.ratings, 10),
            window_snapshots: analysis::window_snapshots(&windows, 10),
        }),
    };

    let dir = tempdir().unwrap();
    let json_path = dir.path().join("report.json");
    let text_path = dir.path().join("report.txt");

    analysis::generate_json_report(&report, &json_path).unwrap();
    analysis::generate_text_report(&report, &text_path).unwrap();

    // JSON parses back into the same shape
    let json = std::fs::read_to_string(&json_path).unwrap();
    let parsed: FullReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.metadata.valid_ratings, 3);
    let parsed_windows = parsed.window_statistics.unwrap();
    assert_eq!(parsed_windows.len(), windows.len());

    // Empty windows serialize their aggregates as null, not zero
    assert!(json.contains("\"mean_weight\": null"));

    // ...and render as n/a in the text report
    let text = std::fs::read_to_string(&text_path).unwrap();
    assert!(text.contains("n/a"));
    assert!(text.contains("PER-WINDOW STATISTICS"));
    assert!(text.contains("CUMULATIVE TREND"));
    assert!(text.contains("GRAPH STRUCTURE"));
}

#[test]
fn test_sign_transform_end_to_end() {
    let file = write_csv(
        "A,B,7,0\n\
         A,C,-4,10\n\
         B,C,0,20\n",
    );
    let mut summary = analysis::load_ratings(file.path(), &LoadOptions::default()).unwrap();
    analysis::apply_sign_transform(&mut summary.ratings);

    let windows = analysis::bucket(&summary.ratings, 60.0).unwrap();
    let stats = analysis::summarize(&windows[0]);

    assert_eq!(stats.edge_count, 3);
    assert_eq!(stats.mean_weight, Some(0.0));
    assert_eq!(stats.positive_ratio, Some(1.0 / 3.0));
    assert_eq!(stats.negative_ratio, Some(1.0 / 3.0));
}
