//! CSV edge list ingestion.
//!
//! Loads `source,target,weight,timestamp` records, skipping malformed rows
//! with per-reason counts instead of aborting on the first bad line. Data
//! quality is inherited from the published dataset; the loader validates
//! just enough to keep the aggregates well-defined.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use super::error::AnalysisError;
use super::types::{LoadSummary, Rating, SkippedRecords};

/// Options controlling ingestion.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Treat the first row as a header row.
    pub has_header: bool,
    /// Inclusive weight bounds; records outside are skipped.
    pub min_weight: i32,
    pub max_weight: i32,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            has_header: false,
            min_weight: -10,
            max_weight: 10,
        }
    }
}

/// Why a single record was rejected.
enum RecordError {
    MissingField,
    BadWeight,
    WeightOutOfRange,
    BadTimestamp,
}

impl RecordError {
    fn describe(&self) -> &'static str {
        match self {
            RecordError::MissingField => "missing field",
            RecordError::BadWeight => "unparsable weight",
            RecordError::WeightOutOfRange => "weight out of range",
            RecordError::BadTimestamp => "unparsable timestamp",
        }
    }
}

/// Load ratings from a CSV file.
///
/// Malformed records are skipped and counted in the returned summary; only
/// failures to read the file itself abort the load.
pub fn load_ratings(path: &Path, opts: &LoadOptions) -> Result<LoadSummary, AnalysisError> {
    let file = File::open(path).map_err(|source| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = ReaderBuilder::new()
        .has_headers(opts.has_header)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(BufReader::new(file));

    let mut summary = LoadSummary::default();

    for (line, result) in reader.records().enumerate() {
        summary.total_records += 1;

        let record = match result {
            Ok(record) => record,
            Err(err) => {
                summary.skipped.missing_field += 1;
                log::debug!("skipping unreadable record {}: {}", line + 1, err);
                continue;
            }
        };

        match parse_record(&record, opts) {
            Ok(rating) => summary.ratings.push(rating),
            Err(reason) => {
                count_skip(&mut summary.skipped, &reason);
                log::debug!("skipping record {}: {}", line + 1, reason.describe());
            }
        }
    }

    if summary.skipped.total() > 0 {
        log::warn!(
            "Skipped {} malformed records ({} loaded)",
            summary.skipped.total(),
            summary.ratings.len()
        );
    }

    Ok(summary)
}

/// Replace every weight with its sign (-1, 0, +1).
///
/// Used to study rating polarity independently of magnitude.
pub fn apply_sign_transform(ratings: &mut [Rating]) {
    for rating in ratings.iter_mut() {
        rating.weight = rating.weight.signum();
    }
}

fn parse_record(record: &StringRecord, opts: &LoadOptions) -> Result<Rating, RecordError> {
    let source = field(record, 0)?;
    let target = field(record, 1)?;
    let weight_raw = field(record, 2)?;
    let timestamp_raw = field(record, 3)?;

    let weight: i32 = weight_raw.parse().map_err(|_| RecordError::BadWeight)?;
    if weight < opts.min_weight || weight > opts.max_weight {
        return Err(RecordError::WeightOutOfRange);
    }

    let timestamp: f64 = timestamp_raw.parse().map_err(|_| RecordError::BadTimestamp)?;
    if !timestamp.is_finite() {
        return Err(RecordError::BadTimestamp);
    }

    Ok(Rating {
        source: source.to_string(),
        target: target.to_string(),
        weight,
        timestamp,
    })
}

fn field<'a>(record: &'a StringRecord, index: usize) -> Result<&'a str, RecordError> {
    match record.get(index) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(RecordError::MissingField),
    }
}

fn count_skip(skipped: &mut SkippedRecords, reason: &RecordError) {
    match reason {
        RecordError::MissingField => skipped.missing_field += 1,
        RecordError::BadWeight => skipped.bad_weight += 1,
        RecordError::WeightOutOfRange => skipped.weight_out_of_range += 1,
        RecordError::BadTimestamp => skipped.bad_timestamp += 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_records() {
        let file = write_csv("6,2,4,1289241911.72836\n6,5,2,1289241941.53378\n");
        let summary = load_ratings(file.path(), &LoadOptions::default()).unwrap();

        assert_eq!(summary.total_records, 2);
        assert_eq!(summary.ratings.len(), 2);
        assert_eq!(summary.skipped.total(), 0);
        assert_eq!(summary.ratings[0].source, "6");
        assert_eq!(summary.ratings[0].target, "2");
        assert_eq!(summary.ratings[0].weight, 4);
        assert!((summary.ratings[0].timestamp - 1289241911.72836).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_weight_is_skipped() {
        let mut content = String::new();
        for i in 0..10 {
            content.push_str(&format!("1,{},5,100000{}\n", i + 2, i));
        }
        content.push_str("1,99,15,1000099\n"); // weight outside [-10, 10]

        let file = write_csv(&content);
        let summary = load_ratings(file.path(), &LoadOptions::default()).unwrap();

        assert_eq!(summary.total_records, 11);
        assert_eq!(summary.ratings.len(), 10);
        assert_eq!(summary.skipped.weight_out_of_range, 1);
        assert_eq!(summary.skipped.total(), 1);
    }

    #[test]
    fn test_malformed_records_counted_by_reason() {
        let content = "\
1,2,5,1000\n\
1,2,banana,1000\n\
1,2,5,later\n\
1,2,5\n";
        let file = write_csv(content);
        let summary = load_ratings(file.path(), &LoadOptions::default()).unwrap();

        assert_eq!(summary.total_records, 4);
        assert_eq!(summary.ratings.len(), 1);
        assert_eq!(summary.skipped.bad_weight, 1);
        assert_eq!(summary.skipped.bad_timestamp, 1);
        assert_eq!(summary.skipped.missing_field, 1);
    }

    #[test]
    fn test_header_row_skipped_when_requested() {
        let file = write_csv("SOURCE,TARGET,RATING,TIME\n1,2,5,1000\n");
        let opts = LoadOptions {
            has_header: true,
            ..LoadOptions::default()
        };
        let summary = load_ratings(file.path(), &opts).unwrap();

        assert_eq!(summary.total_records, 1);
        assert_eq!(summary.ratings.len(), 1);
    }

    #[test]
    fn test_empty_file_loads_no_ratings() {
        let file = write_csv("");
        let summary = load_ratings(file.path(), &LoadOptions::default()).unwrap();
        assert_eq!(summary.total_records, 0);
        assert!(summary.ratings.is_empty());
    }

    #[test]
    fn test_sign_transform() {
        let mut ratings = vec![
            Rating {
                source: "a".into(),
                target: "b".into(),
                weight: 7,
                timestamp: 0.0,
            },
            Rating {
                source: "a".into(),
                target: "c".into(),
                weight: -3,
                timestamp: 1.0,
            },
            Rating {
                source: "b".into(),
                target: "c".into(),
                weight: 0,
                timestamp: 2.0,
            },
        ];
        apply_sign_transform(&mut ratings);
        let weights: Vec<i32> = ratings.iter().map(|r| r.weight).collect();
        assert_eq!(weights, vec![1, -1, 0]);
    }
}
