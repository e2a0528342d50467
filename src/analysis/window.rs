//! Time bucketing for windowed trend analysis.
//!
//! Divides the dataset's full timestamp span into contiguous, equal-width
//! windows and assigns every rating to exactly one of them.

use super::error::AnalysisError;
use super::types::{Rating, TimeWindow, Timestamp};

/// Find the `[min, max]` timestamp range of a set of ratings.
pub fn find_time_range(ratings: &[Rating]) -> Option<(Timestamp, Timestamp)> {
    let mut min_ts = f64::MAX;
    let mut max_ts = f64::MIN;

    for rating in ratings {
        min_ts = min_ts.min(rating.timestamp);
        max_ts = max_ts.max(rating.timestamp);
    }

    if ratings.is_empty() {
        None
    } else {
        Some((min_ts, max_ts))
    }
}

/// Partition ratings into fixed-width time windows.
///
/// Windows are anchored at the minimum timestamp and advance by pure
/// duration arithmetic; there is no calendar alignment. The window count is
/// `floor(span / width) + 1`, so the final window always contains the
/// maximum timestamp and every rating lands in exactly one window.
///
/// # Arguments
/// * `ratings` - Input ratings, in any order
/// * `window_size_sec` - Width of each window in seconds
///
/// # Returns
/// Windows ordered by start time, each holding its ratings sorted by
/// timestamp.
pub fn bucket(
    ratings: &[Rating],
    window_size_sec: f64,
) -> Result<Vec<TimeWindow>, AnalysisError> {
    if !window_size_sec.is_finite() || window_size_sec <= 0.0 {
        return Err(AnalysisError::InvalidWindowSize(window_size_sec));
    }

    let (min_ts, max_ts) = find_time_range(ratings).ok_or(AnalysisError::EmptyInput)?;

    let count = ((max_ts - min_ts) / window_size_sec).floor() as usize + 1;
    let mut windows: Vec<TimeWindow> = (0..count)
        .map(|index| {
            let start = min_ts + index as f64 * window_size_sec;
            TimeWindow::new(index, start, start + window_size_sec)
        })
        .collect();

    let mut sorted: Vec<Rating> = ratings.to_vec();
    sorted.sort_by(|a, b| {
        a.timestamp
            .partial_cmp(&b.timestamp)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for rating in sorted {
        let offset = ((rating.timestamp - min_ts) / window_size_sec).floor() as usize;
        let index = offset.min(count - 1);
        windows[index].ratings.push(rating);
    }

    Ok(windows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating(source: &str, target: &str, weight: i32, timestamp: f64) -> Rating {
        Rating {
            source: source.to_string(),
            target: target.to_string(),
            weight,
            timestamp,
        }
    }

    #[test]
    fn test_bucket_partitions_range() {
        let ratings = vec![
            rating("a", "b", 5, 0.0),
            rating("b", "c", -2, 65.0),
            rating("c", "a", 1, 130.0),
            rating("a", "c", 3, 299.0),
        ];
        let windows = bucket(&ratings, 60.0).unwrap();

        assert_eq!(windows.len(), 5);
        assert_eq!(windows[0].start, 0.0);
        assert_eq!(windows[0].end, 60.0);
        assert_eq!(windows[4].start, 240.0);

        // Contiguous, equal-width, ordered
        for pair in windows.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }

        // Every rating lands in exactly one window
        let assigned: usize = windows.iter().map(|w| w.ratings.len()).sum();
        assert_eq!(assigned, ratings.len());
    }

    #[test]
    fn test_bucket_unsorted_input() {
        let ratings = vec![
            rating("a", "b", 5, 500.0),
            rating("b", "c", -2, 0.0),
            rating("c", "a", 1, 250.0),
        ];
        let windows = bucket(&ratings, 100.0).unwrap();

        assert_eq!(windows[0].ratings.len(), 1);
        assert_eq!(windows[0].ratings[0].timestamp, 0.0);
        assert_eq!(windows[2].ratings.len(), 1);
        assert_eq!(windows[5].ratings.len(), 1);
    }

    #[test]
    fn test_bucket_maximum_timestamp_included() {
        // Span is an exact multiple of the width; the extra final window
        // catches the maximum timestamp.
        let ratings = vec![rating("a", "b", 1, 0.0), rating("b", "c", 1, 120.0)];
        let windows = bucket(&ratings, 60.0).unwrap();

        assert_eq!(windows.len(), 3);
        assert_eq!(windows[2].ratings.len(), 1);
        assert_eq!(windows[2].ratings[0].timestamp, 120.0);
    }

    #[test]
    fn test_bucket_single_timestamp() {
        let ratings = vec![rating("a", "b", 1, 42.0), rating("b", "a", -1, 42.0)];
        let windows = bucket(&ratings, 60.0).unwrap();

        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].ratings.len(), 2);
    }

    #[test]
    fn test_bucket_empty_input() {
        let result = bucket(&[], 60.0);
        assert!(matches!(result, Err(AnalysisError::EmptyInput)));
    }

    #[test]
    fn test_bucket_rejects_bad_window_size() {
        let ratings = vec![rating("a", "b", 1, 0.0)];
        assert!(matches!(
            bucket(&ratings, 0.0),
            Err(AnalysisError::InvalidWindowSize(_))
        ));
        assert!(matches!(
            bucket(&ratings, -60.0),
            Err(AnalysisError::InvalidWindowSize(_))
        ));
    }

    #[test]
    fn test_window_contains() {
        let window = TimeWindow::new(0, 100.0, 200.0);
        assert!(!window.contains(99.9));
        assert!(window.contains(100.0));
        assert!(window.contains(150.0));
        assert!(!window.contains(200.0)); // End is exclusive
    }
}
