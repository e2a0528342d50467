//! Analysis profile configuration.
//!
//! An optional YAML profile mirrors the CLI flags so a full analysis can be
//! re-run from a single checked-in file. CLI flags override profile values.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

use color_eyre::Result;
use log::info;
use serde::{Deserialize, Serialize};

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("window size must be positive")]
    ZeroWindowSize,
    #[error("weight bounds are inverted: min {min} > max {max}")]
    InvertedWeightBounds { min: i32, max: i32 },
    #[error("top_k must be at least 1")]
    ZeroTopK,
}

/// Analysis profile.
///
/// ```yaml
/// input: data/soc-sign-bitcoinotc.csv
/// window_size: 7days
/// output_dir: analysis_output
/// min_weight: -10
/// max_weight: 10
/// sign_only: false
/// top_k: 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Input CSV edge list (source,target,weight,timestamp).
    #[serde(default)]
    pub input: Option<PathBuf>,

    /// Window width as a human-readable duration, e.g. "7days" or "12h".
    #[serde(with = "humantime_serde", default = "default_window_size")]
    pub window_size: Duration,

    /// Directory for generated reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Inclusive weight bounds; records outside are skipped as malformed.
    #[serde(default = "default_min_weight")]
    pub min_weight: i32,
    #[serde(default = "default_max_weight")]
    pub max_weight: i32,

    /// Treat the first input row as a header.
    #[serde(default)]
    pub has_header: bool,

    /// Reduce weights to their sign before analysis.
    #[serde(default)]
    pub sign_only: bool,

    /// Number of high-centrality nodes to report.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_window_size() -> Duration {
    Duration::from_secs(7 * 24 * 60 * 60)
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("analysis_output")
}

fn default_min_weight() -> i32 {
    -10
}

fn default_max_weight() -> i32 {
    10
}

fn default_top_k() -> usize {
    10
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input: None,
            window_size: default_window_size(),
            output_dir: default_output_dir(),
            min_weight: default_min_weight(),
            max_weight: default_max_weight(),
            has_header: false,
            sign_only: false,
            top_k: default_top_k(),
        }
    }
}

impl AnalysisConfig {
    /// Validate the profile
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size.is_zero() {
            return Err(ConfigError::ZeroWindowSize);
        }
        if self.min_weight > self.max_weight {
            return Err(ConfigError::InvertedWeightBounds {
                min: self.min_weight,
                max: self.max_weight,
            });
        }
        if self.top_k == 0 {
            return Err(ConfigError::ZeroTopK);
        }
        Ok(())
    }

    /// Window width in seconds, as used by the bucketing step.
    pub fn window_size_sec(&self) -> f64 {
        self.window_size.as_secs_f64()
    }
}

/// Load and parse an analysis profile from a YAML file
pub fn load_config(config_path: &Path) -> Result<AnalysisConfig> {
    info!("Loading analysis profile from: {:?}", config_path);

    let file = File::open(config_path)?;
    let config: AnalysisConfig = serde_yaml::from_reader(file)?;

    config.validate()?;

    Ok(config)
}
