//! # Trustnet - Temporal analysis of the Bitcoin OTC signed trust network
//!
//! This library provides the aggregation pipeline behind the `trust-analyzer`
//! binary: loading a timestamped signed edge list, bucketing it into fixed
//! width time windows, and computing per-window, cumulative, and graph-level
//! statistics for downstream plotting.
//!
//! ## Overview
//!
//! The input is a CSV edge list (`source,target,weight,timestamp`) such as
//! the published `soc-sign-bitcoinotc` dataset. Ratings are loaded once,
//! malformed records are skipped and counted, and every derived table is
//! recomputed deterministically per run. Nothing is persisted between runs.
//!
//! ## Architecture
//!
//! The library is organized into two modules:
//!
//! - `analysis`: the aggregation pipeline (loading, windowing, statistics,
//!   graph snapshots, report generation)
//! - `config`: analysis profile structures and YAML parsing
//!
//! ## Error Handling
//!
//! Library operations return typed errors (`analysis::AnalysisError`,
//! `config::ConfigError`); the binary wraps them with `color_eyre` context.

pub mod analysis;
pub mod config;
