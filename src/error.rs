//! Error types for the comparison engine
//!
//! Every failure is fatal to one comparison only (one platform, one chart
//! view). Callers decide whether to emit an empty artifact or abort.

use std::fmt;
use thiserror::Error;

/// Why a role could not be assigned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigResolutionKind {
    /// A required role matched no configuration
    ZeroMatches,
    /// A role matched more than one configuration
    MultipleMatches,
}

impl fmt::Display for ConfigResolutionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigResolutionKind::ZeroMatches => write!(f, "no matching config"),
            ConfigResolutionKind::MultipleMatches => write!(f, "more than one matching config"),
        }
    }
}

/// Errors raised by the comparison engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompareError {
    #[error("Cannot resolve {role} config: {kind} among {candidates:?}")]
    ConfigResolution {
        kind: ConfigResolutionKind,
        role: String,
        candidates: Vec<String>,
    },

    #[error("No results in config {config:?} for benchmark(s) {benchmarks:?}")]
    MissingBenchmarkData {
        config: String,
        benchmarks: Vec<String>,
    },

    #[error("No results for config {config:?} (benchmark filter: {only:?})")]
    NoBenchmarks { config: String, only: Vec<String> },

    #[error("No JIT stats found for benchmark(s) {benchmarks:?}")]
    MissingStats { benchmarks: Vec<String> },

    #[error("Cannot figure out axis scale (max ratio: {max_ratio:?})")]
    AxisScale { max_ratio: Option<f64> },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for comparison operations
pub type Result<T> = std::result::Result<T, CompareError>;
