//! Error taxonomy for the extraction core.
//!
//! Only construction-time misconfiguration and the (contractually
//! unreachable) invariant-violation path cross the crate boundary as
//! errors. Empty or all-stopword input is not an error: it yields an empty
//! result.

use thiserror::Error;

/// Construction-time configuration errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("n (max n-gram length) must be >= 1, got {0}")]
    InvalidN(usize),
    #[error("top_k must be >= 1, got {0}")]
    InvalidTopK(usize),
    #[error("dedup_threshold must be in [0, 1], got {0}")]
    InvalidDedupThreshold(f64),
    #[error("window_size must be >= 1, got {0}")]
    InvalidWindowSize(usize),
    #[error("unknown dedup_function {0:?}, expected one of \"seqm\", \"jaro\", \"levs\"")]
    UnknownDedupFunction(String),
}

/// Top-level error type for the crate.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum YakeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A structural assertion failed during extraction. Must never occur on
    /// well-formed input; if it does, the extraction is aborted rather than
    /// allowed to produce a NaN/Inf score silently.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}
