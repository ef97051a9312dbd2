use thiserror::Error;

/// Engine-level error type.
///
/// Loader failures are fatal and abort the run with no partial results.
/// The scorer, categorizer, and clusterer never fail on well-formed input;
/// empty inputs short-circuit to empty results instead. A missing injection
/// point is a valid per-cluster outcome, not an error.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Raised only under strict validation, when a candidate matches several
    /// mutually exclusive years patterns with conflicting parsed values.
    #[error("Ambiguous classification for '{keyword}': {details}")]
    ClassificationAmbiguous { keyword: String, details: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
