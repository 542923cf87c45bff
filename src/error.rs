use thiserror::Error;

/// Errors a search can fail with. `NotFound` is not here on purpose: an
/// unsatisfied occurrence index is a valid outcome, not a failure, and must
/// never be conflated with a broken history source.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The history fetch call failed. Propagated as-is; the scanner never
    /// retries and never downgrades this to "no match".
    #[error("history source unavailable: {0}")]
    SourceUnavailable(#[from] serenity::Error),

    /// Rejected before any fetch is issued.
    #[error("invalid search request: {0}")]
    InvalidRequest(&'static str),
}
