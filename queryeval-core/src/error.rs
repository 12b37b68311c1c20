use thiserror::Error;

/// Errors that can arise while assembling a [`crate::config::Config`].
///
/// Kept separate from the execution-path errors in `queryeval-eval` and
/// `queryeval-db` because nothing here ever reaches a caller as an
/// `EvaluationVerdict` — a bad config is an operator mistake, not a
/// participant-facing outcome.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("required configuration value {0} is not set")]
    MissingConfig(&'static str),

    #[error("configuration value {0} is invalid: {1}")]
    InvalidConfig(&'static str, String),
}
