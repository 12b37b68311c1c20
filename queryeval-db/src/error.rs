use thiserror::Error;

/// Errors surfaced by connection acquisition and raw metadata queries.
///
/// This is a lower-level error type than anything the Executor returns
/// to a caller — `queryeval-eval` is responsible for turning these into
/// the sanitized, user-safe messages spec §4.6 describes. Nothing here
/// should ever be displayed verbatim to a participant.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("connect timed out after {0:?}")]
    ConnectTimeout(std::time::Duration),

    #[error("driver error: {0}")]
    Driver(#[from] tiberius::error::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no database targets available")]
    NoTargetsAvailable,

    #[error("invalid connection string: {0}")]
    InvalidConnectionString(String),
}
