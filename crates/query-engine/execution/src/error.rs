//! Errors for statement execution.

/// A type for execution errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Database(#[from] sqlx::Error),
    #[error("no connection is established for {0}")]
    UnknownTarget(String),
    #[error("unexpected statement result: {0}")]
    Decode(String),
}
