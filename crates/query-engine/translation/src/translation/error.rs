//! Errors for translation.

use query_engine_sql::sql::guard::GuardError;

use super::model::ModelError;

/// A type for translation errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Schema not initialized")]
    SchemaUnavailable,
    #[error("{0}")]
    InvalidInput(GuardError),
    #[error("{0}")]
    ModelInvocation(#[from] ModelError),
}

impl From<GuardError> for Error {
    fn from(error: GuardError) -> Self {
        Error::InvalidInput(error)
    }
}
