//! The closed set of ways an action can fail, and how each one is reported.

use std::fmt;

use enum_iterator::Sequence;

use query_engine_execution::error::Error as ExecutionError;
use query_engine_sql::sql::guard::GuardError;
use query_engine_translation::translation::error::Error as TranslationError;

/// Every failure kind an action can report. Each has a fixed message and status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence)]
pub enum ErrorKind {
    MissingParameter,
    InvalidInput,
    InvalidQuery,
    SchemaUnavailable,
    ModelInvocationError,
    DatabaseError,
    UnknownPath,
    ServerError,
}

impl ErrorKind {
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::MissingParameter => "Missing parameter",
            ErrorKind::InvalidInput => "Invalid input",
            ErrorKind::InvalidQuery => "Invalid query",
            ErrorKind::SchemaUnavailable => "Schema unavailable",
            ErrorKind::ModelInvocationError => "Model invocation error",
            ErrorKind::DatabaseError => "Database error",
            ErrorKind::UnknownPath => "Unknown path",
            ErrorKind::ServerError => "Server error",
        }
    }

    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::MissingParameter | ErrorKind::InvalidInput | ErrorKind::InvalidQuery => 400,
            ErrorKind::UnknownPath => 404,
            ErrorKind::SchemaUnavailable
            | ErrorKind::ModelInvocationError
            | ErrorKind::DatabaseError
            | ErrorKind::ServerError => 500,
        }
    }

    /// Whether this kind means a validation checkpoint refused the text.
    pub fn is_rejection(self) -> bool {
        matches!(self, ErrorKind::InvalidInput | ErrorKind::InvalidQuery)
    }
}

/// A failed action: its kind plus an optional human-readable detail.
///
/// The detail may carry raw error text from a collaborator; it is diagnostic only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionError {
    pub kind: ErrorKind,
    pub detail: Option<String>,
}

impl ActionError {
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        ActionError {
            kind,
            detail: Some(detail.into()),
        }
    }

    pub fn bare(kind: ErrorKind) -> Self {
        ActionError { kind, detail: None }
    }

    /// A statement refused at the SQL checkpoint.
    pub fn invalid_query(error: &GuardError) -> Self {
        ActionError::new(ErrorKind::InvalidQuery, error.to_string())
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) if !detail.is_empty() => write!(f, "{}: {detail}", self.kind.message()),
            _ => f.write_str(self.kind.message()),
        }
    }
}

impl std::error::Error for ActionError {}

impl From<TranslationError> for ActionError {
    fn from(error: TranslationError) -> Self {
        match error {
            TranslationError::SchemaUnavailable => ActionError::bare(ErrorKind::SchemaUnavailable),
            TranslationError::InvalidInput(error) => {
                ActionError::new(ErrorKind::InvalidInput, error.to_string())
            }
            TranslationError::ModelInvocation(error) => {
                ActionError::new(ErrorKind::ModelInvocationError, error.to_string())
            }
        }
    }
}

impl From<ExecutionError> for ActionError {
    fn from(error: ExecutionError) -> Self {
        ActionError::new(ErrorKind::DatabaseError, error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use enum_iterator::all;
    use query_engine_sql::sql::guard::BlockedOperation;
    use query_engine_translation::translation::model::ModelError;

    use super::*;

    #[test]
    fn status_codes_stay_within_the_taxonomy() {
        for kind in all::<ErrorKind>() {
            assert!(
                [400, 404, 500].contains(&kind.status_code()),
                "{kind:?}"
            );
        }
    }

    #[test]
    fn message_and_detail_are_joined() {
        let error = ActionError::new(ErrorKind::MissingParameter, "Prompt parameter is required");
        assert_eq!(
            error.to_string(),
            "Missing parameter: Prompt parameter is required"
        );
    }

    #[test]
    fn bare_errors_are_just_the_message() {
        let error = ActionError::bare(ErrorKind::UnknownPath);
        assert_eq!(error.to_string(), "Unknown path");
        assert_eq!(
            ActionError::new(ErrorKind::ServerError, "").to_string(),
            "Server error"
        );
    }

    #[test]
    fn guard_rejections_name_the_operation() {
        let error = ActionError::invalid_query(&GuardError::UnauthorizedOperation(
            BlockedOperation::Drop,
        ));
        assert_eq!(error.kind.status_code(), 400);
        assert_eq!(
            error.to_string(),
            "Invalid query: Unauthorized SQL operation detected: drop"
        );
    }

    #[test]
    fn translation_errors_keep_their_kind() {
        assert_eq!(
            ActionError::from(TranslationError::SchemaUnavailable).kind,
            ErrorKind::SchemaUnavailable
        );
        assert_eq!(
            ActionError::from(TranslationError::InvalidInput(GuardError::EmptyInput)).to_string(),
            "Invalid input: Question must be a non-empty string"
        );
        assert_eq!(
            ActionError::from(TranslationError::ModelInvocation(ModelError::MissingText)).kind,
            ErrorKind::ModelInvocationError
        );
    }

    #[test]
    fn execution_errors_are_database_errors() {
        let error = ActionError::from(ExecutionError::Decode("not an array".to_string()));
        assert_eq!(error.kind, ErrorKind::DatabaseError);
        assert_eq!(error.kind.status_code(), 500);
    }
}
