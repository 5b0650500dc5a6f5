//! Validation of untrusted text before it is translated or executed.
//!
//! There are two checkpoints: the natural-language question a user asks, and any SQL statement
//! about to run against the database. Both are plain case-insensitive substring checks against a
//! fixed blocklist, not a SQL parser. They over-block (`updated_at` trips the `update` check) in
//! exchange for being simple to reason about. They are also not the only barrier: the database
//! role is read-only, and an upstream guardrail filters model traffic before it reaches us.
//!
//! The `QueryGuard` trait is the seam at which a stricter, parser-aware validator can replace the
//! blocklist without the router noticing.

use std::fmt;

use enum_iterator::{all, Sequence};

/// Statement keywords that may never reach the database, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence)]
pub enum BlockedOperation {
    Drop,
    Truncate,
    Delete,
    Update,
    Alter,
    Create,
    Insert,
    Grant,
}

impl BlockedOperation {
    /// The keyword as it is matched and reported, in lower case.
    pub fn keyword(self) -> &'static str {
        match self {
            BlockedOperation::Drop => "drop",
            BlockedOperation::Truncate => "truncate",
            BlockedOperation::Delete => "delete",
            BlockedOperation::Update => "update",
            BlockedOperation::Alter => "alter",
            BlockedOperation::Create => "create",
            BlockedOperation::Insert => "insert",
            BlockedOperation::Grant => "grant",
        }
    }
}

impl fmt::Display for BlockedOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Raw-SQL markers that have no business in a natural-language question.
///
/// The keywords match inside ordinary prose as well ("which courses were selected?"), which is
/// accepted: such questions have to be rephrased.
pub const INJECTION_MARKERS: [&str; 9] = [
    "--;", "/*", "*/", "@@", "union", "select", "drop", "delete", "update",
];

/// Why a piece of text was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuardError {
    #[error("Question must be a non-empty string")]
    EmptyInput,
    #[error("Potentially malicious input detected")]
    SuspiciousInput { marker: &'static str },
    #[error("Unauthorized SQL operation detected: {0}")]
    UnauthorizedOperation(BlockedOperation),
}

/// The two validation checkpoints.
pub trait QueryGuard: Send + Sync {
    /// Validate a natural-language question, returning it unchanged when it passes.
    fn validate_user_input<'a>(&self, text: &'a str) -> Result<&'a str, GuardError>;

    /// Validate a SQL statement that is about to be executed or handed back to a caller.
    fn validate_sql_statement(&self, sql: &str) -> Result<(), GuardError>;
}

/// The blocklist implementation of `QueryGuard`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlocklistGuard;

impl QueryGuard for BlocklistGuard {
    fn validate_user_input<'a>(&self, text: &'a str) -> Result<&'a str, GuardError> {
        if text.trim().is_empty() {
            return Err(GuardError::EmptyInput);
        }
        let lowered = text.to_lowercase();
        match INJECTION_MARKERS
            .into_iter()
            .find(|marker| lowered.contains(marker))
        {
            Some(marker) => Err(GuardError::SuspiciousInput { marker }),
            None => Ok(text),
        }
    }

    fn validate_sql_statement(&self, sql: &str) -> Result<(), GuardError> {
        let lowered = sql.to_lowercase();
        match all::<BlockedOperation>()
            .find(|operation| lowered.contains(operation.keyword()))
        {
            Some(operation) => Err(GuardError::UnauthorizedOperation(operation)),
            None => Ok(()),
        }
    }
}
