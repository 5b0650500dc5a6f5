//! Errors that can be thrown when processing configuration.

use crate::environment::Variable;

/// The errors that can be thrown when turning a `ParsedConfiguration` into a runtime
/// `Configuration`.
#[derive(Debug, thiserror::Error)]
pub enum MakeRuntimeConfigurationError {
    #[error("invalid configuration environment: {message}")]
    MissingEnvironmentVariable { variable: Variable, message: String },

    #[error("the configuration value {field} must not be empty")]
    EmptyValue { field: &'static str },

    #[error("the database credential must be a JSON object with a username and a password: {0}")]
    InvalidCredential(serde_json::Error),

    #[error("invalid database resource identifier: {message}")]
    InvalidResourceId { message: String },

    #[error("invalid model endpoint: {0}")]
    InvalidModelEndpoint(url::ParseError),
}
