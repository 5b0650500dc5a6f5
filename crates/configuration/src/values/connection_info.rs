use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Secret;

/// Where the database lives: a Postgres URI carrying neither credentials nor a database name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct ResourceId(pub Secret);

impl From<String> for ResourceId {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

/// The read-only credential, as a JSON object with a `username` and a `password`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct CredentialSecret(pub Secret);

impl From<String> for CredentialSecret {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl From<&str> for CredentialSecret {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct DatabaseName(pub Secret);

impl From<String> for DatabaseName {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl From<&str> for DatabaseName {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct ModelId(pub Secret);

impl From<String> for ModelId {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl From<&str> for ModelId {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct ModelEndpoint(pub Secret);

impl From<&str> for ModelEndpoint {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct ApiKey(pub Secret);

impl From<&str> for ApiKey {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}
