//! Database connection settings.

use crate::values::{CredentialSecret, DatabaseName, ResourceId, Secret};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_RESOURCE_ID_VARIABLE: &str = "SQL_AGENT_RESOURCE_ID";
pub const DEFAULT_CREDENTIAL_VARIABLE: &str = "SQL_AGENT_CREDENTIAL";
pub const DEFAULT_DATABASE_VARIABLE: &str = "SQL_AGENT_DATABASE";

/// Database connection settings.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseConnectionSettings {
    /// The database resource, a Postgres URI such as `postgresql://host:5432`.
    pub resource_id: ResourceId,
    /// The read-only credential used for every statement.
    pub credential: CredentialSecret,
    /// The database every statement runs against.
    pub database: DatabaseName,
}

impl DatabaseConnectionSettings {
    pub fn empty() -> Self {
        Self {
            resource_id: ResourceId(Secret::FromEnvironment {
                variable: DEFAULT_RESOURCE_ID_VARIABLE.into(),
            }),
            credential: CredentialSecret(Secret::FromEnvironment {
                variable: DEFAULT_CREDENTIAL_VARIABLE.into(),
            }),
            database: DatabaseName(Secret::FromEnvironment {
                variable: DEFAULT_DATABASE_VARIABLE.into(),
            }),
        }
    }
}
