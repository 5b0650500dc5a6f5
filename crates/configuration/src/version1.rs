//! The configuration format, before any values are read from the environment.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::connection_settings::DatabaseConnectionSettings;
use crate::model_settings::ModelSettings;
use crate::values::PoolSettings;

pub const CURRENT_VERSION: u32 = 1;

/// Initial configuration, just enough to connect to a database and a model and elaborate a full
/// 'Configuration'.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParsedConfiguration {
    // Which version of the configuration format are we using
    pub version: u32,
    pub connection_settings: DatabaseConnectionSettings,
    pub model_settings: ModelSettings,
    #[serde(skip_serializing_if = "PoolSettings::is_default")]
    #[serde(default)]
    pub pool_settings: PoolSettings,
}

impl ParsedConfiguration {
    /// The configuration used by a deployment: every value comes from its default environment
    /// variable.
    pub fn initial() -> Self {
        ParsedConfiguration::empty()
    }

    pub fn empty() -> Self {
        Self {
            version: CURRENT_VERSION,
            connection_settings: DatabaseConnectionSettings::empty(),
            model_settings: ModelSettings::empty(),
            pool_settings: PoolSettings::default(),
        }
    }
}
