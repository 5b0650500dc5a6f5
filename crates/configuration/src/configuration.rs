//! Configuration for the agent.

use std::fmt;

use url::Url;

use crate::values::{Credential, PoolSettings};

/// The 'Configuration' type collects all the information necessary to serve actions at runtime.
///
/// Values of this type are produced from a 'ParsedConfiguration' using
/// 'make_runtime_configuration', after every value has been read from the environment.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// The database resource, without credentials or a database name.
    pub resource_id: Url,
    pub credential: Credential,
    pub database: String,
    pub model: ModelConfiguration,
    pub pool_settings: PoolSettings,
}

impl Configuration {
    /// The identifier sent alongside every statement: the name of the read-only role.
    pub fn credential_id(&self) -> &str {
        &self.credential.username
    }
}

/// Everything needed to invoke the language model.
#[derive(Clone)]
pub struct ModelConfiguration {
    pub model_id: String,
    pub endpoint: Url,
    pub api_key: Option<String>,
    pub max_tokens: u32,
}

impl fmt::Debug for ModelConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfiguration")
            .field("model_id", &self.model_id)
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}
