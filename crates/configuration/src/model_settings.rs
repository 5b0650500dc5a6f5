//! Language model settings.

use crate::values::{ApiKey, ModelEndpoint, ModelId, Secret};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL_ID_VARIABLE: &str = "SQL_AGENT_MODEL_ID";
pub const DEFAULT_MODEL_ENDPOINT_VARIABLE: &str = "SQL_AGENT_MODEL_ENDPOINT";
pub const DEFAULT_MODEL_API_KEY_VARIABLE: &str = "SQL_AGENT_MODEL_API_KEY";

/// Used when no endpoint is configured.
pub const DEFAULT_MODEL_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";

/// Enough for a single line of SQL.
pub const DEFAULT_MAX_TOKENS: u32 = 300;

/// Language model settings.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelSettings {
    pub model_id: ModelId,
    /// Optional: falls back to `DEFAULT_MODEL_ENDPOINT` when the value is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<ModelEndpoint>,
    /// Optional: sent as `x-api-key` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<ApiKey>,
    #[serde(default = "max_tokens_default")]
    #[serde(skip_serializing_if = "is_default_max_tokens")]
    pub max_tokens: u32,
}

impl ModelSettings {
    pub fn empty() -> Self {
        Self {
            model_id: ModelId(Secret::FromEnvironment {
                variable: DEFAULT_MODEL_ID_VARIABLE.into(),
            }),
            endpoint: Some(ModelEndpoint(Secret::FromEnvironment {
                variable: DEFAULT_MODEL_ENDPOINT_VARIABLE.into(),
            })),
            api_key: Some(ApiKey(Secret::FromEnvironment {
                variable: DEFAULT_MODEL_API_KEY_VARIABLE.into(),
            })),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

fn max_tokens_default() -> u32 {
    DEFAULT_MAX_TOKENS
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde passes a reference
fn is_default_max_tokens(max_tokens: &u32) -> bool {
    *max_tokens == DEFAULT_MAX_TOKENS
}
