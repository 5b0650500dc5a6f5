//! The action-group wire format: the inbound event, the typed request decoded from it, and the
//! response envelope every call ends in.

use enum_iterator::Sequence;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use query_engine_execution::query::ResultSet;

use crate::error::{ActionError, ErrorKind};

pub const MESSAGE_VERSION: &str = "1.0";
pub const HTTP_METHOD: &str = "POST";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// The action paths this group serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence)]
pub enum ApiPath {
    Generate,
    Execute,
}

impl ApiPath {
    pub fn parse(path: &str) -> Option<Self> {
        match path {
            "/generate" => Some(ApiPath::Generate),
            "/execute" => Some(ApiPath::Execute),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ApiPath::Generate => "/generate",
            ApiPath::Execute => "/execute",
        }
    }
}

/// One inbound call, as the orchestrator sends it. Absent fields decode as empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionEvent {
    #[serde(default)]
    pub action_group: String,
    #[serde(default)]
    pub api_path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub request_body: RequestBody,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RequestBody {
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: RequestContent,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RequestContent {
    #[serde(rename = "application/json", default, deserialize_with = "null_as_default")]
    pub json: PropertyList,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PropertyList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: Vec<Property>,
}

/// A named value supplied by the caller. A property without a name is kept but never matches.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Property {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(default)]
    pub value: serde_json::Value,
}

/// Explicit `null`s in the request body decode as empty.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Property {
    pub fn string(name: &str, value: &str) -> Self {
        Property {
            name: name.to_string(),
            property_type: Some("string".to_string()),
            value: serde_json::Value::String(value.to_string()),
        }
    }
}

impl ActionEvent {
    pub fn new(action_group: &str, api_path: &str, properties: Vec<Property>) -> Self {
        ActionEvent {
            action_group: action_group.to_string(),
            api_path: api_path.to_string(),
            request_body: RequestBody {
                content: RequestContent {
                    json: PropertyList { properties },
                },
            },
        }
    }

    pub fn properties(&self) -> &[Property] {
        &self.request_body.content.json.properties
    }

    /// The value of the named property as a non-empty string.
    ///
    /// When a name is repeated the last occurrence wins, even if its value is unusable.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties()
            .iter()
            .rev()
            .find(|property| property.name == name)
            .and_then(|property| property.value.as_str())
            .filter(|value| !value.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct GenerateRequest {
    /// Natural language prompt for query generation
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct ExecuteRequest {
    /// SQL query to execute
    pub query: String,
}

/// An inbound call decoded for the path it addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRequest {
    Generate(GenerateRequest),
    Execute(ExecuteRequest),
}

impl ActionRequest {
    pub fn decode(event: &ActionEvent) -> Result<Self, ActionError> {
        match ApiPath::parse(&event.api_path) {
            Some(ApiPath::Generate) => {
                let prompt = required(event, "prompt", "Prompt parameter is required")?;
                Ok(ActionRequest::Generate(GenerateRequest { prompt }))
            }
            Some(ApiPath::Execute) => {
                let query = required(event, "query", "Query parameter is required")?;
                Ok(ActionRequest::Execute(ExecuteRequest { query }))
            }
            None => Err(ActionError::bare(ErrorKind::UnknownPath)),
        }
    }
}

fn required(event: &ActionEvent, name: &str, detail: &str) -> Result<String, ActionError> {
    event
        .property(name)
        .map(str::to_string)
        .ok_or_else(|| ActionError::new(ErrorKind::MissingParameter, detail))
}

/// What a call answers with, inside the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ActionBody {
    Query { query: String },
    Results { results: ResultSet },
    Error { error: String },
}

/// The envelope returned for every call, success or failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub message_version: &'static str,
    pub response: ResponseData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseData {
    pub action_group: String,
    pub api_path: String,
    pub http_method: &'static str,
    pub http_status_code: u16,
    pub response_body: ResponseBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseBody {
    #[serde(rename = "application/json")]
    pub json: ActionBody,
}

impl ActionResponse {
    pub fn new(action_group: String, api_path: String, status_code: u16, body: ActionBody) -> Self {
        ActionResponse {
            message_version: MESSAGE_VERSION,
            response: ResponseData {
                action_group,
                api_path,
                http_method: HTTP_METHOD,
                http_status_code: status_code,
                response_body: ResponseBody { json: body },
            },
        }
    }

    pub fn success(action_group: String, api_path: String, body: ActionBody) -> Self {
        ActionResponse::new(action_group, api_path, 200, body)
    }

    pub fn error(action_group: String, api_path: String, error: &ActionError) -> Self {
        ActionResponse::new(
            action_group,
            api_path,
            error.kind.status_code(),
            ActionBody::Error {
                error: error.to_string(),
            },
        )
    }

    pub fn from_outcome(
        action_group: String,
        api_path: String,
        outcome: &Result<ActionBody, ActionError>,
    ) -> Self {
        match outcome {
            Ok(body) => ActionResponse::success(action_group, api_path, body.clone()),
            Err(error) => ActionResponse::error(action_group, api_path, error),
        }
    }

    pub fn status_code(&self) -> u16 {
        self.response.http_status_code
    }

    pub fn body(&self) -> &ActionBody {
        &self.response.response_body.json
    }
}
