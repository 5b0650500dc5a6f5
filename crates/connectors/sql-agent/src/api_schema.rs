//! The OpenAPI documents an orchestrator registers for each action path.

use schemars::gen::SchemaSettings;
use schemars::JsonSchema;
use serde_json::json;

use crate::action::{ApiPath, ExecuteRequest, GenerateRequest};

pub const OPENAPI_VERSION: &str = "3.0.0";
pub const API_VERSION: &str = "1.0.0";

// described, never built
#[allow(dead_code)]
#[derive(JsonSchema)]
struct GenerateResponse {
    query: String,
}

#[allow(dead_code)]
#[derive(JsonSchema)]
struct ExecuteResponse {
    /// Query results, one object per row
    results: Vec<serde_json::Map<String, serde_json::Value>>,
}

struct Operation {
    title: &'static str,
    operation_id: &'static str,
    summary: &'static str,
    response_description: &'static str,
}

fn operation(path: ApiPath) -> Operation {
    match path {
        ApiPath::Generate => Operation {
            title: "Query Generator API",
            operation_id: "generateQuery",
            summary: "Generate SQL query from prompt",
            response_description: "Generated SQL query",
        },
        ApiPath::Execute => Operation {
            title: "Query Executor API",
            operation_id: "executeQuery",
            summary: "Execute SQL query",
            response_description: "Query results",
        },
    }
}

/// The schema of `T` as an OpenAPI 3.0 schema object.
fn schema_for<T: JsonSchema>() -> Result<serde_json::Value, serde_json::Error> {
    let root = SchemaSettings::openapi3()
        .into_generator()
        .into_root_schema_for::<T>();
    serde_json::to_value(root.schema)
}

/// The document describing one action path: its request properties and its success body.
pub fn document(path: ApiPath) -> Result<serde_json::Value, serde_json::Error> {
    let (request_schema, response_schema) = match path {
        ApiPath::Generate => (
            schema_for::<GenerateRequest>()?,
            schema_for::<GenerateResponse>()?,
        ),
        ApiPath::Execute => (
            schema_for::<ExecuteRequest>()?,
            schema_for::<ExecuteResponse>()?,
        ),
    };
    let operation = operation(path);

    Ok(json!({
        "openapi": OPENAPI_VERSION,
        "info": {
            "title": operation.title,
            "version": API_VERSION,
            "description": operation.title,
        },
        "paths": {
            path.as_str(): {
                "post": {
                    "operationId": operation.operation_id,
                    "summary": operation.summary,
                    "description": operation.summary,
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": { "schema": request_schema }
                        }
                    },
                    "responses": {
                        "200": {
                            "description": operation.response_description,
                            "content": {
                                "application/json": { "schema": response_schema }
                            }
                        }
                    }
                }
            }
        }
    }))
}
