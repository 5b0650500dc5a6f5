//! Stand-ins for the model and the database.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use query_engine_execution::error::Error;
use query_engine_execution::query::{ResultSet, StatementApi, StatementRequest};
use query_engine_sql::sql;
use query_engine_translation::translation::model::{
    ContentBlock, ModelClient, ModelError, ModelRequest, ModelResponse,
};

use crate::fixtures;

/// A model that answers every prompt with the same text.
pub struct FakeModel {
    answer: String,
    requests: Mutex<Vec<ModelRequest>>,
}

impl FakeModel {
    pub fn answering(answer: &str) -> Self {
        FakeModel {
            answer: answer.to_string(),
            requests: Mutex::new(vec![]),
        }
    }

    pub fn requests(&self) -> Vec<ModelRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ModelClient for FakeModel {
    async fn invoke(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        Ok(ModelResponse {
            content: vec![ContentBlock::Text {
                text: self.answer.clone(),
            }],
            stop_reason: Some("end_turn".to_string()),
        })
    }
}

/// A model endpoint that is always overloaded.
pub struct FailingModel;

#[async_trait]
impl ModelClient for FailingModel {
    async fn invoke(&self, _request: ModelRequest) -> Result<ModelResponse, ModelError> {
        Err(ModelError::Status {
            status: 529,
            body: r#"{"type":"error","error":{"type":"overloaded_error"}}"#.to_string(),
        })
    }
}

/// A model whose invocation panics, to exercise the router's outermost boundary.
pub struct PanickingModel;

#[async_trait]
impl ModelClient for PanickingModel {
    async fn invoke(&self, _request: ModelRequest) -> Result<ModelResponse, ModelError> {
        panic!("model client panicked")
    }
}

/// An in-memory database answering the catalog query, the health check, and reads of the tables
/// it holds. It records every statement it receives.
pub struct FakeDatabase {
    catalog: Vec<Value>,
    tables: BTreeMap<&'static str, Vec<Value>>,
    refuses: Refuses,
    requests: Mutex<Vec<StatementRequest>>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Refuses {
    Nothing,
    AllButCatalog,
    Everything,
}

impl FakeDatabase {
    /// The `academics` schema with three departments.
    pub fn seeded() -> Self {
        FakeDatabase {
            catalog: fixtures::academics_catalog_rows(),
            tables: BTreeMap::from([("academics.departments", fixtures::department_rows())]),
            refuses: Refuses::Nothing,
            requests: Mutex::new(vec![]),
        }
    }

    /// A database whose catalog describes nothing.
    pub fn empty() -> Self {
        FakeDatabase {
            catalog: vec![],
            tables: BTreeMap::new(),
            refuses: Refuses::Nothing,
            requests: Mutex::new(vec![]),
        }
    }

    /// A database that refuses every statement.
    pub fn unreachable() -> Self {
        FakeDatabase {
            refuses: Refuses::Everything,
            ..FakeDatabase::seeded()
        }
    }

    /// A database that answers the catalog query, then goes away.
    pub fn lost_after_catalog() -> Self {
        FakeDatabase {
            refuses: Refuses::AllButCatalog,
            ..FakeDatabase::seeded()
        }
    }

    /// The text of every statement received, in order.
    pub fn statements(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.iter().map(|request| request.sql.clone()).collect())
            .unwrap_or_default()
    }

    /// Statements received after the schema snapshot was loaded.
    pub fn statements_after_catalog(&self) -> Vec<String> {
        self.statements()
            .into_iter()
            .filter(|statement| statement != sql::helpers::CATALOG_QUERY)
            .collect()
    }

    fn rows_for(&self, statement: &str) -> Result<Vec<Value>, Error> {
        if statement == sql::helpers::CATALOG_QUERY {
            return Ok(self.catalog.clone());
        }
        if statement == sql::helpers::HEALTH_CHECK_QUERY {
            return Ok(vec![json!({ "ok": 1 })]);
        }
        let lowered = statement.to_lowercase();
        self.tables
            .iter()
            .find(|(table, _)| lowered.contains(*table))
            .map(|(_, rows)| rows.clone())
            .ok_or_else(|| {
                Error::Database(sqlx::Error::Protocol(format!(
                    "relation referenced by {statement:?} does not exist"
                )))
            })
    }
}

#[async_trait]
impl StatementApi for FakeDatabase {
    async fn execute_statement(&self, request: StatementRequest) -> Result<ResultSet, Error> {
        let statement = request.sql.clone();
        let output_format = request.output_format;
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        let refused = match self.refuses {
            Refuses::Nothing => false,
            Refuses::AllButCatalog => statement != sql::helpers::CATALOG_QUERY,
            Refuses::Everything => true,
        };
        if refused {
            return Err(Error::Database(sqlx::Error::PoolTimedOut));
        }
        let rows = self.rows_for(&statement)?;
        ResultSet::from_json_rows(Value::Array(rows), output_format)
    }
}
