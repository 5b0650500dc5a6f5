//! Execute statements against the database.
//!
//! `StatementApi` is the data-execution collaborator: it takes a statement addressed to a
//! resource, credential and database, and returns the rows. `Executor` pins the address for the
//! lifetime of the process so callers only supply the statement.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use sqlx::postgres::{PgArguments, PgPool};
use sqlx::{Postgres, Row};
use tracing::{info_span, Instrument};

use query_engine_sql::sql;
use query_engine_sql::sql::string::{NamedParam, Param};

use crate::error::Error;

/// Where statements are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub resource_id: String,
    /// The read-only role statements run as.
    pub credential_id: String,
    pub database: String,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "database {:?} at {} as {:?}",
            self.database, self.resource_id, self.credential_id
        )
    }
}

/// How the rows of a result come back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Column metadata plus positional records.
    #[default]
    Native,
    /// An array of row objects keyed by column name.
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatementRequest {
    pub target: Target,
    pub sql: String,
    pub parameters: Vec<NamedParam>,
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnMetadata {
    pub name: String,
}

/// The tabular rendering of a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeResultSet {
    pub column_metadata: Vec<ColumnMetadata>,
    pub records: Vec<Vec<serde_json::Value>>,
}

/// The rows a statement produced, in the requested format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResultSet {
    Json(Vec<serde_json::Value>),
    Native(NativeResultSet),
}

impl ResultSet {
    /// Build a result set from a JSON array of row objects, as produced by
    /// `sql::helpers::wrap_as_json_rows`.
    ///
    /// The native rendering takes its columns from the first row, so an empty result has no
    /// column metadata.
    pub fn from_json_rows(
        rows: serde_json::Value,
        output_format: OutputFormat,
    ) -> Result<Self, Error> {
        let rows = match rows {
            serde_json::Value::Array(rows) => rows,
            other => {
                return Err(Error::Decode(format!(
                    "expected an array of rows, got {other}"
                )))
            }
        };
        match output_format {
            OutputFormat::Json => Ok(ResultSet::Json(rows)),
            OutputFormat::Native => {
                let mut column_metadata = vec![];
                let mut records = Vec::with_capacity(rows.len());
                for row in rows {
                    let row = match row {
                        serde_json::Value::Object(row) => row,
                        other => {
                            return Err(Error::Decode(format!(
                                "expected a row object, got {other}"
                            )))
                        }
                    };
                    if column_metadata.is_empty() {
                        column_metadata = row
                            .keys()
                            .map(|name| ColumnMetadata { name: name.clone() })
                            .collect();
                    }
                    records.push(row.into_iter().map(|(_, value)| value).collect());
                }
                Ok(ResultSet::Native(NativeResultSet {
                    column_metadata,
                    records,
                }))
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ResultSet::Json(rows) => rows.len(),
            ResultSet::Native(result) => result.records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The statement-execution collaborator.
#[async_trait]
pub trait StatementApi: Send + Sync {
    async fn execute_statement(&self, request: StatementRequest) -> Result<ResultSet, Error>;
}

/// A `StatementApi` backed by a connection pool to exactly one target.
#[derive(Debug, Clone)]
pub struct PgStatementApi {
    target: Target,
    pool: PgPool,
}

impl PgStatementApi {
    /// The pool must already be authenticated as `target.credential_id` against
    /// `target.database`.
    pub fn new(target: Target, pool: PgPool) -> Self {
        PgStatementApi { target, pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl StatementApi for PgStatementApi {
    async fn execute_statement(&self, request: StatementRequest) -> Result<ResultSet, Error> {
        if request.target != self.target {
            return Err(Error::UnknownTarget(request.target.to_string()));
        }

        let statement = sql::helpers::wrap_as_json_rows(&request.sql);
        let query = build_query_with_params(&statement, &request.parameters);
        let row = query.fetch_one(&self.pool).await?;
        let rows: serde_json::Value = row.try_get(0)?;

        ResultSet::from_json_rows(rows, request.output_format)
    }
}

/// Create a SQLx query based on our SQL statement and bind our parameters to it, in order.
fn build_query_with_params<'a>(
    statement: &'a str,
    parameters: &[NamedParam],
) -> sqlx::query::Query<'a, Postgres, PgArguments> {
    parameters
        .iter()
        .fold(sqlx::query(statement), |query, param| match &param.value {
            Param::String(s) => query.bind(s.clone()),
            Param::Integer(i) => query.bind(*i),
            Param::Double(d) => query.bind(*d),
            Param::Boolean(b) => query.bind(*b),
            Param::Value(v) => query.bind(v.clone()),
            Param::Null => query.bind(None::<String>),
        })
}

/// Runs statements against the one target this process was configured with.
#[derive(Clone)]
pub struct Executor {
    target: Target,
    api: Arc<dyn StatementApi>,
}

impl Executor {
    pub fn new(target: Target, api: Arc<dyn StatementApi>) -> Self {
        Executor { target, api }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Submit one statement and await its full result. No timeout, retry or pagination applies.
    pub async fn execute(
        &self,
        sql: &str,
        parameters: &[NamedParam],
        output_format: OutputFormat,
    ) -> Result<ResultSet, Error> {
        let request = StatementRequest {
            target: self.target.clone(),
            sql: sql.to_string(),
            parameters: parameters.to_vec(),
            output_format,
        };

        let result = self
            .api
            .execute_statement(request)
            .instrument(info_span!(
                "Execute statement",
                database = %self.target.database,
                parameters = parameters.len(),
            ))
            .await?;

        tracing::info!(rows = result.len(), "statement executed");
        Ok(result)
    }
}
