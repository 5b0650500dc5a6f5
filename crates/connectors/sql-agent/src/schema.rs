//! Load the schema snapshot the translator works from.
//!
//! The snapshot is read once, when the state is created, and never refreshed: a schema change
//! takes effect on the next process start.

use thiserror::Error;
use tracing::{info_span, Instrument};

use query_engine_execution::error::Error as ExecutionError;
use query_engine_execution::query::{Executor, OutputFormat};
use query_engine_metadata::metadata::{CatalogRecord, SchemaDescription};
use query_engine_sql::sql;

/// Why no schema snapshot could be established.
#[derive(Debug, Error)]
pub enum SchemaUnavailable {
    #[error("catalog query failed: {0}")]
    Query(#[from] ExecutionError),
    #[error("catalog rows are malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("the catalog describes no tables")]
    Empty,
}

/// Run the catalog query and build the snapshot from its rows.
pub async fn load(executor: &Executor) -> Result<SchemaDescription, SchemaUnavailable> {
    async {
        let rows = executor
            .execute(sql::helpers::CATALOG_QUERY, &[], OutputFormat::Json)
            .await?;
        let records: Vec<CatalogRecord> = serde_json::from_value(serde_json::to_value(rows)?)?;
        if records.is_empty() {
            return Err(SchemaUnavailable::Empty);
        }
        let schema = SchemaDescription::from_records(records)?;
        tracing::info!(
            tables = schema.tables().len(),
            records = schema.records().len(),
            "schema loaded"
        );
        Ok(schema)
    }
    .instrument(info_span!("Load schema"))
    .await
    .map_err(|err| {
        tracing::error!(
            meta.signal_type = "log",
            event.domain = "sql-agent",
            event.name = "Schema error",
            name = "Schema error",
            body = %err,
            error = true,
        );
        err
    })
}
