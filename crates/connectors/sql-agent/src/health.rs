//! Health check for the agent.

use query_engine_execution::error::Error;
use query_engine_execution::query::{Executor, OutputFormat};
use query_engine_sql::sql;

/// Check that the database answers a trivial statement with exactly one row.
pub async fn health_check(executor: &Executor) -> Result<(), Error> {
    let rows = executor
        .execute(sql::helpers::HEALTH_CHECK_QUERY, &[], OutputFormat::Json)
        .await?;
    if rows.len() == 1 {
        Ok(())
    } else {
        Err(Error::Decode(format!(
            "health check returned {} rows",
            rows.len()
        )))
    }
}
