//! Transient state used by the agent.
//!
//! This is initialized on startup.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use thiserror::Error;
use tracing::{info_span, Instrument};

use query_engine_execution::metrics;
use query_engine_execution::query::{Executor, PgStatementApi, Target};
use query_engine_metadata::metadata::SchemaDescription;
use query_engine_sql::sql::guard::{BlocklistGuard, QueryGuard};
use query_engine_translation::translation::model::{HttpModelClient, ModelClient, ModelError};
use query_engine_translation::translation::query::{ModelSettings, Translator};
use sql_agent_configuration::Configuration;

use crate::schema::{self, SchemaUnavailable};

/// State for the agent.
pub struct State {
    pub translator: Translator,
    pub guard: Arc<dyn QueryGuard>,
    pub executor: Executor,
    pub metrics: metrics::Metrics,
    pub metrics_registry: prometheus::Registry,
}

impl State {
    /// Assemble the state around an already loaded schema snapshot.
    pub fn new(
        schema: SchemaDescription,
        model: Arc<dyn ModelClient>,
        executor: Executor,
        model_settings: ModelSettings,
        mut metrics_registry: prometheus::Registry,
    ) -> Result<Self, InitializationError> {
        let metrics = metrics::Metrics::initialize(&mut metrics_registry)
            .map_err(InitializationError::MetricsError)?;
        let guard: Arc<dyn QueryGuard> = Arc::new(BlocklistGuard);
        let translator = Translator::new(Arc::new(schema), model, guard.clone(), model_settings);
        Ok(State {
            translator,
            guard,
            executor,
            metrics,
            metrics_registry,
        })
    }
}

/// Connect to the database, load the schema snapshot and wrap everything inside a State.
pub async fn create_state(
    configuration: &Configuration,
    metrics_registry: prometheus::Registry,
) -> Result<State, InitializationError> {
    let target = Target {
        resource_id: configuration.resource_id.to_string(),
        credential_id: configuration.credential_id().to_string(),
        database: configuration.database.clone(),
    };

    let pool = create_pool(configuration)
        .instrument(info_span!("Create connection pool"))
        .await?;
    let executor = Executor::new(target.clone(), Arc::new(PgStatementApi::new(target, pool)));

    let schema = schema::load(&executor).await?;

    let model = HttpModelClient::new(
        configuration.model.endpoint.clone(),
        configuration.model.api_key.clone(),
    )
    .map_err(InitializationError::ModelClient)?;

    State::new(
        schema,
        Arc::new(model),
        executor,
        ModelSettings {
            model_id: configuration.model.model_id.clone(),
            max_tokens: configuration.model.max_tokens,
        },
        metrics_registry,
    )
}

/// Create a connection pool authenticated with the read-only credential.
/// - <https://docs.rs/sqlx/latest/sqlx/pool/struct.PoolOptions.html>
async fn create_pool(configuration: &Configuration) -> Result<PgPool, InitializationError> {
    let connect_options = PgConnectOptions::from_str(configuration.resource_id.as_str())
        .map_err(InitializationError::UnableToCreatePool)?
        .username(&configuration.credential.username)
        .password(&configuration.credential.password)
        .database(&configuration.database);

    let pool_settings = &configuration.pool_settings;

    PgPoolOptions::new()
        .max_connections(pool_settings.max_connections)
        .acquire_timeout(Duration::from_secs(pool_settings.pool_timeout))
        .connect_with(connect_options)
        .await
        .map_err(InitializationError::UnableToCreatePool)
}

/// State initialization error.
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("unable to initialize connection pool: {0}")]
    UnableToCreatePool(sqlx::Error),
    #[error("{0}")]
    MetricsError(metrics::Error),
    #[error("unable to establish the schema: {0}")]
    SchemaUnavailable(#[from] SchemaUnavailable),
    #[error("unable to create the model client: {0}")]
    ModelClient(ModelError),
}
