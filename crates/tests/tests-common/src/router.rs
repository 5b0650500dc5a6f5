//! Build routers over fake collaborators.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test_helper::TestClient;

use query_engine_execution::query::{Executor, StatementApi, Target};
use query_engine_translation::translation::model::ModelClient;
use query_engine_translation::translation::query::ModelSettings;
use sql_agent::router::ActionRouter;
use sql_agent::state::State;
use sql_agent::{routes, schema};

pub const TEST_MODEL_ID: &str = "claude-test-model";

pub fn target() -> Target {
    Target {
        resource_id: "postgresql://localhost:64002".to_string(),
        credential_id: "readonly_user".to_string(),
        database: "postgres".to_string(),
    }
}

/// Creates an action router with a fresh state, loading the schema snapshot from `database`.
pub async fn create_action_router(
    model: Arc<dyn ModelClient>,
    database: Arc<dyn StatementApi>,
) -> anyhow::Result<ActionRouter> {
    let _ = env_logger::builder().is_test(true).try_init();

    let executor = Executor::new(target(), database);
    let schema = schema::load(&executor).await?;
    let state = State::new(
        schema,
        model,
        executor,
        ModelSettings {
            model_id: TEST_MODEL_ID.to_string(),
            max_tokens: 300,
        },
        prometheus::Registry::new(),
    )?;
    Ok(ActionRouter::new(state))
}

/// Creates an HTTP router with a fresh state.
pub async fn create_router(
    model: Arc<dyn ModelClient>,
    database: Arc<dyn StatementApi>,
) -> anyhow::Result<axum::Router> {
    Ok(routes::create_router(
        create_action_router(model, database).await?,
    ))
}

/// Post an action body to the server and return the envelope it answers with.
pub async fn post_action(client: &TestClient, body: String) -> serde_json::Value {
    let response = client
        .post("/")
        .body(body)
        .header("Content-Type", "application/json")
        .send()
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    response.json().await
}
