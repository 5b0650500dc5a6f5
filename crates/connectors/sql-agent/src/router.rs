//! Dispatch action calls to the generate and execute flows.
//!
//! `ActionRouter::handle` is the outermost boundary: whatever happens inside, including a panic,
//! it returns a well-formed envelope.

use std::sync::Arc;

use tracing::{info_span, Instrument};
use uuid::Uuid;

use query_engine_execution::query::OutputFormat;

use crate::action::{
    ActionBody, ActionEvent, ActionRequest, ActionResponse, ApiPath, ExecuteRequest,
    GenerateRequest,
};
use crate::error::{ActionError, ErrorKind};
use crate::state::State;

#[derive(Clone)]
pub struct ActionRouter {
    state: Arc<State>,
}

impl ActionRouter {
    pub fn new(state: State) -> Self {
        ActionRouter {
            state: Arc::new(state),
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Decode a raw payload and handle it. A payload that is not an action event is answered
    /// with a server error envelope, still echoing whatever group and path it names.
    pub async fn handle_payload(&self, payload: &[u8]) -> ActionResponse {
        match serde_json::from_slice::<ActionEvent>(payload) {
            Ok(event) => self.handle(event).await,
            Err(err) => {
                let (action_group, api_path) = routing_fields(payload);
                let error = ActionError::new(ErrorKind::ServerError, err.to_string());
                let path = ApiPath::parse(&api_path);
                self.respond(action_group, api_path, path, &Err(error))
            }
        }
    }

    /// Handle one call.
    pub async fn handle(&self, event: ActionEvent) -> ActionResponse {
        let invocation_id = Uuid::new_v4();
        let action_group = event.action_group.clone();
        let api_path = event.api_path.clone();
        let span = info_span!(
            "Route action",
            %invocation_id,
            action_group = %action_group,
            api_path = %api_path,
        );

        let state = self.state.clone();
        let task = async move { dispatch(&state, &event).await }.instrument(span);
        let outcome = tokio::spawn(task).await.unwrap_or_else(|join_error| {
            let detail = join_error.to_string();
            Err(ActionError::new(ErrorKind::ServerError, detail))
        });

        let path = ApiPath::parse(&api_path);
        self.respond(action_group, api_path, path, &outcome)
    }

    fn respond(
        &self,
        action_group: String,
        api_path: String,
        path: Option<ApiPath>,
        outcome: &Result<ActionBody, ActionError>,
    ) -> ActionResponse {
        let metrics = &self.state.metrics;
        match (outcome, path) {
            (Ok(_), Some(ApiPath::Generate)) => metrics.record_successful_generation(),
            (Ok(_), Some(ApiPath::Execute)) => metrics.record_successful_execution(),
            (Ok(_), None) => {}
            (Err(err), _) => {
                if err.kind.is_rejection() {
                    metrics.record_rejection();
                }
                metrics.record_error();
                tracing::error!(
                    meta.signal_type = "log",
                    event.domain = "sql-agent",
                    event.name = "Action error",
                    name = "Action error",
                    api_path = %api_path,
                    status = err.kind.status_code(),
                    body = %err,
                    error = true,
                );
            }
        }
        ActionResponse::from_outcome(action_group, api_path, outcome)
    }
}

/// The `actionGroup` and `apiPath` of a payload that did not decode as a whole.
fn routing_fields(payload: &[u8]) -> (String, String) {
    let value = serde_json::from_slice::<serde_json::Value>(payload).unwrap_or_default();
    let field = |name: &str| {
        value
            .get(name)
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    (field("actionGroup"), field("apiPath"))
}

async fn dispatch(state: &State, event: &ActionEvent) -> Result<ActionBody, ActionError> {
    match ActionRequest::decode(event)? {
        ActionRequest::Generate(request) => generate(state, request).await,
        ActionRequest::Execute(request) => execute(state, request).await,
    }
}

/// Translate the prompt and vet the candidate before handing it back.
///
/// Only the blocklist is applied to the candidate; it is not checked for being valid SQL.
async fn generate(state: &State, request: GenerateRequest) -> Result<ActionBody, ActionError> {
    let query = state
        .translator
        .translate(&request.prompt)
        .instrument(info_span!("Translate question"))
        .await?;
    state
        .guard
        .validate_sql_statement(&query)
        .map_err(|err| ActionError::invalid_query(&err))?;
    tracing::info!(generated_sql = %query, "query generated");
    Ok(ActionBody::Query { query })
}

/// Vet the statement, then run it.
async fn execute(state: &State, request: ExecuteRequest) -> Result<ActionBody, ActionError> {
    state
        .guard
        .validate_sql_statement(&request.query)
        .map_err(|err| ActionError::invalid_query(&err))?;
    let results = state
        .executor
        .execute(&request.query, &[], OutputFormat::Json)
        .await?;
    Ok(ActionBody::Results { results })
}
