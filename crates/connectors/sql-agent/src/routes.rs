//! The HTTP surface.
//!
//! Actions are posted to `/` and always answered with status 200: the outcome of the action lives
//! in the envelope's `httpStatusCode`, not in the HTTP status.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use bytes::Bytes;
use prometheus::Encoder;

use crate::action::{ActionResponse, ApiPath};
use crate::api_schema;
use crate::health;
use crate::router::ActionRouter;

pub fn create_router(router: ActionRouter) -> Router {
    Router::new()
        .route("/", post(post_action))
        .route("/health", get(get_health))
        .route("/metrics", get(get_metrics))
        .route("/openapi/generate", get(get_generate_document))
        .route("/openapi/execute", get(get_execute_document))
        .with_state(router)
}

async fn post_action(State(router): State<ActionRouter>, body: Bytes) -> Json<ActionResponse> {
    Json(router.handle_payload(&body).await)
}

async fn get_health(State(router): State<ActionRouter>) -> StatusCode {
    match health::health_check(&router.state().executor).await {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(err) => {
            tracing::error!(
                meta.signal_type = "log",
                event.domain = "sql-agent",
                event.name = "Health check error",
                name = "Health check error",
                body = %err,
                error = true,
            );
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

async fn get_metrics(State(router): State<ActionRouter>) -> Response {
    let encoder = prometheus::TextEncoder::new();
    let metric_families = router.state().metrics_registry.gather();
    let mut buffer = vec![];
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => (
            [(header::CONTENT_TYPE, encoder.format_type().to_string())],
            buffer,
        )
            .into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}

async fn get_generate_document() -> Response {
    openapi_document(ApiPath::Generate)
}

async fn get_execute_document() -> Response {
    openapi_document(ApiPath::Execute)
}

fn openapi_document(path: ApiPath) -> Response {
    match api_schema::document(path) {
        Ok(document) => Json(document).into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}
