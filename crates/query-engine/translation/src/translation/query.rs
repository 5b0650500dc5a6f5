//! Translate a question into a candidate SQL statement.

use std::sync::Arc;

use tracing::{info_span, Instrument};

use query_engine_metadata::metadata;
use query_engine_sql::sql::guard::QueryGuard;

use super::error::Error;
use super::model::{Message, ModelClient, ModelError, ModelRequest};
use super::prompt;

/// Which model to ask, and how much it may say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSettings {
    pub model_id: String,
    pub max_tokens: u32,
}

/// Turns questions into SQL against one fixed schema snapshot.
pub struct Translator {
    schema: Arc<metadata::SchemaDescription>,
    model: Arc<dyn ModelClient>,
    guard: Arc<dyn QueryGuard>,
    settings: ModelSettings,
}

impl Translator {
    pub fn new(
        schema: Arc<metadata::SchemaDescription>,
        model: Arc<dyn ModelClient>,
        guard: Arc<dyn QueryGuard>,
        settings: ModelSettings,
    ) -> Self {
        Translator {
            schema,
            model,
            guard,
            settings,
        }
    }

    pub fn schema(&self) -> &metadata::SchemaDescription {
        &self.schema
    }

    /// Ask the model for a SQL statement answering `question`.
    ///
    /// The returned text is whatever the model wrote in its first content block. It is not
    /// parsed, trimmed, or validated here; callers that return it decide what to check.
    pub async fn translate(&self, question: &str) -> Result<String, Error> {
        if self.schema.is_empty() {
            return Err(Error::SchemaUnavailable);
        }
        let question = self.guard.validate_user_input(question)?;

        let user_prompt = prompt::build_prompt(self.schema.text(), question);
        let request = ModelRequest {
            model_id: self.settings.model_id.clone(),
            system_prompt: prompt::SYSTEM_PROMPT.to_string(),
            messages: vec![Message::user_text(user_prompt)],
            max_tokens: self.settings.max_tokens,
        };

        let response = self
            .model
            .invoke(request)
            .instrument(info_span!(
                "Invoke model",
                model_id = %self.settings.model_id,
            ))
            .await?;

        let sql = response.first_text().ok_or(ModelError::MissingText)?;
        tracing::info!(generated_sql = sql, stop_reason = ?response.stop_reason);
        Ok(sql.to_string())
    }
}
