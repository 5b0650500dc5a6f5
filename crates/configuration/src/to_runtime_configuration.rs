//! Convert a parsed configuration into the runtime configuration, reading every value from the
//! environment as it goes.

use url::Url;

use crate::configuration::{Configuration, ModelConfiguration};
use crate::environment::{self, Environment};
use crate::error::MakeRuntimeConfigurationError;
use crate::model_settings::DEFAULT_MODEL_ENDPOINT;
use crate::values::{Credential, Secret};
use crate::version1::ParsedConfiguration;

/// Make a runtime configuration from the parsed one. Any required value that cannot be resolved
/// is an error; there is no partially configured agent.
pub fn make_runtime_configuration(
    parsed_config: ParsedConfiguration,
    environment: impl Environment,
) -> Result<Configuration, MakeRuntimeConfigurationError> {
    let connection = &parsed_config.connection_settings;

    let resource_id = resolve_required(&environment, &connection.resource_id.0, "resourceId")?;
    let resource_id = parse_resource_id(&resource_id)?;

    let credential = resolve_required(&environment, &connection.credential.0, "credential")?;
    let credential =
        Credential::parse(&credential).map_err(MakeRuntimeConfigurationError::InvalidCredential)?;

    let database = resolve_required(&environment, &connection.database.0, "database")?;

    let model = &parsed_config.model_settings;
    let model_id = resolve_required(&environment, &model.model_id.0, "modelId")?;
    let endpoint = resolve_optional(&environment, model.endpoint.as_ref().map(|e| &e.0))?
        .unwrap_or_else(|| {
            tracing::debug!(endpoint = DEFAULT_MODEL_ENDPOINT, "default model endpoint");
            DEFAULT_MODEL_ENDPOINT.to_string()
        });
    let endpoint =
        Url::parse(&endpoint).map_err(MakeRuntimeConfigurationError::InvalidModelEndpoint)?;
    let api_key = resolve_optional(&environment, model.api_key.as_ref().map(|k| &k.0))?;
    if api_key.is_none() {
        tracing::warn!("no model API key configured");
    }

    Ok(Configuration {
        resource_id,
        credential,
        database,
        model: ModelConfiguration {
            model_id,
            endpoint,
            api_key,
            max_tokens: model.max_tokens,
        },
        pool_settings: parsed_config.pool_settings,
    })
}

fn resolve_required(
    environment: &impl Environment,
    secret: &Secret,
    field: &'static str,
) -> Result<String, MakeRuntimeConfigurationError> {
    let value = match secret {
        Secret::Plain(value) => value.clone(),
        Secret::FromEnvironment { variable } => environment.read(variable).map_err(|error| {
            MakeRuntimeConfigurationError::MissingEnvironmentVariable {
                variable: variable.clone(),
                message: error.to_string(),
            }
        })?,
    };
    if value.trim().is_empty() {
        return Err(MakeRuntimeConfigurationError::EmptyValue { field });
    }
    Ok(value)
}

/// Optional values may be absent from the environment; an empty value counts as absent.
fn resolve_optional(
    environment: &impl Environment,
    secret: Option<&Secret>,
) -> Result<Option<String>, MakeRuntimeConfigurationError> {
    let value = match secret {
        None => None,
        Some(Secret::Plain(value)) => Some(value.clone()),
        Some(Secret::FromEnvironment { variable }) => match environment.read(variable) {
            Ok(value) => Some(value),
            Err(environment::Error::VariableNotPresent(_)) => None,
            Err(error) => {
                return Err(MakeRuntimeConfigurationError::MissingEnvironmentVariable {
                    variable: variable.clone(),
                    message: error.to_string(),
                })
            }
        },
    };
    Ok(value.filter(|value| !value.trim().is_empty()))
}

fn parse_resource_id(resource_id: &str) -> Result<Url, MakeRuntimeConfigurationError> {
    let invalid = |message: String| MakeRuntimeConfigurationError::InvalidResourceId { message };

    let url = Url::parse(resource_id).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "postgres" | "postgresql") {
        return Err(invalid(format!(
            "expected a postgres:// or postgresql:// URI, got scheme {:?}",
            url.scheme()
        )));
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(invalid(
            "credentials belong in the credential secret, not the resource identifier".to_string(),
        ));
    }
    if !matches!(url.path(), "" | "/") {
        return Err(invalid(
            "the database name belongs in the database setting, not the resource identifier"
                .to_string(),
        ));
    }
    Ok(url)
}
