mod connection_info;
mod credential;
mod pool_settings;
mod secret;

pub use connection_info::{
    ApiKey, CredentialSecret, DatabaseName, ModelEndpoint, ModelId, ResourceId,
};
pub use credential::Credential;
pub use pool_settings::PoolSettings;
pub use secret::Secret;
