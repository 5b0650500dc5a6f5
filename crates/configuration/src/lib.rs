//! Configuration for the SQL agent: which database to read from, which credential to use, and
//! which language model translates questions into SQL.

pub mod configuration;
pub mod connection_settings;
pub mod environment;
pub mod error;
pub mod model_settings;
pub mod to_runtime_configuration;
pub mod values;
pub mod version1;

pub use configuration::{Configuration, ModelConfiguration};
pub use to_runtime_configuration::make_runtime_configuration;
pub use values::{Credential, PoolSettings, Secret};
pub use version1::ParsedConfiguration;
