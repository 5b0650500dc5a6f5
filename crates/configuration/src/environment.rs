//! Access to environment variables.
//!
//! Configuration values may be read from the environment. Abstracting over it lets tests supply a
//! fixed set of variables instead of mutating the process environment.

use std::collections::{BTreeMap, HashMap};
use std::env::VarError;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The name of an environment variable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct Variable(String);

impl Variable {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Variable {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Variable {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Something we can read environment variables from.
pub trait Environment {
    fn read(&self, variable: &Variable) -> Result<String, Error>;
}

impl<E: Environment> Environment for &E {
    fn read(&self, variable: &Variable) -> Result<String, Error> {
        (*self).read(variable)
    }
}

/// The environment of the running process.
#[derive(Debug, Clone, Copy)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn read(&self, variable: &Variable) -> Result<String, Error> {
        match std::env::var(variable.as_str()) {
            Ok(value) => Ok(value),
            Err(VarError::NotPresent) => Err(Error::VariableNotPresent(variable.clone())),
            Err(VarError::NotUnicode(_)) => Err(Error::VariableIsNotUnicode(variable.clone())),
        }
    }
}

/// A fixed set of variables, mostly useful in tests.
pub type FixedEnvironment = BTreeMap<Variable, String>;

impl Environment for FixedEnvironment {
    fn read(&self, variable: &Variable) -> Result<String, Error> {
        self.get(variable)
            .cloned()
            .ok_or_else(|| Error::VariableNotPresent(variable.clone()))
    }
}

impl Environment for HashMap<String, String> {
    fn read(&self, variable: &Variable) -> Result<String, Error> {
        self.get(variable.as_str())
            .cloned()
            .ok_or_else(|| Error::VariableNotPresent(variable.clone()))
    }
}

/// An error reading an environment variable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("the environment variable {0} is not set")]
    VariableNotPresent(Variable),
    #[error("the environment variable {0} is not valid unicode")]
    VariableIsNotUnicode(Variable),
}
