//! Translate a natural-language question into a candidate SQL statement using a language model.

pub mod error;
pub mod model;
pub mod prompt;
pub mod query;
