//! Metadata information regarding the database.

pub mod database;

// re-export without modules
pub use database::*;
