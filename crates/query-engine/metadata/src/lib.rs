//! Metadata describing the database the agent answers questions about.

pub mod metadata;
