//! An agent action group that turns questions into SQL and runs vetted SQL against a read-only
//! Postgres role.

pub mod action;
pub mod api_schema;
pub mod error;
pub mod health;
pub mod router;
pub mod routes;
pub mod schema;
pub mod state;
