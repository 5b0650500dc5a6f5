//! Guarding, parameterising and wrapping SQL statements.

pub mod guard;
pub mod helpers;
pub mod string;
