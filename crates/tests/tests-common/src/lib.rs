//! Fakes, fixtures and helpers shared by the integration tests.

pub mod deployment;
pub mod fakes;
pub mod fixtures;
pub mod router;
