//! SQL as the agent handles it: the guard that decides what may run, statement parameters, and
//! the handful of statements the agent writes itself.

pub mod sql;
