//! Side-effecting helpers: configuration loading and plan materialization.

pub mod config;
pub mod materialize;
pub mod sink;
