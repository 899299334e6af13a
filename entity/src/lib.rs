//! Entity scaffolding: renders a profile's documents and lays out its directory tree.
//!
//! The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (profile validation, document
//!   templates, scaffold planning). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config loading, writing a plan
//!   through a sink). Isolated behind the [`io::sink::ScaffoldSink`] trait.
//!
//! [`create`] coordinates the two to implement the CLI commands.

pub mod core;
pub mod create;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
