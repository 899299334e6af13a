//! Deterministic, pure logic for planning entities.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests; the
//! only time-dependent input (the objectives tracker date) is passed in.

pub mod error;
pub mod invariants;
pub mod layout;
pub mod plan;
pub mod profile;
pub mod templates;
