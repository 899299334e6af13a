//! Stable exit codes for entity CLI commands.

use crate::core::error::{PlanError, ValidationError};

/// Command succeeded.
pub const OK: i32 = 0;
/// Command failed while writing output, loading config, or for any other reason.
pub const FAILED: i32 = 1;
/// Profile input was rejected before planning.
pub const INVALID: i32 = 2;

/// Map an error chain to its exit code.
pub fn for_error(err: &anyhow::Error) -> i32 {
    let invalid = err.downcast_ref::<ValidationError>().is_some()
        || matches!(err.downcast_ref::<PlanError>(), Some(PlanError::Validation(_)));
    if invalid { INVALID } else { FAILED }
}
