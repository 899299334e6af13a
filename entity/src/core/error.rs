//! Error taxonomy for profile validation and scaffold planning.

use std::fmt;

use thiserror::Error;

use super::templates::DocumentKind;

/// Profile field a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Slug,
    Description,
    Tier,
    Objectives,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Slug => "slug",
            Self::Description => "description",
            Self::Tier => "tier",
            Self::Objectives => "objectives",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Malformed or missing profile input. Raised before any plan entry exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: Field,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: Field, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Failure to produce a scaffold plan.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("render {document}")]
    Render {
        document: DocumentKind,
        #[source]
        source: minijinja::Error,
    },

    /// Internal defect: the planner produced an inconsistent plan.
    #[error("plan invariant violations:\n- {}", .0.join("\n- "))]
    InvariantViolation(Vec<String>),
}
