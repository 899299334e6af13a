//! Structural invariants every scaffold plan must satisfy.

use std::collections::HashSet;
use std::path::Path;

use super::plan::ScaffoldPlan;

/// Check plan invariants:
/// - Every path is the root or lies beneath it
/// - No duplicate directories or files
/// - A directory never precedes one of its ancestors
/// - Every file's parent is a planned directory or an ancestor of one
pub fn validate_plan(plan: &ScaffoldPlan) -> Vec<String> {
    let mut errors = Vec::new();

    if plan.directories.first().map(|dir| dir.as_path()) != Some(plan.root.as_path()) {
        errors.push(format!(
            "first directory must be the entity root {}",
            plan.root.display()
        ));
    }

    for path in plan.paths() {
        if !path.starts_with(&plan.root) {
            errors.push(format!("{} is outside {}", path.display(), plan.root.display()));
        }
    }

    let mut seen = HashSet::new();
    for path in plan.paths() {
        if !seen.insert(path) {
            errors.push(format!("duplicate path {}", path.display()));
        }
    }

    for (i, dir) in plan.directories.iter().enumerate() {
        for later in &plan.directories[i + 1..] {
            if later != dir && dir.starts_with(later) {
                errors.push(format!(
                    "{} is planned before its parent {}",
                    dir.display(),
                    later.display()
                ));
            }
        }
    }

    for file in &plan.files {
        let covered = file
            .path
            .parent()
            .is_some_and(|parent| covered_by_directories(parent, plan));
        if !covered {
            errors.push(format!(
                "{} has no planned parent directory",
                file.path.display()
            ));
        }
    }

    errors
}

/// True if `dir` is created by some planned directory (itself or a descendant).
fn covered_by_directories(dir: &Path, plan: &ScaffoldPlan) -> bool {
    plan.directories
        .iter()
        .any(|planned| planned.starts_with(dir) && dir.starts_with(&plan.root))
}
