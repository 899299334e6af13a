//! Applies a scaffold plan through a sink, in plan order.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::sink::{ScaffoldSink, SinkError};
use crate::core::plan::ScaffoldPlan;

/// Options for [`materialize`].
#[derive(Debug, Clone, Default)]
pub struct MaterializeOptions {
    /// If true, write into an existing entity root, overwriting planned files.
    pub force: bool,
}

/// Outcome of a successful [`materialize`], in plan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationReport {
    pub root: PathBuf,
    /// Directories that did not exist before.
    pub directories: Vec<PathBuf>,
    /// Files that did not exist before.
    pub files: Vec<PathBuf>,
    /// Planned directories that were already present (only with `force`).
    pub existing_directories: Vec<PathBuf>,
    /// Planned files that were already present and got overwritten.
    pub overwritten_files: Vec<PathBuf>,
}

impl CreationReport {
    /// Newly created paths: directories, then files.
    pub fn created(&self) -> impl Iterator<Item = &Path> {
        self.directories
            .iter()
            .chain(self.files.iter())
            .map(PathBuf::as_path)
    }
}

/// Create every planned directory, then write every planned file.
///
/// Refuses an existing entity root unless `options.force` is set. Stops at the
/// first sink failure without rolling back; directory creation is idempotent,
/// so re-running after fixing the cause converges to the same tree.
pub fn materialize<S>(
    plan: &ScaffoldPlan,
    sink: &mut S,
    options: &MaterializeOptions,
) -> Result<CreationReport, SinkError>
where
    S: ScaffoldSink + ?Sized,
{
    if sink.exists(&plan.root) && !options.force {
        return Err(SinkError::TargetExists {
            path: plan.root.clone(),
        });
    }

    let mut report = CreationReport {
        root: plan.root.clone(),
        directories: Vec::with_capacity(plan.directories.len()),
        files: Vec::with_capacity(plan.files.len()),
        existing_directories: Vec::new(),
        overwritten_files: Vec::new(),
    };

    for dir in &plan.directories {
        let existed = sink.exists(dir);
        sink.create_dir(dir)?;
        debug!(path = %dir.display(), existed, "ensured directory");
        if existed {
            report.existing_directories.push(dir.clone());
        } else {
            report.directories.push(dir.clone());
        }
    }
    for file in &plan.files {
        let existed = sink.exists(&file.path);
        sink.write_file(&file.path, &file.content)?;
        debug!(path = %file.path.display(), document = %file.kind, existed, "wrote file");
        if existed {
            report.overwritten_files.push(file.path.clone());
        } else {
            report.files.push(file.path.clone());
        }
    }

    info!(
        root = %plan.root.display(),
        directories = report.directories.len(),
        files = report.files.len(),
        existing_directories = report.existing_directories.len(),
        overwritten_files = report.overwritten_files.len(),
        "entity materialized"
    );
    Ok(report)
}
