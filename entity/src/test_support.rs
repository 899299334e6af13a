//! Test-only helpers: fixture profiles, a fixed date, and an in-memory sink.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tempfile::TempDir;

use crate::core::profile::{EntityProfile, Tier};
use crate::io::sink::{ScaffoldSink, SinkError};

/// Date stamped into objectives trackers by tests.
pub fn fixed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).expect("valid date")
}

/// The full-tier research assistant used throughout the tests.
pub fn research_assistant_profile() -> EntityProfile {
    EntityProfile {
        name: "Research Assistant".to_string(),
        slug: "research-assistant".to_string(),
        description: "literature review support".to_string(),
        tier: Tier::Full,
        objectives: vec!["Summarize papers".to_string(), "Track citations".to_string()],
        output_root: PathBuf::from("out"),
    }
}

/// A minimal-tier entity with a single objective.
pub fn minimal_profile() -> EntityProfile {
    EntityProfile {
        name: "Scout".to_string(),
        slug: "scout".to_string(),
        description: "issue triage".to_string(),
        tier: Tier::Minimal,
        objectives: vec!["Label new issues".to_string()],
        output_root: PathBuf::from("out"),
    }
}

/// In-memory sink recording directories and file contents.
///
/// Writes fail when the parent directory was never created, so tests catch
/// plans that order files before their directories.
#[derive(Debug, Default)]
pub struct MemorySink {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, String>,
    fail_on: Option<PathBuf>,
}

impl MemorySink {
    /// A sink whose operation on `path` fails with a permission error.
    pub fn failing_on(path: &Path) -> Self {
        Self {
            fail_on: Some(path.to_path_buf()),
            ..Self::default()
        }
    }

    pub fn file(&self, path: &Path) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    fn check_failure(&self, path: &Path) -> io::Result<()> {
        if self.fail_on.as_deref() == Some(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "simulated failure",
            ));
        }
        Ok(())
    }
}

impl ScaffoldSink for MemorySink {
    fn create_dir(&mut self, path: &Path) -> Result<(), SinkError> {
        self.check_failure(path)
            .map_err(|source| SinkError::CreateDir {
                path: path.to_path_buf(),
                source,
            })?;
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn write_file(&mut self, path: &Path, contents: &str) -> Result<(), SinkError> {
        let parent_missing = path
            .parent()
            .is_some_and(|parent| !parent.as_os_str().is_empty() && !self.dirs.contains(parent));
        let result = self.check_failure(path).and_then(|()| {
            if parent_missing {
                Err(io::Error::new(io::ErrorKind::NotFound, "parent directory missing"))
            } else {
                Ok(())
            }
        });
        result.map_err(|source| SinkError::WriteFile {
            path: path.to_path_buf(),
            source,
        })?;
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.dirs.contains(path) || self.files.contains_key(path)
    }
}

/// Temporary working directory for CLI tests.
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Read a file relative to the workspace root.
    pub fn read(&self, relative: &str) -> io::Result<String> {
        fs::read_to_string(self.dir.path().join(relative))
    }
}
