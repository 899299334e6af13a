//! Storage sinks that perform the side effects a scaffold plan describes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure reported by a sink, always naming the offending path.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("create directory {}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("write file {}", .path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} already exists (use --force to overwrite)", .path.display())]
    TargetExists { path: PathBuf },
}

impl SinkError {
    pub fn path(&self) -> &Path {
        match self {
            Self::CreateDir { path, .. }
            | Self::WriteFile { path, .. }
            | Self::TargetExists { path } => path,
        }
    }
}

/// Destination for planned directories and files.
pub trait ScaffoldSink {
    /// Create `path` and any missing parents. An existing directory is not an error.
    fn create_dir(&mut self, path: &Path) -> Result<(), SinkError>;

    /// Write `contents` to `path`; the write succeeds or fails as a unit.
    fn write_file(&mut self, path: &Path, contents: &str) -> Result<(), SinkError>;

    fn exists(&self, path: &Path) -> bool;
}

/// Sink backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSink;

impl ScaffoldSink for FsSink {
    fn create_dir(&mut self, path: &Path) -> Result<(), SinkError> {
        fs::create_dir_all(path).map_err(|source| SinkError::CreateDir {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write_file(&mut self, path: &Path, contents: &str) -> Result<(), SinkError> {
        write_atomic(path, contents).map_err(|source| SinkError::WriteFile {
            path: path.to_path_buf(),
            source,
        })
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Write through a sibling temp file and rename it into place.
fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "path has no file name")
    })?;
    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);
    let result = fs::write(&tmp_path, contents).and_then(|()| fs::rename(&tmp_path, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}
