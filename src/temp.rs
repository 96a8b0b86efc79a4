//! Temporary working directories for ingestion.
//!
//! Every pipeline run stages its input inside a [`WorkingDir`]. The directory is
//! removed when the guard is dropped, on success, on a declined overwrite, and on
//! every error path alike.

use std::env;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{Result, io_error};

/// Prefix used for working directory names
const WORKING_DIR_PREFIX: &str = "itg-cli-";

/// Returns a directory path suitable for creating temporary directories.
/// Never returns a relative path, so working dirs are never created under the current
/// working directory (e.g. when TMPDIR=tmp).
pub fn temp_dir_base() -> PathBuf {
    let t = env::temp_dir();
    if t.is_absolute() {
        t
    } else {
        #[cfg(windows)]
        {
            env::var("TEMP")
                .or_else(|_| env::var("TMP"))
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("C:\\Windows\\Temp"))
        }
        #[cfg(not(windows))]
        {
            PathBuf::from("/tmp")
        }
    }
}

/// An exclusively owned, randomly named scratch directory.
#[derive(Debug)]
pub struct WorkingDir {
    dir: TempDir,
}

impl WorkingDir {
    /// Create a fresh working directory under the system temp base
    pub fn new() -> Result<Self> {
        Self::new_in(&temp_dir_base())
    }

    /// Create a fresh working directory under `base`
    pub fn new_in(base: &Path) -> Result<Self> {
        std::fs::create_dir_all(base)
            .map_err(|e| io_error(format!("Failed to create {}: {e}", base.display())))?;
        let dir = tempfile::Builder::new()
            .prefix(WORKING_DIR_PREFIX)
            .tempdir_in(base)
            .map_err(|e| io_error(format!("Failed to create working directory: {e}")))?;
        tracing::debug!(path = %dir.path().display(), "created working directory");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
