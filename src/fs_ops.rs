//! Directory-level file operations used while staging and committing.
//!
//! - Recursive copy (copy_dir_recursive)
//! - Move that survives crossing filesystems (move_dir)
//! - macOS resource fork cleanup (delete_macos_files)

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Result, file_read_failed, file_write_failed};

/// Ensure parent directory exists for a path
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| file_write_failed(parent, e))?;
    }
    Ok(())
}

/// Recursively copy `src` into a new directory at `dst`
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| file_read_failed(entry.path(), e))?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| file_write_failed(&target, e))?;
        } else {
            ensure_parent_dir(&target)?;
            fs::copy(entry.path(), &target).map_err(|e| file_write_failed(&target, e))?;
        }
    }
    Ok(())
}

/// Move a directory tree from `src` to `dst`.
///
/// Uses a rename when both paths share a filesystem. Otherwise the tree is copied
/// and the source removed; `dst` must not exist beforehand in either case.
pub fn move_dir(src: &Path, dst: &Path) -> Result<()> {
    ensure_parent_dir(dst)?;
    match fs::rename(src, dst) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            tracing::debug!(
                from = %src.display(),
                to = %dst.display(),
                error = %rename_err,
                "rename failed, falling back to copy"
            );
            if let Err(e) = copy_dir_recursive(src, dst) {
                let _ = fs::remove_dir_all(dst);
                return Err(e);
            }
            fs::remove_dir_all(src).map_err(|e| file_write_failed(src, e))
        }
    }
}

/// Remove a directory tree if it exists; absence is not an error
pub fn remove_dir_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(file_write_failed(path, e)),
    }
}

/// Delete every `._*` file under `path`. Returns the number of files removed.
pub fn delete_macos_files(path: &Path) -> Result<usize> {
    let forks: Vec<_> = WalkDir::new(path)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.file_name().to_string_lossy().starts_with("._"))
        .map(walkdir::DirEntry::into_path)
        .collect();

    for fork in &forks {
        fs::remove_file(fork).map_err(|e| file_write_failed(fork, e))?;
    }
    if !forks.is_empty() {
        tracing::debug!(count = forks.len(), path = %path.display(), "deleted macOS files");
    }
    Ok(forks.len())
}
