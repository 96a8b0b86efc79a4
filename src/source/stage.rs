//! Materialize an input into a working directory

use std::path::{Path, PathBuf};

use crate::error::{ItgError, Result, file_read_failed};
use crate::fs_ops;
use crate::path_utils;
use crate::temp::WorkingDir;

use super::{Extract, Fetch, InputSpec};

/// The download and extraction collaborators used while staging
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub fetcher: &'a dyn Fetch,
    pub extractor: &'a dyn Extract,
}

/// Stage `input` inside `working` and return the directory holding its content.
///
/// - URLs are fetched into `downloads` when configured (kept), otherwise into
///   the working directory (discarded with it)
/// - Archives are extracted into the working directory
/// - Local directories are copied, leaving the original untouched. Relative
///   inputs such as `.` are resolved first so the copy keeps the folder's name
pub fn stage(
    input: &InputSpec,
    working: &WorkingDir,
    downloads: Option<&Path>,
    collab: &Collaborators<'_>,
) -> Result<PathBuf> {
    let local = match input {
        InputSpec::Url(url) => {
            let dest_dir = downloads.unwrap_or_else(|| working.path());
            let file = collab.fetcher.fetch(url, dest_dir)?;
            tracing::debug!(file = %file.display(), "fetched input");
            file
        }
        InputSpec::Path(path) => {
            if !path.exists() {
                return Err(ItgError::InputNotFound {
                    path: path.display().to_string(),
                });
            }
            dunce::canonicalize(path).map_err(|e| file_read_failed(path, e))?
        }
    };

    if local.is_dir() {
        let name = path_utils::entity_name(&local)?;
        let dest = working.path().join(name);
        tracing::debug!(from = %local.display(), to = %dest.display(), "copying input directory");
        fs_ops::copy_dir_recursive(&local, &dest)?;
        Ok(dest)
    } else {
        let dest = collab.extractor.extract(&local, working.path())?;
        tracing::debug!(archive = %local.display(), to = %dest.display(), "extracted input");
        Ok(dest)
    }
}
