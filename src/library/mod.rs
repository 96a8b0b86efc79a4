//! The on-disk library and commits into it
//!
//! Layout:
//!
//! ```text
//! <packs>/<Pack>/<Song>/...
//! <packs>/<singles>/<Song>/...
//! <packs>/.censored/<Pack>/<Song>/...
//! <courses>/<Pack>/...
//! <cache>/Songs/<packs>_<Pack>_<Song>
//! ```
//!
//! ## Commit ordering
//!
//! A commit never removes the old entity before the new one sits next to it:
//!
//! 1. move the new entity to `.<name>.incoming` in the destination root
//! 2. remove the old entity, if any
//! 3. rename `.<name>.incoming` to `<name>`
//!
//! Steps 1 and 3 stay on one file system, so step 3 is a plain rename. A crash
//! between 2 and 3 leaves the destination absent with the new content parked
//! in the hidden `.incoming` folder; the next run clears that folder and
//! starts over.

pub mod cache;
pub mod courses;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, file_write_failed, not_an_entity};
use crate::fs_ops;
use crate::path_utils;
use crate::temp::WorkingDir;

/// Suffix of the hidden sibling a new entity waits in before the swap
const INCOMING_SUFFIX: &str = ".incoming";

/// Target roots and flags for every library operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    pub packs: PathBuf,
    pub singles: PathBuf,
    pub courses: PathBuf,
    pub cache: PathBuf,
    pub downloads: Option<PathBuf>,
    /// Base for working directories; the system temp folder when unset
    pub work_root: Option<PathBuf>,
    pub delete_macos_files: bool,
}

impl Library {
    /// Fresh working directory for one pipeline run
    pub fn working_dir(&self) -> Result<WorkingDir> {
        match &self.work_root {
            Some(base) => WorkingDir::new_in(base),
            None => WorkingDir::new(),
        }
    }
}

/// Result of [`commit_pack`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackCommit {
    pub path: PathBuf,
    pub course_count: usize,
}

/// Hidden sibling path used while swapping `dest` into place
pub fn incoming_path(dest: &Path) -> Result<PathBuf> {
    let name = path_utils::entity_name(dest)?;
    let parent = dest
        .parent()
        .ok_or_else(|| not_an_entity(dest, "destination has no parent folder"))?;
    Ok(parent.join(format!(".{name}{INCOMING_SUFFIX}")))
}

/// Swap an already staged `incoming` folder into `dest`, replacing whatever is there.
/// Returns whether something was replaced.
fn swap_into_place(incoming: &Path, dest: &Path) -> Result<bool> {
    let replaced = fs_ops::remove_dir_if_exists(dest)?;
    if replaced {
        tracing::info!(path = %dest.display(), "removed existing entity");
    }
    fs::rename(incoming, dest).map_err(|e| file_write_failed(dest, e))?;
    Ok(replaced)
}

/// Move `src` into `dest_root` under its own name, replacing any entity already there
fn install(src: &Path, dest_root: &Path) -> Result<(PathBuf, bool)> {
    let name = path_utils::entity_name(src)?;
    let dest = dest_root.join(&name);
    let incoming = incoming_path(&dest)?;

    if fs_ops::remove_dir_if_exists(&incoming)? {
        tracing::warn!(path = %incoming.display(), "removed leftover from an interrupted commit");
    }
    fs_ops::move_dir(src, &incoming)?;
    let replaced = swap_into_place(&incoming, &dest)?;
    tracing::info!(from = %src.display(), to = %dest.display(), "committed");
    Ok((dest, replaced))
}

/// Commit a resolved pack.
///
/// Course folders anywhere under `working_tree` are staged into
/// `<courses_root>/.<pack>.incoming` before anything destructive happens.
/// When the pack brings no course files, existing courses for it are kept.
pub fn commit_pack(
    working_tree: &Path,
    pack_root: &Path,
    dest_packs_root: &Path,
    courses_root: &Path,
) -> Result<PackCommit> {
    let name = path_utils::entity_name(pack_root)?;
    let courses_dest = courses_root.join(&name);
    let courses_incoming = incoming_path(&courses_dest)?;

    let staged_courses = courses::stage_courses(working_tree, &courses_incoming)?;
    let (path, _) = install(pack_root, dest_packs_root)?;

    let course_count = match staged_courses {
        Some(staged) => {
            swap_into_place(&staged.dir, &courses_dest)?;
            tracing::info!(
                count = staged.course_count,
                path = %courses_dest.display(),
                "migrated courses"
            );
            staged.course_count
        }
        None => 0,
    };

    Ok(PackCommit { path, course_count })
}

/// Commit a resolved song into the singles folder.
///
/// When an existing song is replaced, its cache entry is invalidated.
pub fn commit_song(
    song_root: &Path,
    dest_singles_root: &Path,
    cache_root: &Path,
) -> Result<PathBuf> {
    let (dest, replaced) = install(song_root, dest_singles_root)?;
    if replaced {
        cache::invalidate(cache_root, &dest);
    }
    Ok(dest)
}
