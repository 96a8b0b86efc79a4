//! Censoring: moving songs in and out of `<packs>/.censored`
//!
//! A censored song keeps its pack-relative path, so `Pack/Song` lives at
//! `.censored/Pack/Song` and is restored to exactly the same place.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ItgError, Result, file_read_failed, not_an_entity};
use crate::fs_ops;
use crate::library::cache;
use crate::path_utils;
use crate::simfile::{self, Simfile};

/// Quarantine folder name inside the packs root
pub const CENSORED_DIR: &str = ".censored";

/// A song under `.censored`
#[derive(Debug, Clone)]
pub struct CensoredSong {
    pub simfile: Simfile,
    pub pack: String,
    pub song: String,
    pub path: PathBuf,
}

impl CensoredSong {
    /// Where the song lives when it is not censored
    pub fn original_path(&self, packs_root: &Path) -> PathBuf {
        packs_root.join(&self.pack).join(&self.song)
    }
}

/// Picks the entry to restore; `None` cancels
pub type Picker<'a> = &'a dyn Fn(&[CensoredSong]) -> Option<usize>;

pub fn censored_root(packs_root: &Path) -> PathBuf {
    packs_root.join(CENSORED_DIR)
}

fn canonical(path: &Path) -> Result<PathBuf> {
    dunce::canonicalize(path).map_err(|e| file_read_failed(path, e))
}

/// Move the song at `entity_path` into the quarantine folder and drop its cache entry
pub fn censor(entity_path: &Path, packs_root: &Path, cache_root: &Path) -> Result<Simfile> {
    if !entity_path.exists() {
        return Err(ItgError::InputNotFound {
            path: entity_path.display().to_string(),
        });
    }
    let path = canonical(entity_path)?;
    let packs = canonical(packs_root)?;

    let invalid = || ItgError::InvalidPath {
        path: path.display().to_string(),
        packs: packs.display().to_string(),
    };
    let relative = path.strip_prefix(&packs).map_err(|_| invalid())?;
    let mut components = relative.components();
    match components.next() {
        None => return Err(invalid()),
        Some(first) if first.as_os_str() == CENSORED_DIR => return Err(invalid()),
        Some(_) => {}
    }

    let (simfile, _) = simfile::open_dir(&path).map_err(|e| match e {
        ItgError::NotAnEntity { .. } => e,
        other => not_an_entity(&path, other),
    })?;

    let dest = censored_root(&packs).join(relative);
    if dest.exists() {
        return Err(ItgError::DestinationOccupied {
            path: dest.display().to_string(),
        });
    }
    fs_ops::move_dir(&path, &dest)?;
    cache::invalidate(cache_root, &path);

    tracing::info!(song = %relative.display(), title = %simfile.title, "censored");
    Ok(simfile)
}

fn sorted_subdirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| file_read_failed(dir, e))?
        .filter_map(std::result::Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}

/// Every song under `<packs>/.censored/<Pack>/<Song>`, sorted by pack then song.
/// Folders that cannot be read as songs are skipped with a warning.
pub fn list_censored(packs_root: &Path) -> Result<Vec<CensoredSong>> {
    let root = censored_root(packs_root);
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut songs = Vec::new();
    for pack_dir in sorted_subdirs(&root)? {
        let pack = path_utils::entity_name(&pack_dir)?;
        for song_dir in sorted_subdirs(&pack_dir)? {
            match simfile::open_dir(&song_dir) {
                Ok((simfile, _)) => songs.push(CensoredSong {
                    simfile,
                    pack: pack.clone(),
                    song: path_utils::entity_name(&song_dir)?,
                    path: song_dir,
                }),
                Err(e) => {
                    tracing::warn!(
                        path = %song_dir.display(),
                        error = %e,
                        "skipping unreadable censored entry"
                    );
                }
            }
        }
    }
    Ok(songs)
}

/// Restore the song chosen by `picker` to its original place.
///
/// The returned entry's `path` is the restored location.
pub fn uncensor(packs_root: &Path, picker: Picker<'_>) -> Result<CensoredSong> {
    let mut songs = list_censored(packs_root)?;
    if songs.is_empty() {
        return Err(ItgError::NothingToUncensor);
    }

    let index = picker(&songs).ok_or(ItgError::SelectionCancelled)?;
    if index >= songs.len() {
        return Err(ItgError::InvalidSelection {
            index: index + 1,
            count: songs.len(),
        });
    }
    let mut song = songs.swap_remove(index);

    let dest = song.original_path(packs_root);
    if dest.exists() {
        return Err(ItgError::DestinationOccupied {
            path: dest.display().to_string(),
        });
    }
    fs_ops::move_dir(&song.path, &dest)?;

    // an emptied pack folder under .censored is noise in the listing
    if let Some(pack_dir) = song.path.parent() {
        let _ = fs::remove_dir(pack_dir);
    }

    tracing::info!(song = %dest.display(), title = %song.simfile.title, "uncensored");
    song.path = dest;
    Ok(song)
}
