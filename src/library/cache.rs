//! Song cache entries
//!
//! The game keeps one cache file per song under `<cache>/Songs`, named
//! `<packs-root>_<pack>_<song>` after the song folder's last three path
//! components. A single at `<packs>/<singles>/<song>` therefore maps to
//! `Songs_<singles>_<song>` when the packs root is called `Songs`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Subfolder of the cache root holding song entries
pub const SONGS_CACHE_DIR: &str = "Songs";

pub fn cache_entry_name(packs_root_name: &str, pack_name: &str, song_name: &str) -> String {
    format!("{packs_root_name}_{pack_name}_{song_name}")
}

/// Cache file for the song folder at `song_dir`, if its path is deep enough to name one
pub fn song_cache_entry(cache_root: &Path, song_dir: &Path) -> Option<PathBuf> {
    let song = song_dir.file_name()?.to_str()?;
    let pack_dir = song_dir.parent()?;
    let pack = pack_dir.file_name()?.to_str()?;
    let packs_root = pack_dir.parent()?.file_name()?.to_str()?;
    Some(
        cache_root
            .join(SONGS_CACHE_DIR)
            .join(cache_entry_name(packs_root, pack, song)),
    )
}

/// Delete the cache file for `song_dir`. Best effort: a missing entry is not an
/// error and other failures are only logged. Returns whether a file was removed.
pub fn invalidate(cache_root: &Path, song_dir: &Path) -> bool {
    let Some(entry) = song_cache_entry(cache_root, song_dir) else {
        return false;
    };
    match fs::remove_file(&entry) {
        Ok(()) => {
            tracing::debug!(entry = %entry.display(), "removed cache entry");
            true
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(entry = %entry.display(), "no cache entry to remove");
            false
        }
        Err(e) => {
            tracing::warn!(entry = %entry.display(), error = %e, "failed to remove cache entry");
            false
        }
    }
}
