//! A pack: a directory whose immediate subfolders are songs.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, not_an_entity};
use crate::path_utils;

use super::{Simfile, open_dir};

/// A song folder inside a pack, opened non-strictly
#[derive(Debug, Clone)]
pub struct PackSong {
    pub dir: PathBuf,
    pub simfile: Simfile,
}

/// An opened pack with every readable song it contains
#[derive(Debug, Clone)]
pub struct SimfilePack {
    pub name: String,
    pub path: PathBuf,
    pub songs: Vec<PackSong>,
}

impl SimfilePack {
    /// Open a pack directory.
    ///
    /// Subfolders without a chart file are skipped silently. Subfolders whose
    /// chart file cannot be read are skipped with a warning.
    pub fn open(path: &Path) -> Result<Self> {
        let name = path_utils::entity_name(path)?;
        let entries = fs::read_dir(path).map_err(|e| not_an_entity(path, e))?;

        let mut dirs: Vec<PathBuf> = entries
            .filter_map(std::result::Result::ok)
            .map(|e| e.path())
            .filter(|p| p.is_dir() && !path_utils::is_hidden(p))
            .collect();
        dirs.sort();

        let mut songs = Vec::new();
        for dir in dirs {
            let has_chart = fs::read_dir(&dir).is_ok_and(|mut entries| {
                entries.any(|e| e.is_ok_and(|e| super::is_chart_file(&e.path())))
            });
            if !has_chart {
                continue;
            }
            match open_dir(&dir) {
                Ok((simfile, _)) => songs.push(PackSong { dir, simfile }),
                Err(e) => {
                    tracing::warn!(song = %dir.display(), error = %e, "skipping unreadable song");
                }
            }
        }

        Ok(Self {
            name,
            path: path.to_path_buf(),
            songs,
        })
    }

    pub fn song_count(&self) -> usize {
        self.songs.len()
    }

    pub fn simfiles(&self) -> impl Iterator<Item = &Simfile> {
        self.songs.iter().map(|s| &s.simfile)
    }
}
