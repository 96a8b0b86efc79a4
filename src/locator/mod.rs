//! Entity discovery inside a staged directory
//!
//! A song root is the folder directly holding a chart file; a pack root is the
//! folder holding song folders, i.e. the grandparent of a chart file. Nothing in
//! this module touches the file system beyond reading it.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, ambiguous_entity, no_entity_found};
use crate::path_utils::{MACOS_METADATA_DIR, is_hidden};
use crate::simfile::is_chart_file;

/// Caller-supplied ordering for equally populous pack candidates.
/// The candidate that sorts first wins.
pub type TieBreak<'a> = &'a dyn Fn(&Path, &Path) -> Ordering;

/// A directory inferred to contain one entity, with how many songs back it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRoot {
    pub path: PathBuf,
    pub count: usize,
}

/// The chosen pack root plus every candidate that lost
#[derive(Debug, Clone)]
pub struct PackResolution {
    pub root: CandidateRoot,
    pub rejected: Vec<CandidateRoot>,
}

/// Lazily walk `root` for chart files.
///
/// Anything under a `__MACOSX` folder and any file whose name starts with `.`
/// is skipped.
pub fn find_chart_files(root: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.file_name() != MACOS_METADATA_DIR)
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|p| is_chart_file(p) && !is_hidden(p))
}

/// The single song folder among `leaves`.
///
/// `searched` only labels the error when nothing is found.
pub fn resolve_song_root<I>(searched: &Path, leaves: I) -> Result<CandidateRoot>
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut counts: BTreeMap<PathBuf, usize> = BTreeMap::new();
    for leaf in leaves {
        if let Some(parent) = leaf.parent() {
            *counts.entry(parent.to_path_buf()).or_default() += 1;
        }
    }

    let mut roots = counts.into_iter();
    match (roots.next(), roots.len()) {
        (None, _) => Err(no_entity_found("simfile", searched)),
        (Some((path, count)), 0) => Ok(CandidateRoot { path, count }),
        (Some(_), rest) => Err(ambiguous_entity(rest + 1)),
    }
}

/// The pack folder among `leaves`.
///
/// Candidates are ranked by how many distinct song folders they hold. Equal
/// counts are ordered by `tie_break` when given, otherwise by path.
pub fn resolve_pack_root<I>(
    searched: &Path,
    leaves: I,
    tie_break: Option<TieBreak<'_>>,
) -> Result<PackResolution>
where
    I: IntoIterator<Item = PathBuf>,
{
    let song_dirs: BTreeSet<PathBuf> = leaves
        .into_iter()
        .filter_map(|leaf| leaf.parent().map(Path::to_path_buf))
        .collect();

    let mut counts: BTreeMap<PathBuf, usize> = BTreeMap::new();
    for song in &song_dirs {
        if let Some(pack) = song.parent() {
            *counts.entry(pack.to_path_buf()).or_default() += 1;
        }
    }

    let mut candidates: Vec<CandidateRoot> = counts
        .into_iter()
        .map(|(path, count)| CandidateRoot { path, count })
        .collect();
    candidates.sort_by(|a, b| {
        b.count.cmp(&a.count).then_with(|| match tie_break {
            Some(order) => order(&a.path, &b.path),
            None => a.path.cmp(&b.path),
        })
    });

    let mut ranked = candidates.into_iter();
    let root = ranked
        .next()
        .ok_or_else(|| no_entity_found("pack", searched))?;
    let rejected: Vec<CandidateRoot> = ranked.collect();

    if !rejected.is_empty() {
        tracing::warn!(
            selected = %root.path.display(),
            songs = root.count,
            "multiple pack directories found, selecting the one with the most songs"
        );
        for candidate in &rejected {
            tracing::warn!(
                rejected = %candidate.path.display(),
                songs = candidate.count,
                "ignoring pack candidate"
            );
        }
    }

    Ok(PackResolution { root, rejected })
}
