//! add-pack pipeline

use std::path::Path;

use crate::conflict;
use crate::error::Result;
use crate::fs_ops;
use crate::library::{self, Library};
use crate::locator::{self, CandidateRoot, TieBreak};
use crate::path_utils;
use crate::simfile::SimfilePack;
use crate::source::{self, Collaborators, InputSpec};

/// Decides whether `new` may replace `existing`
pub type PackOverwriteHandler<'a> = &'a dyn Fn(&SimfilePack, &SimfilePack) -> bool;

/// Caller-supplied policy for an add-pack run
#[derive(Clone, Copy)]
pub struct PackPolicy<'a> {
    pub overwrite: PackOverwriteHandler<'a>,
    pub tie_break: Option<TieBreak<'a>>,
}

/// A pack now in the library
#[derive(Debug, Clone)]
pub struct AddedPack {
    pub pack: SimfilePack,
    pub course_count: usize,
    pub rejected: Vec<CandidateRoot>,
}

/// Stage `input`, locate its pack, settle any conflict, and commit it into
/// `library.packs`. The working directory is gone when this returns.
pub fn add_pack(
    input: &InputSpec,
    library: &Library,
    collab: &Collaborators<'_>,
    policy: PackPolicy<'_>,
) -> Result<AddedPack> {
    let working = library.working_dir()?;
    let staged = source::stage(input, &working, library.downloads.as_deref(), collab)?;

    // charts directly in the staged folder have no pack folder of their own
    let leaves = locator::find_chart_files(&staged).filter(|leaf| {
        let inside = leaf
            .parent()
            .and_then(Path::parent)
            .is_some_and(|pack| pack.starts_with(&staged));
        if !inside {
            tracing::warn!(chart = %leaf.display(), "ignoring chart outside any pack folder");
        }
        inside
    });
    let label = input.to_string();
    let resolution = locator::resolve_pack_root(Path::new(&label), leaves, policy.tie_break)?;
    let pack_root = resolution.root.path;

    let name = path_utils::entity_name(&pack_root)?;
    let existing = conflict::existing_entity(&library.packs, &name);
    if library.delete_macos_files {
        fs_ops::delete_macos_files(&pack_root)?;
        if let Some(existing) = existing.as_deref() {
            fs_ops::delete_macos_files(existing)?;
        }
    }

    conflict::resolve(&pack_root, existing.as_deref(), SimfilePack::open, policy.overwrite)?
        .into_result(&name)?;

    let commit = library::commit_pack(&staged, &pack_root, &library.packs, &library.courses)?;
    let pack = SimfilePack::open(&commit.path)?;
    tracing::info!(
        pack = %pack.name,
        songs = pack.song_count(),
        courses = commit.course_count,
        "added pack"
    );

    Ok(AddedPack {
        pack,
        course_count: commit.course_count,
        rejected: resolution.rejected,
    })
}
