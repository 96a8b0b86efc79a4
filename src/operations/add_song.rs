//! add-song pipeline

use std::path::{Path, PathBuf};

use crate::conflict;
use crate::error::{Result, not_an_entity};
use crate::fs_ops;
use crate::library::{self, Library};
use crate::locator;
use crate::path_utils;
use crate::simfile::{self, Simfile};
use crate::source::{self, Collaborators, InputSpec};

/// An opened song: its metadata and the chart file it came from
pub type OpenedSong = (Simfile, PathBuf);

/// Decides whether `new` may replace `existing`
pub type SongOverwriteHandler<'a> = &'a dyn Fn(&OpenedSong, &OpenedSong) -> bool;

/// A song now in the singles folder
#[derive(Debug, Clone)]
pub struct AddedSong {
    pub simfile: Simfile,
    pub chart_path: PathBuf,
    pub path: PathBuf,
}

/// Stage `input`, require exactly one song folder in it, settle any conflict,
/// and commit it into `library.singles`. The song must open before anything in
/// the library is touched.
pub fn add_song(
    input: &InputSpec,
    library: &Library,
    collab: &Collaborators<'_>,
    overwrite: SongOverwriteHandler<'_>,
) -> Result<AddedSong> {
    let working = library.working_dir()?;
    let staged = source::stage(input, &working, library.downloads.as_deref(), collab)?;

    let label = input.to_string();
    let root = locator::resolve_song_root(Path::new(&label), locator::find_chart_files(&staged))?;
    let song_root = root.path;

    let name = path_utils::entity_name(&song_root)?;
    let existing = conflict::existing_entity(&library.singles, &name);
    if library.delete_macos_files {
        fs_ops::delete_macos_files(&song_root)?;
        if let Some(existing) = existing.as_deref() {
            fs_ops::delete_macos_files(existing)?;
        }
    }

    let (new_simfile, staged_chart) = simfile::open_dir(&song_root)?;
    conflict::resolve(&song_root, existing.as_deref(), simfile::open_dir, overwrite)?
        .into_result(&name)?;

    let relative_chart = staged_chart
        .strip_prefix(&song_root)
        .map(Path::to_path_buf)
        .map_err(|_| not_an_entity(&staged_chart, "chart file is outside its song folder"))?;
    let path = library::commit_song(&song_root, &library.singles, &library.cache)?;
    let chart_path = path.join(relative_chart);
    tracing::info!(song = %name, title = %new_simfile.title, "added song");

    Ok(AddedSong {
        simfile: new_simfile,
        chart_path,
        path,
    })
}
