//! add-song command

use std::path::PathBuf;

use itg_cli::error::Result;
use itg_cli::operations::{self, OpenedSong};
use itg_cli::source::{ArchiveExtractor, Collaborators, HttpFetcher, InputSpec};
use itg_cli::ui::{display, prompts};

use crate::cli::AddArgs;

/// Run add-song command
pub fn run(config: Option<PathBuf>, args: &AddArgs) -> Result<()> {
    let (settings, library) = super::load_library(config)?;
    let input = InputSpec::parse(&args.path_or_url);

    let fetcher = HttpFetcher::new(true)?;
    let collab = Collaborators {
        fetcher: &fetcher,
        extractor: &ArchiveExtractor,
    };

    let answer = args.overwrite_answer();
    let overwrite = move |new: &OpenedSong, old: &OpenedSong| {
        answer.unwrap_or_else(|| prompts::confirm_song_overwrite(new, old))
    };

    let added = operations::add_song(&input, &library, &collab, &overwrite)?;
    println!("{}", display::added_song(&added, &settings.singles_pack_name));
    Ok(())
}
