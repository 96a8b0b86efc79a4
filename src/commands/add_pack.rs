//! add-pack command

use std::path::PathBuf;

use itg_cli::error::Result;
use itg_cli::operations::{self, PackPolicy};
use itg_cli::simfile::SimfilePack;
use itg_cli::source::{ArchiveExtractor, Collaborators, HttpFetcher, InputSpec};
use itg_cli::ui::{display, prompts};

use crate::cli::AddArgs;

/// Run add-pack command
pub fn run(config: Option<PathBuf>, args: &AddArgs) -> Result<()> {
    let (_, library) = super::load_library(config)?;
    let input = InputSpec::parse(&args.path_or_url);

    let fetcher = HttpFetcher::new(true)?;
    let collab = Collaborators {
        fetcher: &fetcher,
        extractor: &ArchiveExtractor,
    };

    let answer = args.overwrite_answer();
    let overwrite = move |new: &SimfilePack, old: &SimfilePack| {
        answer.unwrap_or_else(|| prompts::confirm_pack_overwrite(new, old))
    };
    let policy = PackPolicy {
        overwrite: &overwrite,
        tie_break: None,
    };

    let added = operations::add_pack(&input, &library, &collab, policy)?;
    for rejected in &added.rejected {
        eprintln!(
            "Warning: ignored {} ({} songs); selected the pack with the most songs",
            rejected.path.display(),
            rejected.count
        );
    }
    println!("{}", display::added_pack(&added));
    Ok(())
}
