//! censor, uncensor, and censored commands

use std::path::PathBuf;

use serde::Serialize;

use itg_cli::error::Result;
use itg_cli::operations::{self, CensoredSong};
use itg_cli::ui::{display, prompts};

use crate::cli::{CensorArgs, CensoredArgs, UncensorArgs};

/// Run censor command
pub fn run_censor(config: Option<PathBuf>, args: &CensorArgs) -> Result<()> {
    let (_, library) = super::load_library(config)?;
    let simfile = operations::censor(&args.path, &library.packs, &library.cache)?;
    let pack = super::parent_name(&args.path);
    println!("{}", display::moved_song("Censored", &simfile, &pack));
    Ok(())
}

/// Run uncensor command
pub fn run_uncensor(config: Option<PathBuf>, args: &UncensorArgs) -> Result<()> {
    let (_, library) = super::load_library(config)?;
    let restored = match args.index {
        Some(index) => operations::uncensor(&library.packs, &|_| Some(index - 1))?,
        None => operations::uncensor(&library.packs, &prompts::pick_censored)?,
    };
    println!(
        "{}",
        display::moved_song("Uncensored", &restored.simfile, &restored.pack)
    );
    Ok(())
}

/// One entry of `censored --json`
#[derive(Debug, Serialize)]
struct CensoredEntry<'a> {
    index: usize,
    title: &'a str,
    artist: &'a str,
    pack: &'a str,
    song: &'a str,
    charts: String,
}

fn json_entries(songs: &[CensoredSong]) -> Vec<CensoredEntry<'_>> {
    songs
        .iter()
        .enumerate()
        .map(|(i, s)| CensoredEntry {
            index: i + 1,
            title: &s.simfile.title,
            artist: &s.simfile.artist,
            pack: &s.pack,
            song: &s.song,
            charts: s.simfile.charts_string(false),
        })
        .collect()
}

/// Run censored command
pub fn run_censored(config: Option<PathBuf>, args: &CensoredArgs) -> Result<()> {
    let (_, library) = super::load_library(config)?;
    let songs = operations::list_censored(&library.packs)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&json_entries(&songs))?);
    } else {
        println!("{}", display::censored_list(&songs));
    }
    Ok(())
}
