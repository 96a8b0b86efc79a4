//! Interactive decisions behind the operation callbacks

use console::Style;
use inquire::{Confirm, Select};

use crate::operations::{CensoredSong, OpenedSong};
use crate::simfile::SimfilePack;

use super::display::censored_label;

/// How the existing pack compares to the incoming one
pub fn song_count_difference(new_count: usize, old_count: usize) -> String {
    match old_count.cmp(&new_count) {
        std::cmp::Ordering::Greater => format!("{} fewer songs", old_count - new_count),
        std::cmp::Ordering::Less => format!("{} more songs", new_count - old_count),
        std::cmp::Ordering::Equal => "the same number of songs".to_string(),
    }
}

fn confirm(message: &str) -> bool {
    Confirm::new(message)
        .with_default(true)
        .with_help_message("Press Enter to overwrite, or 'n' to keep the existing one")
        .prompt()
        .unwrap_or_else(|e| {
            tracing::debug!(error = %e, "prompt failed, keeping existing");
            false
        })
}

/// Ask before replacing an existing pack, showing the song count difference
pub fn confirm_pack_overwrite(new: &SimfilePack, old: &SimfilePack) -> bool {
    println!(
        "{} already exists (with {}).",
        Style::new().bold().apply_to(&new.name),
        song_count_difference(new.song_count(), old.song_count())
    );
    confirm("Overwrite existing pack?")
}

/// Ask before replacing an existing single
pub fn confirm_song_overwrite(new: &OpenedSong, old: &OpenedSong) -> bool {
    let label = song_label(&old.1);
    println!("{} already exists.", Style::new().bold().apply_to(label));
    println!("  existing: {}", old.0.charts_string(true));
    println!("  incoming: {}", new.0.charts_string(true));
    confirm("Overwrite existing simfile?")
}

/// `Pack/Song` for a chart file at `.../Pack/Song/chart.sm`
fn song_label(chart_path: &std::path::Path) -> String {
    let song_dir = chart_path.parent();
    let song = song_dir.and_then(|d| d.file_name());
    let pack = song_dir.and_then(|d| d.parent()).and_then(|p| p.file_name());
    match (pack, song) {
        (Some(pack), Some(song)) => {
            format!("{}/{}", pack.to_string_lossy(), song.to_string_lossy())
        }
        _ => chart_path.display().to_string(),
    }
}

/// Let the user choose a censored song; `None` when they cancel
pub fn pick_censored(songs: &[CensoredSong]) -> Option<usize> {
    let items: Vec<String> = songs.iter().map(censored_label).collect();
    match Select::new("Select a song to uncensor", items)
        .with_starting_cursor(0)
        .with_page_size(10)
        .with_help_message("↑↓ to move, type to filter, ENTER to select, ESC to cancel")
        .raw_prompt_skippable()
    {
        Ok(Some(choice)) => Some(choice.index),
        Ok(None) => None,
        Err(e) => {
            tracing::debug!(error = %e, "selection prompt failed");
            None
        }
    }
}

/// Ask before replacing an existing config file
pub fn confirm_config_overwrite(path: &std::path::Path) -> crate::error::Result<bool> {
    Ok(Confirm::new(&format!(
        "Overwrite existing config at {} with defaults?",
        path.display()
    ))
    .with_default(true)
    .prompt()?)
}
