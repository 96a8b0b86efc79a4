//! Result panels and listings
//!
//! Functions here build strings; the commands print them.

use console::{Style, measure_text_width};

use crate::operations::{AddedPack, AddedSong, CensoredSong};
use crate::simfile::Simfile;

/// Draw `lines` inside a rounded box with `title` in the top border
pub fn panel(title: &str, lines: &[String]) -> String {
    let title_width = measure_text_width(title);
    let inner = lines
        .iter()
        .map(|l| measure_text_width(l))
        .max()
        .unwrap_or(0)
        .max(title_width + 2);

    let mut out = String::new();
    let fill = inner - title_width - 1;
    out.push_str(&format!("╭─ {title} {}╮\n", "─".repeat(fill)));
    for line in lines {
        let pad = inner - measure_text_width(line);
        out.push_str(&format!("│ {line}{} │\n", " ".repeat(pad)));
    }
    out.push_str(&format!("╰{}╯", "─".repeat(inner + 2)));
    out
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// Summary panel after add-pack: one line per song with its meters
pub fn added_pack(added: &AddedPack) -> String {
    let bold = Style::new().bold();
    let title = format!(
        "Added {} with {} and {}",
        Style::new().bold().green().apply_to(&added.pack.name),
        plural(added.pack.song_count(), "song"),
        plural(added.course_count, "course"),
    );
    let lines: Vec<String> = added
        .pack
        .simfiles()
        .map(|s| format!("{} {}", bold.apply_to(s.charts_string(false)), s.title))
        .collect();
    panel(&title, &lines)
}

/// Summary panel after add-song
pub fn added_song(added: &AddedSong, singles_name: &str) -> String {
    let bold = Style::new().bold();
    let sf = &added.simfile;
    let title = format!(
        "Added {} to {singles_name}",
        Style::new().bold().green().apply_to(&sf.title)
    );

    let mut lines = vec![
        format!(" Title: {}", bold.apply_to(&sf.title)),
        format!("Artist: {}", bold.apply_to(&sf.artist)),
    ];
    for (i, chart) in sf.charts.iter().enumerate() {
        let label = if i == 0 { "Charts:" } else { "       " };
        lines.push(format!(
            "{label} {} {}",
            Style::new().blue().apply_to(&chart.meter),
            chart_label(chart)
        ));
    }
    panel(&title, &lines)
}

fn chart_label(chart: &crate::simfile::Chart) -> &str {
    if chart.description.is_empty() {
        &chart.difficulty
    } else {
        &chart.description
    }
}

/// `Title (Pack)` label used by the uncensor picker and listing
pub fn censored_label(song: &CensoredSong) -> String {
    format!("{} ({})", song.simfile.title, song.pack)
}

/// Numbered list of censored songs
pub fn censored_list(songs: &[CensoredSong]) -> String {
    if songs.is_empty() {
        return "No censored songs.".to_string();
    }
    let width = songs.len().to_string().len();
    let dim = Style::new().dim();
    let mut lines = vec![format!("Censored songs ({}):", songs.len())];
    for (i, song) in songs.iter().enumerate() {
        lines.push(format!(
            "  {:>width$}. {} {}",
            i + 1,
            censored_label(song),
            dim.apply_to(song.simfile.charts_string(false))
        ));
    }
    lines.join("\n")
}

/// One-line confirmation after censor/uncensor
pub fn moved_song(verb: &str, simfile: &Simfile, pack: &str) -> String {
    format!(
        "{verb} {} from {pack}.",
        Style::new().bold().apply_to(&simfile.title)
    )
}
