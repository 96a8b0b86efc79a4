//! Simfile metadata reading
//!
//! Only the fields the library needs are read: title, subtitle, artist, and each
//! chart's steps type, description, difficulty, and meter. Note data is skipped.
//!
//! ## Module Organization
//!
//! - `msd.rs`: the `#KEY:value;` tokenizer
//! - `pack.rs`: [`SimfilePack`], a directory of song folders

pub mod msd;
pub mod pack;

pub use pack::SimfilePack;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{ItgError, Result, not_an_entity};

/// Chart file extensions, in order of preference when a folder holds both
pub const CHART_EXTENSIONS: [&str; 2] = ["ssc", "sm"];

/// One playable chart within a simfile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Chart {
    pub stepstype: String,
    pub description: String,
    pub difficulty: String,
    pub meter: String,
}

/// Song-level metadata read from a `.sm` or `.ssc` file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Simfile {
    pub title: String,
    pub subtitle: String,
    pub artist: String,
    pub charts: Vec<Chart>,
}

impl Simfile {
    /// Parse simfile text. `is_ssc` selects the per-chart layout.
    pub fn parse(text: &str, is_ssc: bool) -> Option<Self> {
        let params = msd::parse(text);
        if params.is_empty() {
            return None;
        }

        let mut simfile = Simfile::default();
        let mut chart: Option<Chart> = None;

        for param in &params {
            if is_ssc {
                if param.is("NOTEDATA") {
                    simfile.charts.extend(chart.take());
                    chart = Some(Chart::default());
                    continue;
                }
                if let Some(current) = chart.as_mut() {
                    match param.key.to_ascii_uppercase().as_str() {
                        "STEPSTYPE" => current.stepstype = param.value().to_string(),
                        "DESCRIPTION" => current.description = param.value().to_string(),
                        "DIFFICULTY" => current.difficulty = param.value().to_string(),
                        "METER" => current.meter = param.value().to_string(),
                        "NOTES" | "NOTES2" => simfile.charts.extend(chart.take()),
                        _ => {}
                    }
                    continue;
                }
            } else if param.is("NOTES") {
                simfile.charts.push(sm_chart(&param.values));
                continue;
            }

            match param.key.to_ascii_uppercase().as_str() {
                "TITLE" => simfile.title = param.value().to_string(),
                "SUBTITLE" => simfile.subtitle = param.value().to_string(),
                "ARTIST" => simfile.artist = param.value().to_string(),
                _ => {}
            }
        }
        simfile.charts.extend(chart);

        Some(simfile)
    }

    /// Chart meters as `[5, 7, 10, 12]`, or `[Easy 5, Medium 7, ...]` with labels
    pub fn charts_string(&self, difficulty_labels: bool) -> String {
        let items: Vec<String> = self
            .charts
            .iter()
            .map(|c| {
                if difficulty_labels {
                    format!("{} {}", c.difficulty, c.meter)
                } else {
                    c.meter.clone()
                }
            })
            .collect();
        format!("[{}]", items.join(", "))
    }
}

fn sm_chart(values: &[String]) -> Chart {
    let field = |i: usize| values.get(i).map(|v| v.trim().to_string()).unwrap_or_default();
    Chart {
        stepstype: field(0),
        description: field(1),
        difficulty: field(2),
        meter: field(3),
    }
}

/// Whether `path` has a chart file extension
pub fn is_chart_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| CHART_EXTENSIONS.iter().any(|c| e.eq_ignore_ascii_case(c)))
}

/// Locate the chart file inside a song folder (non-recursive).
///
/// Hidden files are ignored. A `.ssc` is preferred over a `.sm`; two files of
/// the preferred type are an error.
pub fn find_chart_file(dir: &Path) -> Result<PathBuf> {
    let entries = fs::read_dir(dir).map_err(|e| not_an_entity(dir, e))?;
    let mut candidates: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_file() && is_chart_file(p) && !crate::path_utils::is_hidden(p))
        .collect();
    candidates.sort();

    for ext in CHART_EXTENSIONS {
        let matching: Vec<&PathBuf> = candidates
            .iter()
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case(ext))
            })
            .collect();
        match matching.as_slice() {
            [] => {}
            [only] => return Ok((*only).clone()),
            _ => {
                return Err(not_an_entity(
                    dir,
                    format!("more than one .{ext} file in the folder"),
                ));
            }
        }
    }

    Err(not_an_entity(dir, "no .sm or .ssc file found"))
}

/// Read a single chart file
pub fn open_file(path: &Path) -> Result<Simfile> {
    let bytes = fs::read(path).map_err(|e| crate::error::file_read_failed(path, e))?;
    let text = String::from_utf8_lossy(&bytes);
    let is_ssc = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("ssc"));

    Simfile::parse(&text, is_ssc).ok_or_else(|| ItgError::ChartParseFailed {
        path: path.display().to_string(),
        reason: "no #KEY:value; parameters found".to_string(),
    })
}

/// Open the simfile in a song folder, returning it with the chart file's path
pub fn open_dir(dir: &Path) -> Result<(Simfile, PathBuf)> {
    let chart_path = find_chart_file(dir)?;
    let simfile = open_file(&chart_path)?;
    Ok((simfile, chart_path))
}
