//! Progress bar display for downloads

use indicatif::{ProgressBar, ProgressStyle};

/// Byte progress for a single download
pub struct DownloadProgress {
    pb: ProgressBar,
}

impl DownloadProgress {
    /// Create a bar for `file_name`. An unknown length shows a spinner with a byte count.
    pub fn new(total_bytes: Option<u64>, file_name: &str) -> Self {
        let pb = match total_bytes {
            Some(total) => {
                let style = ProgressStyle::with_template(
                    "{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-");
                let pb = ProgressBar::new(total);
                pb.set_style(style);
                pb
            }
            None => {
                let style =
                    ProgressStyle::with_template("{spinner} {msg} {bytes} ({bytes_per_sec})")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner());
                let pb = ProgressBar::new_spinner();
                pb.set_style(style);
                pb
            }
        };
        pb.set_message(truncate_name(file_name));
        Self { pb }
    }

    /// A bar that draws nothing, for non-interactive callers and tests
    pub fn hidden() -> Self {
        Self {
            pb: ProgressBar::hidden(),
        }
    }

    pub fn inc(&self, bytes: u64) {
        self.pb.inc(bytes);
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.pb.abandon();
    }
}

fn truncate_name(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() > 40 {
        let tail: String = chars[chars.len() - 37..].iter().collect();
        format!("...{tail}")
    } else {
        name.to_string()
    }
}
