//! Input staging
//!
//! An add command accepts any of:
//! - Local directory paths: `./MyPack`, `/mnt/usb/Songs/MyPack`
//! - Local archives: `./MyPack.zip`, `song.tar.gz`
//! - HTTP(S) links to archives, including Google Drive share links
//!
//! Whatever the input, staging produces one directory inside a private
//! [`WorkingDir`](crate::temp::WorkingDir) holding all of its content.
//!
//! ## Module Organization
//!
//! - `download.rs`: the [`Fetch`] seam and its HTTP implementation
//! - `archive.rs`: the [`Extract`] seam and its zip/tar implementation
//! - `stage.rs`: [`stage`], tying the two together

pub mod archive;
pub mod download;
pub mod stage;

pub use archive::{ArchiveExtractor, Extract};
pub use download::{Fetch, HttpFetcher};
pub use stage::{Collaborators, stage};

use std::path::PathBuf;

/// A parsed add-command input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSpec {
    /// A remote file to download
    Url(String),
    /// A local directory or archive
    Path(PathBuf),
}

impl InputSpec {
    /// Classify a raw argument. Anything starting with `http://` or `https://` is a URL.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            InputSpec::Url(trimmed.to_string())
        } else if let Some(path) = trimmed.strip_prefix("file://") {
            InputSpec::Path(PathBuf::from(path))
        } else {
            InputSpec::Path(PathBuf::from(trimmed))
        }
    }

    pub fn is_url(&self) -> bool {
        matches!(self, InputSpec::Url(_))
    }
}

impl std::fmt::Display for InputSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputSpec::Url(url) => write!(f, "{url}"),
            InputSpec::Path(path) => write!(f, "{}", path.display()),
        }
    }
}
