//! Command implementations for the itg-cli binary
//!
//! Commands are thin: load settings, build the interactive callbacks, call
//! into `itg_cli::operations`, print the result.

pub mod add_pack;
pub mod add_song;
pub mod censor;
pub mod completions;
pub mod init_config;
pub mod version;

use std::path::{Path, PathBuf};

use itg_cli::config::{Settings, default_config_path};
use itg_cli::error::Result;
use itg_cli::library::Library;

/// Config path from `--config`/`ITG_CLI_CONFIG`, else the default location
pub fn config_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => default_config_path(),
    }
}

/// Load (creating with defaults if missing) and validate the config file
pub fn load_library(config: Option<PathBuf>) -> Result<(Settings, Library)> {
    let path = config_path(config)?;
    let (settings, created) = Settings::load_or_init(&path)?;
    if created {
        eprintln!("Created new config file at {}", path.display());
    }
    let library = settings.library()?;
    tracing::debug!(config = %path.display(), packs = %library.packs.display(), "loaded library");
    Ok((settings, library))
}

/// Name of the folder an entity sits in, for messages
pub fn parent_name(path: &Path) -> String {
    path.parent()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
