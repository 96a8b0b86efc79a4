//! Error types and handling for itg-cli
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Sub-modules hold convenience constructors grouped by domain:
//! - [`fs`]: File system errors
//! - [`entity`]: Pack/song resolution errors

pub mod entity;
pub mod fs;

pub use entity::{ambiguous as ambiguous_entity, no_entity_found, not_an_entity};
pub use fs::{io_error, read_failed as file_read_failed, write_failed as file_write_failed};

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for itg-cli operations
#[derive(Error, Diagnostic, Debug)]
pub enum ItgError {
    // Entity resolution errors
    #[error("No {kind} found in {path}")]
    #[diagnostic(
        code(itg::entity::not_found),
        help("The input must contain at least one .sm or .ssc file")
    )]
    NoEntityFound { kind: String, path: String },

    #[error("More than one song found in the supplied input ({count} song folders)")]
    #[diagnostic(
        code(itg::entity::ambiguous),
        help("Supply songs individually or use add-pack instead")
    )]
    AmbiguousEntity { count: usize },

    #[error("{path} is not a valid simfile directory: {reason}")]
    #[diagnostic(code(itg::entity::not_an_entity))]
    NotAnEntity { path: String, reason: String },

    #[error("Failed to parse chart file {path}: {reason}")]
    #[diagnostic(code(itg::entity::parse_failed))]
    ChartParseFailed { path: String, reason: String },

    // Conflict errors
    #[error("Kept existing {name}")]
    #[diagnostic(
        code(itg::conflict::declined),
        help("Pass --overwrite to replace the existing entry without asking")
    )]
    OverwriteDeclined { name: String },

    #[error("Destination already exists: {path}")]
    #[diagnostic(code(itg::conflict::occupied))]
    DestinationOccupied { path: String },

    // Input errors
    #[error("Input does not exist: {path}")]
    #[diagnostic(code(itg::input::not_found))]
    InputNotFound { path: String },

    #[error("Download failed for {url}: {reason}")]
    #[diagnostic(
        code(itg::input::download_failed),
        help("Check that the link is reachable and points directly at an archive")
    )]
    DownloadFailed { url: String, reason: String },

    #[error("Failed to extract archive {path}: {reason}")]
    #[diagnostic(
        code(itg::input::extraction_failed),
        help("Supported formats: zip, tar, tar.gz, tar.bz2, tar.xz")
    )]
    ExtractionFailed { path: String, reason: String },

    // Censor errors
    #[error("Supplied path {path} is not inside {packs}")]
    #[diagnostic(code(itg::censor::invalid_path))]
    InvalidPath { path: String, packs: String },

    #[error("No censored songs")]
    #[diagnostic(code(itg::censor::empty))]
    NothingToUncensor,

    #[error("No selection made")]
    #[diagnostic(code(itg::censor::cancelled))]
    SelectionCancelled,

    #[error("Selection {index} is out of range (1-{count})")]
    #[diagnostic(
        code(itg::censor::invalid_selection),
        help("Run `itg-cli censored` to see the numbered list")
    )]
    InvalidSelection { index: usize, count: usize },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(itg::config::not_found),
        help("Run 'itg-cli init-config' to write a default configuration")
    )]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(itg::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(
        code(itg::config::invalid),
        help("Edit the configuration file so every directory exists")
    )]
    ConfigInvalid { message: String },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(itg::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(itg::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(itg::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for ItgError {
    fn from(err: std::io::Error) -> Self {
        ItgError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<walkdir::Error> for ItgError {
    fn from(err: walkdir::Error) -> Self {
        let path = err
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        ItgError::FileReadFailed {
            path,
            reason: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for ItgError {
    fn from(err: serde_yaml::Error) -> Self {
        ItgError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ItgError {
    fn from(err: serde_json::Error) -> Self {
        ItgError::IoError {
            message: format!("Failed to serialize JSON: {err}"),
        }
    }
}

impl From<inquire::InquireError> for ItgError {
    fn from(err: inquire::InquireError) -> Self {
        ItgError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, ItgError>;

#[cfg(test)]
mod tests;
