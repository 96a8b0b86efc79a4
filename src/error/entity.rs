//! Pack and song resolution errors

use std::path::Path;

use super::ItgError;

/// No chart files (or no usable candidate root) were found under `path`
pub fn no_entity_found(kind: &str, path: &Path) -> ItgError {
    ItgError::NoEntityFound {
        kind: kind.to_string(),
        path: path.display().to_string(),
    }
}

/// Song ingestion found more than one song folder
pub fn ambiguous(count: usize) -> ItgError {
    ItgError::AmbiguousEntity { count }
}

/// `path` could not be opened as a simfile directory
pub fn not_an_entity(path: &Path, reason: impl std::fmt::Display) -> ItgError {
    ItgError::NotAnEntity {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
