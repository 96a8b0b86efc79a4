//! File system errors

use std::path::Path;

use super::ItgError;

/// Creates a read failure for `path`
pub fn read_failed(path: &Path, err: impl std::fmt::Display) -> ItgError {
    ItgError::FileReadFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates a write failure for `path`
pub fn write_failed(path: &Path, err: impl std::fmt::Display) -> ItgError {
    ItgError::FileWriteFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> ItgError {
    ItgError::IoError {
        message: message.into(),
    }
}
