//! Path helpers shared by the locator, committer, and censor vault.

use std::path::Path;

use crate::error::{Result, not_an_entity};

/// Folder name macOS archivers add to zip files
pub const MACOS_METADATA_DIR: &str = "__MACOSX";

/// Characters that are unsafe in file names on at least one platform
const FILE_NAME_UNSAFE_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Base name of a directory as a `String`; this is the identity of a pack or song.
pub fn entity_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(ToString::to_string)
        .ok_or_else(|| not_an_entity(path, "path has no folder name"))
}

/// Whether the final component of `path` starts with `.`
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

/// Make a server-supplied file name safe to join onto a local directory.
///
/// Strips any directory part, replaces characters invalid on Windows with `_`,
/// and returns `None` when nothing usable remains.
///
/// ```
/// use itg_cli::path_utils::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("Pack: Vol 1.zip").as_deref(), Some("Pack_ Vol 1.zip"));
/// assert_eq!(sanitize_file_name("../../etc/passwd").as_deref(), Some("passwd"));
/// assert_eq!(sanitize_file_name(".."), None);
/// ```
pub fn sanitize_file_name(name: &str) -> Option<String> {
    let last = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name)
        .trim()
        .trim_matches('"');

    let cleaned: String = last
        .chars()
        .map(|c| {
            if FILE_NAME_UNSAFE_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        None
    } else {
        Some(cleaned)
    }
}
