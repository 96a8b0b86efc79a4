//! Course folder migration
//!
//! Course files (`.crs`) ship next to a pack's song folders, often with
//! banners beside them. Every regular file in any folder holding a course file
//! is copied into `<courses>/<pack>`.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, file_read_failed, file_write_failed};
use crate::fs_ops;
use crate::path_utils::{MACOS_METADATA_DIR, is_hidden};

pub const COURSE_EXTENSION: &str = "crs";

/// Course files copied into a staging folder, ready to be swapped into place
#[derive(Debug)]
pub struct StagedCourses {
    pub dir: PathBuf,
    pub course_count: usize,
}

pub fn is_course_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(COURSE_EXTENSION))
}

/// Deduplicated parents of every course file under `root`
pub fn find_course_dirs(root: &Path) -> BTreeSet<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.file_name() != MACOS_METADATA_DIR)
        .filter_map(std::result::Result::ok)
        .filter(|e| {
            e.file_type().is_file() && is_course_file(e.path()) && !is_hidden(e.path())
        })
        .filter_map(|e| e.path().parent().map(Path::to_path_buf))
        .collect()
}

/// Copy course folders found under `scan_root` into `staging`.
///
/// Returns `None` when there are no course files, leaving `staging` untouched.
pub fn stage_courses(scan_root: &Path, staging: &Path) -> Result<Option<StagedCourses>> {
    let dirs = find_course_dirs(scan_root);
    if dirs.is_empty() {
        return Ok(None);
    }

    fs_ops::remove_dir_if_exists(staging)?;
    fs::create_dir_all(staging).map_err(|e| file_write_failed(staging, e))?;

    let mut course_count = 0;
    for dir in &dirs {
        let entries = fs::read_dir(dir).map_err(|e| file_read_failed(dir, e))?;
        for entry in entries {
            let path = entry.map_err(|e| file_read_failed(dir, e))?.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name() else {
                continue;
            };
            let target = staging.join(name);
            fs::copy(&path, &target).map_err(|e| file_write_failed(&target, e))?;
            if is_course_file(&path) {
                course_count += 1;
            }
        }
    }

    tracing::debug!(dirs = dirs.len(), courses = course_count, "staged courses");
    Ok(Some(StagedCourses {
        dir: staging.to_path_buf(),
        course_count,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, path.display().to_string()).unwrap();
    }

    #[test]
    fn test_find_course_dirs() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(&root.join("MyPack/Courses/x.crs"));
        write(&root.join("MyPack/Courses/y.CRS"));
        write(&root.join("Extra/z.crs"));
        write(&root.join("__MACOSX/MyPack/Courses/x.crs"));

        let dirs: Vec<PathBuf> = find_course_dirs(root).into_iter().collect();
        assert_eq!(dirs, vec![root.join("Extra"), root.join("MyPack/Courses")]);
    }

    #[test]
    fn test_stage_courses_copies_auxiliary_files() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("work");
        write(&root.join("MyPack/Courses/x.crs"));
        write(&root.join("MyPack/Courses/banner.png"));

        let staging = temp.path().join(".MyPack.incoming");
        let staged = stage_courses(&root, &staging).unwrap().unwrap();

        assert_eq!(staged.course_count, 1);
        assert!(staging.join("x.crs").is_file());
        assert!(staging.join("banner.png").is_file());
        assert!(root.join("MyPack/Courses/x.crs").is_file());
    }

    #[test]
    fn test_stage_courses_without_courses() {
        let temp = TempDir::new().unwrap();
        write(&temp.path().join("MyPack/Song/a.sm"));

        let staging = temp.path().join("staging");
        assert!(stage_courses(temp.path(), &staging).unwrap().is_none());
        assert!(!staging.exists());
    }
}
