//! Archive extraction
//!
//! Supported formats: zip, tar, tar.gz/tgz, tar.bz2/tbz2, tar.xz/txz.
//! The format is chosen from the file name suffix.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::{ItgError, Result};

/// Archive formats understood by [`ArchiveExtractor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    Tar,
    TarGz,
    TarBz2,
    TarXz,
}

/// Suffix table, longest suffixes first so `.tar.gz` wins over `.gz`
const SUFFIXES: &[(&str, ArchiveFormat)] = &[
    (".tar.gz", ArchiveFormat::TarGz),
    (".tar.bz2", ArchiveFormat::TarBz2),
    (".tar.xz", ArchiveFormat::TarXz),
    (".tgz", ArchiveFormat::TarGz),
    (".tbz2", ArchiveFormat::TarBz2),
    (".txz", ArchiveFormat::TarXz),
    (".zip", ArchiveFormat::Zip),
    (".tar", ArchiveFormat::Tar),
];

impl ArchiveFormat {
    /// Detect the format from a file name, returning it with the name minus its suffix
    pub fn detect(file_name: &str) -> Option<(Self, &str)> {
        let lower = file_name.to_ascii_lowercase();
        SUFFIXES.iter().find_map(|(suffix, format)| {
            if lower.ends_with(suffix) && lower.len() > suffix.len() {
                Some((*format, &file_name[..file_name.len() - suffix.len()]))
            } else {
                None
            }
        })
    }
}

/// Whether `name` ends with a supported archive suffix
pub fn is_archive_name(name: &str) -> bool {
    ArchiveFormat::detect(name).is_some()
}

/// Unpacks an archive into a new folder under `dest_root` and returns that folder
pub trait Extract {
    fn extract(&self, archive: &Path, dest_root: &Path) -> Result<PathBuf>;
}

/// Extractor backed by the `zip` and `tar` crates
#[derive(Debug, Default, Clone, Copy)]
pub struct ArchiveExtractor;

fn extraction_failed(path: &Path, reason: impl std::fmt::Display) -> ItgError {
    ItgError::ExtractionFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

impl Extract for ArchiveExtractor {
    fn extract(&self, archive: &Path, dest_root: &Path) -> Result<PathBuf> {
        let file_name = archive
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| extraction_failed(archive, "archive has no file name"))?;
        let (format, stem) = ArchiveFormat::detect(file_name)
            .ok_or_else(|| extraction_failed(archive, "unsupported archive format"))?;

        let dest = dest_root.join(stem);
        if dest.exists() {
            return Err(extraction_failed(
                archive,
                format!("{} already exists", dest.display()),
            ));
        }
        fs::create_dir_all(&dest).map_err(|e| extraction_failed(archive, e))?;

        tracing::debug!(
            archive = %archive.display(),
            dest = %dest.display(),
            ?format,
            "extracting"
        );
        let file = File::open(archive).map_err(|e| extraction_failed(archive, e))?;
        let reader = BufReader::new(file);

        let result = match format {
            ArchiveFormat::Zip => zip::ZipArchive::new(reader)
                .and_then(|mut zip| zip.extract(&dest))
                .map_err(|e| extraction_failed(archive, e)),
            ArchiveFormat::Tar => unpack_tar(reader, &dest, archive),
            ArchiveFormat::TarGz => {
                unpack_tar(flate2::read::GzDecoder::new(reader), &dest, archive)
            }
            ArchiveFormat::TarBz2 => {
                unpack_tar(bzip2::read::BzDecoder::new(reader), &dest, archive)
            }
            ArchiveFormat::TarXz => unpack_tar(xz2::read::XzDecoder::new(reader), &dest, archive),
        };

        if let Err(e) = result {
            let _ = fs::remove_dir_all(&dest);
            return Err(e);
        }
        Ok(dest)
    }
}

fn unpack_tar(reader: impl std::io::Read, dest: &Path, archive: &Path) -> Result<()> {
    tar::Archive::new(reader)
        .unpack(dest)
        .map_err(|e| extraction_failed(archive, e))
}
