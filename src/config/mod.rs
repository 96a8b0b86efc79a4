//! Configuration file handling for itg-cli
//!
//! One YAML file describes where the game keeps its data:
//!
//! ```yaml
//! root: /home/me/.itgmania
//! singles_pack_name: Singles
//! delete_macos_files: false
//! # optional, defaults derived from root
//! packs: /home/me/.itgmania/Songs
//! courses: /home/me/.itgmania/Courses
//! cache: /home/me/.itgmania/Cache
//! downloads: /home/me/Downloads
//! work_dir: /home/me/.itgmania/.itg-cli-work
//! ```
//!
//! [`Settings::library`] turns a validated file into the [`Library`] value
//! that operations take.

pub mod paths;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ItgError, Result, file_read_failed, file_write_failed};
use crate::fs_ops;
use crate::library::Library;

pub use paths::{CONFIG_FILE, default_config_path, platform_defaults};

/// Default singles folder name inside the packs root
pub const DEFAULT_SINGLES_PACK_NAME: &str = "Singles";

/// Contents of `config.yaml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Game data root
    pub root: PathBuf,

    /// Folder under the packs root that holds single songs
    pub singles_pack_name: String,

    /// Remove `._*` files from incoming content
    #[serde(default)]
    pub delete_macos_files: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packs: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courses: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<PathBuf>,

    /// Where downloads are kept; when unset they are discarded after use
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloads: Option<PathBuf>,

    /// Where inputs are staged before they are committed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_dir: Option<PathBuf>,
}

impl Settings {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            singles_pack_name: DEFAULT_SINGLES_PACK_NAME.to_string(),
            delete_macos_files: false,
            packs: None,
            courses: None,
            cache: None,
            downloads: None,
            work_dir: None,
        }
    }

    /// Defaults for the current platform
    pub fn platform_default() -> Result<Self> {
        let (root, cache) = platform_defaults()?;
        let mut settings = Self::new(root);
        settings.cache = cache;
        Ok(settings)
    }

    /// Parse settings from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let settings: Self = serde_yaml::from_str(yaml)?;
        Ok(settings)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Read and parse the config file at `path`
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ItgError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        let yaml = fs::read_to_string(path).map_err(|e| file_read_failed(path, e))?;
        serde_yaml::from_str(&yaml).map_err(|e| ItgError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Load `path`, first writing platform defaults there if it does not exist.
    /// Returns the settings and whether a new file was created.
    pub fn load_or_init(path: &Path) -> Result<(Self, bool)> {
        if path.exists() {
            return Ok((Self::load(path)?, false));
        }
        let settings = Self::platform_default()?;
        settings.write(path)?;
        tracing::info!(path = %path.display(), "created default config file");
        Ok((settings, true))
    }

    /// Write settings to `path`, creating parent folders
    pub fn write(&self, path: &Path) -> Result<()> {
        fs_ops::ensure_parent_dir(path)?;
        let yaml = self.to_yaml()?;
        fs::write(path, yaml).map_err(|e| file_write_failed(path, e))
    }

    pub fn packs_dir(&self) -> PathBuf {
        self.packs.clone().unwrap_or_else(|| self.root.join("Songs"))
    }

    pub fn singles_dir(&self) -> PathBuf {
        self.packs_dir().join(&self.singles_pack_name)
    }

    pub fn courses_dir(&self) -> PathBuf {
        self.courses
            .clone()
            .unwrap_or_else(|| self.root.join("Courses"))
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.cache.clone().unwrap_or_else(|| self.root.join("Cache"))
    }

    /// Check that every configured folder exists, creating the singles folder
    /// when the packs folder is there. All problems are reported at once.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();

        if self.singles_pack_name.trim().is_empty() {
            problems.push("singles_pack_name: must not be empty".to_string());
        }

        let singles = self.singles_dir();
        if !singles.exists() && self.packs_dir().is_dir() && !self.singles_pack_name.is_empty() {
            fs::create_dir_all(&singles).map_err(|e| file_write_failed(&singles, e))?;
        }

        let mut dirs = vec![
            ("packs", self.packs_dir()),
            ("singles", singles),
            ("courses", self.courses_dir()),
            ("cache", self.cache_dir()),
        ];
        if let Some(downloads) = &self.downloads {
            dirs.push(("downloads", downloads.clone()));
        }
        for (field, dir) in dirs {
            if !dir.is_dir() {
                problems.push(format!("{field}: {} is not a directory", dir.display()));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ItgError::ConfigInvalid {
                message: problems.join("; "),
            })
        }
    }

    /// Validate and produce the explicit library value
    pub fn library(&self) -> Result<Library> {
        self.validate()?;
        Ok(Library {
            packs: self.packs_dir(),
            singles: self.singles_dir(),
            courses: self.courses_dir(),
            cache: self.cache_dir(),
            downloads: self.downloads.clone(),
            work_root: self.work_dir.clone(),
            delete_macos_files: self.delete_macos_files,
        })
    }
}
