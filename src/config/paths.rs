//! Config file location and platform defaults

use std::path::PathBuf;

use crate::error::{ItgError, Result};

/// Directory name under the user's config directory
const CONFIG_DIR: &str = "itg-cli";

/// Config file name
pub const CONFIG_FILE: &str = "config.yaml";

/// Default config file path: `<config dir>/itg-cli/config.yaml`
///
/// The CLI also honours `--config` and `ITG_CLI_CONFIG` before falling back here.
pub fn default_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| ItgError::ConfigInvalid {
        message: "Could not determine the user config directory".to_string(),
    })?;
    Ok(base.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Game data root and, where it lives elsewhere, cache folder for this platform
pub fn platform_defaults() -> Result<(PathBuf, Option<PathBuf>)> {
    let unknown = || ItgError::ConfigInvalid {
        message: "Could not determine a default game folder for this platform; \
                  set `root` in the config file"
            .to_string(),
    };

    if cfg!(target_os = "macos") {
        let home = dirs::home_dir().ok_or_else(unknown)?;
        Ok((
            home.join("Library/Application Support/ITGmania"),
            Some(home.join("Library/Caches/ITGmania")),
        ))
    } else if cfg!(windows) {
        let app_data = dirs::data_dir().ok_or_else(unknown)?;
        Ok((app_data.join("ITGmania"), None))
    } else {
        let home = dirs::home_dir().ok_or_else(unknown)?;
        Ok((home.join(".itgmania"), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_default_config_path_file_name() {
        let path = default_config_path().unwrap();
        assert!(path.ends_with("itg-cli/config.yaml"));
    }

    #[test]
    fn test_platform_defaults_root_name() {
        let (root, _cache) = platform_defaults().unwrap();
        let name = root.file_name().unwrap().to_string_lossy().to_string();
        assert!(name == ".itgmania" || name == "ITGmania");
    }

    #[cfg(target_os = "linux")]
    #[test]
    #[serial]
    fn test_default_config_path_follows_xdg_config_home() {
        let temp = tempfile::TempDir::new().unwrap();
        let previous = std::env::var_os("XDG_CONFIG_HOME");
        // SAFETY: serialized with every other test that reads the environment
        unsafe { std::env::set_var("XDG_CONFIG_HOME", temp.path()) };

        let path = default_config_path().unwrap();

        unsafe {
            match previous {
                Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
                None => std::env::remove_var("XDG_CONFIG_HOME"),
            }
        }
        assert_eq!(path, temp.path().join("itg-cli").join("config.yaml"));
    }
}
