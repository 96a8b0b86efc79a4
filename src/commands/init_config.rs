//! init-config command

use std::path::PathBuf;

use itg_cli::config::Settings;
use itg_cli::error::Result;
use itg_cli::ui::prompts;

use crate::cli::InitConfigArgs;

/// Run init-config command
pub fn run(config: Option<PathBuf>, args: &InitConfigArgs) -> Result<()> {
    let path = match &args.path {
        Some(path) => path.clone(),
        None => super::config_path(config)?,
    };

    if path.exists() && !args.overwrite && !prompts::confirm_config_overwrite(&path)? {
        println!("Keeping existing config file: {}", path.display());
        return Ok(());
    }

    Settings::platform_default()?.write(&path)?;
    println!("Initialized config: {}", path.display());
    Ok(())
}
