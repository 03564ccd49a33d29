use std::path::{Path, PathBuf};

use anyhow::Context;

pub const CONFIG_DIR_ENV: &str = "DICTSTACK_CONFIG_DIR";
pub const BACKUP_FILENAME: &str = "solo_mode_dictionary_backup.json";
pub const DICTIONARIES_FILENAME: &str = "dictionaries.json";

/// Explicit directory, else `$DICTSTACK_CONFIG_DIR`, else the platform
/// config dir's `plover` folder.
pub fn resolve_config_dir(explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }

    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    let base = dirs::config_dir().context("failed to locate the user config directory")?;
    Ok(base.join("plover"))
}

pub fn backup_path(config_dir: &Path) -> PathBuf {
    config_dir.join(BACKUP_FILENAME)
}

pub fn dictionaries_path(config_dir: &Path) -> PathBuf {
    config_dir.join(DICTIONARIES_FILENAME)
}
