//! Platform-specific path utilities.

use crate::config::{AppConfig, RegistrationConfig};
use crate::error::{LaunchPadError, Result};
use std::path::PathBuf;

/// Get the LaunchPad per-user configuration directory.
///
/// # Platform Behavior
/// - **Linux**: `~/.config/pw/launchpad` (XDG_CONFIG_HOME)
/// - **Windows**: `%APPDATA%\pw\launchpad`
/// - **macOS**: `~/Library/Application Support/pw/launchpad`
pub fn launchpad_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| LaunchPadError::Config {
        message: "Could not determine platform config directory".to_string(),
    })?;
    Ok(config_dir
        .join(AppConfig::VENDOR_DIR_NAME)
        .join(AppConfig::PRODUCT_DIR_NAME))
}

/// Get the path to the per-user registration database.
///
/// Returns `{launchpad_config_dir}/registry.db`.
pub fn registry_db_path() -> Result<PathBuf> {
    Ok(launchpad_config_dir()?.join(RegistrationConfig::DB_FILENAME))
}
