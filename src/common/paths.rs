//! Configuration file locations

use std::path::PathBuf;

/// Project name used for platform config directories
const PROJECT_NAME: &str = "replcheck";

/// Configuration file searched for in the working directory
const LOCAL_CONFIG: &str = "replcheck.toml";

/// Path of the working-directory configuration file
pub fn local_config_path() -> PathBuf {
    PathBuf::from(LOCAL_CONFIG)
}

/// Get the configuration directory path
///
/// Uses the directories crate for platform-appropriate locations:
/// - Linux: `~/.config/replcheck/`
/// - macOS: `~/Library/Application Support/replcheck/`
/// - Windows: `%APPDATA%\replcheck\`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", PROJECT_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the user-level configuration file
pub fn user_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}
