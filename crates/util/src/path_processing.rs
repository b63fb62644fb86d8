use std::env;
use std::path::PathBuf;

use dirs_next::{config_dir, home_dir};

/// Directory name used under the platform configuration directory.
pub const APP_DIR_NAME: &str = "atrium";

/// Environment variable overriding the TUI log file location.
pub const LOG_PATH_ENV: &str = "ATRIUM_LOG_PATH";

/// Expands a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let p = path.trim();
    if p == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = p.strip_prefix("~/") {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    if let Some(rest) = p.strip_prefix("~\\") {
        // Windows-style
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(p)
}

/// `~/.config/atrium` on most platforms, `./atrium` when no config directory
/// can be determined.
pub fn app_config_dir() -> PathBuf {
    config_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR_NAME)
}

/// Where the TUI writes its log, since stderr belongs to the alternate screen.
pub fn default_log_path() -> PathBuf {
    env_path_override(LOG_PATH_ENV).unwrap_or_else(|| app_config_dir().join("atrium.log"))
}

/// Reads a path from `var`, ignoring unset or blank values.
pub fn env_path_override(var: &str) -> Option<PathBuf> {
    let value = env::var(var).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(expand_tilde(trimmed))
}
