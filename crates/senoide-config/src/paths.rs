//! Platform-specific configuration paths.
//!
//! - **Linux**: `~/.config/senoide/`
//! - **macOS**: `~/Library/Application Support/senoide/`
//! - **Windows**: `%APPDATA%\senoide\`

use std::path::{Path, PathBuf};

/// Application name used for directory paths.
const APP_NAME: &str = "senoide";

/// Default configuration file name.
pub const CONFIG_FILE: &str = "senoide.toml";

/// Returns the user-specific configuration directory.
///
/// Falls back to the current directory if the platform config directory
/// cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Locate a configuration file.
///
/// Search order:
/// 1. The explicit path, when given (returned whether or not it exists, so a
///    typo surfaces as a read error rather than silently using defaults)
/// 2. `senoide.toml` in the current directory
/// 3. `senoide.toml` in the user configuration directory
///
/// Returns `None` when no explicit path is given and neither candidate
/// exists; callers then run on built-in defaults.
pub fn find_config(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let local = PathBuf::from(CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    let user = user_config_dir().join(CONFIG_FILE);
    if user.is_file() {
        return Some(user);
    }

    None
}
