//! Platform-specific paths for song files.
//!
//! # Directory Structure
//!
//! - **User config**: `~/.config/aleatorio/` (Linux), `~/Library/Application Support/aleatorio/` (macOS), `%APPDATA%\aleatorio\` (Windows)
//! - **Default song file**: `<user config>/song.toml`
//!
//! # Example
//!
//! ```rust,no_run
//! use aleatorio_config::paths;
//!
//! if let Some(path) = paths::find_song("ambient") {
//!     println!("Found song at: {:?}", path);
//! }
//! ```

use std::path::PathBuf;

/// Application name used for directory paths.
const APP_NAME: &str = "aleatorio";

/// File name of the default song file.
pub const DEFAULT_SONG_FILE: &str = "song.toml";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Path of the default song file.
pub fn default_song_path() -> PathBuf {
    user_config_dir().join(DEFAULT_SONG_FILE)
}

/// Find a song file by name.
///
/// Searches in the following order:
/// 1. `name` as a path
/// 2. The user config directory, with `.toml` appended if missing
pub fn find_song(name: &str) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let filename = if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{name}.toml")
    };

    let user_path = user_config_dir().join(filename);
    user_path.is_file().then_some(user_path)
}
