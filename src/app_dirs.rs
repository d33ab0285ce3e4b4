use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// The terminal is in raw mode while running, so logs go to a file
    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("ttype");
            Some(state_dir.join("ttype.log"))
        } else {
            ProjectDirs::from("", "", "ttype")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("ttype.log"))
        }
    }
}
