use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "timeme";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Default location of the persisted word list.
    pub fn words_path() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("share")
                .join(APP_NAME)
                .join("words.csv")
        } else if let Some(proj_dirs) = ProjectDirs::from("", "", APP_NAME) {
            proj_dirs.data_local_dir().join("words.csv")
        } else {
            PathBuf::from("words.csv")
        }
    }

    pub fn config_path() -> PathBuf {
        if let Some(proj_dirs) = ProjectDirs::from("", "", APP_NAME) {
            proj_dirs.config_dir().join("config.json")
        } else {
            PathBuf::from("timeme_config.json")
        }
    }
}
