use crate::app_dirs::AppDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_TICK_RATE_MS: u64 = 10;
pub const MIN_TICK_RATE_MS: u64 = 10;
pub const MAX_TICK_RATE_MS: u64 = 100;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub words_file: Option<PathBuf>,
    pub tick_rate_ms: u64,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            words_file: None,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            seed: None,
        }
    }
}

impl Config {
    /// Word list location, falling back to the platform data dir.
    pub fn words_path(&self) -> PathBuf {
        self.words_file.clone().unwrap_or_else(AppDirs::words_path)
    }

    /// Refresh interval for the elapsed-time label.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(
            self.tick_rate_ms
                .clamp(MIN_TICK_RATE_MS, MAX_TICK_RATE_MS),
        )
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        match fs::read(&self.path) {
            Ok(bytes) => match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => return cfg,
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "ignoring invalid config")
                }
            },
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "no config file, using defaults")
            }
        }
        Config::default()
    }
}
