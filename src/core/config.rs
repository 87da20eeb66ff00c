use crate::error::{ExhideError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that overrides the data directory
pub const HOME_ENV: &str = "EXHIDE_HOME";

pub const PATTERNS_FILE: &str = "extensions.txt";
pub const REGISTRY_FILE: &str = "hidden-files.txt";
pub const LOG_FILE: &str = "exhide.log";
pub const SETTINGS_FILE: &str = "settings.json";

pub const DEFAULT_INTERVAL_MS: u64 = 5000;

/// Optional tunables stored in `settings.json`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

fn default_interval_ms() -> u64 {
    DEFAULT_INTERVAL_MS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

/// Resolved locations of every file the service reads or writes
#[derive(Debug, Clone)]
pub struct Config {
    pub base_dir: PathBuf,
    pub patterns_file: PathBuf,
    pub registry_file: PathBuf,
    pub log_file: PathBuf,
    pub interval: Duration,
}

impl Config {
    /// Load the configuration from the default data directory
    pub fn load() -> Result<Self> {
        let base_dir = Self::default_base_dir()?;
        Self::load_from(&base_dir)
    }

    /// Load the configuration rooted at `base_dir`, reading `settings.json` if present
    pub fn load_from(base_dir: &Path) -> Result<Self> {
        let settings = Self::read_settings(&base_dir.join(SETTINGS_FILE))?;
        if settings.interval_ms == 0 {
            return Err(ExhideError::config("interval_ms must be greater than zero"));
        }

        let mut config = Self::in_dir(base_dir);
        config.interval = Duration::from_millis(settings.interval_ms);
        Ok(config)
    }

    /// Build a configuration with default settings rooted at `base_dir`
    pub fn in_dir(base_dir: &Path) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            patterns_file: base_dir.join(PATTERNS_FILE),
            registry_file: base_dir.join(REGISTRY_FILE),
            log_file: base_dir.join(LOG_FILE),
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Create the data directory and the three text files if they are missing.
    /// Existing files are left untouched.
    pub fn ensure_files(&self) -> Result<()> {
        fs::create_dir_all(&self.base_dir).map_err(|e| {
            ExhideError::config(format!(
                "Failed to create data directory {:?}: {}",
                self.base_dir, e
            ))
        })?;

        for path in [&self.patterns_file, &self.registry_file, &self.log_file] {
            if !path.exists() {
                fs::File::create(path).map_err(|e| {
                    ExhideError::config(format!("Failed to create {:?}: {}", path, e))
                })?;
                log::debug!("Created {:?}", path);
            }
        }

        Ok(())
    }

    fn read_settings(path: &Path) -> Result<Settings> {
        if !path.exists() {
            return Ok(Settings::default());
        }

        let data = fs::read_to_string(path)?;
        if data.trim().is_empty() {
            return Ok(Settings::default());
        }

        Ok(serde_json::from_str(&data)?)
    }

    fn default_base_dir() -> Result<PathBuf> {
        if let Some(home) = std::env::var_os(HOME_ENV) {
            return Ok(PathBuf::from(home));
        }

        let config_dir = dirs::config_dir()
            .ok_or_else(|| ExhideError::config("Could not determine config directory"))?;

        Ok(config_dir.join("exhide"))
    }
}
