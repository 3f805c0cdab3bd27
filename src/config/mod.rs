mod theme;

pub use theme::Theme;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use directories::BaseDirs;

use crate::api::HttpConfigApiConfig;
use crate::error::{ConsoleError, Result};

const CONFIG_DIR: &str = "provider-console";
const MAIN_CONFIG_FILE: &str = "config.toml";
const PREFERENCES_FILE: &str = "preferences.toml";
const LOGS_DIR: &str = "logs";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub backend: HttpConfigApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub tick_interval_ms: u64,
    pub log_level: String,
    /// Overrides the rolling log directory
    pub log_file: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 250,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

pub struct ConfigManager {
    config_dir: PathBuf,
    app_config: AppConfig,
    /// Why `config.toml` was ignored, if it was. Loading happens before
    /// logging is set up, so the caller reports this.
    load_warning: Option<String>,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        let config_dir = Self::get_config_dir()?;
        Ok(Self::with_dir(config_dir))
    }

    pub fn with_dir(config_dir: PathBuf) -> Self {
        let path = config_dir.join(MAIN_CONFIG_FILE);
        let (app_config, load_warning) = match load_toml_file::<AppConfig>(&path) {
            Ok(loaded) => (loaded.unwrap_or_default(), None),
            Err(e) => (AppConfig::default(), Some(format!("{}; using defaults", e))),
        };
        Self {
            config_dir,
            app_config,
            load_warning,
        }
    }

    pub fn load_warning(&self) -> Option<&str> {
        self.load_warning.as_deref()
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn app_config(&self) -> &AppConfig {
        &self.app_config
    }

    pub fn app_config_mut(&mut self) -> &mut AppConfig {
        &mut self.app_config
    }

    pub fn preferences_path(&self) -> PathBuf {
        self.config_dir.join(PREFERENCES_FILE)
    }

    /// Directory for rolling log files
    pub fn logs_dir(&self) -> PathBuf {
        match &self.app_config.general.log_file {
            Some(path) => path.clone(),
            None => self.config_dir.join(LOGS_DIR),
        }
    }

    fn get_config_dir() -> Result<PathBuf> {
        BaseDirs::new()
            .map(|dirs| dirs.config_dir().join(CONFIG_DIR))
            .ok_or_else(|| ConsoleError::Config("Could not determine config directory".to_string()))
    }

    pub fn ensure_config_dir(&self) -> Result<()> {
        ensure_dir(&self.config_dir)
    }

    pub fn write_default_config(&self) -> Result<()> {
        self.ensure_config_dir()?;

        let main_path = self.config_dir.join(MAIN_CONFIG_FILE);
        if !main_path.exists() {
            write_toml_file(&main_path, &AppConfig::default())?;
        }
        Ok(())
    }
}

pub(crate) fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)
            .map_err(|e| ConsoleError::Config(format!("Failed to create config dir: {}", e)))?;
    }
    Ok(())
}

/// Read a TOML file. A missing file is `Ok(None)`; unreadable or
/// malformed content is an error for the caller to report.
pub(crate) fn load_toml_file<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConsoleError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map(Some)
        .map_err(|e| ConsoleError::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

pub(crate) fn write_toml_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let content = toml::to_string_pretty(value)
        .map_err(|e| ConsoleError::Config(format!("Failed to serialize {}: {}", path.display(), e)))?;
    std::fs::write(path, content)
        .map_err(|e| ConsoleError::Config(format!("Failed to write {}: {}", path.display(), e)))?;
    Ok(())
}
