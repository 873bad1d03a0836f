use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;
use tracing::{info, warn};

use propcheck_domain::challenge::ChallengeConfig;

pub const CONFIG_FILE_NAME: &str = "app_config.json";

/// Log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(anyhow!(
                "Invalid log level '{}'. Must be one of: error, warn, info, debug, trace",
                other
            )),
        }
    }
}

/// Where the session history slot lives
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    File,
}

/// Persistent configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: LogLevel,
    pub storage_backend: StorageBackend,
    /// Values the calculator form starts with
    pub default_challenge: ChallengeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            storage_backend: StorageBackend::Sqlite,
            default_challenge: ChallengeConfig::default(),
        }
    }
}

/// Application configuration service
pub struct ConfigService {
    config: Mutex<AppConfig>,
    config_path: PathBuf,
    /// Problems found while loading, logged once logging is up
    load_notices: Vec<String>,
}

impl ConfigService {
    /// Load `app_config.json` from `config_dir`, falling back to defaults
    ///
    /// Runs before the logger exists; call `log_load_report` afterwards.
    pub fn new(config_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(config_dir)?;
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let mut load_notices = Vec::new();

        let config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            serde_json::from_str::<AppConfig>(&content).unwrap_or_else(|e| {
                load_notices.push(format!("Config file is invalid, using defaults: {}", e));
                AppConfig::default()
            })
        } else {
            AppConfig::default()
        };

        // A hand-edited file may carry an unusable default challenge
        let config = match config.default_challenge.validate() {
            Ok(()) => config,
            Err(e) => {
                load_notices.push(format!(
                    "Default challenge in config is invalid, using built-in defaults: {}",
                    e
                ));
                AppConfig {
                    default_challenge: ChallengeConfig::default(),
                    ..config
                }
            }
        };

        Ok(Self {
            config: Mutex::new(config),
            config_path,
            load_notices,
        })
    }

    pub fn load_notices(&self) -> &[String] {
        &self.load_notices
    }

    pub fn log_load_report(&self) {
        for notice in &self.load_notices {
            warn!(path = %self.config_path.display(), "{}", notice);
        }
        info!(
            path = %self.config_path.display(),
            log_level = self.get_log_level().as_str(),
            "Config loaded"
        );
    }

    pub fn snapshot(&self) -> Result<AppConfig> {
        Ok(self.lock()?.clone())
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.lock().map(|c| c.log_level).unwrap_or_default()
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.lock().map(|c| c.storage_backend).unwrap_or_default()
    }

    pub fn default_challenge(&self) -> ChallengeConfig {
        self.lock().map(|c| c.default_challenge).unwrap_or_default()
    }

    /// Set log level and persist to disk
    ///
    /// Takes effect on the next start.
    pub fn set_log_level(&self, level: LogLevel) -> Result<()> {
        self.update(|config| config.log_level = level)?;
        info!(level = level.as_str(), "Log level saved");
        Ok(())
    }

    pub fn set_storage_backend(&self, backend: StorageBackend) -> Result<()> {
        self.update(|config| config.storage_backend = backend)?;
        info!(backend = ?backend, "Storage backend saved");
        Ok(())
    }

    pub fn set_default_challenge(&self, challenge: ChallengeConfig) -> Result<()> {
        challenge.validate()?;
        self.update(|config| config.default_challenge = challenge)?;
        info!("Default challenge saved");
        Ok(())
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, AppConfig>> {
        self.config
            .lock()
            .map_err(|_| anyhow!("Config lock poisoned"))
    }

    /// Persist a changed copy; memory only changes once the file is written
    fn update(&self, change: impl FnOnce(&mut AppConfig)) -> Result<()> {
        let mut current = self.lock()?;
        let mut next = current.clone();
        change(&mut next);
        self.save(&next)?;
        *current = next;
        Ok(())
    }

    fn save(&self, config: &AppConfig) -> Result<()> {
        let content = serde_json::to_string_pretty(config)?;
        std::fs::write(&self.config_path, content)?;
        Ok(())
    }
}
