//! Configuration for reader_app, read from a RON file.
//!
//! Every field has a default, so a missing file or a partial file is fine.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use log::LevelFilter;
use reader_engine::{LoaderSettings, NewsApiSettings, PromptInfo, DEFAULT_BASE_URL};
use reader_logging::{LogDestination, DEFAULT_LOG_FILE};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "reader.ron";
pub const API_KEY_ENV: &str = "NEWS_API_KEY";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("invalid log level {0:?}")]
    InvalidLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Heading shown above the headline list.
    pub title: String,
    pub news: NewsConfig,
    pub refresh_floor_ms: u64,
    pub biometric: BiometricMode,
    pub prompt: PromptConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    pub base_url: String,
    pub api_key: String,
    pub source: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BiometricMode {
    /// No sensor: the gate is never locked.
    #[default]
    Disabled,
    /// Simulated sensor answered on the terminal.
    Console,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    pub title: String,
    pub subtitle: String,
    pub negative_button: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogTarget {
    #[default]
    File,
    Terminal,
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub target: LogTarget,
    pub file: PathBuf,
    pub level: String,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            title: "BBC News".to_string(),
            news: NewsConfig::default(),
            refresh_floor_ms: 400,
            biometric: BiometricMode::default(),
            prompt: PromptConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for NewsConfig {
    fn default() -> Self {
        let http = NewsApiSettings::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            source: LoaderSettings::default().default_source,
            connect_timeout_secs: http.connect_timeout.as_secs(),
            request_timeout_secs: http.request_timeout.as_secs(),
            max_bytes: http.max_bytes,
        }
    }
}

impl Default for PromptConfig {
    fn default() -> Self {
        let prompt = PromptInfo::default();
        Self {
            title: prompt.title,
            subtitle: prompt.subtitle,
            negative_button: prompt.negative_button,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            target: LogTarget::default(),
            file: PathBuf::from(DEFAULT_LOG_FILE),
            level: "info".to_string(),
        }
    }
}

impl ReaderConfig {
    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = match fs::read_to_string(path) {
            Ok(text) => ron::from_str::<ReaderConfig>(&text).map_err(|source| {
                ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                }
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => ReaderConfig::default(),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        config.log_level()?;
        Ok(config)
    }

    /// Replace the API key when the environment provides a non-empty one.
    pub fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|key| !key.trim().is_empty()) {
            self.news.api_key = key.trim().to_string();
        }
        self
    }

    pub fn log_level(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(self.log.level.trim())
            .map_err(|_| ConfigError::InvalidLevel(self.log.level.clone()))
    }

    pub fn log_destination(&self) -> LogDestination {
        match self.log.target {
            LogTarget::File => LogDestination::File(self.log.file.clone()),
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both(self.log.file.clone()),
        }
    }

    pub fn news_settings(&self) -> NewsApiSettings {
        NewsApiSettings {
            base_url: self.news.base_url.clone(),
            api_key: self.news.api_key.clone(),
            connect_timeout: Duration::from_secs(self.news.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.news.request_timeout_secs),
            max_bytes: self.news.max_bytes,
        }
    }

    pub fn loader_settings(&self) -> LoaderSettings {
        LoaderSettings {
            default_source: self.news.source.clone(),
            refresh_floor: Duration::from_millis(self.refresh_floor_ms),
        }
    }

    pub fn prompt_info(&self) -> PromptInfo {
        PromptInfo {
            title: self.prompt.title.clone(),
            subtitle: self.prompt.subtitle.clone(),
            negative_button: self.prompt.negative_button.clone(),
        }
    }
}
