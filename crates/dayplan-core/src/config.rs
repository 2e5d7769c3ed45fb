//! TOML-based application configuration.
//!
//! Stores engine defaults:
//! - scheduler timezone, work window and minimum slot duration
//! - advisory service endpoint, model and timeout
//!
//! Configuration is stored at `~/.config/dayplan/config.toml`. The
//! advisory credential is deliberately not part of the file; it comes
//! from the `OPENAI_API_KEY` environment variable.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use chrono_tz::Tz;

use crate::advisory::AdvisoryConfig;
use crate::error::ConfigError;
use crate::schedule::SchedulerConfig;

/// Scheduler-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerSection {
    /// IANA timezone name every boundary timestamp is localized into.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_work_start")]
    pub work_start_hour: u32,
    #[serde(default = "default_work_end")]
    pub work_end_hour: u32,
    #[serde(default = "default_min_slot")]
    pub min_slot_minutes: i64,
}

impl Default for SchedulerSection {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            work_start_hour: default_work_start(),
            work_end_hour: default_work_end(),
            min_slot_minutes: default_min_slot(),
        }
    }
}

/// Advisory gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorySection {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AdvisorySection {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/dayplan/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scheduler: SchedulerSection,
    #[serde(default)]
    pub advisory: AdvisorySection,
}

impl Config {
    /// Path of the config file.
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dayplan")
            .join("config.toml")
    }

    /// Load the config file, falling back to defaults if it is missing
    /// or malformed.
    pub fn load_or_default() -> Self {
        Self::load_from(&Self::path())
    }

    /// Load from an explicit path with the same fallback behavior.
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => toml::from_str(&raw).unwrap_or_else(|err| {
                tracing::warn!(%err, path = %path.display(), "malformed config, using defaults");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Persist to the default path.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path();
        let serialized = toml::to_string_pretty(self).map_err(|err| ConfigError::SaveFailed {
            path: path.clone(),
            message: err.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| ConfigError::SaveFailed {
                path: path.clone(),
                message: err.to_string(),
            })?;
        }
        std::fs::write(&path, serialized).map_err(|err| ConfigError::SaveFailed {
            path,
            message: err.to_string(),
        })
    }

    /// Parsed timezone.
    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        self.scheduler
            .timezone
            .parse()
            .map_err(|_| ConfigError::InvalidTimezone {
                name: self.scheduler.timezone.clone(),
            })
    }

    /// Scheduler configuration derived from this file.
    pub fn scheduler_config(&self) -> Result<SchedulerConfig, ConfigError> {
        if self.scheduler.work_start_hour >= self.scheduler.work_end_hour {
            return Err(ConfigError::InvalidValue {
                key: "scheduler.work_start_hour".to_string(),
                message: "work window must start before it ends".to_string(),
            });
        }
        Ok(SchedulerConfig {
            timezone: self.timezone()?,
            min_slot_minutes: self.scheduler.min_slot_minutes,
            work_start_hour: self.scheduler.work_start_hour,
            work_end_hour: self.scheduler.work_end_hour,
        })
    }

    /// Advisory configuration derived from this file. The credential is
    /// filled in separately by [`AdvisoryClient::from_env`].
    ///
    /// [`AdvisoryClient::from_env`]: crate::advisory::AdvisoryClient::from_env
    pub fn advisory_config(&self) -> AdvisoryConfig {
        AdvisoryConfig {
            api_key: None,
            base_url: self.advisory.base_url.clone(),
            model: self.advisory.model.clone(),
            temperature: self.advisory.temperature,
            timeout_secs: self.advisory.timeout_secs,
        }
    }
}

// Default functions
fn default_timezone() -> String {
    "Asia/Shanghai".to_string()
}
fn default_work_start() -> u32 {
    9
}
fn default_work_end() -> u32 {
    22
}
fn default_min_slot() -> i64 {
    30
}
fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}
fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_temperature() -> f64 {
    0.3
}
fn default_timeout_secs() -> u64 {
    10
}
