//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - The default target time the countdown starts with
//! - Tick and celebration timings
//! - Notification preferences (overlay message, sound cue)
//!
//! Configuration is stored at `~/.config/countdown/config.toml`.
//! Only the startup defaults live here; a target changed during a session
//! is not written back.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::data_dir;
use crate::countdown::{TargetTime, DEFAULT_CELEBRATION_SECS, MAX_CELEBRATION_SECS};
use crate::error::ConfigError;

/// Countdown timing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownConfig {
    #[serde(default)]
    pub target_time: TargetTime,
    /// 1..=1000; a slower tick could step over the target's final second.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// How long the completion overlay stays up, at most a day.
    #[serde(default = "default_celebration_secs")]
    pub celebration_secs: u64,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Play the sound cue on completion.
    #[serde(default = "default_true")]
    pub sound: bool,
    /// Audio clip for front-ends that can play one; terminals ring the bell.
    #[serde(default = "default_sound_url")]
    pub sound_url: String,
    #[serde(default = "default_message")]
    pub message: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/countdown/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub countdown: CountdownConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

// Default functions
fn default_tick_interval_ms() -> u64 {
    1000
}
fn default_celebration_secs() -> u64 {
    DEFAULT_CELEBRATION_SECS as u64
}
fn default_true() -> bool {
    true
}
fn default_sound_url() -> String {
    "https://www.soundjay.com/misc/sounds/bell-ringing-05.mp3".into()
}
fn default_message() -> String {
    "Time to go home!".into()
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            target_time: TargetTime::default(),
            tick_interval_ms: default_tick_interval_ms(),
            celebration_secs: default_celebration_secs(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sound: true,
            sound_url: default_sound_url(),
            message: default_message(),
        }
    }
}

const MAX_TICK_INTERVAL_MS: u64 = 1000;

impl CountdownConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.clamp(1, MAX_TICK_INTERVAL_MS))
    }

    pub fn celebration(&self) -> chrono::Duration {
        let secs = self.celebration_secs.min(MAX_CELEBRATION_SECS as u64) as i64;
        chrono::Duration::try_seconds(secs)
            .unwrap_or_else(|| chrono::Duration::seconds(DEFAULT_CELEBRATION_SECS))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_TICK_INTERVAL_MS).contains(&self.tick_interval_ms) {
            return Err(ConfigError::InvalidValue {
                key: "countdown.tick_interval_ms".into(),
                message: format!(
                    "{} is outside 1..={MAX_TICK_INTERVAL_MS}",
                    self.tick_interval_ms
                ),
            });
        }
        if self.celebration_secs > MAX_CELEBRATION_SECS as u64 {
            return Err(ConfigError::InvalidValue {
                key: "countdown.celebration_secs".into(),
                message: format!(
                    "{} is more than {MAX_CELEBRATION_SECS}",
                    self.celebration_secs
                ),
            });
        }
        Ok(())
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;
            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => serde_json::Value::Number(
                    value
                        .parse::<u64>()
                        .map_err(|e| invalid(e.to_string()))?
                        .into(),
                ),
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    return Err(invalid("cannot replace a whole section".into()))
                }
                _ => serde_json::Value::String(value.into()),
            };
            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config =
                    toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                        path: path.to_path_buf(),
                        message: e.to_string(),
                    })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. Does not save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit
    /// the field (e.g. a malformed `countdown.target_time`).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Range-check values that serde alone cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.countdown.validate()
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default config");
            Self::default()
        })
    }
}
