mod config;

pub use config::{Config, CountdownConfig, NotificationsConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/countdown[-dev]/` based on COUNTDOWN_ENV.
///
/// Set COUNTDOWN_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("COUNTDOWN_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("countdown-dev")
    } else {
        base_dir.join("countdown")
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DirUnavailable {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
