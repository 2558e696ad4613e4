pub mod config;
pub mod remaining;
pub mod run;

use countdown_core::error::Result;
use countdown_core::{Config, TargetTime};

/// The target from `--target`, or the configured default.
pub(crate) fn resolve_target(flag: Option<&str>, config: &Config) -> Result<TargetTime> {
    match flag {
        Some(raw) => Ok(raw.parse()?),
        None => Ok(config.countdown.target_time),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use countdown_core::CoreError;

    #[test]
    fn flag_overrides_config() {
        let config = Config::default();
        assert_eq!(resolve_target(Some("07:15"), &config).unwrap().to_string(), "07:15");
        assert_eq!(resolve_target(None, &config).unwrap().to_string(), "18:00");
        assert!(matches!(
            resolve_target(Some("7"), &config),
            Err(CoreError::Validation(_))
        ));
    }
}
