use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A daily wall-clock time of day (`HH:MM`) the countdown runs towards.
///
/// Serialized as its `HH:MM` string so config files and JSON output stay
/// human readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TargetTime {
    hour: u8,
    minute: u8,
}

impl TargetTime {
    /// Build a target from its components.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTimeOfDay` if `hour > 23` or `minute > 59`.
    pub fn new(hour: u8, minute: u8) -> Result<Self, ValidationError> {
        if hour > 23 || minute > 59 {
            return Err(ValidationError::InvalidTimeOfDay {
                input: format!("{hour}:{minute}"),
            });
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// The target as a chrono time with zero seconds.
    pub fn as_naive_time(&self) -> NaiveTime {
        // Components are range-checked on construction.
        NaiveTime::from_hms_opt(self.hour as u32, self.minute as u32, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl Default for TargetTime {
    /// 18:00, the end of a regular working day.
    fn default() -> Self {
        Self {
            hour: 18,
            minute: 0,
        }
    }
}

impl fmt::Display for TargetTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TargetTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let time = NaiveTime::parse_from_str(trimmed, "%H:%M").map_err(|_| {
            ValidationError::InvalidTimeOfDay {
                input: trimmed.to_string(),
            }
        })?;
        Ok(Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        })
    }
}

impl TryFrom<String> for TargetTime {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TargetTime> for String {
    fn from(value: TargetTime) -> Self {
        value.to_string()
    }
}
