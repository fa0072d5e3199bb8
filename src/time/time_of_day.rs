//! Local wall-clock time of day (minute resolution).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const MINUTES_PER_DAY: u16 = 24 * 60;
pub const SECS_PER_DAY: u32 = 24 * 60 * 60;

/// `HH:MM` on a 24-hour clock. Always in range once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay { hour: 0, minute: 0 };

    pub fn new(hour: u8, minute: u8) -> Result<Self, ConfigError> {
        if hour > 23 {
            return Err(ConfigError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(ConfigError::MinuteOutOfRange(minute));
        }
        Ok(Self { hour, minute })
    }

    /// Time of day for a second offset into the day; wraps every 24h.
    pub fn from_secs_of_day(secs: u64) -> Self {
        let secs = secs % u64::from(SECS_PER_DAY);
        Self {
            hour: (secs / 3600) as u8,
            minute: ((secs % 3600) / 60) as u8,
        }
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    pub fn minutes_since_midnight(self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ConfigError::InvalidTime(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(bad)?;
        let hour: u8 = h.parse().map_err(|_| bad())?;
        let minute: u8 = m.parse().map_err(|_| bad())?;
        Self::new(hour, minute)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> String {
        t.to_string()
    }
}
