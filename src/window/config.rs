//! Window configuration snapshot
//!
//! Owned and persisted by the node's configuration layer; the scheduler only
//! ever reads a validated copy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::time::TimeOfDay;

pub const MAX_QUEUE_SIZE: u16 = 100;
pub const DEFAULT_QUEUE_SIZE: u16 = 32;
pub const DEFAULT_EXPIRE_SECS: u32 = 3600;

/// What happens to outbound packets while the window is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    DropPackets,
    QueuePackets,
    /// Transmit is suppressed; reception is not affected.
    #[default]
    ReceiveOnly,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mode::DropPackets => "drop",
            Mode::QueuePackets => "queue",
            Mode::ReceiveOnly => "receive",
        };
        f.write_str(s)
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "drop" | "drop_packets" => Ok(Mode::DropPackets),
            "queue" | "queue_packets" => Ok(Mode::QueuePackets),
            "receive" | "receive_only" => Ok(Mode::ReceiveOnly),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

/// Daily transmit window. `[start, end)` in local minutes since midnight;
/// `start > end` wraps past midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeWindowConfig {
    pub enabled: bool,
    pub start_hour: u8,
    pub start_minute: u8,
    pub end_hour: u8,
    pub end_minute: u8,
    pub mode: Mode,
    pub max_queue_size: u16,
    pub packet_expire_secs: u32,
}

impl Default for TimeWindowConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            start_hour: 21,
            start_minute: 0,
            end_hour: 23,
            end_minute: 0,
            mode: Mode::ReceiveOnly,
            max_queue_size: DEFAULT_QUEUE_SIZE,
            packet_expire_secs: DEFAULT_EXPIRE_SECS,
        }
    }
}

impl TimeWindowConfig {
    /// Enabled window `start..end` with the given mode and default queue limits.
    pub fn window(start: TimeOfDay, end: TimeOfDay, mode: Mode) -> Self {
        let mut cfg = Self {
            enabled: true,
            mode,
            ..Self::default()
        };
        cfg.set_window(start, end);
        cfg
    }

    /// Parses a JSON snapshot, filling unset queue limits with defaults, and
    /// rejects it unless every field is in range.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let mut cfg: Self = serde_json::from_str(raw)?;
        if cfg.max_queue_size == 0 {
            cfg.max_queue_size = DEFAULT_QUEUE_SIZE;
        }
        if cfg.packet_expire_secs == 0 {
            cfg.packet_expire_secs = DEFAULT_EXPIRE_SECS;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        TimeOfDay::new(self.start_hour, self.start_minute)?;
        TimeOfDay::new(self.end_hour, self.end_minute)?;
        if self.max_queue_size == 0 || self.max_queue_size > MAX_QUEUE_SIZE {
            return Err(ConfigError::QueueSizeOutOfRange(self.max_queue_size));
        }
        if self.packet_expire_secs == 0 {
            return Err(ConfigError::ZeroExpiry);
        }
        Ok(())
    }

    pub fn start_minutes(&self) -> u16 {
        u16::from(self.start_hour) * 60 + u16::from(self.start_minute)
    }

    pub fn end_minutes(&self) -> u16 {
        u16::from(self.end_hour) * 60 + u16::from(self.end_minute)
    }

    pub fn wraps_midnight(&self) -> bool {
        self.start_minutes() > self.end_minutes()
    }

    pub fn expire_millis(&self) -> u64 {
        u64::from(self.packet_expire_secs) * 1_000
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_window(&mut self, start: TimeOfDay, end: TimeOfDay) {
        self.start_hour = start.hour();
        self.start_minute = start.minute();
        self.end_hour = end.hour();
        self.end_minute = end.minute();
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn set_queue_size(&mut self, size: u16) -> Result<(), ConfigError> {
        if size == 0 || size > MAX_QUEUE_SIZE {
            return Err(ConfigError::QueueSizeOutOfRange(size));
        }
        self.max_queue_size = size;
        Ok(())
    }

    pub fn set_expire_secs(&mut self, secs: u32) -> Result<(), ConfigError> {
        if secs == 0 {
            return Err(ConfigError::ZeroExpiry);
        }
        self.packet_expire_secs = secs;
        Ok(())
    }

    /// `HH:MM-HH:MM` for status output.
    pub fn window_label(&self) -> String {
        format!(
            "{:02}:{:02}-{:02}:{:02}",
            self.start_hour, self.start_minute, self.end_hour, self.end_minute
        )
    }
}
