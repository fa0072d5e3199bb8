//! Operator commands
//!
//! The thin surface behind the node's console and remote admin messages.
//! Parsing text or protobufs is the front end's job; this takes typed
//! commands, validates them, and applies them.

use tracing::info;

use crate::error::ConfigError;
use crate::net::{PacketPool, Radio};
use crate::time::{Clock, TimeOfDay};
use crate::window::{Mode, TimeWindowConfig};

use super::report::{StatsReport, StatusReport};
use super::scheduler::TransmitScheduler;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Status,
    Stats,
    Enable,
    Disable,
    SetWindow { start: TimeOfDay, end: TimeOfDay },
    SetMode(Mode),
    SetQueueSize(u16),
    SetExpirySecs(u32),
    ClearQueue,
    ResetStats,
    ForceOpen { secs: u32 },
    ForceClose { secs: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Status(StatusReport),
    Stats(StatsReport),
    Done,
}

impl<R: Radio, P: PacketPool, C: Clock> TransmitScheduler<R, P, C> {
    /// Applies `cmd`. Setters write into `cfg`, which the caller persists; on
    /// `Err` neither `cfg` nor the scheduler has changed.
    pub fn execute(&mut self, cfg: &mut TimeWindowConfig, cmd: Command) -> Result<Response, ConfigError> {
        match cmd {
            Command::Status => return Ok(Response::Status(self.status(cfg))),
            Command::Stats => return Ok(Response::Stats(self.stats_report())),
            Command::Enable => cfg.set_enabled(true),
            Command::Disable => cfg.set_enabled(false),
            Command::SetWindow { start, end } => {
                cfg.set_window(start, end);
                info!(window = %cfg.window_label(), "time window set");
            }
            Command::SetMode(mode) => cfg.set_mode(mode),
            Command::SetQueueSize(size) => {
                cfg.set_queue_size(size)?;
                self.queue.set_capacity(usize::from(size));
            }
            Command::SetExpirySecs(secs) => cfg.set_expire_secs(secs)?,
            Command::ClearQueue => {
                self.clear_queue();
            }
            Command::ResetStats => self.reset(),
            Command::ForceOpen { secs } | Command::ForceClose { secs } if secs == 0 => {
                return Err(ConfigError::ZeroDuration);
            }
            Command::ForceOpen { secs } => self.force_window(true, secs),
            Command::ForceClose { secs } => self.force_window(false, secs),
        }
        Ok(Response::Done)
    }
}
