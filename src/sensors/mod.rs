//! Sensor subsystem: the IR input driver and the [`SensorPoller`] that
//! turns its samples into episode latches on the shared state.
//!
//! The poller only ever *sets* the trigger.  Clearing is the reset
//! command's job, so a person walking out of view does not end an alert.

pub mod ir;

use log::{info, warn};

use crate::app::ports::SensorPort;
use crate::state::SharedState;

/// Which electrical level means "intrusion".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveLevel {
    Low,
    High,
}

impl ActiveLevel {
    pub fn from_active_low(active_low: bool) -> Self {
        if active_low { Self::Low } else { Self::High }
    }

    /// Map a raw level (`true` = HIGH) to "active".
    pub fn is_active(self, level_high: bool) -> bool {
        match self {
            Self::Low => !level_high,
            Self::High => level_high,
        }
    }
}

/// Samples a [`SensorPort`] and latches new episodes.
pub struct SensorPoller<S> {
    sensor: S,
    active_level: ActiveLevel,
    /// Consecutive failed reads.
    error_streak: u32,
    /// Total failed reads since boot.
    read_errors: u32,
}

impl<S: SensorPort> SensorPoller<S> {
    pub fn new(sensor: S, active_level: ActiveLevel) -> Self {
        Self {
            sensor,
            active_level,
            error_streak: 0,
            read_errors: 0,
        }
    }

    /// Take one sample.  Returns the new episode id when this sample
    /// latched the trigger.
    ///
    /// A failed read counts as inactive; polling carries on.
    pub fn poll(&mut self, state: &SharedState) -> Option<u32> {
        if !self.sample_active() {
            return None;
        }
        let episode = state.try_trigger()?;
        info!("Intrusion detected (episode {})", episode);
        Some(episode)
    }

    pub fn read_errors(&self) -> u32 {
        self.read_errors
    }

    fn sample_active(&mut self) -> bool {
        match self.sensor.read_level() {
            Ok(level) => {
                if self.error_streak > 0 {
                    info!("IR sensor recovered after {} failed reads", self.error_streak);
                    self.error_streak = 0;
                }
                self.active_level.is_active(level)
            }
            Err(e) => {
                if self.error_streak == 0 {
                    warn!("IR sensor read failed: {} (treating as inactive)", e);
                }
                self.error_streak = self.error_streak.saturating_add(1);
                self.read_errors = self.read_errors.saturating_add(1);
                false
            }
        }
    }
}
