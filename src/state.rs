//! Shared alert flags.
//!
//! The four booleans of the alert core (power, triggered, reset, notified)
//! plus the current episode id live in one [`AlertFlags`] value behind a
//! single critical-section mutex.  Every task sees a consistent snapshot,
//! and multi-flag updates (reset clearing triggered + notified) are atomic
//! with respect to every observer.
//!
//! ```text
//!  Sensor poller ──try_trigger──▶ ┌──────────────┐ ◀──snapshot── Event relay
//!                                 │ SharedState  │
//!  Commands ──set_power/reset───▶ │  AlertFlags  │ ◀──mark/clear_notified── FSM
//!                                 └──────────────┘
//! ```
//!
//! No caller writes fields directly; the accessors below are the only
//! mutation paths and each one enforces its own transition rule.

use core::cell::Cell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

/// Point-in-time copy of every shared flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertFlags {
    /// Primary output (light) energised.
    pub power: bool,
    /// Intrusion edge detected and not yet cleared.
    pub triggered: bool,
    /// A reset command is being applied right now.
    pub reset: bool,
    /// The one-shot notification has gone out for this episode.
    pub notified: bool,
    /// Id of the latest episode (0 until the first detection).
    pub episode: u32,
}

impl AlertFlags {
    /// Boot state: everything cleared, light off until the first `Power` write.
    pub const fn new() -> Self {
        Self {
            power: false,
            triggered: false,
            reset: false,
            notified: false,
            episode: 0,
        }
    }

    /// Triggered and not being reset — the alert condition proper.
    pub fn alert_condition(&self) -> bool {
        self.triggered && !self.reset
    }
}

impl Default for AlertFlags {
    fn default() -> Self {
        Self::new()
    }
}

/// Lock-protected owner of [`AlertFlags`].  `Sync`, so it can be shared by
/// reference between the executor thread and the command dispatch context.
pub struct SharedState {
    flags: Mutex<CriticalSectionRawMutex, Cell<AlertFlags>>,
}

impl SharedState {
    pub const fn new() -> Self {
        Self {
            flags: Mutex::new(Cell::new(AlertFlags::new())),
        }
    }

    /// Consistent copy of all flags.
    pub fn snapshot(&self) -> AlertFlags {
        self.flags.lock(Cell::get)
    }

    /// Sensor poller entry point: latch a new episode if none is active and
    /// no reset is in progress.  Returns the new episode id on the rising edge.
    pub fn try_trigger(&self) -> Option<u32> {
        self.update(|f| {
            if f.triggered || f.reset {
                return None;
            }
            f.triggered = true;
            f.episode = f.episode.wrapping_add(1);
            Some(f.episode)
        })
    }

    /// Test-and-set on the notified flag.
    ///
    /// Returns `true` exactly once per episode: only when the alert
    /// condition holds and no notification went out yet.  Callers must
    /// invoke the notifier only when this returns `true`.
    pub fn mark_notified(&self) -> bool {
        self.update(|f| {
            if !f.alert_condition() || f.notified {
                return false;
            }
            f.notified = true;
            true
        })
    }

    /// Clear the notified flag (alert condition ended).
    pub fn clear_notified(&self) {
        self.update(|f| f.notified = false);
    }

    /// Apply a power write.  Returns `true` if the state actually changed.
    ///
    /// Turning off clears the reset and notified flags; `triggered` is left
    /// latched so the sensor episode survives a light toggle.
    pub fn set_power(&self, on: bool) -> bool {
        self.update(|f| {
            if f.power == on {
                return false;
            }
            f.power = on;
            if !on {
                f.reset = false;
                f.notified = false;
            }
            true
        })
    }

    /// First half of a reset: raise the reset flag and end the episode
    /// (triggered + notified cleared) in one atomic step.
    pub fn begin_reset(&self) {
        self.update(|f| {
            f.reset = true;
            f.triggered = false;
            f.notified = false;
        });
    }

    /// Second half of a reset: drop the reset flag so the poller may re-arm.
    pub fn end_reset(&self) {
        self.update(|f| f.reset = false);
    }

    fn update<R>(&self, op: impl FnOnce(&mut AlertFlags) -> R) -> R {
        self.flags.lock(|cell| {
            let mut flags = cell.get();
            let out = op(&mut flags);
            cell.set(flags);
            out
        })
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}
