//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to: the latest flag snapshot, output commands, and side-effect
//! requests for the service to carry out after the handler returns.
//! Handlers themselves never call a port.

use crate::config::AlertConfig;
use crate::drivers::pulse_pattern::PulsePattern;
use crate::state::AlertFlags;

// ---------------------------------------------------------------------------
// Output commands (written by state handlers; applied by the service)
// ---------------------------------------------------------------------------

/// Desired level of every alert output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputCommands {
    /// Latched alert indicator.
    pub alert_led: bool,
    /// Current buzzer level from the pulse pattern.
    pub buzzer: bool,
}

// ---------------------------------------------------------------------------
// Side-effect requests (written by handlers; drained by the service)
// ---------------------------------------------------------------------------

/// One-tick requests.  The service takes and clears these after every
/// FSM call, so a request is carried out at most once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Requests {
    /// Send the one-shot notification if the episode has not had one.
    pub notify: bool,
    /// Report `Intruder_Status = Alerted`.
    pub report_alerted: bool,
    /// Clear the shared notified flag (alert condition ended).
    pub clear_notified: bool,
    /// An episode was opened by this event.
    pub opened_episode: Option<u32>,
    /// An event was discarded because its episode already ended.
    pub stale_episode: Option<u32>,
    /// The alert for this episode ended.
    pub closed_episode: Option<u32>,
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FsmContext {
    // -- Timing --
    /// Ticks elapsed since the current state was entered.
    pub ticks_in_state: u64,
    /// Duration of one drive tick in milliseconds.
    pub tick_period_ms: u32,

    // -- Inputs --
    /// Latest shared flags.  Refreshed before each handler call.
    pub flags: AlertFlags,

    // -- Outputs --
    pub commands: OutputCommands,
    pub requests: Requests,

    // -- Alert bookkeeping --
    /// Episode currently being alerted (0 = none).
    pub episode: u32,
    /// Buzzer pulse generator.
    pub buzzer: PulsePattern,
}

impl FsmContext {
    /// Create a new context with the given configuration.
    pub fn new(config: &AlertConfig) -> Self {
        Self {
            ticks_in_state: 0,
            tick_period_ms: config.drive_interval_ms,
            flags: AlertFlags::new(),
            commands: OutputCommands::default(),
            requests: Requests::default(),
            episode: 0,
            buzzer: PulsePattern::new(
                config.buzzer_phase_ms,
                config.buzzer_cycles,
                config.drive_interval_ms,
            ),
        }
    }

    /// Milliseconds elapsed since the current state was entered.
    pub fn ms_in_state(&self) -> u64 {
        self.ticks_in_state * u64::from(self.tick_period_ms)
    }

    /// Take and reset the pending requests.
    pub fn take_requests(&mut self) -> Requests {
        core::mem::take(&mut self.requests)
    }
}
