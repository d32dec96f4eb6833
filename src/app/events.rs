//! Outbound application events.
//!
//! The [`AlertService`](super::service::AlertService) and the
//! [`CommandHandler`](super::commands::CommandHandler) emit these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::error::ReportError;
use crate::fsm::StateId;

use super::ports::Param;

/// Structured events emitted by the alert core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The alert service has started (carries initial state).
    Started(StateId),

    /// The FSM transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// A relay event opened a new alert episode.
    IntrusionDetected { episode: u32 },

    /// A relay event arrived after its episode was already cleared.
    StaleEventDropped { episode: u32 },

    /// The one-shot notification was handed to the reporter.
    AlertRaised { episode: u32 },

    /// The alert condition ended (reset observed).
    AlertCleared { episode: u32 },

    /// The light changed state.
    PowerChanged(bool),

    /// A reset command ended the episode.
    ResetApplied,

    /// A reporter call failed; not retried.
    ReportFailed { call: ReportCall, error: ReportError },
}

/// Which reporter call a [`AppEvent::ReportFailed`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportCall {
    RaiseAlert,
    Param(Param),
}
