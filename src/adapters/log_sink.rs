//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC on the board).

use log::{info, warn};

use crate::app::events::{AppEvent, ReportCall};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::IntrusionDetected { episode } => {
                info!("INTRUSION | episode={}", episode);
            }
            AppEvent::StaleEventDropped { episode } => {
                info!("INTRUSION | stale episode={} dropped", episode);
            }
            AppEvent::AlertRaised { episode } => {
                info!("ALERT | raised episode={}", episode);
            }
            AppEvent::AlertCleared { episode } => {
                info!("ALERT | cleared episode={}", episode);
            }
            AppEvent::PowerChanged(on) => {
                info!("POWER | {}", if *on { "on" } else { "off" });
            }
            AppEvent::ResetApplied => {
                info!("RESET | applied");
            }
            AppEvent::ReportFailed { call, error } => match call {
                ReportCall::RaiseAlert => warn!("REPORT | raise_alert failed: {}", error),
                ReportCall::Param(p) => warn!("REPORT | {} failed: {}", p, error),
            },
        }
    }
}
