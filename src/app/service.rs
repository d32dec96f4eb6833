//! Alert service — the hexagonal core.
//!
//! [`AlertService`] owns the FSM and its context.  It is driven from two
//! directions, relay events and the drive tick, and turns the handlers'
//! commands and requests into port calls.  All I/O flows through port
//! traits injected at call sites, so the whole service runs against mock
//! adapters on the host.
//!
//! ```text
//!  IntrusionEvent ──▶ ┌────────────────────────┐ ──▶ AlertOutputPort
//!                     │      AlertService      │ ──▶ ReporterPort
//!  drive tick ──────▶ │  FSM · notify latch    │ ──▶ EventSink
//!                     └────────────────────────┘
//!                                 ▲
//!                           SharedState
//! ```

use log::{info, warn};

use crate::config::{ALERT_MESSAGE_CAP, AlertConfig};
use crate::events::IntrusionEvent;
use crate::fsm::context::{FsmContext, Requests};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::state::SharedState;

use super::events::{AppEvent, ReportCall};
use super::ports::{AlertOutputPort, EventSink, IntruderStatus, Param, ParamValue, ReporterPort};

// ───────────────────────────────────────────────────────────────
// AlertService
// ───────────────────────────────────────────────────────────────

/// The alert state machine plus the glue that applies its decisions.
pub struct AlertService {
    fsm: Fsm,
    ctx: FsmContext,
    message: heapless::String<ALERT_MESSAGE_CAP>,
}

impl AlertService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM — call [`start`](Self::start) next.
    pub fn new(config: &AlertConfig) -> Self {
        Self {
            fsm: Fsm::new(build_state_table(), StateId::Idle),
            ctx: FsmContext::new(config),
            message: config.alert_message.clone(),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Enter the initial state and drive every output to its idle level.
    pub fn start(&mut self, outputs: &mut impl AlertOutputPort, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        self.apply_outputs(outputs);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("AlertService started in {:?}", self.fsm.current_state());
    }

    // ── Inputs ────────────────────────────────────────────────

    /// Consume one relay event.
    pub fn handle_event(
        &mut self,
        event: IntrusionEvent,
        state: &SharedState,
        outputs: &mut impl AlertOutputPort,
        reporter: &impl ReporterPort,
        sink: &mut impl EventSink,
    ) {
        let prev = self.fsm.current_state();
        self.ctx.flags = state.snapshot();
        self.fsm.handle_event(event, &mut self.ctx);
        self.finish(prev, state, outputs, reporter, sink);
    }

    /// Run one drive tick: observe the shared flags and advance the buzzer.
    pub fn tick(
        &mut self,
        state: &SharedState,
        outputs: &mut impl AlertOutputPort,
        reporter: &impl ReporterPort,
        sink: &mut impl EventSink,
    ) {
        let prev = self.fsm.current_state();
        self.ctx.flags = state.snapshot();
        self.fsm.tick(&mut self.ctx);
        self.finish(prev, state, outputs, reporter, sink);
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    // ── Internal ──────────────────────────────────────────────

    fn finish(
        &mut self,
        prev: StateId,
        state: &SharedState,
        outputs: &mut impl AlertOutputPort,
        reporter: &impl ReporterPort,
        sink: &mut impl EventSink,
    ) {
        self.apply_outputs(outputs);

        let requests = self.ctx.take_requests();
        self.apply_requests(requests, state, reporter, sink);

        let now = self.fsm.current_state();
        if now != prev {
            sink.emit(&AppEvent::StateChanged { from: prev, to: now });
        }
    }

    fn apply_outputs(&self, outputs: &mut impl AlertOutputPort) {
        let cmds = self.ctx.commands;
        outputs.set_alert_led(cmds.alert_led);
        outputs.set_buzzer(cmds.buzzer);
    }

    /// Carry out handler requests.  Order matters: a closing episode clears
    /// `notified` before a re-entered one tests and sets it.
    fn apply_requests(
        &self,
        requests: Requests,
        state: &SharedState,
        reporter: &impl ReporterPort,
        sink: &mut impl EventSink,
    ) {
        if let Some(episode) = requests.stale_episode {
            sink.emit(&AppEvent::StaleEventDropped { episode });
        }

        if requests.clear_notified {
            state.clear_notified();
        }
        if let Some(episode) = requests.closed_episode {
            sink.emit(&AppEvent::AlertCleared { episode });
        }

        if let Some(episode) = requests.opened_episode {
            sink.emit(&AppEvent::IntrusionDetected { episode });
        }

        if requests.report_alerted {
            let value = ParamValue::Status(IntruderStatus::Alerted);
            if let Err(error) = reporter.report_param(Param::IntruderStatus, value) {
                warn!("Intruder_Status report failed: {}", error);
                sink.emit(&AppEvent::ReportFailed {
                    call: ReportCall::Param(Param::IntruderStatus),
                    error,
                });
            }
        }

        // Test-and-set before the call: a failed send is not retried.
        if requests.notify && state.mark_notified() {
            let episode = self.ctx.episode;
            match reporter.raise_alert(&self.message) {
                Ok(()) => {
                    info!("Alert raised for episode {}", episode);
                    sink.emit(&AppEvent::AlertRaised { episode });
                }
                Err(error) => {
                    warn!("raise_alert failed for episode {}: {}", episode, error);
                    sink.emit(&AppEvent::ReportFailed {
                        call: ReportCall::RaiseAlert,
                        error,
                    });
                }
            }
        }
    }
}
