//! Inbound commands.
//!
//! `Power` and `Reset` arrive from the cloud write callback or the serial
//! console, in whatever context those run.  [`CommandHandler`] applies
//! them to the [`SharedState`] and echoes the results to the reporter.

use log::{debug, info, warn};
use serde_json::Value;

use crate::error::{CommandError, ReportError};
use crate::state::SharedState;

use super::events::{AppEvent, ReportCall};
use super::ports::{EventSink, IntruderStatus, LightPort, Param, ParamValue, ReporterPort};

/// Commands the outside world can send into the alert core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertCommand {
    /// Switch the light.  Turning it off also clears `reset` and `notified`.
    Power(bool),
    /// `true` ends the current episode; `false` does nothing.
    Reset(bool),
}

impl AlertCommand {
    /// Build a command from a parameter write.
    pub fn from_param(name: &str, value: &Value) -> Result<Self, CommandError> {
        let param = Param::from_name(name).ok_or(CommandError::UnknownParam)?;
        let on = value.as_bool().ok_or(CommandError::ExpectedBool)?;
        match param {
            Param::Power => Ok(Self::Power(on)),
            Param::Reset => Ok(Self::Reset(on)),
            Param::IntruderStatus => Err(CommandError::ReadOnly),
        }
    }

    /// Parse a console line of the form `Name=<json>`, e.g. `Reset=true`.
    pub fn parse_line(line: &str) -> Result<Self, CommandError> {
        let (name, raw) = line.trim().split_once('=').ok_or(CommandError::Malformed)?;
        let value: Value = serde_json::from_str(raw.trim()).map_err(|_| CommandError::Malformed)?;
        Self::from_param(name.trim(), &value)
    }
}

/// Applies [`AlertCommand`]s.
///
/// Generic over the light, reporter and event sink so the same code runs
/// against GPIO on the board and against recorders in tests.
pub struct CommandHandler<'a, L, R, S> {
    state: &'a SharedState,
    light: L,
    reporter: R,
    sink: S,
}

impl<'a, L, R, S> CommandHandler<'a, L, R, S>
where
    L: LightPort,
    R: ReporterPort,
    S: EventSink,
{
    pub fn new(state: &'a SharedState, light: L, reporter: R, sink: S) -> Self {
        Self {
            state,
            light,
            reporter,
            sink,
        }
    }

    /// Bring the light and the reported status to their boot values.
    pub fn boot(&mut self, default_power: bool) {
        // The flag starts off, so an `off` default is not a change; drive
        // the pin anyway in that case.
        if !self.apply_power(default_power) {
            self.light.set_light(default_power);
        }
        self.report(Param::IntruderStatus, ParamValue::Status(IntruderStatus::Clear));
        info!("Command interface ready (power={})", default_power);
    }

    pub fn handle(&mut self, cmd: AlertCommand) {
        match cmd {
            AlertCommand::Power(on) => {
                self.apply_power(on);
            }
            AlertCommand::Reset(true) => self.apply_reset(),
            AlertCommand::Reset(false) => debug!("Reset=false ignored"),
        }
    }

    /// Decode and apply a named parameter write.
    pub fn dispatch_param(&mut self, name: &str, value: &Value) -> Result<(), CommandError> {
        let cmd = AlertCommand::from_param(name, value)?;
        self.handle(cmd);
        Ok(())
    }

    /// Decode and apply one console line.
    pub fn dispatch_line(&mut self, line: &str) -> Result<(), CommandError> {
        let cmd = AlertCommand::parse_line(line)?;
        self.handle(cmd);
        Ok(())
    }

    // ── Internal ──────────────────────────────────────────────

    /// Returns whether the power flag changed.
    fn apply_power(&mut self, on: bool) -> bool {
        let changed = self.state.set_power(on);
        if changed {
            self.light.set_light(on);
            self.sink.emit(&AppEvent::PowerChanged(on));
            info!("Light {}", if on { "on" } else { "off" });
        }
        // Every write is echoed, changed or not.
        self.report(Param::Power, ParamValue::Bool(on));
        changed
    }

    fn apply_reset(&mut self) {
        self.state.begin_reset();
        self.report(Param::Reset, ParamValue::Bool(false));
        self.report(Param::IntruderStatus, ParamValue::Status(IntruderStatus::Clear));
        self.state.end_reset();
        self.sink.emit(&AppEvent::ResetApplied);
        info!("Alert reset");
    }

    fn report(&mut self, param: Param, value: ParamValue) {
        if let Err(error) = self.reporter.report_param(param, value) {
            self.report_failed(param, error);
        }
    }

    fn report_failed(&mut self, param: Param, error: ReportError) {
        warn!("{} report failed: {}", param, error);
        self.sink.emit(&AppEvent::ReportFailed {
            call: ReportCall::Param(param),
            error,
        });
    }
}
