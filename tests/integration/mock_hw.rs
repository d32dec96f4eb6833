//! Mock adapters for integration tests.
//!
//! Every mock is a cheap clonable handle over shared interior state, so a
//! test can move one copy into the code under test (or into an executor
//! task) and keep another to assert on.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use intruder_alert::app::events::AppEvent;
use intruder_alert::app::ports::{
    AlertOutputPort, EventSink, IntruderStatus, LightPort, Param, ParamValue, ReporterPort,
    SensorPort,
};
use intruder_alert::error::{ReportError, SensorError};

// ── IR sensor ─────────────────────────────────────────────────

/// Presence line of an active-low IR module.
#[derive(Clone, Default)]
pub struct MockSensor {
    present: Rc<Cell<bool>>,
    failing: Rc<Cell<bool>>,
}

#[allow(dead_code)]
impl MockSensor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_present(&self, present: bool) {
        self.present.set(present);
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }
}

impl SensorPort for MockSensor {
    fn read_level(&mut self) -> Result<bool, SensorError> {
        if self.failing.get() {
            return Err(SensorError::GpioReadFailed);
        }
        // Active low: presence pulls the line down.
        Ok(!self.present.get())
    }
}

// ── Alert outputs ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputCall {
    AlertLed(bool),
    Buzzer(bool),
}

#[derive(Clone, Default)]
pub struct MockOutputs {
    calls: Rc<RefCell<Vec<OutputCall>>>,
}

#[allow(dead_code)]
impl MockOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<OutputCall> {
        self.calls.borrow().clone()
    }

    pub fn led_on(&self) -> bool {
        self.calls
            .borrow()
            .iter()
            .rev()
            .find_map(|c| match c {
                OutputCall::AlertLed(on) => Some(*on),
                OutputCall::Buzzer(_) => None,
            })
            .unwrap_or(false)
    }

    pub fn buzzer_on(&self) -> bool {
        self.calls
            .borrow()
            .iter()
            .rev()
            .find_map(|c| match c {
                OutputCall::Buzzer(on) => Some(*on),
                OutputCall::AlertLed(_) => None,
            })
            .unwrap_or(false)
    }

    /// Off → on transitions of the buzzer, counting the first `on`.
    pub fn buzzer_rising_edges(&self) -> usize {
        let mut prev = false;
        let mut edges = 0;
        for call in self.calls.borrow().iter() {
            if let OutputCall::Buzzer(on) = *call {
                if on && !prev {
                    edges += 1;
                }
                prev = on;
            }
        }
        edges
    }
}

impl AlertOutputPort for MockOutputs {
    fn set_alert_led(&mut self, on: bool) {
        self.calls.borrow_mut().push(OutputCall::AlertLed(on));
    }

    fn set_buzzer(&mut self, on: bool) {
        self.calls.borrow_mut().push(OutputCall::Buzzer(on));
    }
}

// ── Light ─────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockLight {
    writes: Rc<RefCell<Vec<bool>>>,
}

#[allow(dead_code)]
impl MockLight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> Vec<bool> {
        self.writes.borrow().clone()
    }

    pub fn is_on(&self) -> bool {
        self.writes.borrow().last().copied().unwrap_or(false)
    }
}

impl LightPort for MockLight {
    fn set_light(&mut self, on: bool) {
        self.writes.borrow_mut().push(on);
    }
}

// ── Reporter ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Alert(String),
    Param(Param, ParamValue),
}

#[derive(Default)]
pub struct RecordingReporter {
    log: RefCell<Vec<Report>>,
    fail_alerts: Cell<bool>,
}

#[allow(dead_code)]
impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_alerts(&self, fail: bool) {
        self.fail_alerts.set(fail);
    }

    pub fn log(&self) -> Vec<Report> {
        self.log.borrow().clone()
    }

    pub fn alert_count(&self) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|r| matches!(r, Report::Alert(_)))
            .count()
    }

    pub fn params(&self) -> Vec<(Param, ParamValue)> {
        self.log
            .borrow()
            .iter()
            .filter_map(|r| match r {
                Report::Param(p, v) => Some((*p, *v)),
                Report::Alert(_) => None,
            })
            .collect()
    }

    /// Last reported `Intruder_Status`, if any.
    pub fn status(&self) -> Option<IntruderStatus> {
        self.params().into_iter().rev().find_map(|(p, v)| match (p, v) {
            (Param::IntruderStatus, ParamValue::Status(s)) => Some(s),
            _ => None,
        })
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

impl ReporterPort for RecordingReporter {
    fn raise_alert(&self, message: &str) -> Result<(), ReportError> {
        self.log.borrow_mut().push(Report::Alert(message.to_owned()));
        if self.fail_alerts.get() {
            return Err(ReportError::NotConnected);
        }
        Ok(())
    }

    fn report_param(&self, param: Param, value: ParamValue) -> Result<(), ReportError> {
        self.log.borrow_mut().push(Report::Param(param, value));
        Ok(())
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct RecordingSink {
    events: Rc<RefCell<Vec<AppEvent>>>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AppEvent> {
        self.events.borrow().clone()
    }

    pub fn contains(&self, event: &AppEvent) -> bool {
        self.events.borrow().contains(event)
    }

    pub fn alerts_for(&self, episode: u32) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| **e == AppEvent::AlertRaised { episode })
            .count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.borrow_mut().push(*event);
    }
}
