//! End-to-end alert flow: sensor → shared state → relay → queue → FSM →
//! outputs + reporter, stepped synchronously.

use intruder_alert::app::commands::AlertCommand;
use intruder_alert::app::events::{AppEvent, ReportCall};
use intruder_alert::app::ports::{IntruderStatus, Param, ParamValue};
use intruder_alert::config::DEFAULT_ALERT_MESSAGE;
use intruder_alert::error::ReportError;
use intruder_alert::fsm::StateId;

use super::mock_hw::Report;
use super::rig::Rig;

// ── Scenario A: quiet sensor ──────────────────────────────────

#[test]
fn inactive_sensor_never_triggers() {
    let mut rig = Rig::new();
    rig.steps(50);

    assert!(!rig.flags().triggered);
    assert_eq!(rig.fsm_state(), StateId::Idle);
    assert_eq!(rig.reporter.alert_count(), 0);
    assert!(!rig.outputs.led_on());
    assert!(!rig.outputs.buzzer_on());
}

// ── Scenario B: detection ─────────────────────────────────────

#[test]
fn detection_alerts_once_with_outputs_on() {
    let mut rig = Rig::new();
    rig.sensor.set_present(true);
    rig.step();

    let flags = rig.flags();
    assert!(flags.triggered);
    assert!(flags.notified);
    assert_eq!(rig.fsm_state(), StateId::Alerting);
    assert!(rig.outputs.led_on());
    assert!(rig.outputs.buzzer_on(), "buzzer sounds within the first drive tick");
    assert_eq!(
        rig.reporter.log(),
        vec![
            Report::Param(Param::IntruderStatus, ParamValue::Status(IntruderStatus::Alerted)),
            Report::Alert(DEFAULT_ALERT_MESSAGE.to_owned()),
        ]
    );

    // Presence lingers; the episode is still notified only once.
    rig.steps(100);
    assert_eq!(rig.reporter.alert_count(), 1);
    assert!(rig.outputs.led_on());
}

#[test]
fn buzzer_pulses_five_times_per_burst() {
    let mut rig = Rig::new();
    rig.sensor.set_present(true);
    // 2.0 s of pulses; the 20th tick lands in the 100 ms gap.
    rig.steps(20);
    assert_eq!(rig.outputs.buzzer_rising_edges(), 5);
    assert!(!rig.outputs.buzzer_on());
    // 2.1 s: the next period starts again.
    rig.step();
    assert_eq!(rig.outputs.buzzer_rising_edges(), 6);
}

#[test]
fn presence_gone_does_not_end_alert() {
    let mut rig = Rig::new();
    rig.sensor.set_present(true);
    rig.step();
    rig.sensor.set_present(false);
    rig.steps(20);

    assert_eq!(rig.fsm_state(), StateId::Alerting);
    assert!(rig.flags().triggered);
}

// ── Scenario C: reset while alerting ──────────────────────────

#[test]
fn reset_silences_and_clears() {
    let mut rig = Rig::new();
    rig.sensor.set_present(true);
    rig.steps(3);
    rig.sensor.set_present(false);

    rig.command(AlertCommand::Reset(true));
    let flags = rig.flags();
    assert!(!flags.triggered);
    assert!(!flags.notified);
    assert!(!flags.reset);
    assert_eq!(rig.reporter.status(), Some(IntruderStatus::Clear));

    rig.step();
    assert_eq!(rig.fsm_state(), StateId::Idle);
    assert!(!rig.outputs.buzzer_on(), "buzzer off within one drive tick");
    assert!(!rig.outputs.led_on());
    assert!(rig.sink.contains(&AppEvent::AlertCleared { episode: 1 }));

    rig.steps(20);
    assert_eq!(rig.reporter.alert_count(), 1);
}

// ── Scenario D: re-trigger after reset ────────────────────────

#[test]
fn retrigger_after_reset_alerts_again() {
    let mut rig = Rig::new();
    rig.sensor.set_present(true);
    rig.steps(2);
    rig.sensor.set_present(false);
    rig.command(AlertCommand::Reset(true));
    rig.steps(2);

    rig.sensor.set_present(true);
    rig.step();

    assert_eq!(rig.reporter.alert_count(), 2);
    assert_eq!(rig.sink.alerts_for(1), 1);
    assert_eq!(rig.sink.alerts_for(2), 1);
    assert_eq!(rig.reporter.status(), Some(IntruderStatus::Alerted));
}

#[test]
fn reset_with_presence_still_there_starts_new_episode() {
    let mut rig = Rig::new();
    rig.sensor.set_present(true);
    rig.steps(2);

    // Sensor still sees someone: the next poll latches episode 2 before
    // the drive tick ever observes the cleared flag.
    rig.command(AlertCommand::Reset(true));
    rig.step();

    assert_eq!(rig.flags().episode, 2);
    assert_eq!(rig.fsm_state(), StateId::Alerting);
    assert_eq!(rig.sink.alerts_for(2), 1);
    assert_eq!(rig.reporter.alert_count(), 2);
}

// ── Power interaction ─────────────────────────────────────────

#[test]
fn power_off_during_alert_renotifies() {
    let mut rig = Rig::new();
    rig.command(AlertCommand::Power(true));
    rig.sensor.set_present(true);
    rig.step();
    assert_eq!(rig.reporter.alert_count(), 1);

    rig.command(AlertCommand::Power(false));
    let flags = rig.flags();
    assert!(flags.triggered, "power-off leaves the episode latched");
    assert!(!flags.notified);

    rig.step();
    assert_eq!(rig.fsm_state(), StateId::Alerting);
    assert_eq!(rig.reporter.alert_count(), 2);
}

// ── Reporter failures ─────────────────────────────────────────

#[test]
fn failed_alert_is_logged_not_retried() {
    let mut rig = Rig::new();
    rig.reporter.fail_alerts(true);
    rig.sensor.set_present(true);
    rig.steps(10);

    assert_eq!(rig.reporter.alert_count(), 1);
    assert!(rig.flags().notified);
    assert!(rig.sink.contains(&AppEvent::ReportFailed {
        call: ReportCall::RaiseAlert,
        error: ReportError::NotConnected,
    }));
}

// ── Sensor faults ─────────────────────────────────────────────

#[test]
fn failing_sensor_reads_as_inactive() {
    let mut rig = Rig::new();
    rig.sensor.set_present(true);
    rig.sensor.set_failing(true);
    rig.steps(10);
    assert!(!rig.flags().triggered);

    rig.sensor.set_failing(false);
    rig.step();
    assert!(rig.flags().triggered);
}
