//! Command interface: Power / Reset semantics and parameter dispatch.

use intruder_alert::app::commands::AlertCommand;
use intruder_alert::app::events::AppEvent;
use intruder_alert::app::ports::{IntruderStatus, Param, ParamValue};
use intruder_alert::error::CommandError;
use serde_json::json;

use super::rig::Rig;

#[test]
fn power_on_twice_drives_light_once() {
    let rig = Rig::new();
    rig.command(AlertCommand::Power(true));
    rig.command(AlertCommand::Power(true));

    assert_eq!(rig.light.writes(), vec![true]);
    assert!(rig.flags().power);
    // Both writes are echoed.
    assert_eq!(
        rig.reporter.params(),
        vec![
            (Param::Power, ParamValue::Bool(true)),
            (Param::Power, ParamValue::Bool(true)),
        ]
    );
    let changes = rig
        .sink
        .events()
        .into_iter()
        .filter(|e| matches!(e, AppEvent::PowerChanged(_)))
        .count();
    assert_eq!(changes, 1);
}

#[test]
fn power_off_clears_reset_and_notified_only() {
    let mut rig = Rig::new();
    rig.command(AlertCommand::Power(true));
    rig.sensor.set_present(true);
    rig.step();
    assert!(rig.flags().notified);

    rig.command(AlertCommand::Power(false));
    let flags = rig.flags();
    assert!(!flags.power);
    assert!(!flags.notified);
    assert!(!flags.reset);
    assert!(flags.triggered);
    assert!(!rig.light.is_on());
}

#[test]
fn reset_round_trip_reports_false_then_clear() {
    let rig = Rig::new();
    rig.command(AlertCommand::Reset(true));
    rig.command(AlertCommand::Reset(false));

    assert!(!rig.flags().reset);
    assert_eq!(
        rig.reporter.params(),
        vec![
            (Param::Reset, ParamValue::Bool(false)),
            (Param::IntruderStatus, ParamValue::Status(IntruderStatus::Clear)),
        ]
    );
    assert!(rig.sink.contains(&AppEvent::ResetApplied));
}

#[test]
fn reset_while_idle_still_reports_clear() {
    let mut rig = Rig::new();
    rig.steps(3);
    rig.command(AlertCommand::Reset(true));
    assert_eq!(rig.reporter.status(), Some(IntruderStatus::Clear));
}

#[test]
fn reset_false_is_a_no_op() {
    let rig = Rig::new();
    rig.command(AlertCommand::Reset(false));
    assert!(rig.reporter.log().is_empty());
    assert!(!rig.flags().reset);
}

#[test]
fn dispatch_param_applies_known_writes() {
    let rig = Rig::new();
    let mut commands = rig.commands();
    assert_eq!(commands.dispatch_param("Power", &json!(true)), Ok(()));
    assert!(rig.flags().power);

    assert_eq!(
        commands.dispatch_param("Volume", &json!(true)),
        Err(CommandError::UnknownParam)
    );
    assert_eq!(
        commands.dispatch_param("Reset", &json!("yes")),
        Err(CommandError::ExpectedBool)
    );
    assert_eq!(
        commands.dispatch_param("Intruder_Status", &json!(false)),
        Err(CommandError::ReadOnly)
    );
}

#[test]
fn dispatch_line_parses_console_input() {
    let rig = Rig::new();
    let mut commands = rig.commands();
    assert_eq!(commands.dispatch_line("Power=true\n"), Ok(()));
    assert_eq!(commands.dispatch_line("Power"), Err(CommandError::Malformed));
    assert!(rig.light.is_on());
}

#[test]
fn boot_applies_default_power_and_reports_clear() {
    let rig = Rig::new();
    rig.commands().boot(false);

    assert_eq!(rig.light.writes(), vec![false]);
    assert_eq!(
        rig.reporter.params(),
        vec![
            (Param::Power, ParamValue::Bool(false)),
            (Param::IntruderStatus, ParamValue::Status(IntruderStatus::Clear)),
        ]
    );

    let rig = Rig::new();
    rig.commands().boot(true);
    assert_eq!(rig.light.writes(), vec![true]);
    assert!(rig.flags().power);
}
