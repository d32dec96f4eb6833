//! Intruder Alert Firmware — Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  IrSensor        AlertOutputs      LightOutput    LogReporter  │
//! │  (SensorPort)    (AlertOutputPort) (LightPort)    (Reporter)   │
//! │  LogEventSink    serial console                                │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌───────────────────────────┐  ┌─────────────────────────┐    │
//! │  │ alert thread (core 1)     │  │ main thread             │    │
//! │  │ poller · relay · FSM      │  │ CommandHandler          │    │
//! │  └─────────────┬─────────────┘  └────────────┬────────────┘    │
//! │                └────────▶ SharedState ◀──────┘                 │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::io::BufRead;
use std::time::Duration;

use anyhow::Result;
use esp_idf_hal::gpio::{PinDriver, Pull};
use esp_idf_hal::ledc::config::TimerConfig;
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use log::{info, warn};

use intruder_alert::adapters::hardware::{AlertOutputs, LightOutput};
use intruder_alert::adapters::log_sink::LogEventSink;
use intruder_alert::adapters::reporter::LogReporter;
use intruder_alert::app::commands::CommandHandler;
use intruder_alert::config::AlertConfig;
use intruder_alert::drivers::buzzer::Buzzer;
use intruder_alert::drivers::indicator::Indicator;
use intruder_alert::error::Error;
use intruder_alert::events::{self, EventQueue};
use intruder_alert::pins;
use intruder_alert::sensors::ir::IrSensor;
use intruder_alert::state::SharedState;
use intruder_alert::tasks;

// ── Shared statics ────────────────────────────────────────────

static STATE: SharedState = SharedState::new();
static QUEUE: EventQueue = events::new_queue();
static REPORTER: LogReporter = LogReporter::new();

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Intruder Alert v{}                ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = AlertConfig::default();
    config.validate().map_err(Error::from)?;

    // ── 2. Peripherals ────────────────────────────────────────
    let p = Peripherals::take()?;

    let light = PinDriver::output(p.pins.gpio2)?;
    let mut ir = PinDriver::input(p.pins.gpio3)?;
    ir.set_pull(Pull::Floating)?;
    let alert_led = PinDriver::output(p.pins.gpio4)?;

    let timer = LedcTimerDriver::new(
        p.ledc.timer0,
        &TimerConfig::new()
            .frequency(Hertz(pins::BUZZER_PWM_FREQ_HZ))
            .resolution(Resolution::Bits10),
    )?;
    let buzzer_pwm = LedcDriver::new(p.ledc.channel0, timer, p.pins.gpio5)?;

    info!(
        "Pins: light={} ir={} alert_led={} buzzer={} ({} Hz, duty {}/{})",
        pins::LIGHT_GPIO,
        pins::IR_SENSOR_GPIO,
        pins::ALERT_LED_GPIO,
        pins::BUZZER_GPIO,
        pins::BUZZER_PWM_FREQ_HZ,
        pins::BUZZER_DUTY,
        pins::BUZZER_DUTY_MAX
    );

    // ── 3. Command interface + boot state ─────────────────────
    let mut commands = CommandHandler::new(
        &STATE,
        LightOutput::new(Indicator::new(light, "light")),
        &REPORTER,
        LogEventSink::new(),
    );
    commands.boot(config.default_power);

    // ── 4. Alert tasks ────────────────────────────────────────
    let outputs = AlertOutputs::new(
        Indicator::new(alert_led, "alert_led"),
        Buzzer::new(buzzer_pwm, pins::BUZZER_DUTY, pins::BUZZER_DUTY_MAX),
    );
    let _alert_thread = tasks::spawn(
        config,
        IrSensor::new(ir),
        outputs,
        &STATE,
        &QUEUE,
        &REPORTER,
        LogEventSink::new(),
    )?;

    info!("System ready. Console accepts Power=<bool> and Reset=<bool>.");

    // ── 5. Console command loop ───────────────────────────────
    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        match stdin.lock().read_line(&mut line) {
            Ok(_) if line.ends_with('\n') => {
                let cmd = line.trim();
                if !cmd.is_empty() {
                    if let Err(e) = commands.dispatch_line(cmd) {
                        warn!("console: '{}' rejected: {}", cmd, e);
                    }
                }
                line.clear();
            }
            // Partial line, EOF or WouldBlock: the UART VFS is non-blocking.
            _ => std::thread::sleep(Duration::from_millis(50)),
        }
    }
}
