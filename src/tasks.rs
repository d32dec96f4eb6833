//! Async task layer — sensor poller, event relay and alert state machine
//! on one cooperative executor.
//!
//! Runs in a dedicated thread using `edge-executor` for scheduling and
//! `async-io-mini` timers for the fixed cadences.
//!
//! ```text
//!  ┌──────────────────────────────────────────────────────────────────┐
//!  │  Alert thread (core 1)                                           │
//!  │  ┌────────────────────────────────────────────────────────────┐  │
//!  │  │  futures_lite::future::block_on                            │  │
//!  │  │  ┌──────────────────────────────────────────────────────┐  │  │
//!  │  │  │  edge_executor::LocalExecutor                        │  │  │
//!  │  │  │                                                      │  │  │
//!  │  │  │  ┌──────────┐    ┌──────────┐    ┌────────────────┐  │  │  │
//!  │  │  │  │ Sensor   │    │ Relay    │───▶│ Alert FSM      │  │  │  │
//!  │  │  │  │ 100ms ⏱  │    │ 100ms ⏱  │ q5 │ event ∨ 100ms ⏱│  │  │  │
//!  │  │  │  └────┬─────┘    └────▲─────┘    └───────┬────────┘  │  │  │
//!  │  │  │       └──────▶ SharedState ◀─────────────┘           │  │  │
//!  │  │  └──────────────────────────────────────────────────────┘  │  │
//!  │  └────────────────────────────────────────────────────────────┘  │
//!  └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The command interface is not a task here; it runs in whatever context
//! delivers `Power` / `Reset` writes and only touches [`SharedState`].

use std::io;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use async_io_mini::Timer;
use log::info;

use crate::app::ports::{AlertOutputPort, EventSink, ReporterPort, SensorPort};
use crate::app::service::AlertService;
use crate::config::AlertConfig;
use crate::drivers::task_pin::{self, Core, TaskSpec};
use crate::events::{EventQueue, IntrusionEvent};
use crate::relay::EventRelay;
use crate::sensors::{ActiveLevel, SensorPoller};
use crate::state::SharedState;

/// Thread that hosts the executor.
pub const ALERT_THREAD: TaskSpec = TaskSpec {
    core: Core::App,
    priority: 5,
    stack_kb: 8,
    name: "alert\0",
};

fn millis(ms: u32) -> Duration {
    Duration::from_millis(u64::from(ms))
}

// ── Tasks ────────────────────────────────────────────────────

/// Sample the IR input every `interval` and latch new episodes.
pub async fn sensor_task<S: SensorPort>(
    mut poller: SensorPoller<S>,
    state: &SharedState,
    interval: Duration,
) {
    loop {
        poller.poll(state);
        Timer::after(interval).await;
    }
}

/// Turn `triggered` edges into queue events.  A full queue parks this
/// task in `send().await` until the state machine catches up.
pub async fn relay_task(state: &SharedState, queue: &EventQueue, interval: Duration) {
    let mut relay = EventRelay::new();
    loop {
        if let Some(event) = relay.check(state.snapshot()) {
            queue.send(event).await;
        }
        Timer::after(interval).await;
    }
}

enum Wake {
    Event(IntrusionEvent),
    Tick,
}

/// Drive the alert state machine from queue events and a fixed tick.
///
/// Events win over an equally-ready tick; the tick deadline is kept
/// across events so a busy queue cannot starve the buzzer cadence.
pub async fn alert_task<O, R, E>(
    mut service: AlertService,
    state: &SharedState,
    queue: &EventQueue,
    mut outputs: O,
    reporter: &R,
    mut sink: E,
    tick: Duration,
) where
    O: AlertOutputPort,
    R: ReporterPort + ?Sized,
    E: EventSink,
{
    service.start(&mut outputs, &mut sink);
    let mut next_tick = Instant::now() + tick;

    loop {
        let wait = next_tick.saturating_duration_since(Instant::now());
        let wake = futures_lite::future::or(async { Wake::Event(queue.receive().await) }, async {
            Timer::after(wait).await;
            Wake::Tick
        })
        .await;

        match wake {
            Wake::Event(event) => {
                service.handle_event(event, state, &mut outputs, &reporter, &mut sink);
            }
            Wake::Tick => {
                service.tick(state, &mut outputs, &reporter, &mut sink);
                next_tick += tick;
                let now = Instant::now();
                if next_tick < now {
                    // Fell behind (debugger halt, long log flush); do not burst.
                    next_tick = now + tick;
                }
            }
        }
    }
}

// ── Entry points ─────────────────────────────────────────────

/// Run all three tasks on the current thread.  Never returns.
pub fn run<S, O, R, E>(
    config: &AlertConfig,
    sensor: S,
    outputs: O,
    state: &SharedState,
    queue: &EventQueue,
    reporter: &R,
    sink: E,
) where
    S: SensorPort,
    O: AlertOutputPort,
    R: ReporterPort + ?Sized,
    E: EventSink,
{
    let executor: edge_executor::LocalExecutor<'_, 4> = edge_executor::LocalExecutor::new();

    let poller = SensorPoller::new(sensor, ActiveLevel::from_active_low(config.sensor_active_low));
    executor
        .spawn(sensor_task(poller, state, millis(config.sensor_poll_interval_ms)))
        .detach();
    executor
        .spawn(relay_task(state, queue, millis(config.relay_interval_ms)))
        .detach();
    executor
        .spawn(alert_task(
            AlertService::new(config),
            state,
            queue,
            outputs,
            reporter,
            sink,
            millis(config.drive_interval_ms),
        ))
        .detach();

    info!(
        "Alert tasks started (poll={}ms relay={}ms drive={}ms)",
        config.sensor_poll_interval_ms, config.relay_interval_ms, config.drive_interval_ms
    );

    futures_lite::future::block_on(executor.run(core::future::pending::<()>()));
}

/// Spawn [`run`] on the pinned alert thread.
pub fn spawn<S, O, R, E>(
    config: AlertConfig,
    sensor: S,
    outputs: O,
    state: &'static SharedState,
    queue: &'static EventQueue,
    reporter: &'static R,
    sink: E,
) -> io::Result<JoinHandle<()>>
where
    S: SensorPort + Send + 'static,
    O: AlertOutputPort + Send + 'static,
    R: ReporterPort + Sync + ?Sized,
    E: EventSink + Send + 'static,
{
    task_pin::spawn_on_core(ALERT_THREAD, move || {
        run(&config, sensor, outputs, state, queue, reporter, sink);
    })
}
