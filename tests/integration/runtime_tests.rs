//! The real async tasks on an `edge-executor`, with shortened cadences.

use std::time::Duration;

use async_io_mini::Timer;
use edge_executor::LocalExecutor;
use futures_lite::future;

use intruder_alert::app::commands::{AlertCommand, CommandHandler};
use intruder_alert::app::service::AlertService;
use intruder_alert::config::AlertConfig;
use intruder_alert::events::{self, EVENT_QUEUE_DEPTH, EventQueue, IntrusionEvent};
use intruder_alert::sensors::{ActiveLevel, SensorPoller};
use intruder_alert::state::SharedState;
use intruder_alert::tasks;

use super::mock_hw::{MockLight, MockOutputs, MockSensor, RecordingReporter, RecordingSink};

const STEP: Duration = Duration::from_millis(10);

fn fast_config() -> AlertConfig {
    AlertConfig {
        sensor_poll_interval_ms: 10,
        relay_interval_ms: 10,
        drive_interval_ms: 10,
        buzzer_phase_ms: 20,
        ..AlertConfig::default()
    }
}

#[test]
fn timers_are_driven_on_the_host() {
    let started = std::time::Instant::now();
    future::block_on(Timer::after(STEP * 3));
    assert!(started.elapsed() >= STEP * 3);
}

#[test]
fn detection_and_reset_through_tasks() {
    let config = fast_config();
    let state = SharedState::new();
    let queue = events::new_queue();
    let reporter = RecordingReporter::new();
    let sensor = MockSensor::new();
    let outputs = MockOutputs::new();
    let sink = RecordingSink::new();
    let light = MockLight::new();

    let executor: LocalExecutor<'_, 4> = LocalExecutor::new();
    executor
        .spawn(tasks::sensor_task(
            SensorPoller::new(sensor.clone(), ActiveLevel::Low),
            &state,
            STEP,
        ))
        .detach();
    executor
        .spawn(tasks::relay_task(&state, &queue, STEP))
        .detach();
    executor
        .spawn(tasks::alert_task(
            AlertService::new(&config),
            &state,
            &queue,
            outputs.clone(),
            &reporter,
            sink.clone(),
            STEP,
        ))
        .detach();

    future::block_on(executor.run(async {
        Timer::after(STEP * 5).await;
        assert_eq!(reporter.alert_count(), 0);

        sensor.set_present(true);
        Timer::after(STEP * 10).await;
        assert!(state.snapshot().triggered);
        assert_eq!(reporter.alert_count(), 1);
        assert!(outputs.led_on());

        sensor.set_present(false);
        CommandHandler::new(&state, light.clone(), &reporter, sink.clone())
            .handle(AlertCommand::Reset(true));
        Timer::after(STEP * 5).await;
        assert!(!outputs.led_on());
        assert!(!outputs.buzzer_on());

        Timer::after(STEP * 10).await;
        assert_eq!(reporter.alert_count(), 1);
    }));
}

#[test]
fn relay_blocks_when_queue_is_full() {
    let state = SharedState::new();
    let queue: EventQueue = events::new_queue();

    let executor: LocalExecutor<'_, 2> = LocalExecutor::new();
    executor
        .spawn(tasks::relay_task(&state, &queue, Duration::from_millis(2)))
        .detach();

    future::block_on(executor.run(async {
        // Six episodes, nobody consuming.
        for _ in 0..=EVENT_QUEUE_DEPTH {
            state.try_trigger();
            Timer::after(STEP * 2).await;
            state.begin_reset();
            state.end_reset();
            Timer::after(STEP).await;
        }
        assert!(queue.is_full());
        assert_eq!(queue.len(), EVENT_QUEUE_DEPTH);

        // Freeing one slot lets the parked sixth event through.
        assert_eq!(queue.receive().await, IntrusionEvent { episode: 1 });
        Timer::after(STEP * 2).await;
        assert_eq!(queue.len(), EVENT_QUEUE_DEPTH);

        for episode in 2..=6 {
            assert_eq!(queue.receive().await, IntrusionEvent { episode });
        }
    }));
}
