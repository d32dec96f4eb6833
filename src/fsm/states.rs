//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers — no closures, no dynamic
//! dispatch, no heap.
//!
//! ```text
//!        [relay event ∧ triggered ∧ ¬reset]
//!  IDLE ─────────────────────────────────▶ ALERTING
//!    ▲                                        │
//!    └──[tick: ¬triggered ∨ reset ∨ new id]───┘
//! ```
//!
//! Entering `Alerting` is event-driven; leaving it is observed on the
//! drive tick, so outputs go quiet within one tick of a reset.

use super::context::FsmContext;
use super::{StateDescriptor, StateId};
use crate::events::IntrusionEvent;
use log::{debug, info};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — Idle
        StateDescriptor {
            id: StateId::Idle,
            name: "Idle",
            on_enter: Some(idle_enter),
            on_exit: None,
            on_update: idle_update,
            on_event: idle_event,
        },
        // Index 1 — Alerting
        StateDescriptor {
            id: StateId::Alerting,
            name: "Alerting",
            on_enter: Some(alerting_enter),
            on_exit: Some(alerting_exit),
            on_update: alerting_update,
            on_event: alerting_event,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE state
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter(ctx: &mut FsmContext) {
    ctx.commands.alert_led = false;
    ctx.commands.buzzer = false;
    ctx.buzzer.stop();
    info!("IDLE: outputs off, waiting for intrusion events");
}

fn idle_update(_ctx: &mut FsmContext) -> Option<StateId> {
    // Idle only leaves on a relay event.
    None
}

fn idle_event(ctx: &mut FsmContext, event: IntrusionEvent) -> Option<StateId> {
    if !ctx.flags.alert_condition() {
        // Reset landed between the relay's send and this receive.
        debug!("IDLE: dropping stale event for episode {}", event.episode);
        ctx.requests.stale_episode = Some(event.episode);
        return None;
    }

    ctx.requests.opened_episode = Some(ctx.flags.episode);
    Some(StateId::Alerting)
}

// ═══════════════════════════════════════════════════════════════════════════
//  ALERTING state — indicator latched, buzzer pulsing
// ═══════════════════════════════════════════════════════════════════════════

fn alerting_enter(ctx: &mut FsmContext) {
    ctx.episode = ctx.flags.episode;
    ctx.commands.alert_led = true;
    ctx.commands.buzzer = ctx.buzzer.restart();
    ctx.requests.report_alerted = true;
    if !ctx.flags.notified {
        ctx.requests.notify = true;
    }
    info!("ALERTING: intruder detected (episode {})", ctx.episode);
}

fn alerting_update(ctx: &mut FsmContext) -> Option<StateId> {
    // A reset and re-trigger between two ticks shows up as a new episode id;
    // the old episode still has to close so the new one gets its own alert.
    if !ctx.flags.alert_condition() || ctx.flags.episode != ctx.episode {
        return Some(StateId::Idle);
    }

    // Power-off clears `notified` while the trigger stays latched; the
    // episode is then notified again.
    if !ctx.flags.notified {
        ctx.requests.notify = true;
    }

    ctx.commands.buzzer = ctx.buzzer.tick(ctx.tick_period_ms);
    None
}

fn alerting_event(ctx: &mut FsmContext, event: IntrusionEvent) -> Option<StateId> {
    // The previous episode was reset and a new one latched before the next
    // tick.  Re-enter so the new episode is alerted on its own.
    if ctx.flags.alert_condition() && ctx.flags.episode != ctx.episode {
        ctx.requests.opened_episode = Some(ctx.flags.episode);
        return Some(StateId::Alerting);
    }

    debug!(
        "ALERTING: episode {} already active, ignoring event for {}",
        ctx.episode, event.episode
    );
    None
}

fn alerting_exit(ctx: &mut FsmContext) {
    ctx.commands.alert_led = false;
    ctx.commands.buzzer = false;
    ctx.buzzer.stop();
    ctx.requests.clear_notified = true;
    ctx.requests.closed_episode = Some(ctx.episode);
    info!(
        "ALERTING: episode {} cleared after {} ms",
        ctx.episode,
        ctx.ms_in_state()
    );
}
