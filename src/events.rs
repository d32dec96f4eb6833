//! Intrusion event queue.
//!
//! The event relay is the only producer; the alert state machine is the
//! only consumer.  The queue is a bounded `embassy-sync` channel, so the
//! producer awaits when it is full (backpressure, never drop) and the
//! consumer awaits when it is empty.
//!
//! ```text
//! ┌─────────────┐  IntrusionEvent  ┌──────────────┐  ┌──────────────────┐
//! │ Event relay │─────────────────▶│ EventQueue   │─▶│ Alert FSM task   │
//! │ (producer)  │  send().await    │ (depth 5)    │  │ receive().await  │
//! └─────────────┘                  └──────────────┘  └──────────────────┘
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

/// Maximum number of pending intrusion events.
pub const EVENT_QUEUE_DEPTH: usize = 5;

/// One discrete "a new episode began" notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntrusionEvent {
    /// Episode id read from the shared flags when the edge was seen.
    pub episode: u32,
}

/// Ordered, bounded relay → state machine channel.
pub type EventQueue = Channel<CriticalSectionRawMutex, IntrusionEvent, EVENT_QUEUE_DEPTH>;

/// Construct an empty queue (usable in `static` position).
pub const fn new_queue() -> EventQueue {
    Channel::new()
}
