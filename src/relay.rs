//! Debounce / event relay.
//!
//! Samples the shared flags at its own cadence and converts the level
//! `triggered` into a single edge event per episode.  Sending happens in
//! the task (`tasks::relay_task`); this type only decides *whether* to send.

use crate::events::IntrusionEvent;
use crate::state::AlertFlags;

/// Edge detector over the `triggered` flag.
#[derive(Debug, Default)]
pub struct EventRelay {
    prev_active: bool,
    /// Episode of the last emitted event (0 = none yet).
    last_episode: u32,
}

impl EventRelay {
    pub const fn new() -> Self {
        Self {
            prev_active: false,
            last_episode: 0,
        }
    }

    /// Inspect one snapshot.  Returns the event to enqueue, if any.
    pub fn check(&mut self, flags: AlertFlags) -> Option<IntrusionEvent> {
        if !flags.triggered {
            self.prev_active = false;
            return None;
        }

        // A reset and re-trigger between two samples leaves `triggered`
        // high but moves the episode id on.
        if self.prev_active && flags.episode == self.last_episode {
            return None;
        }

        self.prev_active = true;
        self.last_episode = flags.episode;
        Some(IntrusionEvent {
            episode: flags.episode,
        })
    }
}
