//! Buzzer pulse pattern engine.
//!
//! Generates the on/off level for the buzzer while an alert is active.
//! The alert state machine calls `tick()` once per drive interval and
//! feeds the returned level into the buzzer output.
//!
//! ## Shape
//!
//! ```text
//!  ┌──┐  ┌──┐  ┌──┐  ┌──┐  ┌──┐        ┌──┐
//!  │  │  │  │  │  │  │  │  │  │        │  │
//! ─┘  └──┘  └──┘  └──┘  └──┘  └──gap───┘  └── …
//!  phase_ms each, `cycles` times, then one `gap_ms` of silence
//! ```
//!
//! With the defaults (5 cycles, 200 ms phases, 100 ms gap) one period is
//! 2.1 s.

/// Pulse pattern state.  Stack-allocated, no heap.
#[derive(Debug, Clone)]
pub struct PulsePattern {
    phase_ms: u32,
    cycles: u8,
    gap_ms: u32,
    elapsed_ms: u32,
    running: bool,
}

impl PulsePattern {
    pub fn new(phase_ms: u32, cycles: u8, gap_ms: u32) -> Self {
        Self {
            phase_ms: phase_ms.max(1),
            cycles: cycles.max(1),
            gap_ms,
            elapsed_ms: 0,
            running: false,
        }
    }

    /// Start from the first on-phase.  Returns the level to apply now.
    pub fn restart(&mut self) -> bool {
        self.elapsed_ms = 0;
        self.running = true;
        self.level()
    }

    /// Silence the pattern until the next `restart()`.
    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed_ms = 0;
    }

    /// Advance by `delta_ms` and return the buzzer level.
    pub fn tick(&mut self, delta_ms: u32) -> bool {
        if !self.running {
            return false;
        }
        let elapsed = (u64::from(self.elapsed_ms) + u64::from(delta_ms)) % u64::from(self.period_ms());
        self.elapsed_ms = elapsed as u32;
        self.level()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Audible part of one period, saturating at `u32::MAX`.
    pub fn burst_ms(&self) -> u32 {
        burst_len_ms(self.phase_ms, self.cycles).unwrap_or(u32::MAX)
    }

    /// Full repeat period including the silent gap, saturating at `u32::MAX`.
    pub fn period_ms(&self) -> u32 {
        self.burst_ms().saturating_add(self.gap_ms)
    }

    fn level(&self) -> bool {
        if !self.running || self.elapsed_ms >= self.burst_ms() {
            return false;
        }
        (self.elapsed_ms / self.phase_ms) % 2 == 0
    }
}

/// `cycles × 2 × phase_ms`, or `None` if it does not fit in a `u32`.
pub fn burst_len_ms(phase_ms: u32, cycles: u8) -> Option<u32> {
    u32::from(cycles).checked_mul(2)?.checked_mul(phase_ms)
}
