//! Runtime symbols for third-party crates on ESP-IDF builds.
//!
//! Two link-time hooks live here: the `critical-section` implementation and
//! the time driver behind `async-io-mini` timers.
//!
//! `embassy-sync` guards [`SharedState`](crate::state::SharedState) and the
//! event queue with `CriticalSectionRawMutex`.  Under ESP-IDF both the alert
//! thread and the command context are pthreads, so a process-wide std mutex
//! is enough; nesting on the same thread is tracked with a depth counter.

use core::cell::{Cell, RefCell};
use core::task::Waker;
use core::time::Duration;
use std::sync::{Mutex, MutexGuard, PoisonError};

static CRITICAL_SECTION_MUTEX: Mutex<()> = Mutex::new(());

thread_local! {
    static DEPTH: Cell<u8> = const { Cell::new(0) };
    static GUARD: RefCell<Option<MutexGuard<'static, ()>>> = const { RefCell::new(None) };
}

#[unsafe(no_mangle)]
pub extern "C" fn _critical_section_1_0_acquire() -> u8 {
    DEPTH.with(|depth| {
        let d = depth.get();
        if d == 0 {
            // The guarded data is `()`, so a poisoned lock is still usable.
            let lock = CRITICAL_SECTION_MUTEX
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            GUARD.with(|guard| *guard.borrow_mut() = Some(lock));
        }
        let d = d.saturating_add(1);
        depth.set(d);
        d
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn _critical_section_1_0_release(_token: u8) {
    DEPTH.with(|depth| {
        let d = depth.get();
        if d == 0 {
            return;
        }
        depth.set(d - 1);
        if d == 1 {
            GUARD.with(|guard| *guard.borrow_mut() = None);
        }
    });
}

// ── Time driver for `async-io-mini` timers ────────────────────
//
// `async_io_mini::Timer` reads time and schedules wakes through the
// `embassy-time-driver` hooks.  Ticks are microseconds, matching the
// driver's default 1 MHz tick rate and `esp_timer_get_time`.

#[unsafe(no_mangle)]
fn _embassy_time_now() -> u64 {
    // SAFETY: `esp_timer_get_time` only reads the monotonic system timer.
    let us = unsafe { esp_idf_svc::sys::esp_timer_get_time() };
    us.max(0) as u64
}

#[unsafe(no_mangle)]
fn _embassy_time_schedule_wake(at: u64, waker: &Waker) {
    let waker = waker.clone();
    let now = _embassy_time_now();
    if at <= now {
        waker.wake();
        return;
    }
    let delay = Duration::from_micros(at - now);
    let fallback = waker.clone();
    let spawned = std::thread::Builder::new()
        .name("time-wake".into())
        .stack_size(2 * 1024)
        .spawn(move || {
            std::thread::sleep(delay);
            waker.wake();
        });
    if let Err(e) = spawned {
        // Waking early only costs the timer a re-poll.
        log::warn!("time driver: wake thread spawn failed ({}), waking now", e);
        fallback.wake();
    }
}
