//! Time sources and the fixed-cadence tick schedule
//!
//! The engine never reads wall-clock time itself. Hosts hand it a `Clock`;
//! tests use `ManualClock` to step time exactly.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic millisecond time source
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Real time, measured from construction
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis().min(u64::MAX as u128) as u64
    }
}

/// Manually stepped clock; clones share the same reading
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn advance(&self, delta_ms: u64) {
        self.now.set(self.now.get().saturating_add(delta_ms));
    }

    /// Jump to `now_ms`; readings never go backwards
    pub fn set(&self, now_ms: u64) {
        self.now.set(self.now.get().max(now_ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Fixed-cadence tick schedule
///
/// Dropping the schedule is how a session cancels its timer.
#[derive(Debug, Clone)]
pub struct TickSchedule {
    interval_ms: u64,
    next_due_ms: u64,
    max_catchup: u32,
}

impl TickSchedule {
    /// First tick is due immediately at `start_ms`
    pub fn new(start_ms: u64, interval_ms: u64, max_catchup: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            next_due_ms: start_ms,
            max_catchup: max_catchup.max(1),
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn next_due_ms(&self) -> u64 {
        self.next_due_ms
    }

    /// Tick instants due by `now_ms`, in order
    ///
    /// If more than `max_catchup` ticks are owed, the backlog is dropped and
    /// a single tick at `now_ms` is returned, with the cadence re-synced
    /// from there.
    pub fn due(&mut self, now_ms: u64) -> Vec<u64> {
        if now_ms < self.next_due_ms {
            return Vec::new();
        }

        let owed = (now_ms - self.next_due_ms) / self.interval_ms + 1;
        if owed > self.max_catchup as u64 {
            log::warn!(
                "Tick backlog of {} exceeds {}; dropping to a single tick at {}ms",
                owed,
                self.max_catchup,
                now_ms
            );
            self.next_due_ms = now_ms + self.interval_ms;
            return vec![now_ms];
        }

        let mut ticks = Vec::with_capacity(owed as usize);
        while self.next_due_ms <= now_ms {
            ticks.push(self.next_due_ms);
            self.next_due_ms += self.interval_ms;
        }
        ticks
    }
}
