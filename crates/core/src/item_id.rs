// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Monotonic identifiers for checklist items.
//!
//! An item id combines wall clock milliseconds with a logical counter, so two
//! items added within the same millisecond (or after the clock steps back)
//! still get distinct, increasing ids.
//!
//! Format: `{wall_ms}-{counter}`

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering as AtomicOrdering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// One generated item stamp. Ordered by wall time, then counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemStamp {
    /// Wall clock time in milliseconds since Unix epoch.
    pub wall_ms: u64,
    /// Logical counter for stamps issued at the same wall time.
    pub counter: u32,
}

impl fmt::Display for ItemStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.wall_ms, self.counter)
    }
}

/// Trait for getting the current wall clock time.
///
/// This allows injecting a mock clock for testing.
pub trait ClockSource: Send + Sync {
    /// Returns the current time in milliseconds since Unix epoch.
    fn now_ms(&self) -> u64;
}

/// System clock implementation using `std::time::SystemTime`.
#[derive(Debug, Default)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or(0)
    }
}

impl<C: ClockSource> ClockSource for &C {
    fn now_ms(&self) -> u64 {
        (*self).now_ms()
    }
}

/// Generator of strictly increasing item stamps.
pub struct ItemIdClock<C: ClockSource = SystemClock> {
    clock: C,
    last_wall_ms: Mutex<u64>,
    last_counter: AtomicU32,
}

impl ItemIdClock<SystemClock> {
    /// Creates a clock backed by the system time.
    pub const fn system() -> Self {
        ItemIdClock { clock: SystemClock, last_wall_ms: Mutex::new(0), last_counter: AtomicU32::new(0) }
    }
}

impl<C: ClockSource> ItemIdClock<C> {
    /// Creates a clock with a custom time source.
    pub fn with_clock(clock: C) -> Self {
        ItemIdClock { clock, last_wall_ms: Mutex::new(0), last_counter: AtomicU32::new(0) }
    }

    /// Issues the next stamp.
    ///
    /// Strictly greater than every stamp previously issued by this clock,
    /// even if the wall clock stalls or goes backwards.
    pub fn next(&self) -> ItemStamp {
        let physical = self.clock.now_ms();
        let mut last_ms = self.last_wall_ms.lock().unwrap_or_else(|e| e.into_inner());

        let (wall_ms, counter) = if physical > *last_ms {
            *last_ms = physical;
            self.last_counter.store(0, AtomicOrdering::SeqCst);
            (physical, 0)
        } else {
            let counter = self.last_counter.fetch_add(1, AtomicOrdering::SeqCst) + 1;
            (*last_ms, counter)
        };

        ItemStamp { wall_ms, counter }
    }

    /// Issues the next stamp rendered as an item id string.
    pub fn next_id(&self) -> String {
        self.next().to_string()
    }
}

/// Process-wide clock used by [`crate::Checklist::add_item`].
pub static ITEM_IDS: ItemIdClock = ItemIdClock::system();

#[cfg(test)]
#[path = "item_id_tests.rs"]
mod tests;
