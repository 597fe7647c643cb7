// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use std::collections::HashSet;
use std::sync::atomic::AtomicU64;

/// Clock whose time is set by the test.
struct MockClock {
    ms: AtomicU64,
}

impl MockClock {
    fn new(ms: u64) -> Self {
        MockClock { ms: AtomicU64::new(ms) }
    }

    fn set(&self, ms: u64) {
        self.ms.store(ms, AtomicOrdering::SeqCst);
    }
}

impl ClockSource for MockClock {
    fn now_ms(&self) -> u64 {
        self.ms.load(AtomicOrdering::SeqCst)
    }
}

#[test]
fn stamp_display_format() {
    let stamp = ItemStamp { wall_ms: 1700000000000, counter: 3 };
    assert_eq!(stamp.to_string(), "1700000000000-3");
}

#[test]
fn same_millisecond_increments_counter() {
    let clock = MockClock::new(1000);
    let ids = ItemIdClock::with_clock(&clock);

    let a = ids.next();
    let b = ids.next();
    let c = ids.next();

    assert_eq!(a, ItemStamp { wall_ms: 1000, counter: 0 });
    assert_eq!(b, ItemStamp { wall_ms: 1000, counter: 1 });
    assert_eq!(c, ItemStamp { wall_ms: 1000, counter: 2 });
}

#[test]
fn advancing_clock_resets_counter() {
    let clock = MockClock::new(1000);
    let ids = ItemIdClock::with_clock(&clock);
    ids.next();
    ids.next();

    clock.set(2000);
    assert_eq!(ids.next(), ItemStamp { wall_ms: 2000, counter: 0 });
}

#[test]
fn clock_going_backwards_stays_monotonic() {
    let clock = MockClock::new(5000);
    let ids = ItemIdClock::with_clock(&clock);
    let before = ids.next();

    clock.set(4000);
    let after = ids.next();

    assert!(after > before);
    assert_eq!(after.wall_ms, 5000);
}

#[test]
fn rapid_ids_are_unique() {
    let ids = ItemIdClock::system();
    let seen: HashSet<String> = (0..10_000).map(|_| ids.next_id()).collect();
    assert_eq!(seen.len(), 10_000);
}

#[test]
fn concurrent_ids_are_unique() {
    let ids = std::sync::Arc::new(ItemIdClock::system());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let ids = ids.clone();
            std::thread::spawn(move || (0..1000).map(|_| ids.next_id()).collect::<Vec<_>>())
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(seen.insert(id));
        }
    }
    assert_eq!(seen.len(), 4000);
}
