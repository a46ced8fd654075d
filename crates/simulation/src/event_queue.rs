//! Pending-event queue with deterministic ordering.

use mmc_core::{Event, SimulationError};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Key for ordering pending events.
///
/// Events are ordered by:
/// 1. Time (earlier first)
/// 2. Sequence number (FIFO for events scheduled at the same time)
///
/// No priority is defined among simultaneous events, so the tie-break is
/// insertion order, which keeps runs deterministic.
#[derive(Debug, Clone, Copy)]
pub struct EventKey {
    /// When this event fires.
    pub time: f64,
    /// Monotone insertion counter.
    pub sequence: u64,
}

impl Ord for EventKey {
    fn cmp(&self, other: &Self) -> Ordering {
        // `total_cmp` is a total order; the engine only produces finite
        // times, so it agrees with the usual `<` on every key we store.
        self.time
            .total_cmp(&other.time)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for EventKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for EventKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EventKey {}

/// Time-ordered queue of pending events.
///
/// Supports insert-by-time and pop-minimum, both O(log n). Events are
/// never invalidated, so there is no deletion-by-reference or
/// decrease-key.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: BTreeMap<EventKey, Event>,
    sequence: u64,
}

impl EventQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an event firing at `time`, preserving ascending-time order.
    pub fn schedule(&mut self, time: f64, event: Event) -> EventKey {
        self.sequence += 1;
        let key = EventKey {
            time,
            sequence: self.sequence,
        };
        self.events.insert(key, event);
        key
    }

    /// Remove and return the earliest pending event.
    ///
    /// Fails with [`SimulationError::EmptyQueue`] if nothing is pending;
    /// the engine's termination condition guarantees this never happens in
    /// a correct run, since every arrival schedules the next arrival.
    pub fn pop_min(&mut self) -> Result<(EventKey, Event), SimulationError> {
        self.events.pop_first().ok_or(SimulationError::EmptyQueue)
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no events are pending.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
