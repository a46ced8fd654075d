//! Event types for the simulation.

use crate::ProcessorId;
use serde::{Deserialize, Serialize};

/// A simulation event.
///
/// Events are **passive data** — they describe something that happened (or
/// is scheduled to happen) at a point in simulated time. They are immutable
/// once created; there is no cancellation or rescheduling.
///
/// `Arrival` and `Departure` are schedulable: the engine inserts them into
/// the pending-event queue and the dispatch loop pops them. `QueuePush` and
/// `QueuePop` are trace-only markers emitted by the arrival/departure
/// handlers at the moment a process enters or leaves the waiting line; the
/// engine never schedules them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A process enters the system.
    Arrival,
    /// A process enters the waiting line (all processors busy).
    QueuePush,
    /// A process leaves the waiting line (a processor freed up).
    QueuePop,
    /// A process completes service on the referenced processor and leaves
    /// the system. The reference identifies which processor frees up.
    Departure {
        /// The processor whose service completes.
        processor: ProcessorId,
    },
}

impl Event {
    /// The kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Arrival => EventKind::Arrival,
            Event::QueuePush => EventKind::QueuePush,
            Event::QueuePop => EventKind::QueuePop,
            Event::Departure { .. } => EventKind::Departure,
        }
    }
}

/// The closed set of event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A process enters the system.
    Arrival,
    /// A process enters the waiting line.
    QueuePush,
    /// A process leaves the waiting line.
    QueuePop,
    /// A process completes service and leaves the system.
    Departure,
}

impl EventKind {
    /// Wire label for the event trace.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Arrival => "PROCESS_ARRIVAL",
            EventKind::QueuePush => "QUEUE_PUSH",
            EventKind::QueuePop => "QUEUE_POP",
            EventKind::Departure => "PROCESS_DEPARTURE",
        }
    }
}

/// One dispatched event, as recorded into the optional event trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// What happened.
    pub kind: EventKind,
    /// Simulation time at which it happened.
    pub time: f64,
}
