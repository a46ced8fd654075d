//! Discrete-event simulation engine for a multi-server queueing system.
//!
//! Given a validated configuration and a variate source, the engine runs
//! an M/M/c-style model to completion: processes arrive at random
//! intervals, are served by one of several identical processors with
//! random service time, and wait in FIFO order when all processors are
//! busy. Given the same seed, a run produces identical results every time.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                   SimulationEngine                      │
//! │                                                         │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │      Event Queue (BTreeMap<EventKey, Event>)       │ │
//! │  │      Ordered by: time, then insertion sequence     │ │
//! │  └────────────────────────┬───────────────────────────┘ │
//! │                           │ pop earliest, advance `now` │
//! │                           ▼                             │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │      Dispatch: Arrival / Departure handlers        │ │
//! │  │      ProcessorPool (index-order admission)         │ │
//! │  │      WaitQueue (FIFO)                              │ │
//! │  └────────────────────────┬───────────────────────────┘ │
//! │                           │ schedule new events         │
//! │                           ▼                             │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │      Completed-process trace → Statistics          │ │
//! │  └────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The loop terminates once the configured number of processes has
//! completed service; a pending arrival left in the queue at that point is
//! simply never popped.

mod engine;
mod event_queue;
mod processor;
mod statistics;
mod trace;
mod wait_queue;

pub use engine::{EngineStats, RunState, SimulationEngine};
pub use event_queue::{EventKey, EventQueue};
pub use processor::{Processor, ProcessorPool};
pub use statistics::Statistics;
pub use trace::EventTrace;
pub use wait_queue::WaitQueue;
