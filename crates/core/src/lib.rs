//! Core types for the mmc queueing simulator.
//!
//! This crate provides the foundational types shared by the simulation
//! engine and its hosts:
//!
//! - [`Event`]: the closed set of simulation events
//! - [`EventKind`]: the kind tag shared by events and trace entries
//! - [`TraceEntry`]: one dispatched event, as recorded into the event trace
//! - [`Process`]: a job's lifecycle timestamps
//! - [`SimulationConfig`]: validated run parameters
//! - [`SimulationError`]: the closed error set
//! - [`VariateSource`]: the random-variate capability trait
//!
//! # Architecture
//!
//! ```text
//! SimulationConfig + VariateSource → SimulationEngine → completed Processes → Statistics
//! ```
//!
//! Everything here is passive data plus one capability trait. The engine
//! that consumes these types lives in `mmc-simulation`; it is:
//! - **Synchronous**: no async, no `.await`
//! - **Deterministic**: same config + same variate stream = same run
//! - **Pure-ish**: mutates owned state, performs no I/O

mod config;
mod error;
mod event;
mod process;
mod variate;

pub use config::{LogMode, SimulationConfig};
pub use error::SimulationError;
pub use event::{Event, EventKind, TraceEntry};
pub use process::Process;
pub use variate::{ExponentialVariates, VariateSource};

/// Index of a processor within the pool.
///
/// Processors are identified by their position in the pool's fixed scan
/// order; the admission policy fills them in ascending index order.
pub type ProcessorId = usize;
