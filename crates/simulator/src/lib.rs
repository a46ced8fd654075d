//! Run harness for the mmc queueing simulator.
//!
//! Wires a configuration and a seed into an engine run and hands back a
//! [`RunReport`]: the computed statistics, the run counters, and the
//! optional per-event trace. Hosts (the CLI, test drivers, batch
//! sweeps) consume the report; the engine itself performs no I/O.
//!
//! # Example
//!
//! ```no_run
//! use mmc_core::{LogMode, SimulationConfig};
//! use mmc_simulator::Simulator;
//!
//! let config = SimulationConfig {
//!     processor_count: 2,
//!     processor_service_rate: 1.5,
//!     process_arrival_rate: 2.0,
//!     target_process_count: 10_000,
//!     log: LogMode::default(),
//! };
//!
//! let report = Simulator::new(config).with_seed(42).run()?;
//! println!("mean response time: {:.6}", report.statistics.mean_response_time);
//! # Ok::<(), mmc_core::SimulationError>(())
//! ```

mod report;

pub use report::RunReport;

use mmc_core::{ExponentialVariates, SimulationConfig, SimulationError};
use mmc_simulation::SimulationEngine;
use tracing::info;

/// One-shot driver for a single simulation run.
pub struct Simulator {
    config: SimulationConfig,
    seed: u64,
}

impl Simulator {
    /// Create a simulator for the given configuration.
    ///
    /// The seed defaults to a random value; call [`with_seed`] for a
    /// reproducible run.
    ///
    /// [`with_seed`]: Simulator::with_seed
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            seed: rand::random(),
        }
    }

    /// Fix the random seed for a reproducible run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// The seed this run will use.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Execute the run to completion and compute its statistics.
    pub fn run(self) -> Result<RunReport, SimulationError> {
        let variates = ExponentialVariates::from_config(&self.config, self.seed)?;
        let mut engine = SimulationEngine::new(&self.config, variates)?;
        engine.run()?;

        let statistics = engine.statistics()?;
        let served = engine.served();
        let duration = engine.now();
        let stats = engine.stats().clone();
        let events = engine.into_trace_entries();

        info!(
            seed = self.seed,
            served,
            duration,
            events = stats.events_dispatched,
            "run complete"
        );

        Ok(RunReport {
            statistics,
            served,
            duration,
            seed: self.seed,
            engine_stats: stats,
            events,
        })
    }
}
