//! Run configuration.

use crate::SimulationError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Parameters for one simulation run.
///
/// Deserializes from the JSON shape the CLI consumes:
///
/// ```json
/// {
///   "processorCount": 2,
///   "processorServiceRate": 1.5,
///   "processArrivalRate": 2.0,
///   "targetProcessCount": 1000,
///   "log": "ER"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationConfig {
    /// Number of identical processors (`c`).
    pub processor_count: usize,
    /// Rate parameter of the exponential service-time distribution (`μ`).
    pub processor_service_rate: f64,
    /// Rate parameter of the exponential inter-arrival distribution (`λ`).
    pub process_arrival_rate: f64,
    /// The run terminates once this many processes have completed service.
    pub target_process_count: u64,
    /// Which optional outputs to produce.
    #[serde(default)]
    pub log: LogMode,
}

impl SimulationConfig {
    /// Fail fast on parameters the engine cannot run with.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.processor_count < 1 {
            return Err(SimulationError::Configuration(format!(
                "processorCount must be at least 1, got {}",
                self.processor_count
            )));
        }
        if !(self.processor_service_rate > 0.0) {
            return Err(SimulationError::Configuration(format!(
                "processorServiceRate must be positive, got {}",
                self.processor_service_rate
            )));
        }
        if !(self.process_arrival_rate > 0.0) {
            return Err(SimulationError::Configuration(format!(
                "processArrivalRate must be positive, got {}",
                self.process_arrival_rate
            )));
        }
        if self.target_process_count < 1 {
            return Err(SimulationError::Configuration(format!(
                "targetProcessCount must be at least 1, got {}",
                self.target_process_count
            )));
        }
        Ok(())
    }
}

/// Selector for the optional event trace and results outputs.
///
/// Serialized as a flag string: `E` enables the per-event trace, `R` the
/// results log. `"ER"`, `"E"`, `"R"` and `""` are all valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogMode {
    /// Record one trace entry per dispatched event.
    pub events: bool,
    /// Emit the computed statistics to the results sink.
    pub results: bool,
}

impl LogMode {
    /// Trace and results both enabled.
    pub fn full() -> Self {
        Self {
            events: true,
            results: true,
        }
    }
}

impl FromStr for LogMode {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut mode = LogMode::default();
        for flag in s.chars() {
            match flag {
                'E' => mode.events = true,
                'R' => mode.results = true,
                other => {
                    return Err(SimulationError::Configuration(format!(
                        "unknown log flag {other:?}, expected 'E' or 'R'"
                    )))
                }
            }
        }
        Ok(mode)
    }
}

impl std::fmt::Display for LogMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.events {
            f.write_str("E")?;
        }
        if self.results {
            f.write_str("R")?;
        }
        Ok(())
    }
}

impl Serialize for LogMode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LogMode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
