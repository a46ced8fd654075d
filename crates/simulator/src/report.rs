//! The outcome of one run.

use mmc_core::TraceEntry;
use mmc_simulation::{EngineStats, Statistics};
use serde::Serialize;
use std::fmt::Write as _;

/// Everything a host needs from a finished run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    /// Time-weighted statistics over the completed trace.
    pub statistics: Statistics,
    /// Processes that completed service.
    pub served: u64,
    /// Final simulation clock value.
    pub duration: f64,
    /// The seed the run used.
    pub seed: u64,
    /// Engine dispatch counters.
    #[serde(skip)]
    pub engine_stats: EngineStats,
    /// Per-event trace; empty unless the `E` log flag was set.
    #[serde(skip)]
    pub events: Vec<TraceEntry>,
}

impl RunReport {
    /// Human-readable statistics block, as printed to stdout and appended
    /// to the results log.
    pub fn render_statistics(&self) -> String {
        let mut out = String::new();
        let stats = &self.statistics;
        let _ = writeln!(out, "Mean Response Time: {:.6}", stats.mean_response_time);
        let _ = writeln!(out, "Mean Waiting Time: {:.6}", stats.mean_waiting_time);
        let _ = writeln!(out, "Average Jobs in System: {:.6}", stats.avg_num_in_system);
        let _ = writeln!(out, "Average Jobs in Queue: {:.6}", stats.avg_num_in_queue);
        out
    }

    /// Event trace lines in the `Type : <kind>, Time : <time>` format.
    pub fn render_events(&self) -> String {
        let mut out = String::new();
        for entry in &self.events {
            let _ = writeln!(out, "Type : {}, Time : {:.6}", entry.kind.label(), entry.time);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mmc_core::EventKind;

    fn report() -> RunReport {
        RunReport {
            statistics: Statistics {
                mean_response_time: 1.5,
                mean_waiting_time: 0.25,
                avg_num_in_system: 3.0,
                avg_num_in_queue: 0.5,
            },
            served: 2,
            duration: 4.0,
            seed: 7,
            engine_stats: EngineStats::default(),
            events: vec![
                TraceEntry {
                    kind: EventKind::Arrival,
                    time: 1.0,
                },
                TraceEntry {
                    kind: EventKind::Departure,
                    time: 2.5,
                },
            ],
        }
    }

    #[test]
    fn statistics_render_one_line_per_metric() {
        let text = report().render_statistics();
        assert!(text.contains("Mean Response Time: 1.500000"));
        assert!(text.contains("Mean Waiting Time: 0.250000"));
        assert!(text.contains("Average Jobs in System: 3.000000"));
        assert!(text.contains("Average Jobs in Queue: 0.500000"));
    }

    #[test]
    fn events_render_in_wire_format() {
        let text = report().render_events();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Type : PROCESS_ARRIVAL, Time : 1.000000")
        );
        assert_eq!(
            lines.next(),
            Some("Type : PROCESS_DEPARTURE, Time : 2.500000")
        );
        assert_eq!(lines.next(), None);
    }
}
