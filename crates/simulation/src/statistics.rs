//! Post-processing of the completed-process trace.

use mmc_core::{EventKind, Process, SimulationError};
use serde::Serialize;

/// Time-weighted statistics over one finished run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Mean of `departure − arrival` over all served processes.
    pub mean_response_time: f64,
    /// Mean time spent in the waiting line, per arrival.
    ///
    /// Only processes that actually queued contribute to the sum, but the
    /// divisor is the total served count — mean wait *per arrival*, not
    /// *per waiter*. This is an explicit, intentional contract.
    pub mean_waiting_time: f64,
    /// Time-weighted average number of processes in the system.
    pub avg_num_in_system: f64,
    /// Time-weighted average number of processes in the waiting line.
    pub avg_num_in_queue: f64,
}

impl Statistics {
    /// Compute statistics from the completed-process trace and the final
    /// clock value.
    ///
    /// Fails with [`SimulationError::DegenerateRun`] when no process was
    /// served or time never advanced; a ratio over an empty run would
    /// silently produce `NaN` otherwise.
    pub fn from_trace(completed: &[Process], now: f64) -> Result<Self, SimulationError> {
        if completed.is_empty() {
            return Err(SimulationError::DegenerateRun(
                "no process has completed service",
            ));
        }
        if !(now > 0.0) {
            return Err(SimulationError::DegenerateRun(
                "simulated time never advanced",
            ));
        }

        let n = completed.len() as f64;
        let mut response_sum = 0.0;
        let mut waiting_sum = 0.0;
        let mut system_events = Vec::with_capacity(completed.len() * 2);
        let mut queue_events = Vec::new();

        for process in completed {
            let departure = process.departure().ok_or(SimulationError::InvalidState(
                "completed trace holds an unfinished process",
            ))?;
            response_sum += departure - process.arrival();
            system_events.push((process.arrival(), EventKind::Arrival));
            system_events.push((departure, EventKind::Departure));

            if let (Some(entered), Some(exited)) =
                (process.queue_entered(), process.queue_exited())
            {
                waiting_sum += exited - entered;
                queue_events.push((entered, EventKind::QueuePush));
                queue_events.push((exited, EventKind::QueuePop));
            }
        }

        Ok(Self {
            mean_response_time: response_sum / n,
            mean_waiting_time: waiting_sum / n,
            avg_num_in_system: time_weighted_average(system_events, now),
            avg_num_in_queue: time_weighted_average(queue_events, now),
        })
    }
}

/// Sweep a synthetic event sequence, integrating the instantaneous count.
///
/// Push-kind events increment the count, pop-kind events decrement it;
/// the accumulated `Σ (tᵢ − tᵢ₋₁) × count` divided by the elapsed time is
/// the time-average population. Ties at equal times contribute zero-width
/// intervals, so their relative order does not affect the area.
fn time_weighted_average(mut events: Vec<(f64, EventKind)>, now: f64) -> f64 {
    events.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut area = 0.0;
    let mut count: i64 = 0;
    let mut previous = 0.0;
    for (time, kind) in events {
        area += (time - previous) * count as f64;
        previous = time;
        match kind {
            EventKind::Arrival | EventKind::QueuePush => count += 1,
            EventKind::Departure | EventKind::QueuePop => count -= 1,
        }
    }
    area / now
}
