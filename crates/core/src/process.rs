//! The process entity: one job's lifecycle timestamps.

/// A single job moving through the system.
///
/// Created at arrival with only the arrival time set. The queue timestamps
/// are stamped only if the process actually waits; a process either never
/// waits or waits exactly once. The departure time is stamped exactly once,
/// at service completion.
///
/// Invariant: `arrival ≤ queue_entered ≤ queue_exited ≤ departure` for
/// every timestamp that is present, and `queue_entered` is present iff
/// `queue_exited` is present on a completed process.
#[derive(Debug, Clone, PartialEq)]
pub struct Process {
    arrival: f64,
    queue_entered: Option<f64>,
    queue_exited: Option<f64>,
    departure: Option<f64>,
}

impl Process {
    /// Create a process arriving at `now`.
    pub fn arrive(now: f64) -> Self {
        Self {
            arrival: now,
            queue_entered: None,
            queue_exited: None,
            departure: None,
        }
    }

    /// Stamp the time the process entered the waiting line.
    pub fn enter_queue(&mut self, now: f64) {
        debug_assert!(self.queue_entered.is_none(), "process queued twice");
        self.queue_entered = Some(now);
    }

    /// Stamp the time the process left the waiting line.
    pub fn exit_queue(&mut self, now: f64) {
        debug_assert!(self.queue_entered.is_some(), "exit without enter");
        self.queue_exited = Some(now);
    }

    /// Stamp the time the process completed service.
    pub fn depart(&mut self, now: f64) {
        debug_assert!(self.departure.is_none(), "process departed twice");
        self.departure = Some(now);
    }

    /// Time the process entered the system.
    pub fn arrival(&self) -> f64 {
        self.arrival
    }

    /// Time the process entered the waiting line, if it waited.
    pub fn queue_entered(&self) -> Option<f64> {
        self.queue_entered
    }

    /// Time the process left the waiting line, if it waited.
    pub fn queue_exited(&self) -> Option<f64> {
        self.queue_exited
    }

    /// Time the process left the system, if it has completed service.
    pub fn departure(&self) -> Option<f64> {
        self.departure
    }

    /// Whether the process spent time in the waiting line.
    pub fn waited(&self) -> bool {
        self.queue_entered.is_some()
    }

    /// Total time in the system, once departed.
    pub fn response_time(&self) -> Option<f64> {
        self.departure.map(|d| d - self.arrival)
    }

    /// Time spent in the waiting line; zero for a process served immediately.
    pub fn waiting_time(&self) -> f64 {
        match (self.queue_entered, self.queue_exited) {
            (Some(entered), Some(exited)) => exited - entered,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immediate_service_leaves_queue_timestamps_unset() {
        let mut proc = Process::arrive(1.0);
        proc.depart(3.5);

        assert!(!proc.waited());
        assert_eq!(proc.waiting_time(), 0.0);
        assert_eq!(proc.response_time(), Some(2.5));
        assert_eq!(proc.queue_entered(), None);
        assert_eq!(proc.queue_exited(), None);
    }

    #[test]
    fn queued_process_timestamps_are_monotone() {
        let mut proc = Process::arrive(1.0);
        proc.enter_queue(1.0);
        proc.exit_queue(2.0);
        proc.depart(4.0);

        assert!(proc.waited());
        assert_eq!(proc.waiting_time(), 1.0);
        assert_eq!(proc.response_time(), Some(3.0));

        let entered = proc.queue_entered().unwrap();
        let exited = proc.queue_exited().unwrap();
        assert!(proc.arrival() <= entered);
        assert!(entered <= exited);
        assert!(exited <= proc.departure().unwrap());
    }
}
