//! The simulation engine.
//!
//! An explicitly constructed value owning all sub-collections: the
//! pending-event queue, the processor pool, the waiting line, and the
//! completed-process trace. Nothing is process-global, so independent
//! replications are just independent engine values with independent
//! variate sources.

use crate::event_queue::EventQueue;
use crate::processor::ProcessorPool;
use crate::statistics::Statistics;
use crate::trace::EventTrace;
use crate::wait_queue::WaitQueue;
use mmc_core::{
    Event, EventKind, Process, ProcessorId, SimulationConfig, SimulationError, TraceEntry,
    VariateSource,
};
use tracing::{debug, trace};

/// Where a run stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Fewer processes have been served than the target.
    Running,
    /// The target number of processes has completed service.
    Finished,
}

/// Counters collected while a run executes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EngineStats {
    /// Total events dispatched from the pending queue.
    pub events_dispatched: u64,
    /// Processes that entered the system.
    pub arrivals: u64,
    /// Processes that completed service.
    pub departures: u64,
    /// Processes that entered the waiting line.
    pub queue_pushes: u64,
    /// Processes promoted out of the waiting line.
    pub queue_pops: u64,
}

/// Discrete-event simulation engine for the M/M/c model.
///
/// Single-threaded and deterministic: the loop pops the earliest pending
/// event, advances the clock to its time, and dispatches it; handlers may
/// schedule new events. Given the same configuration and variate stream,
/// two runs produce identical results.
pub struct SimulationEngine<V> {
    /// Source of inter-arrival and service durations.
    variates: V,

    /// The run terminates once this many processes have been served.
    target: u64,

    /// Pending events, ordered by time then insertion.
    events: EventQueue,

    /// The servers.
    processors: ProcessorPool,

    /// Processes waiting for a server, in arrival order.
    waiting: WaitQueue,

    /// Finished processes, in completion order. Sole input to the
    /// statistics engine.
    completed: Vec<Process>,

    /// Optional per-event trace.
    trace: EventTrace,

    /// Current simulation time. Advances only by popping events.
    now: f64,

    /// Processes served so far.
    served: u64,

    /// Run counters.
    stats: EngineStats,
}

impl<V: VariateSource> SimulationEngine<V> {
    /// Create an engine for the given run.
    ///
    /// Validates the configuration, then schedules the first arrival so
    /// the queue is never empty while the run is live.
    pub fn new(config: &SimulationConfig, variates: V) -> Result<Self, SimulationError> {
        config.validate()?;
        let mut engine = Self {
            variates,
            target: config.target_process_count,
            events: EventQueue::new(),
            processors: ProcessorPool::new(config.processor_count),
            waiting: WaitQueue::new(),
            completed: Vec::with_capacity(config.target_process_count as usize),
            trace: EventTrace::new(config.log.events),
            now: 0.0,
            served: 0,
            stats: EngineStats::default(),
        };
        engine.schedule_next_arrival();
        Ok(engine)
    }

    /// Run to completion.
    pub fn run(&mut self) -> Result<(), SimulationError> {
        debug!(target_processes = self.target, "starting run");
        while self.step()? == RunState::Running {}
        debug!(
            served = self.served,
            now = self.now,
            events = self.stats.events_dispatched,
            "run finished"
        );
        Ok(())
    }

    /// Dispatch exactly one event.
    ///
    /// Returns the run state after the event; a no-op once `Finished`.
    /// The engine performs no lookahead — it fully processes one event
    /// before checking termination, so the served count can only cross
    /// the target on a departure.
    pub fn step(&mut self) -> Result<RunState, SimulationError> {
        if self.state() == RunState::Finished {
            return Ok(RunState::Finished);
        }

        let (key, event) = self.events.pop_min()?;
        self.now = key.time;
        self.stats.events_dispatched += 1;
        trace!(kind = event.kind().label(), time = self.now, "dispatching");

        match event {
            Event::Arrival => self.on_arrival(),
            Event::Departure { processor } => self.on_departure(processor)?,
            // Trace-only markers; the handlers above emit them straight to
            // the trace and nothing ever schedules one.
            Event::QueuePush | Event::QueuePop => {
                return Err(SimulationError::InvalidState(
                    "trace-only event kind was scheduled",
                ))
            }
        }

        Ok(self.state())
    }

    /// Handle a process arrival.
    fn on_arrival(&mut self) {
        self.record(EventKind::Arrival);
        self.stats.arrivals += 1;
        let process = Process::arrive(self.now);

        // The next arrival must be scheduled before assignment, so a
        // future arrival is always pending regardless of the outcome.
        self.schedule_next_arrival();

        match self.processors.first_available() {
            Some(id) => self.begin_service(id, process),
            None => {
                let mut process = process;
                process.enter_queue(self.now);
                self.waiting.push(process);
                self.record(EventKind::QueuePush);
                self.stats.queue_pushes += 1;
                trace!(waiting = self.waiting.len(), "all processors busy");
            }
        }
    }

    /// Handle a service completion on `id`.
    fn on_departure(&mut self, id: ProcessorId) -> Result<(), SimulationError> {
        self.record(EventKind::Departure);
        self.stats.departures += 1;

        let mut process = self.processors.complete_service(id)?;
        process.depart(self.now);
        self.completed.push(process);
        self.served += 1;

        if let Some(mut next) = self.waiting.pop() {
            next.exit_queue(self.now);
            self.record(EventKind::QueuePop);
            self.stats.queue_pops += 1;
            self.begin_service(id, next);
        }
        Ok(())
    }

    /// Start service and schedule the matching departure.
    fn begin_service(&mut self, id: ProcessorId, process: Process) {
        let duration = self.variates.sample_service();
        let completion = self.processors.start_service(id, process, self.now, duration);
        self.events
            .schedule(completion, Event::Departure { processor: id });
    }

    /// Schedule the next process arrival.
    fn schedule_next_arrival(&mut self) {
        let at = self.now + self.variates.sample_inter_arrival();
        self.events.schedule(at, Event::Arrival);
    }

    fn record(&mut self, kind: EventKind) {
        self.trace.record(kind, self.now);
    }

    /// Where the run stands.
    pub fn state(&self) -> RunState {
        if self.served < self.target {
            RunState::Running
        } else {
            RunState::Finished
        }
    }

    /// Current simulation time.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Processes served so far.
    pub fn served(&self) -> u64 {
        self.served
    }

    /// Processes currently in the waiting line.
    pub fn waiting_len(&self) -> usize {
        self.waiting.len()
    }

    /// Processors currently serving.
    pub fn busy_processors(&self) -> usize {
        self.processors.busy_count()
    }

    /// Run counters.
    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }

    /// The completed-process trace, in completion order.
    pub fn completed(&self) -> &[Process] {
        &self.completed
    }

    /// Recorded trace entries (empty unless the `E` log flag was set).
    pub fn trace_entries(&self) -> &[TraceEntry] {
        self.trace.entries()
    }

    /// Compute statistics over the completed trace.
    ///
    /// Fails with [`SimulationError::DegenerateRun`] before any process
    /// has been served or time has advanced.
    pub fn statistics(&self) -> Result<Statistics, SimulationError> {
        Statistics::from_trace(&self.completed, self.now)
    }

    /// Consume the engine, yielding the recorded trace entries.
    pub fn into_trace_entries(self) -> Vec<TraceEntry> {
        self.trace.into_entries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mmc_core::LogMode;
    use std::collections::VecDeque;

    /// Variate source replaying fixed sequences.
    struct Scripted {
        inter_arrivals: VecDeque<f64>,
        services: VecDeque<f64>,
    }

    impl Scripted {
        fn new(inter_arrivals: &[f64], services: &[f64]) -> Self {
            Self {
                inter_arrivals: inter_arrivals.iter().copied().collect(),
                services: services.iter().copied().collect(),
            }
        }
    }

    impl VariateSource for Scripted {
        fn sample_inter_arrival(&mut self) -> f64 {
            self.inter_arrivals.pop_front().expect("script exhausted")
        }

        fn sample_service(&mut self) -> f64 {
            self.services.pop_front().expect("script exhausted")
        }
    }

    fn config(processors: usize, target: u64) -> SimulationConfig {
        SimulationConfig {
            processor_count: processors,
            processor_service_rate: 1.0,
            process_arrival_rate: 1.0,
            target_process_count: target,
            log: LogMode::full(),
        }
    }

    #[test]
    fn invalid_config_is_rejected_before_the_loop() {
        let cfg = SimulationConfig {
            processor_count: 0,
            ..config(1, 1)
        };
        let result = SimulationEngine::new(&cfg, Scripted::new(&[1.0], &[]));
        assert!(matches!(result, Err(SimulationError::Configuration(_))));
    }

    #[test]
    fn single_process_immediate_service() {
        // Arrival at 1.0, service 0.5 → departure at 1.5. The second
        // inter-arrival is drawn (next arrival scheduled before
        // assignment) but the event is discarded at termination.
        let script = Scripted::new(&[1.0, 10.0], &[0.5]);
        let mut engine = SimulationEngine::new(&config(1, 1), script).unwrap();
        engine.run().unwrap();

        assert_eq!(engine.state(), RunState::Finished);
        assert_eq!(engine.served(), 1);
        assert_eq!(engine.now(), 1.5);

        let process = &engine.completed()[0];
        assert_eq!(process.arrival(), 1.0);
        assert_eq!(process.departure(), Some(1.5));
        assert!(!process.waited());
    }

    #[test]
    fn busy_processor_queues_the_second_arrival() {
        // Arrivals at 1.0 and 2.0; the first service runs to 4.0, so the
        // second process waits from 2.0 until 4.0.
        let script = Scripted::new(&[1.0, 1.0, 10.0], &[3.0, 1.0]);
        let mut engine = SimulationEngine::new(&config(1, 2), script).unwrap();
        engine.run().unwrap();

        assert_eq!(engine.served(), 2);
        let waited = &engine.completed()[1];
        assert_eq!(waited.queue_entered(), Some(2.0));
        assert_eq!(waited.queue_exited(), Some(4.0));
        assert_eq!(waited.departure(), Some(5.0));

        let kinds: Vec<_> = engine.trace_entries().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::Arrival,
                EventKind::Arrival,
                EventKind::QueuePush,
                EventKind::Departure,
                EventKind::QueuePop,
                EventKind::Departure,
            ]
        );
    }

    #[test]
    fn second_processor_takes_the_overflow() {
        // Same arrivals as above, but two processors: no queueing.
        let script = Scripted::new(&[1.0, 1.0, 10.0], &[3.0, 1.0]);
        let mut engine = SimulationEngine::new(&config(2, 2), script).unwrap();
        engine.run().unwrap();

        assert!(engine.completed().iter().all(|p| !p.waited()));
        assert_eq!(engine.stats().queue_pushes, 0);
        // Second process: arrives 2.0, service 1.0 on processor 1,
        // departs 3.0 — before the first (departs 4.0).
        assert_eq!(engine.completed()[0].departure(), Some(3.0));
    }

    #[test]
    fn step_stops_at_the_target_and_discards_the_pending_arrival() {
        let script = Scripted::new(&[1.0, 0.5, 10.0], &[0.2, 0.2]);
        let mut engine = SimulationEngine::new(&config(1, 1), script).unwrap();

        // Arrival at 1.0.
        assert_eq!(engine.step().unwrap(), RunState::Running);
        // Departure at 1.2 reaches the target; the arrival pending at 1.5
        // is never popped.
        assert_eq!(engine.step().unwrap(), RunState::Finished);
        assert_eq!(engine.now(), 1.2);

        // Further steps are no-ops.
        assert_eq!(engine.step().unwrap(), RunState::Finished);
        assert_eq!(engine.now(), 1.2);
        assert_eq!(engine.stats().events_dispatched, 2);
    }

    #[test]
    fn statistics_before_any_departure_are_degenerate() {
        let script = Scripted::new(&[1.0, 1.0], &[5.0]);
        let mut engine = SimulationEngine::new(&config(1, 1), script).unwrap();
        assert!(matches!(
            engine.statistics(),
            Err(SimulationError::DegenerateRun(_))
        ));

        // Still degenerate after the arrival, before the departure.
        engine.step().unwrap();
        assert!(matches!(
            engine.statistics(),
            Err(SimulationError::DegenerateRun(_))
        ));
    }

    #[test]
    fn conservation_holds_at_every_step() {
        // Bursty script: several arrivals pile up on one processor.
        let script = Scripted::new(
            &[1.0, 0.1, 0.1, 0.1, 0.1, 0.1, 10.0],
            &[2.0, 0.1, 0.1, 0.1, 0.1, 0.1],
        );
        let mut engine = SimulationEngine::new(&config(1, 6), script).unwrap();

        loop {
            let created = engine.stats().arrivals as usize;
            let accounted =
                engine.waiting_len() + engine.busy_processors() + engine.served() as usize;
            assert_eq!(created, accounted, "a process was lost or duplicated");
            if engine.step().unwrap() == RunState::Finished {
                break;
            }
        }
    }
}
