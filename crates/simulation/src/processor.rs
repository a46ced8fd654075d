//! Fixed-size pool of identical processors.

use mmc_core::{Process, ProcessorId, SimulationError};

/// One server.
///
/// Owns the process it is serving for the duration of service and
/// releases ownership at completion.
#[derive(Debug, Default)]
pub struct Processor {
    busy: bool,
    current: Option<Process>,
    completion: Option<f64>,
}

impl Processor {
    /// Whether this processor can accept a new process.
    pub fn is_available(&self) -> bool {
        !self.busy
    }

    /// The time at which the current service completes, while busy.
    pub fn scheduled_completion(&self) -> Option<f64> {
        self.completion
    }
}

/// A fixed-size collection of servers.
///
/// Admission scans processors in index order: the pool is filled in a
/// deterministic preference order, not load-balanced.
#[derive(Debug)]
pub struct ProcessorPool {
    processors: Vec<Processor>,
}

impl ProcessorPool {
    /// Create a pool of `count` idle processors.
    pub fn new(count: usize) -> Self {
        let processors = (0..count).map(|_| Processor::default()).collect();
        Self { processors }
    }

    /// Number of processors in the pool.
    pub fn len(&self) -> usize {
        self.processors.len()
    }

    /// Whether the pool has no processors.
    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// Number of processors currently serving a process.
    pub fn busy_count(&self) -> usize {
        self.processors.iter().filter(|p| p.busy).count()
    }

    /// First idle processor in index order, if any.
    pub fn first_available(&self) -> Option<ProcessorId> {
        self.processors.iter().position(Processor::is_available)
    }

    /// Begin serving `process` on the given processor.
    ///
    /// The service duration is sampled by the caller through its variate
    /// source; the pool computes and returns the completion time
    /// `now + duration` for event scheduling.
    pub fn start_service(
        &mut self,
        id: ProcessorId,
        process: Process,
        now: f64,
        duration: f64,
    ) -> f64 {
        let processor = &mut self.processors[id];
        debug_assert!(processor.is_available(), "processor {id} already busy");
        let completion = now + duration;
        processor.busy = true;
        processor.current = Some(process);
        processor.completion = Some(completion);
        completion
    }

    /// Complete service on the given processor, releasing its process.
    ///
    /// Fails with [`SimulationError::InvalidState`] if the processor is
    /// idle; correct dispatch never does this.
    pub fn complete_service(&mut self, id: ProcessorId) -> Result<Process, SimulationError> {
        let processor = &mut self.processors[id];
        if !processor.busy {
            return Err(SimulationError::InvalidState(
                "completing service on an idle processor",
            ));
        }
        processor.busy = false;
        processor.completion = None;
        processor.current.take().ok_or(SimulationError::InvalidState(
            "busy processor holds no process",
        ))
    }
}
