//! Error types for the simulator.

/// Simulation errors.
///
/// All of these are programmer or input errors, not transient conditions:
/// none are retried. `Configuration` aborts a run before the loop starts;
/// `EmptyQueue` and `InvalidState` signal internal invariant violations
/// that correct dispatch never produces; `DegenerateRun` is reported at
/// the statistics boundary and is recoverable by the caller choosing not
/// to compute statistics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    /// Invalid run parameters, detected before the loop starts.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The loop attempted to pop from an empty event queue.
    #[error("event queue is empty")]
    EmptyQueue,

    /// An operation was applied to a component in the wrong state.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// Statistics were requested on a run with zero served processes or
    /// zero elapsed time.
    #[error("degenerate run: {0}")]
    DegenerateRun(&'static str),
}
