//! Optional per-event trace.

use mmc_core::{EventKind, TraceEntry};

/// Append-only recorder of dispatched events.
///
/// When disabled, recording is a no-op and the run carries no trace
/// overhead beyond the branch.
#[derive(Debug, Default)]
pub struct EventTrace {
    enabled: bool,
    entries: Vec<TraceEntry>,
}

impl EventTrace {
    /// Create a recorder; `enabled` follows the config's `E` log flag.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            entries: Vec::new(),
        }
    }

    /// Whether entries are being recorded.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record one dispatched event.
    pub fn record(&mut self, kind: EventKind, time: f64) {
        if self.enabled {
            self.entries.push(TraceEntry { kind, time });
        }
    }

    /// The recorded entries, in dispatch order.
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    /// Consume the recorder, yielding the entries.
    pub fn into_entries(self) -> Vec<TraceEntry> {
        self.entries
    }
}
