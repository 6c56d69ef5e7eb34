//! Failure-report sink contracts and adapters.

use std::{cell::RefCell, rc::Rc};

use crate::time::next_monotonic_timestamp_ms;

/// One captured failure report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticRecord {
    /// Process-monotonic capture timestamp in unix milliseconds.
    pub at_unix_ms: u64,
    /// Failure message.
    pub message: String,
    /// Stable operation tag identifying the reporting call site.
    pub context: String,
}

/// Host sink for failure reports.
///
/// Reports are fire-and-forget; implementations must not panic and callers never consume a
/// return value.
pub trait DiagnosticsSink {
    /// Records a failure message under a stable operation tag.
    fn report(&self, message: &str, context: &str);
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op sink for unsupported targets.
pub struct NoopDiagnostics;

impl DiagnosticsSink for NoopDiagnostics {
    fn report(&self, _message: &str, _context: &str) {}
}

#[derive(Debug, Clone, Default)]
/// In-memory sink recording reports for assertions.
pub struct MemoryDiagnostics {
    records: Rc<RefCell<Vec<DiagnosticRecord>>>,
}

impl MemoryDiagnostics {
    /// Returns the captured reports in arrival order.
    pub fn records(&self) -> Vec<DiagnosticRecord> {
        self.records.borrow().clone()
    }

    /// Returns how many reports were captured under `context`.
    pub fn count_for(&self, context: &str) -> usize {
        self.records
            .borrow()
            .iter()
            .filter(|record| record.context == context)
            .count()
    }
}

impl DiagnosticsSink for MemoryDiagnostics {
    fn report(&self, message: &str, context: &str) {
        self.records.borrow_mut().push(DiagnosticRecord {
            at_unix_ms: next_monotonic_timestamp_ms(),
            message: message.to_string(),
            context: context.to_string(),
        });
    }
}
