//! Telemetry: running counters of ride request outcomes.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatchTelemetry {
    pub requests_total: u64,
    pub assigned_total: u64,
    pub unassignable_total: u64,
    pub started_total: u64,
    pub completed_total: u64,
    pub cancelled_total: u64,
}

impl DispatchTelemetry {
    /// Share of requests that found a driver, or `None` before the first request.
    pub fn assignment_rate(&self) -> Option<f64> {
        if self.requests_total == 0 {
            return None;
        }
        Some(self.assigned_total as f64 / self.requests_total as f64)
    }

    pub(crate) fn record_request(&mut self) {
        self.requests_total = self.requests_total.saturating_add(1);
    }

    pub(crate) fn record_assigned(&mut self) {
        self.assigned_total = self.assigned_total.saturating_add(1);
    }

    pub(crate) fn record_unassignable(&mut self) {
        self.unassignable_total = self.unassignable_total.saturating_add(1);
    }

    pub(crate) fn record_started(&mut self) {
        self.started_total = self.started_total.saturating_add(1);
    }

    pub(crate) fn record_completed(&mut self) {
        self.completed_total = self.completed_total.saturating_add(1);
    }

    pub(crate) fn record_cancelled(&mut self) {
        self.cancelled_total = self.cancelled_total.saturating_add(1);
    }
}
