//! Span helpers for calls leaving the process.

use tracing::{info_span, Span};

/// Create a span for a call to an upstream service.
pub fn upstream_span(service: &str, operation: &str) -> Span {
    info_span!(
        "upstream",
        service = %service,
        op = %operation,
        error = tracing::field::Empty
    )
}

/// Record an error on the current span.
///
/// Only spans that declare an `error` field (such as [`upstream_span`]) keep it.
pub fn record_error(error: &dyn std::error::Error) {
    Span::current().record("error", tracing::field::display(error));
}

/// Timing utility for operations.
pub struct Timer {
    start: std::time::Instant,
    operation: &'static str,
}

impl Timer {
    /// Start a new timer.
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: std::time::Instant::now(),
            operation,
        }
    }

    /// Milliseconds since the timer started.
    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    /// Complete the timer and record duration.
    pub fn finish(self) {
        tracing::debug!(
            operation = %self.operation,
            duration_ms = self.elapsed_ms(),
            "operation completed"
        );
    }
}
