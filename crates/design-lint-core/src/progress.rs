//! Progress reporting for long component scans.
//!
//! The scan runs synchronously. Hosts that share a thread with a UI get a
//! cooperative [`ProgressSink::on_yield`] hook at a fixed node quantum;
//! threaded hosts run the audit on a worker and forward messages over a
//! channel instead.

/// Receives progress messages and yield points from the component scan.
pub trait ProgressSink {
    /// Called with a human-readable progress message.
    fn on_progress(&mut self, message: &str);

    /// Called at cooperative yield points.
    fn on_yield(&mut self) {}
}

/// Discards all progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_progress(&mut self, _message: &str) {}
}

impl<F: FnMut(&str)> ProgressSink for F {
    fn on_progress(&mut self, message: &str) {
        self(message);
    }
}
