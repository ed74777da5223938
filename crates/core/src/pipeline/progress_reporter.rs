/// Cross-cutting sink for coarse progress events.
///
/// Decouples the transcription flow from specific output mechanisms
/// (stdout protocol, GUI channel, tests) so each caller can observe
/// progress without changing the orchestration code. Reporting is
/// best-effort and must never fail the run.
pub trait ProgressReporter: Send + Sync {
    /// Report progress as a percentage in [0, 100] plus a status line.
    fn report(&self, percent: u8, status: &str);
}

/// Silent reporter that discards all events. Used by tests and by
/// callers that have no one to report to.
pub struct NullProgressReporter;

impl ProgressReporter for NullProgressReporter {
    fn report(&self, _percent: u8, _status: &str) {}
}
