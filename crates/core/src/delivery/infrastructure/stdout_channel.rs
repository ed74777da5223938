use std::io::Write;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::delivery::domain::result_payload::ResultPayload;
use crate::delivery::infrastructure::delimited_payload;
use crate::pipeline::progress_reporter::ProgressReporter;

/// One machine-readable progress line of the batch protocol.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub progress: u8,
    pub status: String,
}

/// Single-writer output channel for the batch protocol.
///
/// The main thread and the progress simulator both write here; the
/// mutex around the sink guarantees whole lines, never interleaved
/// fragments. Progress reporting is best-effort: write errors are
/// logged and swallowed, since a cosmetic signal must not fail the run.
pub struct StdoutChannel {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl StdoutChannel {
    pub fn new(sink: Box<dyn Write + Send>) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    /// Emit the one delimiter-wrapped result line. Unlike progress,
    /// a failed delivery is a real error.
    pub fn deliver(&self, payload: &ResultPayload) -> Result<(), Box<dyn std::error::Error>> {
        let line = delimited_payload::encode(payload)?;
        let mut sink = self.sink.lock().map_err(|_| "output channel poisoned")?;
        writeln!(sink, "{line}")?;
        sink.flush()?;
        Ok(())
    }

    fn write_record(&self, record: &ProgressRecord) -> std::io::Result<()> {
        let line = serde_json::to_string(record)?;
        let mut sink = match self.sink.lock() {
            Ok(sink) => sink,
            Err(poisoned) => poisoned.into_inner(),
        };
        writeln!(sink, "{line}")?;
        sink.flush()
    }
}

impl ProgressReporter for StdoutChannel {
    fn report(&self, percent: u8, status: &str) {
        let record = ProgressRecord {
            progress: percent.min(100),
            status: status.to_string(),
        };
        if let Err(e) = self.write_record(&record) {
            log::warn!("Failed to write progress record: {e}");
        }
    }
}
