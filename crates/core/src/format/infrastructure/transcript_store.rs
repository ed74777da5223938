use std::fs;
use std::path::{Path, PathBuf};

use crate::audio::domain::transcript::Transcription;
use crate::format::domain::output_format::OutputFormat;
use crate::format::infrastructure::formatter_factory::create_formatter;

/// Where and how a finished transcript is written to disk.
#[derive(Clone, Debug)]
pub struct PersistTarget {
    pub dir: PathBuf,
    pub format: OutputFormat,
    /// Batch mode appends a `YYYYMMDD_HHMMSS` timestamp to the file
    /// name so repeated runs never overwrite each other.
    pub timestamped: bool,
}

/// Writes formatted transcripts to disk, creating the target directory
/// on demand.
pub struct TranscriptStore;

impl TranscriptStore {
    pub fn save(
        &self,
        target: &PersistTarget,
        stem: &str,
        transcription: &Transcription,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        fs::create_dir_all(&target.dir)?;

        let file_name = if target.timestamped {
            let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
            format!("{stem}_{timestamp}.{}", target.format.extension())
        } else {
            format!("{stem}_transcription.{}", target.format.extension())
        };
        let path = target.dir.join(file_name);

        let content = create_formatter(target.format).format(transcription)?;
        fs::write(&path, content)?;
        Ok(path)
    }
}
