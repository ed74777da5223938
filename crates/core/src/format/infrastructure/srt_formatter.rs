use std::fmt::Write;

use crate::audio::domain::transcript::Transcription;
use crate::format::domain::transcript_formatter::TranscriptFormatter;
use crate::format::infrastructure::timestamp::srt_timestamp;

/// Renders SubRip: 1-based index, `HH:MM:SS,mmm --> HH:MM:SS,mmm`,
/// text, blank-line separated.
pub struct SrtFormatter;

impl TranscriptFormatter for SrtFormatter {
    fn format(&self, transcription: &Transcription) -> Result<String, Box<dyn std::error::Error>> {
        let mut out = String::new();
        for (index, segment) in transcription.segments.iter().enumerate() {
            writeln!(out, "{}", index + 1)?;
            writeln!(
                out,
                "{} --> {}",
                srt_timestamp(segment.start_time),
                srt_timestamp(segment.end_time)
            )?;
            writeln!(out, "{}", segment.text.trim())?;
            writeln!(out)?;
        }
        Ok(out)
    }
}
