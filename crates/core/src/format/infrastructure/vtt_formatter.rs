use std::fmt::Write;

use crate::audio::domain::transcript::Transcription;
use crate::format::domain::transcript_formatter::TranscriptFormatter;
use crate::format::infrastructure::timestamp::vtt_timestamp;

/// Renders WebVTT: `WEBVTT` header, then `HH:MM:SS.mmm --> HH:MM:SS.mmm`
/// cues, blank-line separated. No cue numbers.
pub struct VttFormatter;

impl TranscriptFormatter for VttFormatter {
    fn format(&self, transcription: &Transcription) -> Result<String, Box<dyn std::error::Error>> {
        let mut out = String::from("WEBVTT\n\n");
        for segment in &transcription.segments {
            writeln!(
                out,
                "{} --> {}",
                vtt_timestamp(segment.start_time),
                vtt_timestamp(segment.end_time)
            )?;
            writeln!(out, "{}", segment.text.trim())?;
            writeln!(out)?;
        }
        Ok(out)
    }
}
