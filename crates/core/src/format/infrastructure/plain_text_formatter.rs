use crate::audio::domain::transcript::Transcription;
use crate::format::domain::transcript_formatter::TranscriptFormatter;

/// Renders the raw transcript text, nothing else.
pub struct PlainTextFormatter;

impl TranscriptFormatter for PlainTextFormatter {
    fn format(&self, transcription: &Transcription) -> Result<String, Box<dyn std::error::Error>> {
        Ok(transcription.text.clone())
    }
}
