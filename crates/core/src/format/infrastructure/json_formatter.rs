use crate::audio::domain::transcript::Transcription;
use crate::format::domain::transcript_formatter::TranscriptFormatter;

/// Serializes the full transcription (text, language, segments,
/// duration) as pretty-printed JSON.
pub struct JsonFormatter;

impl TranscriptFormatter for JsonFormatter {
    fn format(&self, transcription: &Transcription) -> Result<String, Box<dyn std::error::Error>> {
        Ok(serde_json::to_string_pretty(transcription)?)
    }
}
