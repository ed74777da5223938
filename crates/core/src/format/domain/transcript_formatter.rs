use crate::audio::domain::transcript::Transcription;

/// Domain interface for rendering a transcription into a text format.
pub trait TranscriptFormatter: Send {
    fn format(&self, transcription: &Transcription) -> Result<String, Box<dyn std::error::Error>>;
}
