use super::audio_segment::AudioSegment;
use super::transcript::Transcription;

/// Knobs passed explicitly into one recognition run.
///
/// Thread count lives here rather than in process-wide environment
/// variables so concurrent callers cannot trample each other.
#[derive(Clone, Debug, Default)]
pub struct TranscribeOptions {
    /// ISO 639-1 language hint. None lets the model auto-detect.
    pub language: Option<String>,
    /// Inference threads. None picks a conservative default.
    pub threads: Option<usize>,
}

/// Domain interface for speech-to-text transcription.
///
/// The model is an opaque boundary: audio in, timed text out, may fail.
pub trait SpeechRecognizer: Send {
    fn transcribe(
        &self,
        audio: &AudioSegment,
        options: &TranscribeOptions,
    ) -> Result<Transcription, Box<dyn std::error::Error>>;
}
