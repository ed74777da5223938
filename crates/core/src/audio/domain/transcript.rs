use serde::{Deserialize, Serialize};

/// A timed span of transcript text, offsets in seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    #[serde(rename = "start")]
    pub start_time: f64,
    #[serde(rename = "end")]
    pub end_time: f64,
    pub text: String,
}

impl TranscriptSegment {
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// Complete output of one recognition run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    pub text: String,
    pub language: String,
    pub segments: Vec<TranscriptSegment>,
    /// Wall-clock length of the source audio in seconds.
    pub audio_duration: f64,
}

impl Transcription {
    /// True when the run produced no usable text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
