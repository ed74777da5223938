use std::path::{Path, PathBuf};

use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::audio::domain::audio_segment::AudioSegment;
use crate::audio::domain::speech_recognizer::{SpeechRecognizer, TranscribeOptions};
use crate::audio::domain::transcript::{TranscriptSegment, Transcription};

/// Speech recognizer using whisper.cpp via whisper-rs.
///
/// Loads a ggml model from disk and produces segment-level timestamped
/// text. The model file must be resolved (downloaded/cached) beforehand.
#[derive(Debug)]
pub struct WhisperRecognizer {
    model_path: PathBuf,
}

impl WhisperRecognizer {
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if !model_path.exists() {
            return Err(format!("Whisper model not found at: {}", model_path.display()).into());
        }
        Ok(Self {
            model_path: model_path.to_path_buf(),
        })
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl SpeechRecognizer for WhisperRecognizer {
    fn transcribe(
        &self,
        audio: &AudioSegment,
        options: &TranscribeOptions,
    ) -> Result<Transcription, Box<dyn std::error::Error>> {
        let ctx = WhisperContext::new_with_params(
            self.model_path.to_str().ok_or("Invalid model path")?,
            WhisperContextParameters::default(),
        )
        .map_err(|e| format!("Failed to load Whisper model: {e}"))?;

        let mut state = ctx
            .create_state()
            .map_err(|e| format!("Failed to create Whisper state: {e}"))?;

        // "auto" makes whisper.cpp detect the language itself.
        let hint = options.language.as_deref();
        let threads = options.threads.unwrap_or_else(default_threads);

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 0 });
        params.set_language(Some(hint.unwrap_or("auto")));
        params.set_translate(false);
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_n_threads(threads as i32);

        state
            .full(params, audio.samples())
            .map_err(|e| format!("Whisper inference failed: {e}"))?;

        let detected = whisper_rs::get_lang_str(state.full_lang_id_from_state());
        let language = resolve_language(hint, detected);

        let mut segments = Vec::new();
        let mut full_text = String::new();
        let num_segments = state.full_n_segments();

        for seg_idx in 0..num_segments {
            let segment = match state.get_segment(seg_idx) {
                Some(s) => s,
                None => continue,
            };

            let text = match segment.to_str() {
                Ok(t) => t.trim(),
                Err(_) => continue,
            };

            // Skip special markers like [_BEG_] or <|endoftext|>
            if text.is_empty() || text.starts_with('[') || text.starts_with('<') {
                continue;
            }

            // Segment timestamps are in centiseconds (10ms units)
            let start_time = segment.start_timestamp() as f64 / 100.0;
            let end_time = segment.end_timestamp() as f64 / 100.0;
            if end_time <= start_time {
                continue;
            }

            if !full_text.is_empty() {
                full_text.push(' ');
            }
            full_text.push_str(text);

            segments.push(TranscriptSegment {
                start_time,
                end_time,
                text: text.to_string(),
            });
        }

        Ok(Transcription {
            text: full_text,
            language,
            segments,
            audio_duration: audio.duration(),
        })
    }
}

/// Language reported back in the result: the caller's hint when one was
/// given, otherwise whatever the model detected.
fn resolve_language(hint: Option<&str>, detected: Option<&str>) -> String {
    hint.or(detected).unwrap_or("unknown").to_string()
}

/// Device the recognizer runs on, as reported to callers.
pub fn device_label() -> &'static str {
    if cfg!(feature = "cuda") {
        "cuda"
    } else {
        "cpu"
    }
}

/// Half the available cores, at least one. Keeps the host responsive
/// while a long inference run is in flight.
pub fn default_threads() -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    (cores / 2).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_new_nonexistent_path_returns_error() {
        let result = WhisperRecognizer::new(Path::new("/nonexistent/model.bin"));
        assert!(result.is_err());
    }

    #[test]
    fn test_new_nonexistent_path_error_message() {
        let result = WhisperRecognizer::new(Path::new("/nonexistent/model.bin"));
        let err = result.unwrap_err().to_string();
        assert!(
            err.contains("not found"),
            "Expected 'not found' in error, got: {err}"
        );
    }

    #[test]
    fn test_default_threads_is_at_least_one() {
        assert!(default_threads() >= 1);
    }

    #[test]
    fn test_device_label_is_known_value() {
        assert!(matches!(device_label(), "cpu" | "cuda"));
    }

    #[rstest]
    #[case(Some("pt"), Some("en"), "pt")]
    #[case(Some("pt"), None, "pt")]
    #[case(None, Some("en"), "en")]
    #[case(None, None, "unknown")]
    fn test_resolve_language_prefers_hint_then_detection(
        #[case] hint: Option<&str>,
        #[case] detected: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(resolve_language(hint, detected), expected);
    }

    #[test]
    #[ignore] // Requires whisper model file and network on first run
    fn test_transcribe_does_not_crash_on_sine_wave() {
        use crate::audio::domain::model_size::ModelSize;
        use crate::shared::model_resolver;

        let model_path = model_resolver::resolve(ModelSize::Tiny, None, None)
            .expect("Failed to resolve whisper model");
        let recognizer = WhisperRecognizer::new(&model_path).expect("Failed to create recognizer");

        let sample_rate = 16000u32;
        let len = (3.0 * sample_rate as f64) as usize;
        let samples: Vec<f32> = (0..len)
            .map(|i| {
                let t = i as f64 / sample_rate as f64;
                (2.0 * std::f64::consts::PI * 440.0 * t).sin() as f32
            })
            .collect();
        let audio = AudioSegment::new(samples, sample_rate, 1);

        let result = recognizer.transcribe(&audio, &TranscribeOptions::default());
        assert!(result.is_ok(), "Transcription should not error: {result:?}");
        // With no hint, the result carries the detected language, never
        // the "auto" sentinel passed to the model.
        let transcription = result.unwrap();
        assert_ne!(transcription.language, "auto");
        assert!(!transcription.language.is_empty());
    }
}
