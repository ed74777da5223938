/// Sample rate the Whisper models expect.
pub const WHISPER_SAMPLE_RATE: u32 = 16000;

/// whisper.cpp ggml weights mirror; file names come from `ModelSize`.
pub const WHISPER_MODEL_BASE_URL: &str =
    "https://huggingface.co/ggerganov/whisper.cpp/resolve/main";

pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mkv", "mov", "wmv", "flv", "webm", "m4v"];

/// Marker wrapped around the base64 result line on stdout so a parent
/// process can locate it among interleaved progress/log lines.
pub const RESULT_DELIMITER: &str = "===TRANSCRIPTION_RESULT_B64===";

/// Default directory (relative to cwd) for batch-mode transcripts.
pub const TRANSCRIPTIONS_DIR: &str = "transcriptions";
