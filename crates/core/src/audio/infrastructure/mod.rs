pub mod whisper_recognizer;
