pub mod formatter_factory;
pub mod json_formatter;
pub mod plain_text_formatter;
pub mod srt_formatter;
pub mod timestamp;
pub mod transcript_store;
pub mod vtt_formatter;
