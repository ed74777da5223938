pub mod output_format;
pub mod transcript_formatter;
