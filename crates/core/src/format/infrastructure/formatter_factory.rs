use crate::format::domain::output_format::OutputFormat;
use crate::format::domain::transcript_formatter::TranscriptFormatter;
use crate::format::infrastructure::json_formatter::JsonFormatter;
use crate::format::infrastructure::plain_text_formatter::PlainTextFormatter;
use crate::format::infrastructure::srt_formatter::SrtFormatter;
use crate::format::infrastructure::vtt_formatter::VttFormatter;

pub fn create_formatter(format: OutputFormat) -> Box<dyn TranscriptFormatter> {
    match format {
        OutputFormat::Txt => Box::new(PlainTextFormatter),
        OutputFormat::Srt => Box::new(SrtFormatter),
        OutputFormat::Vtt => Box::new(VttFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
