use serde::{Deserialize, Serialize};

/// Target file format for a finished transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Txt,
    Srt,
    Vtt,
    Json,
}

impl OutputFormat {
    pub const ALL: &[OutputFormat] = &[
        OutputFormat::Txt,
        OutputFormat::Srt,
        OutputFormat::Vtt,
        OutputFormat::Json,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Txt => "txt",
            OutputFormat::Srt => "srt",
            OutputFormat::Vtt => "vtt",
            OutputFormat::Json => "json",
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Txt
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Txt => write!(f, "Plain Text (.txt)"),
            OutputFormat::Srt => write!(f, "SubRip (.srt)"),
            OutputFormat::Vtt => write!(f, "WebVTT (.vtt)"),
            OutputFormat::Json => write!(f, "JSON (.json)"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "txt" => Ok(OutputFormat::Txt),
            "srt" => Ok(OutputFormat::Srt),
            "vtt" => Ok(OutputFormat::Vtt),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "Format must be one of: txt, srt, vtt, json, got '{other}'"
            )),
        }
    }
}
