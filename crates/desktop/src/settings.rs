use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use vidscribe_core::audio::domain::model_size::ModelSize;
use vidscribe_core::format::domain::output_format::OutputFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Portuguese,
    English,
    Spanish,
    French,
    German,
    Italian,
    Japanese,
    Korean,
    Chinese,
    Russian,
    Auto,
}

impl Language {
    pub const ALL: &[Language] = &[
        Language::Portuguese,
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Italian,
        Language::Japanese,
        Language::Korean,
        Language::Chinese,
        Language::Russian,
        Language::Auto,
    ];

    /// ISO 639-1 code passed to the recognizer; None lets it detect.
    pub fn code(self) -> Option<&'static str> {
        match self {
            Language::Portuguese => Some("pt"),
            Language::English => Some("en"),
            Language::Spanish => Some("es"),
            Language::French => Some("fr"),
            Language::German => Some("de"),
            Language::Italian => Some("it"),
            Language::Japanese => Some("ja"),
            Language::Korean => Some("ko"),
            Language::Chinese => Some("zh"),
            Language::Russian => Some("ru"),
            Language::Auto => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Language::Portuguese => "Portuguese (Brazil)",
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Italian => "Italian",
            Language::Japanese => "Japanese",
            Language::Korean => "Korean",
            Language::Chinese => "Chinese",
            Language::Russian => "Russian",
            Language::Auto => "Auto-detect",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub model: ModelSize,
    pub language: Language,
    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: ModelSize::Base,
            language: Language::Portuguese,
            format: OutputFormat::Txt,
        }
    }
}

impl Settings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("VidScribe").join("settings.json"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| fs::read_to_string(path).ok())
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }

    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            if let Ok(json) = serde_json::to_string_pretty(self) {
                let _ = fs::write(path, json);
            }
        }
    }
}
