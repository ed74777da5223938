use serde::{Deserialize, Serialize};

use crate::shared::constants::WHISPER_MODEL_BASE_URL;

/// Whisper model size. Larger models are more accurate but slower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelSize {
    Tiny,
    Base,
    Small,
    Medium,
    Large,
}

impl ModelSize {
    pub const ALL: &[ModelSize] = &[
        ModelSize::Tiny,
        ModelSize::Base,
        ModelSize::Small,
        ModelSize::Medium,
        ModelSize::Large,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            ModelSize::Tiny => "tiny",
            ModelSize::Base => "base",
            ModelSize::Small => "small",
            ModelSize::Medium => "medium",
            ModelSize::Large => "large",
        }
    }

    /// Rough processing-time multiplier: estimated inference time is
    /// audio duration times this factor. Calibrated for CPU inference.
    pub fn time_multiplier(self) -> f64 {
        match self {
            ModelSize::Tiny => 0.1,
            ModelSize::Base => 0.2,
            ModelSize::Small => 0.4,
            ModelSize::Medium => 0.8,
            ModelSize::Large => 1.5,
        }
    }

    /// File name of the ggml weights for this size.
    pub fn model_file_name(self) -> String {
        format!("ggml-{}.bin", self.tag())
    }

    /// Download URL for the ggml weights (whisper.cpp Hugging Face mirror).
    pub fn model_url(self) -> String {
        format!("{WHISPER_MODEL_BASE_URL}/{}", self.model_file_name())
    }
}

impl Default for ModelSize {
    fn default() -> Self {
        ModelSize::Base
    }
}

impl std::fmt::Display for ModelSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl std::str::FromStr for ModelSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tiny" => Ok(ModelSize::Tiny),
            "base" => Ok(ModelSize::Base),
            "small" => Ok(ModelSize::Small),
            "medium" => Ok(ModelSize::Medium),
            "large" => Ok(ModelSize::Large),
            other => Err(format!(
                "Model must be one of: tiny, base, small, medium, large, got '{other}'"
            )),
        }
    }
}
