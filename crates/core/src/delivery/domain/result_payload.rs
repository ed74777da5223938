use serde::{Deserialize, Serialize};

/// The one structured result a batch run hands to its parent process.
///
/// Text is sanitized before it lands here; everything else is metadata
/// about the run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultPayload {
    pub text: String,
    pub language: String,
    /// RFC 3339 local time at which the run finished.
    pub timestamp: String,
    /// Model size tag, e.g. "base".
    pub model: String,
    /// Source audio duration in seconds.
    pub duration: f64,
    /// Path of the transcript file, when persisting succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_file: Option<String>,
}
