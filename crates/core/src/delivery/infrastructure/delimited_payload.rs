use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;

use crate::delivery::domain::result_payload::ResultPayload;
use crate::shared::constants::RESULT_DELIMITER;

#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("failed to serialize result: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("no result delimiter found in stream")]
    MissingDelimiter,
    #[error("result delimiter is not terminated")]
    Unterminated,
    #[error("invalid base64 in payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("failed to parse result JSON: {0}")]
    Parse(#[source] serde_json::Error),
}

/// Encode a result as one delimiter-wrapped base64 line.
///
/// The payload is compact JSON, base64-encoded so embedded newlines,
/// quotes, or JSON-special characters in the transcript cannot
/// desynchronize a line-oriented reader, then wrapped on both sides
/// with the fixed delimiter. The caller is assumed never to print the
/// delimiter string anywhere else in the stream.
pub fn encode(payload: &ResultPayload) -> Result<String, PayloadError> {
    let json = serde_json::to_string(payload).map_err(PayloadError::Serialize)?;
    let b64 = STANDARD.encode(json.as_bytes());
    Ok(format!("{RESULT_DELIMITER}{b64}{RESULT_DELIMITER}"))
}

/// Extract the first delimiter-wrapped payload from a stream of text
/// that may also contain progress records and free-form log lines.
pub fn extract(stream: &str) -> Result<ResultPayload, PayloadError> {
    let start = stream
        .find(RESULT_DELIMITER)
        .ok_or(PayloadError::MissingDelimiter)?
        + RESULT_DELIMITER.len();
    let end = stream[start..]
        .find(RESULT_DELIMITER)
        .ok_or(PayloadError::Unterminated)?
        + start;

    let bytes = STANDARD.decode(stream[start..end].trim())?;
    let json = String::from_utf8(bytes)?;
    serde_json::from_str(&json).map_err(PayloadError::Parse)
}
