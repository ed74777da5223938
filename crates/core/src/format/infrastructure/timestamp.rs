/// Format seconds as `HH:MM:SS<sep>mmm`, truncating sub-millisecond
/// precision. SubRip uses `,` as the separator, WebVTT uses `.`.
pub fn format_timestamp(seconds: f64, separator: char) -> String {
    let seconds = seconds.max(0.0);
    let hours = (seconds / 3600.0) as u64;
    let minutes = ((seconds % 3600.0) / 60.0) as u64;
    let secs = (seconds % 60.0) as u64;
    let millis = ((seconds % 1.0) * 1000.0) as u64;
    format!("{hours:02}:{minutes:02}:{secs:02}{separator}{millis:03}")
}

pub fn srt_timestamp(seconds: f64) -> String {
    format_timestamp(seconds, ',')
}

pub fn vtt_timestamp(seconds: f64) -> String {
    format_timestamp(seconds, '.')
}
