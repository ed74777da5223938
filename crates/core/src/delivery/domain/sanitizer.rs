use unicode_normalization::UnicodeNormalization;

/// Accented Latin letters allowed through in addition to printable ASCII.
const ACCENTED: &str = "àáâãäåæçèéêëìíîïñòóôõöøùúûüýÀÁÂÃÄÅÆÇÈÉÊËÌÍÎÏÑÒÓÔÕÖØÙÚÛÜÝ";

/// Make model output safe for a single-line JSON payload on a text
/// channel shared with ordinary log lines.
///
/// In order: NFC normalization, control characters to spaces, smart
/// punctuation to ASCII, restriction to printable ASCII plus a fixed
/// set of accented letters, whitespace-run collapsing. Deterministic
/// and idempotent.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.nfc() {
        if c.is_control() {
            out.push(' ');
            continue;
        }
        match c {
            '\u{2013}' => out.push('-'),        // en dash
            '\u{2014}' => out.push_str("--"),   // em dash
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201c}' | '\u{201d}' => out.push('"'),
            '\u{2026}' => out.push_str("..."),
            '\u{a0}' => out.push(' '),          // non-breaking space
            c if is_allowed(c) => out.push(c),
            _ => {}
        }
    }
    // Collapse whitespace runs and trim the ends
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_graphic() || c == ' ' || ACCENTED.contains(c)
}
