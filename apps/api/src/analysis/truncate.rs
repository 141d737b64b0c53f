/// Character budget for résumé text forwarded to the completion API.
pub const MAX_RESUME_CHARS: usize = 8000;

/// Appended when text is cut.
pub const TRUNCATION_MARKER: &str = "...";

/// Returns `text` unchanged when it has at most `max_chars` characters,
/// otherwise its first `max_chars` characters followed by [`TRUNCATION_MARKER`].
///
/// Counts Unicode scalar values, so a cut never splits a character.
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((cut, _)) => {
            let mut out = String::with_capacity(cut + TRUNCATION_MARKER.len());
            out.push_str(&text[..cut]);
            out.push_str(TRUNCATION_MARKER);
            out
        }
    }
}
